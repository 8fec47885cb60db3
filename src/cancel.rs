use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Ownership handle for one in-flight fragment fetch.
///
/// The router owns exactly one live token at a time; acquiring a new one
/// implies cancelling the previous one. Clones share the same underlying
/// token so the transport side can observe a cancel issued by the router.
///
/// Cancellation is cooperative and best-effort: `cancel()` flips a sticky
/// flag and fires the registered transport hook (for the DOM backend, an
/// `AbortController::abort()`), but a result may still arrive afterwards.
/// Callers therefore re-check page identity after every suspension point.
pub struct CancelToken {
    inner: Rc<Inner>,
}

struct Inner {
    cancelled: Cell<bool>,
    hook: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                cancelled: Cell::new(false),
                hook: RefCell::new(None),
            }),
        }
    }

    /// Cancel the fetch this token guards. Idempotent; the hook fires at
    /// most once.
    pub fn cancel(&self) {
        if self.inner.cancelled.replace(true) {
            return;
        }
        let hook = self.inner.hook.borrow_mut().take();
        if let Some(hook) = hook {
            hook();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    /// Register the transport-side abort hook. If the token is already
    /// cancelled the hook fires immediately.
    pub fn on_cancel(&self, hook: impl FnOnce() + 'static) {
        if self.is_cancelled() {
            hook();
            return;
        }
        *self.inner.hook.borrow_mut() = Some(Box::new(hook));
    }

    /// Whether two handles refer to the same token. The router uses this
    /// to recognize the most recently issued fetch at settlement time.
    pub fn same_token(&self, other: &CancelToken) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Clone for CancelToken {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
