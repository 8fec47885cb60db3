use std::cell::RefCell;
use std::rc::Rc;

use crate::cancel::CancelToken;
use crate::error::{FetchError, RouteError};
use crate::page::Page;
use crate::sprintln;

/// Fixed inline block shown in place of a fragment that failed to load.
pub const FALLBACK_FRAGMENT: &str = "<section class=\"content-section\"><h2>Error</h2><p>Failed to load page. Please try again.</p></section>";

/// The collaborators the router drives.
///
/// Everything the router touches outside its own state goes through this
/// seam: the location, the fragment resource, the content container, the
/// nav highlight and the document title. The wasm backend implements it
/// with web-sys; tests implement it with a scriptable mock.
#[allow(async_fn_in_trait)]
pub trait RouterBackend {
    /// Current location fragment identifier, without the leading `#`.
    fn location_hash(&self) -> Option<String>;

    /// Write the location fragment. In a browser this fires the
    /// location-change event, which re-enters routing on its own.
    fn push_hash(&self, page: Page);

    /// Cancellable GET of a fragment resource, returning its raw HTML.
    async fn fetch_fragment(
        &self,
        path: &'static str,
        cancel: CancelToken,
    ) -> Result<String, FetchError>;

    /// Wholesale-replace the content container with `html`.
    fn replace_content(&self, html: &str);

    /// Mark exactly the nav element for `page` active.
    fn highlight_nav(&self, page: Page);

    /// Set the document title.
    fn set_title(&self, title: &str);

    /// Idempotently rebind handlers scoped to freshly injected content.
    fn bind_page_events(&self, page: Page, router: &Router<Self>)
    where
        Self: Sized;
}

/// Mutable routing state. One instance per session, created at startup and
/// torn down implicitly with the page.
#[derive(Default)]
struct RouterState {
    /// Most recently *requested* page; a cancelled request does not roll
    /// this back.
    current_page: Option<Page>,
    /// A fragment fetch is outstanding.
    loading: bool,
    /// Handle for the in-flight fetch. At most one live at a time,
    /// exclusively owned here, replaced (never shared) on each navigation.
    cancel: Option<CancelToken>,
}

/// Hash-fragment router: resolves the location to a page, loads the
/// matching fragment, cancels superseded loads, updates nav/title state,
/// injects the fragment and rebinds fragment-scoped handlers.
///
/// Cloning yields another handle onto the same router; event closures keep
/// one each. All futures are `!Send` and run on one logical thread, so
/// correctness relies on re-checking the target page after every await
/// rather than on locks.
pub struct Router<B: RouterBackend> {
    backend: Rc<B>,
    state: Rc<RefCell<RouterState>>,
}

impl<B: RouterBackend> Clone for Router<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Rc::clone(&self.backend),
            state: Rc::clone(&self.state),
        }
    }
}

impl<B: RouterBackend> Router<B> {
    pub fn new(backend: Rc<B>) -> Self {
        Self {
            backend,
            state: Rc::new(RefCell::new(RouterState::default())),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The page currently displayed or being loaded.
    pub fn current_page(&self) -> Option<Page> {
        self.state.borrow().current_page
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Read the location fragment; empty or unset resolves to home. Pure,
    /// no side effects.
    pub fn resolve_current_page(&self) -> Result<Page, RouteError> {
        let hash = self.backend.location_hash();
        Page::from_hash(hash.as_deref())
    }

    /// Navigate to `page`, unless it is already the settled current page.
    ///
    /// Safe under rapid duplicate calls: re-requesting the page that is
    /// already loading is a no-op inside [`Router::handle_route`].
    pub async fn navigate_to(&self, page: Page) {
        {
            let state = self.state.borrow();
            if state.current_page == Some(page) && !state.loading {
                return;
            }
        }
        self.backend.push_hash(page);
        self.handle_route().await;
    }

    /// Core driver, run at startup and on every location change (hash
    /// navigation and browser back/forward alike).
    pub async fn handle_route(&self) {
        let page = match self.resolve_current_page() {
            Ok(page) => page,
            Err(err) => {
                sprintln!("{err}");
                return;
            }
        };

        {
            let state = self.state.borrow();
            // Idempotent re-click: this page is already on its way in.
            if state.loading && state.current_page == Some(page) {
                return;
            }
        }

        {
            let mut state = self.state.borrow_mut();
            state.loading = true;
            state.current_page = Some(page);
        }

        self.backend.highlight_nav(page);
        self.backend.set_title(page.title());

        let (content, token) = self.load_fragment(page).await;

        // A newer navigation may have started while we were suspended;
        // only the fetch for the still-current target may touch the DOM.
        let still_current = self.state.borrow().current_page == Some(page);
        if still_current {
            if let Some(html) = content {
                self.backend.replace_content(&html);
                self.backend.bind_page_events(page, self);
            }
        }

        let mut state = self.state.borrow_mut();
        let most_recent = state
            .cancel
            .as_ref()
            .map(|current| current.same_token(&token))
            .unwrap_or(false);
        if most_recent {
            state.loading = false;
            state.cancel = None;
        }
    }

    /// Fetch the fragment for `page`, cancelling any previously active
    /// fetch first.
    ///
    /// Cancellation of this fetch itself yields no content and no error;
    /// a failed fetch yields the fallback error block so the caller can
    /// finish the transition uniformly. The returned token identifies this
    /// fetch at settlement time.
    async fn load_fragment(&self, page: Page) -> (Option<String>, CancelToken) {
        let path = page.fragment_path();
        let token = CancelToken::new();
        // Take ownership of the old handle first; its hook must not run
        // while the state is borrowed.
        let previous = self.state.borrow_mut().cancel.replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        let content = match self.backend.fetch_fragment(path, token.clone()).await {
            Ok(html) => Some(html),
            Err(err) if err.is_aborted() => None,
            Err(err) => {
                sprintln!("Error loading {path}: {err}");
                Some(FALLBACK_FRAGMENT.to_string())
            }
        };
        (content, token)
    }
}
