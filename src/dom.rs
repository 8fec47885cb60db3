//! Browser glue: the web-sys implementation of every router collaborator,
//! plus the startup wiring that subscribes routing to location changes.

pub mod contact;

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, Document, Element, Event, EventTarget, RequestInit, Response, Window,
};

use crate::bindings::BindingRegistry;
use crate::cancel::CancelToken;
use crate::error::FetchError;
use crate::page::Page;
use crate::router::{Router, RouterBackend};
use crate::sprintln;

/// Id of the container whose content is wholesale-replaced per navigation.
pub const CONTENT_CONTAINER_ID: &str = "app-content";
/// Marker attribute carried by every in-page navigation element.
pub const PAGE_ATTR: &str = "data-page";

const NAV_LINK_SELECTOR: &str = ".nav-link";
const ACTIVE_CLASS: &str = "active";
/// Clicks following another within this window are dropped.
const CLICK_DEBOUNCE_MS: f64 = 150.0;

const PAGE_LINKS_KEY: &str = "page-links";
const CONTACT_FORM_KEY: &str = "contact-form";

/// One revocable DOM listener registration. Dropping it detaches the
/// listener, which is what makes rebinding through the registry idempotent.
pub struct DomListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl DomListener {
    pub fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// web-sys backend for [`Router`]: location, fetch, content sink, nav
/// highlight and title live here.
pub struct DomBackend {
    window: Window,
    document: Document,
    bindings: BindingRegistry<DomListener>,
    last_click_ms: Cell<f64>,
}

impl DomBackend {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document on window"))?;
        Ok(Self {
            window,
            document,
            bindings: BindingRegistry::new(),
            last_click_ms: Cell::new(0.0),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn elements(&self, selector: &str) -> Vec<Element> {
        let mut found = Vec::new();
        if let Ok(list) = self.document.query_selector_all(selector) {
            for index in 0..list.length() {
                if let Some(element) = list.item(index).and_then(|node| node.dyn_into::<Element>().ok()) {
                    found.push(element);
                }
            }
        }
        found
    }

    /// Drop nav clicks that arrive in quick bursts.
    fn accept_click(&self) -> bool {
        let now = js_sys::Date::now();
        if now - self.last_click_ms.get() < CLICK_DEBOUNCE_MS {
            return false;
        }
        self.last_click_ms.set(now);
        true
    }
}

impl RouterBackend for DomBackend {
    fn location_hash(&self) -> Option<String> {
        let hash = self.window.location().hash().ok()?;
        Some(hash.trim_start_matches('#').to_string())
    }

    fn push_hash(&self, page: Page) {
        if let Err(err) = self.window.location().set_hash(page.name()) {
            sprintln!("failed to update location hash: {err:?}");
        }
    }

    async fn fetch_fragment(
        &self,
        path: &'static str,
        cancel: CancelToken,
    ) -> Result<String, FetchError> {
        let controller = AbortController::new().map_err(js_transport)?;
        {
            let controller = controller.clone();
            cancel.on_cancel(move || controller.abort());
        }

        let init = RequestInit::new();
        init.set_method("GET");
        init.set_signal(Some(&controller.signal()));

        let fetched = JsFuture::from(self.window.fetch_with_str_and_init(path, &init)).await;
        let response: Response = match fetched {
            Ok(value) => value.dyn_into().map_err(js_transport)?,
            Err(err) => {
                if cancel.is_cancelled() {
                    return Err(FetchError::Aborted);
                }
                return Err(js_transport(err));
            }
        };

        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }

        let text = JsFuture::from(response.text().map_err(js_transport)?)
            .await
            .map_err(|err| {
                if cancel.is_cancelled() {
                    FetchError::Aborted
                } else {
                    js_transport(err)
                }
            })?;
        Ok(text.as_string().unwrap_or_default())
    }

    fn replace_content(&self, html: &str) {
        match self.document.get_element_by_id(CONTENT_CONTAINER_ID) {
            Some(container) => container.set_inner_html(html),
            None => sprintln!("content container #{CONTENT_CONTAINER_ID} is missing"),
        }
    }

    fn highlight_nav(&self, page: Page) {
        for link in self.elements(NAV_LINK_SELECTOR) {
            let _ = link.class_list().remove_1(ACTIVE_CLASS);
        }
        let selector = format!("{}[{}=\"{}\"]", NAV_LINK_SELECTOR, PAGE_ATTR, page.name());
        if let Ok(Some(link)) = self.document.query_selector(&selector) {
            let _ = link.class_list().add_1(ACTIVE_CLASS);
        }
    }

    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }

    fn bind_page_events(&self, page: Page, router: &Router<Self>) {
        let mut listeners = Vec::new();
        for link in self.elements(&format!("[{}]", PAGE_ATTR)) {
            let target = match link.get_attribute(PAGE_ATTR) {
                Some(name) => match Page::from_name(&name) {
                    Ok(target) => target,
                    Err(err) => {
                        sprintln!("{err}");
                        continue;
                    }
                },
                None => continue,
            };

            let router = router.clone();
            let attached = DomListener::attach(link.as_ref(), "click", move |event: Event| {
                event.prevent_default();
                if !router.backend().accept_click() {
                    return;
                }
                let router = router.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    router.navigate_to(target).await;
                });
            });
            match attached {
                Ok(listener) => listeners.push(listener),
                Err(err) => sprintln!("failed to bind page link: {err:?}"),
            }
        }
        self.bindings.rebind(PAGE_LINKS_KEY, listeners);

        if page == Page::Contact {
            match self.document.get_element_by_id(contact::FORM_ID) {
                Some(form) => {
                    let document = self.document.clone();
                    let attached = DomListener::attach(form.as_ref(), "submit", move |event| {
                        contact::handle_submit(&document, event);
                    });
                    match attached {
                        Ok(listener) => self.bindings.rebind(CONTACT_FORM_KEY, vec![listener]),
                        Err(err) => sprintln!("failed to bind contact form: {err:?}"),
                    }
                }
                None => sprintln!("contact fragment has no #{} form", contact::FORM_ID),
            }
        }
    }
}

fn js_transport(err: JsValue) -> FetchError {
    FetchError::Transport(format!("{err:?}"))
}

/// Construct the backend and router, subscribe to location changes and
/// run the initial route. Called once from [`crate::start`].
pub fn boot() -> Result<(), JsValue> {
    let backend = Rc::new(DomBackend::new()?);
    let router = Router::new(Rc::clone(&backend));

    // Browser back/forward and hash navigation both mean "location
    // changed, re-run routing". The listeners live for the whole session.
    for event in ["hashchange", "popstate"] {
        let handler = router.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let handler = handler.clone();
            wasm_bindgen_futures::spawn_local(async move {
                handler.handle_route().await;
            });
        });
        backend
            .window()
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // The static header links exist before any fragment is injected;
    // fragment-scoped handlers are rebound again after each injection.
    backend.bind_page_events(Page::Home, &router);

    wasm_bindgen_futures::spawn_local(async move {
        router.handle_route().await;
    });
    Ok(())
}
