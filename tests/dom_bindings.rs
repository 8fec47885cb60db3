//! In-browser checks for the listener-rebinding contract: rebinding the
//! same content twice must leave exactly one live handler per element.

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use coral_portfolio::bindings::BindingRegistry;
use coral_portfolio::dom::DomListener;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn test_button() -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let button: HtmlElement = document
        .create_element("button")
        .unwrap()
        .dyn_into()
        .unwrap();
    document.body().unwrap().append_child(&button).unwrap();
    button
}

#[wasm_bindgen_test]
fn rebinding_twice_fires_one_handler_per_click() {
    let button = test_button();
    let clicks = Rc::new(Cell::new(0));
    let registry = BindingRegistry::new();

    for _ in 0..2 {
        let clicks = Rc::clone(&clicks);
        let listener = DomListener::attach(button.as_ref(), "click", move |_| {
            clicks.set(clicks.get() + 1);
        })
        .unwrap();
        registry.rebind("button", vec![listener]);
    }

    button.click();
    assert_eq!(clicks.get(), 1);

    button.remove();
}

#[wasm_bindgen_test]
fn dropping_a_listener_detaches_it() {
    let button = test_button();
    let clicks = Rc::new(Cell::new(0));

    {
        let clicks = Rc::clone(&clicks);
        let _listener = DomListener::attach(button.as_ref(), "click", move |_| {
            clicks.set(clicks.get() + 1);
        })
        .unwrap();
        button.click();
    }

    button.click();
    assert_eq!(clicks.get(), 1);

    button.remove();
}
