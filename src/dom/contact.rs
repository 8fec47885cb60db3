//! Contact-form collaborator: reads the submitted fields, delivers them
//! through the EmailJS transactional-mail REST endpoint and drives the
//! submit button's state while the call is in flight.

use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
};

use crate::error::ContactError;
use crate::sprintln;

/// Id of the form element inside the contact fragment.
pub const FORM_ID: &str = "contact-form";

const ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
const SERVICE_ID: &str = "service_57pebrt";
const TEMPLATE_ID: &str = "template_7o0auxk";
const CLIENT_KEY: &str = "jUTBgtI2ylhcKwnSG";

/// The submit button returns to its idle label after this delay.
const RESET_DELAY_MS: i32 = 2_000;

const SENDING_LABEL: &str = "Sending...";
const SUCCESS_LABEL: &str = "Message Successfully Received";
const FAILURE_LABEL: &str = "Error - Try Again";
const SUCCESS_COLOR: &str = "#28a745";
const FAILURE_COLOR: &str = "#dc3545";
const SUCCESS_ALERT: &str =
    "Thank you for your message! I will get back to you as soon as possible.";
const FAILURE_ALERT: &str =
    "Sorry, there was an error sending your message. Please try again later.";

/// Template parameters; the field names must match the EmailJS template.
#[derive(Debug, Serialize)]
struct TemplateParams {
    name: String,
    message: String,
    time: String,
    from_email: String,
    subject: String,
}

#[derive(Serialize)]
struct DeliveryRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams,
}

/// Submit handler bound (idempotently) whenever the contact fragment is
/// injected.
pub fn handle_submit(document: &Document, event: Event) {
    event.prevent_default();

    let form: HtmlFormElement = match event
        .target()
        .and_then(|target| target.dyn_into::<HtmlFormElement>().ok())
    {
        Some(form) => form,
        None => {
            sprintln!("contact submit fired without a form target");
            return;
        }
    };

    let params = match read_params(document) {
        Ok(params) => params,
        Err(err) => {
            sprintln!("contact form incomplete: {err}");
            return;
        }
    };

    let button: HtmlButtonElement = match form
        .query_selector("button[type=\"submit\"]")
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into().ok())
    {
        Some(button) => button,
        None => {
            sprintln!("contact form has no submit button");
            return;
        }
    };

    let idle_label = button.text_content();
    button.set_disabled(true);
    button.set_text_content(Some(SENDING_LABEL));

    wasm_bindgen_futures::spawn_local(async move {
        match deliver(params).await {
            Ok(()) => {
                show_outcome(&button, SUCCESS_LABEL, SUCCESS_COLOR);
                alert(SUCCESS_ALERT);
                form.reset();
            }
            Err(err) => {
                sprintln!("EmailJS error: {err}");
                show_outcome(&button, FAILURE_LABEL, FAILURE_COLOR);
                alert(FAILURE_ALERT);
            }
        }
        schedule_reset(button, idle_label);
    });
}

fn read_params(document: &Document) -> Result<TemplateParams, ContactError> {
    Ok(TemplateParams {
        name: input_value(document, "name")?,
        message: textarea_value(document, "message")?,
        time: String::from(
            js_sys::Date::new_0().to_locale_string("en-US", &JsValue::UNDEFINED),
        ),
        from_email: input_value(document, "email")?,
        subject: input_value(document, "subject")?,
    })
}

fn input_value(document: &Document, id: &'static str) -> Result<String, ContactError> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .ok_or(ContactError::MissingField(id))
}

fn textarea_value(document: &Document, id: &'static str) -> Result<String, ContactError> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlTextAreaElement>().ok())
        .map(|area| area.value())
        .ok_or(ContactError::MissingField(id))
}

async fn deliver(params: TemplateParams) -> Result<(), ContactError> {
    let request = DeliveryRequest {
        service_id: SERVICE_ID,
        template_id: TEMPLATE_ID,
        user_id: CLIENT_KEY,
        template_params: params,
    };
    let response = reqwest::Client::new()
        .post(ENDPOINT)
        .json(&request)
        .send()
        .await
        .map_err(|err| ContactError::Delivery(err.to_string()))?;
    if !response.status().is_success() {
        return Err(ContactError::Delivery(format!(
            "status {}",
            response.status()
        )));
    }
    Ok(())
}

fn show_outcome(button: &HtmlButtonElement, label: &str, color: &str) {
    button.set_text_content(Some(label));
    if let Err(err) = button.style().set_property("background-color", color) {
        sprintln!("failed to style submit button: {err:?}");
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

fn schedule_reset(button: HtmlButtonElement, idle_label: Option<String>) {
    let window = match web_sys::window() {
        Some(window) => window,
        None => return,
    };
    let closure = Closure::<dyn FnMut()>::new(move || {
        button.set_disabled(false);
        button.set_text_content(idle_label.as_deref());
        let _ = button.style().remove_property("background-color");
    });
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            RESET_DELAY_MS,
        )
        .is_err()
    {
        sprintln!("failed to schedule submit button reset");
    }
    closure.forget();
}
