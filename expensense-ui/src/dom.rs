//! DOM helpers
//!
//! Element lookup, cookie access and page configuration.

use leptos::logging::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlDocument, HtmlElement};

use expensense::{ClientConfig, ClientError, ClientResult};

/// ID of the optional `json_script` block carrying a [`ClientConfig`]
pub const CONFIG_ELEMENT_ID: &str = "expensense-config";

/// The current page's document
pub fn document() -> ClientResult<Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ClientError::Dom("no document available".to_string()))
}

/// Look up an element by ID and cast it. `Ok(None)` when the page does not
/// have it; an error when it exists with the wrong type.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> ClientResult<Option<T>> {
    match document.get_element_by_id(id) {
        None => Ok(None),
        Some(element) => element
            .dyn_into::<T>()
            .map(Some)
            .map_err(|_| ClientError::Dom(format!("#{} has an unexpected element type", id))),
    }
}

/// Like [`element_by_id`] but a missing element is an error too
pub fn require_by_id<T: JsCast>(document: &Document, id: &str) -> ClientResult<T> {
    element_by_id(document, id)?.ok_or_else(|| ClientError::Dom(format!("#{} not found", id)))
}

/// First element matching a CSS selector
pub fn query_html_element(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

/// Set an element's inline `display`
pub fn set_display(element: &HtmlElement, value: &str) {
    if let Err(e) = element.style().set_property("display", value) {
        warn!("Failed to set display: {}", describe_js_error(&e));
    }
}

/// Raw `document.cookie`, empty when unavailable
pub fn cookie_header(document: &Document) -> String {
    document
        .dyn_ref::<HtmlDocument>()
        .and_then(|html| html.cookie().ok())
        .unwrap_or_default()
}

/// Configuration embedded in the page, or defaults.
///
/// Does not read the CSRF cookie; see [`ClientConfig::with_cookie_header`].
pub fn page_config(document: &Document) -> ClientConfig {
    let content = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());

    let (config, err) = ClientConfig::from_json_or_default(content.as_deref());
    if let Some(e) = err {
        warn!("{}; using defaults", e);
    }
    config
}

/// Best-effort message for a thrown JS value
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Convert a client error into a JS exception
pub fn to_js_error(err: ClientError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
