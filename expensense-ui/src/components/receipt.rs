//! Receipt Scanner
//!
//! Uploads the selected receipt to the OCR endpoint and fills the amount and
//! date fields from the answer.

use leptos::logging::{error, log, warn};
use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, File, HtmlElement, HtmlInputElement};

use expensense::{ClientError, ClientResult, ElementIds, FormUpdate};

use crate::api;
use crate::components::loading::{bind_busy, bind_loader};
use crate::components::notice::ReceiptNotice;
use crate::dom::{describe_js_error, query_html_element, require_by_id};
use crate::state::FormState;

/// Wire the receipt input on the current page
pub fn attach(state: FormState, document: &Document, input: HtmlInputElement) -> ClientResult<()> {
    match query_html_element(document, &state.config.elements.loader_selector) {
        Some(loader) => bind_loader(&state, loader),
        None => warn!(
            "Loader `{}` not found; uploads will run without it",
            state.config.elements.loader_selector
        ),
    }

    bind_busy(state.ocr, input.clone().into());

    if let Some(parent) = input
        .parent_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let notice = state.notice;
        mount_to(parent, move || view! { <ReceiptNotice message=notice /> });
    }

    let input_ref = input.clone();
    let document = document.clone();
    let on_change = Closure::wrap(Box::new(move |_: Event| {
        // Cleared selection: nothing to scan
        let Some(file) = input_ref.files().and_then(|files| files.get(0)) else {
            return;
        };

        let state = state.clone();
        let document = document.clone();
        wasm_bindgen_futures::spawn_local(async move {
            scan_receipt(&state, &document, file).await;
        });
    }) as Box<dyn FnMut(Event)>);

    input
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .map_err(|e| ClientError::Dom(describe_js_error(&e)))?;
    on_change.forget();

    Ok(())
}

/// Upload one file and apply the answer if it is still the latest
pub async fn scan_receipt(state: &FormState, document: &Document, file: File) {
    let ticket = state.begin_upload();

    let outcome = match api::upload_receipt(&state.config, &file).await {
        Ok(result) if state.is_current_upload(ticket) => {
            log!("Success: {:?}", result);
            apply_form_update(document, &state.config.elements, &result.form_update())
                .map_err(|e| e.to_string())
        }
        Ok(_) => Ok(()),
        Err(e) => {
            error!("Error calling the API: {}", e);
            Err(e.to_string())
        }
    };

    if !state.finish_upload(ticket, outcome) {
        log!("Discarded OCR answer for superseded upload #{}", ticket.number());
    }
}

/// Overwrite the amount field, and the date field when a date was found
pub fn apply_form_update(document: &Document, elements: &ElementIds, update: &FormUpdate) -> ClientResult<()> {
    let amount: HtmlInputElement = require_by_id(document, &elements.amount_input)?;
    let date: HtmlInputElement = require_by_id(document, &elements.date_input)?;

    amount.set_value(&update.amount);
    match &update.expense_date {
        Some(value) => date.set_value(value),
        None => warn!("OCR found no usable date; leaving #{} unchanged", elements.date_input),
    }

    Ok(())
}
