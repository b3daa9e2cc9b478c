//! Expensense Form Glue
//!
//! Browser-side behaviour for the server-rendered expense pages, built with
//! Leptos (WASM).
//!
//! # Features
//!
//! - Receipt OCR: uploading a receipt fills the amount and date fields
//! - Cascading selector: picking a company reloads the team dropdown
//! - Expense chart: `createExpenseChart` draws monthly totals with Chart.js
//!
//! # Architecture
//!
//! The pages are rendered by the server; this crate attaches to whichever of
//! the known elements a page contains. Shared logic and wire contracts live in
//! the `expensense` crate.

use leptos::logging::warn;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement};

use expensense::{ClientError, ClientResult};

pub mod api;
pub mod components;
pub mod dom;
pub mod state;

pub use components::{create_expense_chart, ExpenseChart};
pub use state::FormState;

#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    if let Err(e) = attach_to_page() {
        leptos::logging::error!("Form glue failed to start: {}", e);
    }
}

/// Read the page config and CSRF cookie, then wire every unit whose
/// elements are present
pub fn attach_to_page() -> ClientResult<()> {
    let document = dom::document()?;
    let config = dom::page_config(&document).with_cookie_header(&dom::cookie_header(&document));

    if config.csrf_token.is_none() {
        warn!(
            "{} (`{}`); form requests will be rejected",
            ClientError::MissingCsrfToken,
            config.csrf.cookie_name
        );
    }

    let state = FormState::new(config);
    let elements = &state.config.elements;

    if let Some(input) = dom::element_by_id::<HtmlInputElement>(&document, &elements.receipt_input)? {
        components::receipt::attach(state.clone(), &document, input)?;
    }

    let company = dom::element_by_id::<HtmlSelectElement>(&document, &elements.company_select)?;
    let team = dom::element_by_id::<HtmlSelectElement>(&document, &elements.team_select)?;
    match (company, team) {
        (Some(company), Some(team)) => components::team_select::attach(state.clone(), company, team)?,
        (Some(_), None) => warn!("#{} not found; company changes are ignored", elements.team_select),
        _ => {}
    }

    Ok(())
}
