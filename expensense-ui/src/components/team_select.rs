//! Team Selector
//!
//! Rebuilds the team dropdown whenever the company dropdown changes.

use leptos::logging::{error, log};
use leptos::{create_effect, SignalSet, SignalWith};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlOptionElement, HtmlSelectElement};

use expensense::{team_options, ClientError, ClientResult, LoadState, RequestTicket, SelectOption, TeamRecord};

use crate::api;
use crate::components::loading::bind_busy;
use crate::dom::describe_js_error;
use crate::state::FormState;

/// Wire the company → team dropdown pair
pub fn attach(state: FormState, company: HtmlSelectElement, team: HtmlSelectElement) -> ClientResult<()> {
    bind_lookup_state(&state, team.clone());

    let company_ref = company.clone();
    let on_change = Closure::wrap(Box::new(move |_: Event| {
        let company_id = company_ref.value();
        log!("Company selected: {}", company_id);

        let state = state.clone();
        let team = team.clone();
        wasm_bindgen_futures::spawn_local(async move {
            refresh_teams(&state, &team, &company_id).await;
        });
    }) as Box<dyn FnMut(Event)>);

    company
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .map_err(|e| ClientError::Dom(describe_js_error(&e)))?;
    on_change.forget();

    Ok(())
}

/// Keep the team dropdown disabled and busy while its options are fetched
pub fn bind_lookup_state(state: &FormState, team: HtmlSelectElement) {
    let teams = state.teams;
    bind_busy(teams, team.clone().into());
    create_effect(move |_| team.set_disabled(teams.with(LoadState::is_loading)));
}

/// Fetch the company's teams and rebuild the dropdown, unless a newer
/// selection has been made in the meantime
pub async fn refresh_teams(state: &FormState, team: &HtmlSelectElement, company_id: &str) {
    let ticket = state.begin_team_lookup();
    let result = api::fetch_teams(&state.config, company_id).await;
    apply_teams(state, team, ticket, result);
}

/// Settle a team lookup. Returns false, leaving the dropdown and state as
/// they are, when `ticket` has been superseded.
pub fn apply_teams(
    state: &FormState,
    team: &HtmlSelectElement,
    ticket: RequestTicket,
    result: ClientResult<Vec<TeamRecord>>,
) -> bool {
    if !state.is_current_team_lookup(ticket) {
        log!("Discarded teams for superseded selection #{}", ticket.number());
        return false;
    }

    let outcome = result.and_then(|teams| {
        log!("Success: {} team(s)", teams.len());
        render_options(team, &team_options(&teams))
    });

    match outcome {
        Ok(()) => state.teams.set(LoadState::Succeeded),
        Err(e) => {
            error!("Error: {}", e);
            state.teams.set(LoadState::Failed(e.to_string()));
        }
    }
    true
}

/// Replace every option of `select`. Nothing changes if an option cannot
/// be built.
pub fn render_options(select: &HtmlSelectElement, options: &[SelectOption]) -> ClientResult<()> {
    let elements = options
        .iter()
        .map(|option| {
            HtmlOptionElement::new_with_text_and_value_and_default_selected_and_selected(
                &option.label,
                &option.value,
                option.selected,
                option.selected,
            )
            .map_err(|e| ClientError::Dom(describe_js_error(&e)))
        })
        .collect::<ClientResult<Vec<_>>>()?;

    select.set_length(0);
    for element in &elements {
        select
            .append_child(element)
            .map_err(|e| ClientError::Dom(describe_js_error(&e)))?;
    }

    Ok(())
}
