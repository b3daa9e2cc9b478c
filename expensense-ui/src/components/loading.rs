//! Loading Indicator
//!
//! The page template ships a hidden `.loader-container` overlay; this keeps
//! its visibility in step with [`FormState::loader_visible`]. Controls whose
//! answer is pending are marked `aria-busy`.

use leptos::logging::warn;
use leptos::*;
use web_sys::{Element, HtmlElement};

use expensense::LoadState;

use crate::dom::{describe_js_error, set_display};
use crate::state::FormState;

/// Display value while the loader is shown
pub const LOADER_VISIBLE: &str = "flex";

/// Display value while the loader is hidden
pub const LOADER_HIDDEN: &str = "none";

/// Drive the loader element from the shared visibility signal
pub fn bind_loader(state: &FormState, loader: HtmlElement) {
    let visible = state.loader_visible;

    create_effect(move |_| {
        let display = if visible.get() {
            LOADER_VISIBLE
        } else {
            LOADER_HIDDEN
        };
        set_display(&loader, display);
    });
}

/// Mark `element` busy while `lifecycle` is loading
pub fn bind_busy(lifecycle: RwSignal<LoadState>, element: Element) {
    create_effect(move |_| {
        let busy = lifecycle.with(LoadState::is_loading);
        if let Err(e) = element.set_attribute("aria-busy", if busy { "true" } else { "false" }) {
            warn!("Failed to set aria-busy: {}", describe_js_error(&e));
        }
    });
}
