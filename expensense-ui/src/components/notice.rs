//! Inline Notice Component
//!
//! Error message shown under the receipt input when a scan fails.

use leptos::*;

#[component]
pub fn ReceiptNotice(
    #[prop(into)]
    message: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        {move || {
            message.get().map(|msg| view! {
                <div class="ocr-notice text-danger small mt-1" role="alert">
                    <span>"Could not read the receipt: "</span>
                    <span>{msg}</span>
                </div>
            })
        }}
    }
}
