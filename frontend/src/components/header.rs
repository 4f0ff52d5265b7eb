use leptos::prelude::*;

use crate::state::WidgetState;

/// Title bar with the "Book Appointment" button (hidden while booking).
#[component]
pub fn ChatHeader() -> impl IntoView {
    let state = expect_context::<WidgetState>();

    let is_booking = move || state.conversation.with(|c| c.is_booking());
    let is_busy = move || state.conversation.with(|c| c.is_busy());

    view! {
        <div class="chat-header">
            "🐾 Vet Assistant"
            <Show when=move || !is_booking()>
                <button
                    class="book-btn"
                    on:click=move |_| state.start_booking()
                    disabled=is_busy
                >
                    "Book Appointment"
                </button>
            </Show>
        </div>
    }
}
