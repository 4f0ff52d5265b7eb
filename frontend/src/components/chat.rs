use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;

use vet_chat::{IdentityStore, Message, Session};

use crate::components::header::ChatHeader;
use crate::state::WidgetState;
use crate::storage::LocalStore;

/// The chat box for one session: header, transcript and input.
#[component]
pub fn ChatWidget(session: Session) -> impl IntoView {
    let anonymous_id = IdentityStore::new(LocalStore).ensure_or_ephemeral();
    let state = WidgetState::provide(&session, anonymous_id);
    let body_ref = NodeRef::<Div>::new();

    // Keep the newest message in view
    Effect::new(move |_| {
        state.conversation.track();
        if let Some(body) = body_ref.get() {
            body.set_scroll_top(body.scroll_height());
        }
    });

    view! {
        <div class="chat-container">
            <ChatHeader />

            <div class="chat-body" node_ref=body_ref>
                // Transcript is append-only, so the index is a stable key
                <For
                    each=move || {
                        state.conversation.with(|c| {
                            c.messages().iter().cloned().enumerate().collect::<Vec<_>>()
                        })
                    }
                    key=|(i, _)| *i
                    let:entry
                >
                    <MessageBubble message=entry.1 />
                </For>
                <Show when=move || state.conversation.with(|c| c.is_loading())>
                    <div class="message bot">
                        <span class="typing-indicator">"●●●"</span>
                    </div>
                </Show>
            </div>

            <ChatInput />
        </div>
    }
}

/// A single chat message bubble.
#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    let css_class = format!("message {}", message.sender.as_str());

    view! { <div class=css_class>{message.text}</div> }
}

/// Input row with the send button.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<WidgetState>();
    let (input, set_input) = signal(String::new());

    let is_busy = move || state.conversation.with(|c| c.is_busy());
    let is_loading = move || state.conversation.with(|c| c.is_loading());
    let placeholder = move || state.conversation.with(|c| c.placeholder());

    let send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || is_busy() {
            return;
        }
        set_input.set(String::new());
        state.send(text);
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div class="chat-input">
            <input
                placeholder=placeholder
                prop:value=input
                on:input=move |ev| {
                    set_input.set(event_target_value(&ev));
                }
                on:keydown=on_keydown
                disabled=is_busy
            />
            <button on:click=move |_| send() disabled=is_busy>
                {move || if is_loading() { "..." } else { "Send" }}
            </button>
        </div>
    }
}
