use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsValue;
use web_sys::MessageEvent;

use vet_chat::{Delivery, HandshakePolicy, Session, SessionReceiver};

/// Starts with a fallback session and swaps in whatever session the host
/// page posts. The window listener lives as long as the calling owner.
pub fn listen_for_session() -> ReadSignal<Option<Session>> {
    let (session, set_session) = signal(None::<Session>);

    // Fallback (when opened directly without a host page)
    let receiver = SessionReceiver::new(HandshakePolicy::default());
    set_session.set(Some(receiver.current()));
    let receiver = StoredValue::new(receiver);

    let handle = window_event_listener(ev::message, move |ev: MessageEvent| {
        let Some(raw) = event_json(&ev) else {
            return;
        };
        match receiver.try_with_value(|r| r.deliver_str(&raw)) {
            Some(Delivery::Replaced) => {
                log::info!("Session received from host page");
                set_session.set(receiver.try_with_value(SessionReceiver::current));
            }
            Some(Delivery::Ignored(reason)) => log::debug!("Message ignored: {reason:?}"),
            None => {}
        }
    });
    on_cleanup(move || handle.remove());

    session
}

/// Posted data re-serialised to JSON text.
fn event_json(ev: &MessageEvent) -> Option<String> {
    let text: JsValue = js_sys::JSON::stringify(&ev.data()).ok()?.into();
    text.as_string()
}
