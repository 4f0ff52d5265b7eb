mod api;
mod components;
mod handshake;
mod state;
mod storage;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat::ChatWidget;

/// Root component: renders nothing until a session exists, and rebuilds the
/// widget whenever the host page replaces the session.
#[component]
fn App() -> impl IntoView {
    let session = handshake::listen_for_session();

    move || {
        session
            .get()
            .map(|session| view! { <ChatWidget session=session /> })
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
