use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use vet_chat::api::http::HttpApi;
use vet_chat::store::FileStore;
use vet_chat::{
    ChatService, Config, Conversation, Delivery, HandshakePolicy, IdentityStore, Sender,
    SessionReceiver,
};

const BOOK_COMMAND: &str = "/book";
const QUIT_COMMAND: &str = "/quit";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the transcript.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vet_chat=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    // ── Identity ──────────────────────────────────────────────────────────────
    let identity = IdentityStore::new(FileStore::new(&config.store_path));
    let anonymous_id = identity.ensure_or_ephemeral();
    info!(store = %config.store_path.display(), "anonymous id ready");

    // ── Session ───────────────────────────────────────────────────────────────
    let receiver = SessionReceiver::new(HandshakePolicy::default());
    if let Some(raw) = config.handshake.as_deref() {
        match receiver.deliver_str(raw) {
            Delivery::Replaced => info!("session taken from VET_CHAT_HANDSHAKE"),
            Delivery::Ignored(reason) => warn!(?reason, "VET_CHAT_HANDSHAKE ignored"),
        }
    }
    let session = receiver.current();

    // ── Conversation ──────────────────────────────────────────────────────────
    let api = HttpApi::new(&config.api_base_url);
    info!(base_url = api.base_url(), "using remote API");
    let mut service = ChatService::new(api, Conversation::new(&session, anonymous_id, config.history));

    let mut stdout = tokio::io::stdout();
    let mut shown = print_new(&mut stdout, &service, 0).await?;
    stdout
        .write_all(format!("({BOOK_COMMAND} to book an appointment, {QUIT_COMMAND} to exit)\n").as_bytes())
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&mut stdout, service.conversation().placeholder()).await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            QUIT_COMMAND => break,
            BOOK_COMMAND => {
                if !service.start_booking() {
                    warn!("cannot start a booking right now");
                }
            }
            _ => {
                if !line.trim().is_empty() && !service.conversation().is_booking() {
                    stdout.write_all(b"...\n").await?;
                }
                service.submit(&line).await;
            }
        }
        shown = print_new(&mut stdout, &service, shown).await?;
    }

    Ok(())
}

/// Prints the bot messages appended since `shown` and returns the new count.
async fn print_new(
    out: &mut tokio::io::Stdout,
    service: &ChatService<HttpApi>,
    shown: usize,
) -> std::io::Result<usize> {
    let messages = service.conversation().messages();
    for message in &messages[shown..] {
        // The user's own lines are already on the terminal.
        if message.sender == Sender::Bot {
            out.write_all(format!("🐾 {}\n", message.text).as_bytes()).await?;
        }
    }
    out.flush().await?;
    Ok(messages.len())
}

async fn prompt(out: &mut tokio::io::Stdout, placeholder: &str) -> std::io::Result<()> {
    out.write_all(format!("[{placeholder}] > ").as_bytes()).await?;
    out.flush().await
}
