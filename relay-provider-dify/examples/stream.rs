//! Stream a reply from a Dify chat app.
//!
//! Set the deployment and key, then run:
//!   DIFY_BASE_URL=https://api.dify.ai DIFY_API_KEY=app-... cargo run --example stream
//!
//! `RUST_LOG=relay_provider_dify=debug` shows request and stream lifecycle logs.

use std::io::Write;

use futures::StreamExt;
use relay_provider_dify::Dify;
use relay_types::{Message, Provider, StreamChunk};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let provider = Dify::from_env();
    let model = provider.model();
    eprintln!(
        "model: {} (context window {} tokens)",
        model.id, model.info.context_window
    );

    let mut stream = provider
        .create_message(
            "You are a concise assistant.",
            &[Message::user("Say hello in one sentence.")],
        )
        .await?;

    let mut stdout = std::io::stdout();
    while let Some(chunk) = stream.next().await {
        match chunk? {
            StreamChunk::Text { text } => {
                stdout.write_all(text.as_bytes())?;
                stdout.flush()?;
            }
        }
    }
    println!();

    Ok(())
}
