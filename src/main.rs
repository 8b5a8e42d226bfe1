use anyhow::{Context, Result};
use property_chat::{AppConfig, ChatPipeline, ChatRequest};
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries the reply
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("🏠 Property Chat");

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let pipeline = ChatPipeline::from_config(&config).context("Failed to set up chat pipeline")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let user_input = if args.is_empty() {
        let mut input = String::new();
        tokio::io::stdin()
            .read_to_string(&mut input)
            .await
            .context("Failed to read query from stdin")?;
        input.trim_end_matches(['\r', '\n']).to_string()
    } else {
        args.join(" ")
    };

    let request = ChatRequest {
        session_id: String::new(),
        user_input,
    };

    let response = pipeline
        .handle(request)
        .await
        .context("Chat request failed")?;

    println!("{}", serde_json::to_string(&response)?);

    Ok(())
}
