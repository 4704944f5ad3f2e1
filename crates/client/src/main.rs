//! Laundry co-op headless client.
//!
//! Composition root: loads content, builds the runtime, reports events, and
//! drives a scripted session through the runtime handle.
//!
//! ```bash
//! LAUNDRY_JSON_EVENTS=1 cargo run -p laundry-client
//! RUST_LOG=runtime=debug cargo run -p laundry-client
//! ```

mod config;
mod events;
mod script;

use anyhow::{Context, Result};
use runtime::{Runtime, RuntimeConfig};

use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    let content = config.content();
    tracing::info!(data_dir = %content.data_dir().display(), level = %config.level, "loading content");

    let game_config = content.load_config().context("failed to load config.toml")?;
    let level = content
        .load_level(&config.level)
        .with_context(|| format!("failed to load level '{}'", config.level))?;

    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            game_config,
            event_buffer_size: config.event_buffer,
            ..RuntimeConfig::default()
        })
        .level(level)
        .build()
        .await?;

    let handle = runtime.handle();
    let reporter = events::spawn_reporter(&handle, config.json_events);

    let outcome = script::run(&handle).await;

    drop(handle);
    runtime.shutdown().await?;
    reporter.await.context("event reporter panicked")?;

    outcome
}
