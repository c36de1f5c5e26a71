mod classification;
mod config;
mod errors;
mod input;
mod llm_client;
mod output;
mod pipeline;
mod tree;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::classification::OllamaClassifier;
use crate::config::Config;
use crate::llm_client::LlmClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("job_tree=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!("Starting job-tree v{}", env!("CARGO_PKG_VERSION"));

    if let Some(mapping_path) = &config.remerge_from {
        info!("Re-merging from {}; classification skipped", mapping_path.display());
        pipeline::remerge(mapping_path, &config)?;
        return Ok(());
    }

    let llm = LlmClient::new(
        config.ollama_base_url(),
        config.model.clone(),
        config.request_timeout,
    )?;
    info!(
        "LLM client initialized (endpoint: {}, model: {})",
        llm.endpoint(),
        llm.model()
    );
    info!("Hierarchy prefix: {}", config.prefix);

    let classifier = OllamaClassifier::new(llm, config.prefix.clone());
    pipeline::run(&config, &classifier).await?;

    Ok(())
}
