use neetplan::commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // NEETPLAN_DEBUG routes user messages through tracing, so they must pass the filter.
    let default_filter = if std::env::var("NEETPLAN_DEBUG").is_ok() { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    Cli::menu().await
}
