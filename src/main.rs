use clap::Parser;
use devradar::{
    cli::{commands, Cli, Commands},
    config::Settings,
    Result,
};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,devradar=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = Settings::from_env()?;
    if let Err(e) = settings.validate() {
        error!("Invalid configuration: {}", e.log_safe());
        return Err(e);
    }

    match cli.command {
        Commands::Trending {
            language,
            limit,
            output,
        } => commands::trending(&settings, language, limit, output).await,
        Commands::Timeframe {
            timeframe,
            language,
            limit,
            output,
        } => commands::timeframe(&settings, timeframe, language, limit, output).await,
        Commands::Watch {
            language,
            limit,
            interval,
            output,
        } => commands::watch(&settings, language, limit, interval, output).await,
    }
}
