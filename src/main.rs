use clap::Parser;
use cryptoml_signals::cli::{Cli, Commands};
use cryptoml_signals::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    cryptoml_signals::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting signal polling");
            args.execute(&config).await?;
        }
        Commands::Fetch(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Prediction: {} {:?} (timeout {}s)",
                config.prediction.base_url,
                config.prediction.api_version,
                config.prediction.timeout_secs
            );
            println!(
                "  API key: {}",
                if config.prediction.resolve_api_key().is_ok() {
                    "set"
                } else {
                    "missing"
                }
            );
            println!("  Markets: {}", config.buffer.markets.join(", "));
            println!(
                "  Buffer: prefix={}, threshold={}, repeats={}",
                config.buffer.prefix_len, config.buffer.threshold, config.buffer.repeats
            );
            println!("  Poll interval: {}s", config.poll.interval_secs);
            println!(
                "  Logging: {} {:?}",
                config.telemetry.log_level, config.telemetry.log_format
            );
        }
    }

    Ok(())
}
