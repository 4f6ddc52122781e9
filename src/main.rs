use overseer::cli::commands::{CliArgs, Commands};
use overseer::cli::handlers::{handle_analyze, handle_health, handle_intel, handle_scan};
use overseer::util::logging::{self, LoggingConfig};
use overseer::{OverseerConfig, VERSION};

use clap::Parser;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let config = config_from_args(&args);
    init_logging_from_args(&args, &config);

    debug!("overseer v{} starting", VERSION);
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    let exit_code = match &args.command {
        Commands::Scan(scan_args) => handle_scan(scan_args, &config).await,
        Commands::Analyze(analyze_args) => handle_analyze(analyze_args, &config).await,
        Commands::Intel(intel_args) => handle_intel(intel_args, &config).await,
        Commands::Health(health_args) => handle_health(health_args, &config).await,
    };

    std::process::exit(exit_code);
}

/// Environment first, then CLI flags on top
fn config_from_args(args: &CliArgs) -> OverseerConfig {
    let mut config = OverseerConfig::default();
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.to_lowercase();
    }
    config
}

fn init_logging_from_args(args: &CliArgs, config: &OverseerConfig) {
    let level = if args.log_level.is_some() {
        logging::parse_level(&config.log_level)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        logging::parse_level(&config.log_level)
    };

    let use_json = std::env::var(logging::LOG_JSON_ENV)
        .ok()
        .and_then(|v| v.trim().to_lowercase().parse::<bool>().ok())
        .unwrap_or(false);

    logging::init_logging(LoggingConfig {
        level,
        use_json,
        ..LoggingConfig::with_level(level)
    });
}
