//! ratelex
//!
//! Batch sentiment classification of lexical terms from the way their
//! occurrences spread over a review corpus's rating scale.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use ratelex_cli::{commands, Cli, Commands};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Classify(args) => {
            let handle = if args.metrics {
                Some(init_metrics()?)
            } else {
                None
            };

            let stdout = std::io::stdout();
            let snapshot = commands::classify(&args, &mut stdout.lock()).await?;
            info!(
                classified = snapshot.classified,
                skipped = snapshot.skipped,
                subjective = snapshot.subjective,
                "Classification complete"
            );

            if let Some(handle) = handle {
                eprintln!("{}", serde_json::to_string(&snapshot)?);
                eprint!("{}", handle.render());
            }
        }
        Commands::Weights(args) => {
            let stdout = std::io::stdout();
            commands::weights(&args, &mut stdout.lock())?;
        }
    }

    Ok(())
}

/// Initialize tracing/logging on stderr so stdout stays machine-readable
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("ratelex=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ratelex=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    ratelex_telemetry::describe_metrics();

    info!("Metrics exporter initialized");
    Ok(handle)
}
