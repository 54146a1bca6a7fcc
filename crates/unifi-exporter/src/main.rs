mod cli;
mod error;
mod server;

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use unifi_exporter_core::exposition::render;
use unifi_exporter_core::{Collector, ControllerSession};

use crate::cli::{Cli, LogFormat};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_format);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, format: LogFormat) {
    let filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = unifi_exporter_config::load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    if cli.print_config {
        config.validate()?;
        print!("{}", config.to_redacted_toml()?);
        return Ok(());
    }

    let controller = config.to_controller_config()?;
    let url = controller.url.to_string();
    let listen = config.listen_addr()?;
    let networks = config.network_filter();

    info!(
        controller = %url,
        site = %controller.site,
        networks = ?networks.iter().collect::<Vec<_>>(),
        "starting unifi-exporter {}",
        env!("CARGO_PKG_VERSION")
    );

    let session = Arc::new(ControllerSession::new(controller));
    let collector = Collector::new(Arc::clone(&session), networks);

    let result = if cli.once {
        collect_once(&collector, url).await
    } else {
        server::serve(listen, collector, server::shutdown_signal()).await
    };

    session.logout().await;
    result
}

/// One collection cycle printed to stdout. Fails when the controller was
/// unreachable, after printing what was collected.
async fn collect_once(
    collector: &Collector<Arc<ControllerSession>>,
    url: String,
) -> Result<(), CliError> {
    let samples = collector.collect().await;
    print!("{}", render(&samples)?);

    let up = samples.first().is_some_and(|sample| sample.value > 0.0);
    if up {
        Ok(())
    } else {
        warn!("controller unreachable");
        Err(CliError::ControllerDown { url })
    }
}
