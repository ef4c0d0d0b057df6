use clap::{Parser, ValueEnum};
use ghdl::pipeline::{PipelineBuilder, PipelineConfig};
use ghdl::{Error, StyleOptions};

use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Exit status of a run stopped by a signal, as a shell reports SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser, Debug)]
#[command(
    name = "ghdl",
    version,
    about = "A simple config based tool to download the latest release assets from github."
)]
struct Args {
    /// Path to the config file
    #[arg(short, long, value_name = "PATH")]
    config: PathBuf,

    /// Log level
    #[arg(short, long, value_name = "LEVEL", value_enum, default_value_t = LogLevel::Warning)]
    log_level: LogLevel,

    /// Show download progress bars
    #[arg(long)]
    progress: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Fatal => "error",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ghdl={}", args.log_level.directive())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_signal(cancel.clone()));

    match try_main(&args, &cancel).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(Error::Interrupted) => {
            warn!("Interrupted by user");
            ExitCode::from(EXIT_INTERRUPTED)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn try_main(args: &Args, cancel: &CancellationToken) -> ghdl::Result<bool> {
    let config = PipelineConfig::from_path(&args.config)?;
    let style_options = match args.progress {
        true => StyleOptions::default(),
        false => StyleOptions::hidden(),
    };
    let pipeline = PipelineBuilder::new()
        .style_options(style_options)
        .build(config)?;
    pipeline.run(cancel).await
}

/// Cancel `cancel` on the first interrupt, terminate, or hangup signal.
#[cfg(unix)]
async fn cancel_on_signal(cancel: CancellationToken) {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigint, mut sigterm, mut sighup) = match (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
        signal(SignalKind::hangup()),
    ) {
        (Ok(sigint), Ok(sigterm), Ok(sighup)) => (sigint, sigterm, sighup),
        _ => {
            warn!("Could not register signal handlers, using ctrl_c fallback");
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
            return;
        }
    };

    tokio::select! {
        _ = sigint.recv() => warn!("Received SIGINT signal"),
        _ = sigterm.recv() => warn!("Received SIGTERM signal"),
        _ = sighup.recv() => warn!("Received SIGHUP signal"),
    }
    cancel.cancel();
}

#[cfg(not(unix))]
async fn cancel_on_signal(cancel: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            warn!("Received Ctrl+C signal");
            cancel.cancel();
        }
        Err(e) => error!("Failed to listen for Ctrl+C signal: {}", e),
    }
}
