use snafu::{ResultExt, Snafu};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Could not init log file: {}", source))]
    InitLog { source: std::io::Error },

    #[snafu(display("Could not redirect log records: {}", source))]
    LogRedirection { source: log::SetLoggerError },

    #[snafu(display("Could not set global subscriber: {}", source))]
    GlobalSubscriber {
        source: tracing::subscriber::SetGlobalDefaultError,
    },
}

/// Installs the global subscriber.
///
/// Without a path, compact human readable lines go to stderr. With a path,
/// bunyan json records go to that file, or to a daily rolling 'esvi.log'
/// if the path is a directory. The returned guard flushes the file on drop,
/// so it must be kept until the end of the program.
pub fn logger_init(path: Option<&Path>) -> Result<Option<WorkerGuard>, Error> {
    LogTracer::init().context(LogRedirectionSnafu)?;

    // Filter traces based on the RUST_LOG env var, or, if it's not set,
    // default to informational messages from this crate.
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "esvi=info".to_owned());

    let path = match path {
        Some(path) => path,
        None => {
            let subscriber = Registry::default().with(EnvFilter::new(&filter)).with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            );
            tracing::subscriber::set_global_default(subscriber).context(GlobalSubscriberSnafu)?;
            return Ok(None);
        }
    };

    let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();

    let (non_blocking, guard) = {
        if path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(path, "esvi.log");

            tracing_appender::non_blocking(file_appender)
        } else {
            tracing_appender::non_blocking(
                std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .context(InitLogSnafu)?,
            )
        }
    };

    let bunyan_formatting_layer = BunyanFormattingLayer::new(app_name, non_blocking);
    let subscriber = Registry::default()
        .with(EnvFilter::new(&filter))
        .with(JsonStorageLayer)
        .with(bunyan_formatting_layer);
    tracing::subscriber::set_global_default(subscriber).context(GlobalSubscriberSnafu)?;
    Ok(Some(guard))
}
