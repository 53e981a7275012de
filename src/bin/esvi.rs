use clap::{error::ErrorKind, Parser};
use esvi::adapters::secondary::{docker::DockerCli, elasticsearch::ElasticsearchHttp};
use esvi::domain::model::{error::Error as ModelError, summary::Summary};
use esvi::domain::ports::secondary::cluster::Error as ClusterError;
use esvi::domain::usecases::{
    provision::{Provision, ProvisionParameters},
    status::{Status, StatusParameters},
    teardown::{Teardown, TeardownParameters},
    UseCase,
};
use esvi::settings::{self, Command};
use esvi::utils::{launch, logger};
use snafu::{ResultExt, Snafu};
use std::fmt::Display;
use std::future::Future;
use std::io::{self, Write};
use std::process::exit;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{}", source))]
    Usage { source: clap::Error },

    #[snafu(display("Settings (Configuration or CLI) Error: {}", source))]
    Settings { source: settings::Error },

    #[snafu(display("Serialization Error: {}", source))]
    Serialization { source: serde_json::Error },

    #[snafu(display("Output Error: {}", source))]
    Output { source: io::Error },

    #[snafu(display("Logger Error: {}", source))]
    Logger { source: logger::Error },

    #[snafu(display("Runtime Error: {}", source))]
    Runtime { source: launch::Error },

    #[snafu(display("Elasticsearch Client Error: {}", source))]
    ElasticsearchClient { source: ClusterError },

    #[snafu(display("{}", source))]
    Execution { source: ModelError },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        // exit only here, once the logger guard has been dropped and
        // every message flushed. 1 is the only failure status, usage
        // errors included.
        exit(1);
    }
}

fn run() -> Result<(), Error> {
    let opts = match settings::Opts::try_parse() {
        Ok(opts) => opts,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return write_out(&mut io::stdout().lock(), err.render());
        }
        Err(err) => return Err(err).context(UsageSnafu),
    };
    let settings = settings::Settings::new(&opts).context(SettingsSnafu)?;

    match opts.cmd.unwrap_or(Command::Run) {
        Command::Config => print_config(&settings),
        Command::Run => with_runtime(&settings, provision(settings.clone())),
        Command::Teardown { volume } => {
            with_runtime(&settings, teardown(settings.clone(), volume))
        }
        Command::Status => with_runtime(&settings, status(settings.clone())),
    }
}

// Initializes the logger, then drives the command to completion.
fn with_runtime<F>(settings: &settings::Settings, command: F) -> Result<(), Error>
where
    F: Future<Output = Result<(), Error>>,
{
    let _guard = logger::logger_init(settings.logging.path.as_deref()).context(LoggerSnafu)?;

    launch::launch_with_runtime(command).context(RuntimeSnafu)?
}

fn cluster(settings: &settings::Settings) -> Result<ElasticsearchHttp, Error> {
    ElasticsearchHttp::new(
        settings.elasticsearch.url.clone(),
        settings.elasticsearch.timeout,
    )
    .context(ElasticsearchClientSnafu)
}

async fn provision(settings: settings::Settings) -> Result<(), Error> {
    let runtime = DockerCli::new(settings.runtime.program.clone());
    let provision = Provision::new(Box::new(runtime), Box::new(cluster(&settings)?));
    let report = provision
        .execute(ProvisionParameters {
            container: settings.container.clone(),
            plugin: settings.plugin.clone(),
            readiness: settings.readiness.clone(),
        })
        .await
        .context(ExecutionSnafu)?;
    tracing::info!("container {} is up", report.container_id);

    let mut text = String::from("Installed plugins:\n");
    for plugin in &report.plugin_listing {
        text.push_str(&format!("  {}\n", plugin));
    }
    text.push_str(&format!(
        "\nReady after {:?}, back after the restart in {:?}\n\n",
        report.ready_after, report.restarted_after
    ));
    text.push_str(
        &Summary::new(
            &settings.elasticsearch.url,
            &settings.container,
            &settings.plugin,
            &settings.runtime.program,
            &settings.summary.next_steps,
        )
        .to_string(),
    );
    write_out(&mut io::stdout().lock(), text)
}

async fn teardown(settings: settings::Settings, volume: bool) -> Result<(), Error> {
    let runtime = DockerCli::new(settings.runtime.program.clone());
    Teardown::new(Box::new(runtime))
        .execute(TeardownParameters {
            container: settings.container.name.clone(),
            volume: volume.then(|| settings.container.volume.name.clone()),
        })
        .await
        .context(ExecutionSnafu)
}

async fn status(settings: settings::Settings) -> Result<(), Error> {
    let runtime = DockerCli::new(settings.runtime.program.clone());
    let report = Status::new(Box::new(runtime), Box::new(cluster(&settings)?))
        .execute(StatusParameters {
            container: settings.container.name.clone(),
            plugin: settings.plugin.name.clone(),
        })
        .await
        .context(ExecutionSnafu)?;
    write_out(&mut io::stdout().lock(), report)
}

fn print_config(settings: &settings::Settings) -> Result<(), Error> {
    let config = serde_json::to_string_pretty(settings).context(SerializationSnafu)?;
    write_out(&mut io::stdout().lock(), config)
}

// A reader that went away (eg `esvi config | head`) is not an error.
fn write_out<W: Write>(out: &mut W, text: impl Display) -> Result<(), Error> {
    match writeln!(out, "{}", text).and_then(|_| out.flush()) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        res => res.context(OutputSnafu),
    }
}
