/// This module contains the definition for esvi configuration and command line arguments.
use clap::{Parser, Subcommand};
use config::Config;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::domain::model::{
    container::ContainerSpec, plugin::PluginSpec, readiness::ReadinessPolicy,
};
use crate::utils::config::{config_builder_from, config_from_args, DEFAULT_CONFIG};
use crate::utils::deserialize::{deserialize_duration, serialize_duration};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Config Compilation Error: {}", source))]
    ConfigCompilation { source: crate::utils::config::Error },
    #[snafu(display("Config Merge Error: {} [{}]", msg, source))]
    ConfigMerge {
        msg: String,
        source: config::ConfigError,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runtime {
    /// Container runtime client program.
    pub program: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Elasticsearch {
    pub url: Url,
    #[serde(
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Logging {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub mode: Option<String>,
    pub runtime: Runtime,
    pub container: ContainerSpec,
    pub plugin: PluginSpec,
    pub elasticsearch: Elasticsearch,
    pub readiness: ReadinessPolicy,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub summary: Summary,
}

#[derive(Debug, Parser)]
#[command(
    name = "esvi",
    about = "Provision a local Elasticsearch with the Vietnamese analysis plugin",
    version,
    author
)]
pub struct Opts {
    /// Defines the config directory
    ///
    /// This directory must contain an 'esvi' subdirectory. Without it the
    /// compiled in defaults are used.
    #[arg(short = 'c', long = "config-dir")]
    pub config_dir: Option<PathBuf>,

    /// Defines the run mode in {testing, dev, prod, ...}
    ///
    /// If no run mode is provided, a default behavior will be used.
    #[arg(short = 'm', long = "run-mode", env = "RUN_MODE")]
    pub run_mode: Option<String>,

    /// Override settings values using key=value
    #[arg(short = 's', long = "setting")]
    pub settings: Vec<String>,

    /// Defaults to 'run'
    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Recreate the container, install the plugin and restart
    Run,
    /// Stop and remove the container
    Teardown {
        /// Also remove the data volume, and every index in it
        #[arg(long)]
        volume: bool,
    },
    /// Report the container, cluster and plugin state
    Status,
    /// Prints esvi's configuration
    Config,
}

impl Settings {
    // Read the configuration from the embedded defaults, then <config-dir>/esvi,
    // the environment and the command line.
    pub fn new(opts: &Opts) -> Result<Self, Error> {
        let mut builder = config_builder_from(
            DEFAULT_CONFIG,
            opts.config_dir.as_deref(),
            "esvi",
            opts.run_mode.as_deref(),
            "ESVI",
        )
        .context(ConfigCompilationSnafu)?;

        if let Some(run_mode) = &opts.run_mode {
            builder = builder
                .set_override("mode", run_mode.as_str())
                .context(ConfigMergeSnafu { msg: "mode" })?;
        }

        builder = builder
            .add_source(config_from_args(opts.settings.clone()).context(ConfigCompilationSnafu)?);

        let config: Config = builder.build().context(ConfigMergeSnafu {
            msg: String::from("Cannot build the configuration from sources"),
        })?;

        config.try_deserialize().context(ConfigMergeSnafu {
            msg: String::from("Cannot convert configuration into esvi settings"),
        })
    }
}
