use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File, FileFormat};
use snafu::{ResultExt, Snafu};
use std::path::Path;

/// Defaults compiled into the binary, so that `esvi` runs without any file.
pub const DEFAULT_CONFIG: &str = include_str!("../../config/esvi/default.toml");

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Key Value Splitting Error: {}", msg))]
    Splitting { msg: String },

    #[snafu(display("Setting Config Value Error: {}", source))]
    ConfigValue { source: config::ConfigError },

    #[snafu(display("Config Compilation Error: {}", source))]
    ConfigCompilation { source: config::ConfigError },

    #[snafu(display("Run mode '{}' requires a config directory", run_mode))]
    MissingConfigDir { run_mode: String },
}

// Builds the layered configuration:
// * The embedded defaults come first.
// * If a config directory is given, '<config_dir>/<sub_dir>/default.toml' is read if present,
//   then the run mode file '<config_dir>/<sub_dir>/<run_mode>.toml', which must exist.
// * Then '<config_dir>/<sub_dir>/local.toml' if present. It should not be checked in.
// * Finally environment variables with the given prefix, eg ESVI_CONTAINER__NAME=foo
//   sets container.name.
pub fn config_builder_from(
    defaults: &str,
    config_dir: Option<&Path>,
    sub_dir: &str,
    run_mode: Option<&str>,
    prefix: &str,
) -> Result<ConfigBuilder<DefaultState>, Error> {
    let mut builder = Config::builder().add_source(File::from_str(defaults, FileFormat::Toml));

    match config_dir {
        Some(config_dir) => {
            let dir_path = config_dir.join(sub_dir);

            let default_path = dir_path.join("default").with_extension("toml");
            builder = builder.add_source(File::from(default_path).required(false));

            if let Some(run_mode) = run_mode {
                let run_mode_path = dir_path.join(run_mode).with_extension("toml");
                builder = builder.add_source(File::from(run_mode_path).required(true));
            }

            let local_path = dir_path.join("local").with_extension("toml");
            builder = builder.add_source(File::from(local_path).required(false));
        }
        None => {
            if let Some(run_mode) = run_mode {
                return MissingConfigDirSnafu { run_mode }.fail();
            }
        }
    }

    builder = builder.add_source(
        Environment::with_prefix(prefix)
            .prefix_separator("_")
            .separator("__"),
    );

    Ok(builder)
}

/// Create a new configuration source from a list of assignments key=value
///
/// The function iterates over the list, and for each element, it tries to
/// (a) identify the key and the value, by searching for the '=' sign.
/// (b) parse the value into one of bool, i64, f64. if not it's a string.
pub fn config_from_args(args: impl IntoIterator<Item = String>) -> Result<Config, Error> {
    let mut config = Config::builder();

    for arg in args {
        let (key, val) = arg.split_once('=').ok_or(Error::Splitting {
            msg: format!("missing '=' in setting override: {}", arg),
        })?;

        config = {
            if let Ok(as_bool) = val.parse::<bool>() {
                config.set_override(key, as_bool).context(ConfigValueSnafu)
            } else if let Ok(as_int) = val.parse::<i64>() {
                config.set_override(key, as_int).context(ConfigValueSnafu)
            } else if let Ok(as_float) = val.parse::<f64>() {
                config.set_override(key, as_float).context(ConfigValueSnafu)
            } else {
                config.set_override(key, val).context(ConfigValueSnafu)
            }
        }?
    }

    config.build().context(ConfigCompilationSnafu)
}
