use snafu::Snafu;
use std::time::Duration;

use crate::domain::ports::secondary::{
    cluster::Error as ClusterError, runtime::Error as RuntimeError,
};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Precondition Error: {}", source))]
    Precondition { source: RuntimeError },

    #[snafu(display("Could not launch container {}: {}", container, source))]
    Launch {
        container: String,
        source: RuntimeError,
    },

    #[snafu(display(
        "Elasticsearch not reachable at {} after {:?} ({}). Inspect the container with `{} logs {}`",
        url,
        waited,
        details,
        program,
        container
    ))]
    Connectivity {
        url: String,
        waited: Duration,
        details: String,
        program: String,
        container: String,
    },

    #[snafu(display("Could not install plugin {}: {}", plugin, source))]
    PluginInstall {
        plugin: String,
        source: RuntimeError,
    },

    #[snafu(display("Could not restart container {}: {}", container, source))]
    Restart {
        container: String,
        source: RuntimeError,
    },

    #[snafu(display("Could not list plugins in container {}: {}", container, source))]
    PluginListing {
        container: String,
        source: RuntimeError,
    },

    #[snafu(display(
        "Plugin {} is not installed, plugin listing: [{}]",
        plugin,
        listing.join(", ")
    ))]
    PluginMissing { plugin: String, listing: Vec<String> },

    #[snafu(display("Could not remove volume {}: {}", volume, source))]
    VolumeRemoval {
        volume: String,
        source: RuntimeError,
    },

    #[snafu(display("Container Status Error: {}", source))]
    ContainerStatus { source: RuntimeError },

    #[snafu(display("Cluster Status Error: {}", source))]
    ClusterStatus { source: ClusterError },
}
