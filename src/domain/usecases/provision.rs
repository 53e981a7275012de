use async_trait::async_trait;
use snafu::ResultExt;
use tracing::{debug, info, instrument, warn};

use crate::domain::model::{
    container::ContainerSpec,
    error::{
        Error, LaunchSnafu, PluginInstallSnafu, PluginListingSnafu, PluginMissingSnafu,
        PreconditionSnafu, RestartSnafu,
    },
    plugin::PluginSpec,
    readiness::ReadinessPolicy,
    report::ProvisionReport,
};
use crate::domain::ports::secondary::{cluster::Cluster, runtime::ContainerRuntime};
use crate::domain::usecases::readiness::wait_until_ready;
use crate::domain::usecases::UseCase;

/// Recreates the Elasticsearch container and installs the analysis plugin.
///
/// The workflow is strictly sequential:
///  1. check the runtime client is installed, before touching anything,
///  2. stop and remove any previous container with the same name, ignoring failures,
///  3. launch a fresh detached container,
///  4. wait for the cluster to answer,
///  5. install the plugin with the plugin manager inside the container,
///  6. restart the container so the plugin is loaded, and wait again,
///  7. list the installed plugins and check ours is among them.
///
/// The data volume is never removed, so indices survive a run.
pub struct Provision {
    pub runtime: Box<dyn ContainerRuntime + Send + Sync + 'static>,
    pub cluster: Box<dyn Cluster + Send + Sync + 'static>,
}

pub struct ProvisionParameters {
    pub container: ContainerSpec,
    pub plugin: PluginSpec,
    pub readiness: ReadinessPolicy,
}

impl Provision {
    pub fn new(
        runtime: Box<dyn ContainerRuntime + Send + Sync + 'static>,
        cluster: Box<dyn Cluster + Send + Sync + 'static>,
    ) -> Self {
        Provision { runtime, cluster }
    }

    /// Best effort removal of a previous container.
    async fn teardown(&self, name: &str) {
        if let Err(err) = self.runtime.stop(name).await {
            debug!("ignoring stop failure for {}: {}", name, err);
        }
        if let Err(err) = self.runtime.remove(name).await {
            debug!("ignoring remove failure for {}: {}", name, err);
        }
    }

    async fn wait_for_cluster(
        &self,
        container: &str,
        readiness: &ReadinessPolicy,
    ) -> Result<std::time::Duration, Error> {
        wait_until_ready(&self.cluster, readiness)
            .await
            .map_err(|not_ready| {
                warn!(
                    "no answer from {} after {} attempts",
                    self.cluster.url(),
                    not_ready.attempts
                );
                Error::Connectivity {
                    url: self.cluster.url().to_string(),
                    waited: not_ready.waited,
                    details: not_ready.last_error.to_string(),
                    program: self.runtime.program().to_string(),
                    container: container.to_string(),
                }
            })
    }
}

#[async_trait]
impl UseCase for Provision {
    type Res = ProvisionReport;
    type Param = ProvisionParameters;

    #[instrument(skip_all, fields(container = %param.container.name))]
    async fn execute(&self, param: Self::Param) -> Result<Self::Res, Error> {
        let ProvisionParameters {
            container,
            plugin,
            readiness,
        } = param;

        let runtime_version = self.runtime.version().await.context(PreconditionSnafu)?;
        info!("using {}", runtime_version);

        self.teardown(&container.name).await;

        info!("launching {} from {}", container.name, container.image);
        let container_id = self
            .runtime
            .run(&container)
            .await
            .context(LaunchSnafu {
                container: container.name.clone(),
            })?;

        let ready_after = self.wait_for_cluster(&container.name, &readiness).await?;
        info!(
            "elasticsearch ready at {} after {:?}",
            self.cluster.url(),
            ready_after
        );

        info!("installing plugin {} from {}", plugin.name, plugin.url);
        self.runtime
            .exec(&container.name, &plugin.install_command())
            .await
            .context(PluginInstallSnafu {
                plugin: plugin.name.clone(),
            })?;

        info!("restarting {} to load {}", container.name, plugin.name);
        self.runtime
            .restart(&container.name)
            .await
            .context(RestartSnafu {
                container: container.name.clone(),
            })?;
        let restarted_after = self.wait_for_cluster(&container.name, &readiness).await?;
        info!("elasticsearch back after {:?}", restarted_after);

        let plugin_listing = self
            .runtime
            .exec(&container.name, &PluginSpec::list_command())
            .await
            .context(PluginListingSnafu {
                container: container.name.clone(),
            })?
            .lines();

        if !plugin.is_listed(&plugin_listing) {
            return PluginMissingSnafu {
                plugin: plugin.name,
                listing: plugin_listing,
            }
            .fail();
        }

        Ok(ProvisionReport {
            container_id,
            runtime_version,
            ready_after,
            restarted_after,
            plugin_listing,
        })
    }
}
