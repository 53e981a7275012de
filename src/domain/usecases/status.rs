use async_trait::async_trait;
use snafu::ResultExt;
use tracing::debug;

use crate::domain::model::{
    error::{ClusterStatusSnafu, ContainerStatusSnafu, Error},
    status::StatusReport,
};
use crate::domain::ports::secondary::{
    cluster::{Cluster, Error as ClusterError},
    runtime::ContainerRuntime,
};
use crate::domain::usecases::UseCase;

/// Reports the container state, the cluster identity and its plugins.
pub struct Status {
    pub runtime: Box<dyn ContainerRuntime + Send + Sync + 'static>,
    pub cluster: Box<dyn Cluster + Send + Sync + 'static>,
}

pub struct StatusParameters {
    pub container: String,
    pub plugin: String,
}

impl Status {
    pub fn new(
        runtime: Box<dyn ContainerRuntime + Send + Sync + 'static>,
        cluster: Box<dyn Cluster + Send + Sync + 'static>,
    ) -> Self {
        Status { runtime, cluster }
    }
}

#[async_trait]
impl UseCase for Status {
    type Res = StatusReport;
    type Param = StatusParameters;

    async fn execute(&self, param: Self::Param) -> Result<Self::Res, Error> {
        let container_running = self
            .runtime
            .is_running(&param.container)
            .await
            .context(ContainerStatusSnafu)?;

        // An unreachable cluster is a valid status, anything else is not.
        let cluster = match self.cluster.info().await {
            Ok(info) => Some(info),
            Err(err @ ClusterError::Unreachable { .. }) => {
                debug!("{}", err);
                None
            }
            Err(err) => return Err(err).context(ClusterStatusSnafu),
        };

        let plugins = match cluster {
            Some(_) => self.cluster.plugins().await.context(ClusterStatusSnafu)?,
            None => Vec::new(),
        };
        let plugin_active = plugins
            .iter()
            .any(|installed| installed.component == param.plugin);

        Ok(StatusReport {
            container: param.container,
            container_running,
            cluster,
            plugins,
            plugin: param.plugin,
            plugin_active,
        })
    }
}
