use async_trait::async_trait;
use snafu::ResultExt;
use tracing::{info, warn};

use crate::domain::model::error::{Error, PreconditionSnafu, VolumeRemovalSnafu};
use crate::domain::ports::secondary::runtime::ContainerRuntime;
use crate::domain::usecases::UseCase;

/// Removes the container and, on request, its data volume.
pub struct Teardown {
    pub runtime: Box<dyn ContainerRuntime + Send + Sync + 'static>,
}

pub struct TeardownParameters {
    pub container: String,
    /// Volume to delete, with all the indices it holds.
    pub volume: Option<String>,
}

impl Teardown {
    pub fn new(runtime: Box<dyn ContainerRuntime + Send + Sync + 'static>) -> Self {
        Teardown { runtime }
    }
}

#[async_trait]
impl UseCase for Teardown {
    type Res = ();
    type Param = TeardownParameters;

    async fn execute(&self, param: Self::Param) -> Result<Self::Res, Error> {
        self.runtime.version().await.context(PreconditionSnafu)?;

        // The container may already be gone.
        if let Err(err) = self.runtime.stop(&param.container).await {
            warn!("could not stop {}: {}", param.container, err);
        }
        match self.runtime.remove(&param.container).await {
            Ok(()) => info!("removed container {}", param.container),
            Err(err) => warn!("could not remove {}: {}", param.container, err),
        }

        if let Some(volume) = param.volume {
            self.runtime
                .remove_volume(&volume)
                .await
                .context(VolumeRemovalSnafu {
                    volume: volume.clone(),
                })?;
            info!("removed volume {}", volume);
        }
        Ok(())
    }
}
