use async_trait::async_trait;

use crate::domain::model::error::Error;

#[async_trait]
pub trait UseCase {
    type Res;
    type Param;

    async fn execute(&self, param: Self::Param) -> Result<Self::Res, Error>;
}

pub mod provision;
pub mod readiness;
pub mod status;
pub mod teardown;
