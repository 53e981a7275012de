use async_trait::async_trait;
use snafu::Snafu;
use url::Url;

use crate::domain::model::status::{ClusterInfo, InstalledPlugin};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Elasticsearch unreachable at {}: {}", url, details))]
    Unreachable { url: String, details: String },

    #[snafu(display("Invalid response from {}: {}", url, details))]
    InvalidResponse { url: String, details: String },

    #[snafu(display("HTTP client error: {}", details))]
    Client { details: String },
}

/// HTTP side of the Elasticsearch node.
#[async_trait]
pub trait Cluster {
    /// Base URL of the node.
    fn url(&self) -> &Url;

    /// Any HTTP response counts as reachable, whatever its status or body.
    async fn ping(&self) -> Result<(), Error>;

    async fn info(&self) -> Result<ClusterInfo, Error>;

    async fn plugins(&self) -> Result<Vec<InstalledPlugin>, Error>;
}

#[async_trait]
impl<T: ?Sized> Cluster for Box<T>
where
    T: Cluster + Send + Sync,
{
    fn url(&self) -> &Url {
        (**self).url()
    }

    async fn ping(&self) -> Result<(), Error> {
        (**self).ping().await
    }

    async fn info(&self) -> Result<ClusterInfo, Error> {
        (**self).info().await
    }

    async fn plugins(&self) -> Result<Vec<InstalledPlugin>, Error> {
        (**self).plugins().await
    }
}
