use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::domain::model::status::{ClusterInfo, InstalledPlugin};
use crate::domain::ports::secondary::cluster::{Cluster, Error};

/// Plain HTTP client for a single Elasticsearch node, security disabled.
#[derive(Debug, Clone)]
pub struct ElasticsearchHttp {
    client: reqwest::Client,
    url: Url,
}

#[derive(Debug, Deserialize)]
struct RootResponse {
    cluster_name: String,
    version: VersionResponse,
}

#[derive(Debug, Deserialize)]
struct VersionResponse {
    number: String,
}

impl ElasticsearchHttp {
    /// `timeout` bounds each request, including a probe against a node
    /// which accepts connections but does not answer yet.
    pub fn new(url: Url, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|err| Error::Client {
                details: err.to_string(),
            })?;
        Ok(ElasticsearchHttp { client, url })
    }

    async fn get_json<T>(&self, url: Url) -> Result<T, Error>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| Error::Unreachable {
                url: url.to_string(),
                details: err.to_string(),
            })?;
        let response = response
            .error_for_status()
            .map_err(|err| Error::InvalidResponse {
                url: url.to_string(),
                details: err.to_string(),
            })?;
        response.json().await.map_err(|err| Error::InvalidResponse {
            url: url.to_string(),
            details: err.to_string(),
        })
    }

    fn cat_plugins_url(&self) -> Result<Url, Error> {
        let mut url = self.url.join("_cat/plugins").map_err(|err| Error::Client {
            details: err.to_string(),
        })?;
        url.set_query(Some("format=json"));
        Ok(url)
    }
}

#[async_trait]
impl Cluster for ElasticsearchHttp {
    fn url(&self) -> &Url {
        &self.url
    }

    async fn ping(&self) -> Result<(), Error> {
        self.client
            .get(self.url.clone())
            .send()
            .await
            .map(|_| ())
            .map_err(|err| Error::Unreachable {
                url: self.url.to_string(),
                details: err.to_string(),
            })
    }

    async fn info(&self) -> Result<ClusterInfo, Error> {
        let root: RootResponse = self.get_json(self.url.clone()).await?;
        Ok(ClusterInfo {
            cluster_name: root.cluster_name,
            version: root.version.number,
        })
    }

    async fn plugins(&self) -> Result<Vec<InstalledPlugin>, Error> {
        self.get_json(self.cat_plugins_url()?).await
    }
}
