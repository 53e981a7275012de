use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClusterInfo {
    pub cluster_name: String,
    pub version: String,
}

/// One entry of `_cat/plugins`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InstalledPlugin {
    #[serde(rename = "name")]
    pub node: String,
    pub component: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub container: String,
    pub container_running: bool,
    /// None when the cluster did not answer.
    pub cluster: Option<ClusterInfo>,
    pub plugins: Vec<InstalledPlugin>,
    pub plugin: String,
    pub plugin_active: bool,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.container_running {
            "running"
        } else {
            "not running"
        };
        writeln!(f, "container {}: {}", self.container, state)?;
        match &self.cluster {
            Some(info) => writeln!(
                f,
                "cluster {}: elasticsearch {}",
                info.cluster_name, info.version
            )?,
            None => writeln!(f, "cluster: unreachable")?,
        }
        for plugin in &self.plugins {
            writeln!(
                f,
                "plugin {} {} on {}",
                plugin.component, plugin.version, plugin.node
            )?;
        }
        let active = if self.plugin_active {
            "active"
        } else {
            "missing"
        };
        write!(f, "{}: {}", self.plugin, active)
    }
}
