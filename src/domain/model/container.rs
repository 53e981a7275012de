use serde::{Deserialize, Serialize};
use std::fmt;

/// A port published by the container, `host:container`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PortMapping {
    pub host: u16,
    pub container: u16,
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.container)
    }
}

/// A named volume bound to a directory inside the container.
///
/// The volume outlives the container: it is created on the first run and
/// only removed by an explicit teardown.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VolumeMount {
    pub name: String,
    pub target: String,
}

impl fmt::Display for VolumeMount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Everything needed to launch the Elasticsearch container.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub ports: Vec<PortMapping>,
    pub volume: VolumeMount,
    pub env: Vec<EnvVar>,
}

impl ContainerSpec {
    /// Returns the host port published for the given container port.
    pub fn host_port(&self, container: u16) -> Option<u16> {
        self.ports
            .iter()
            .find(|mapping| mapping.container == container)
            .map(|mapping| mapping.host)
    }
}
