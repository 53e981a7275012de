//! In memory container runtime and cluster, sharing one state.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use url::Url;

use esvi::domain::model::{
    container::{ContainerSpec, EnvVar, PortMapping, VolumeMount},
    plugin::{PluginSpec, PLUGIN_MANAGER},
    readiness::ReadinessPolicy,
    status::{ClusterInfo, InstalledPlugin},
};
use esvi::domain::ports::secondary::{
    cluster::{Cluster, Error as ClusterError},
    runtime::{ContainerRuntime, Error as RuntimeError, ExecOutput},
};

pub const PLUGIN: &str = "analysis-vietnamese";

#[derive(Debug, Clone)]
pub struct FakeContainer {
    pub spec: ContainerSpec,
    pub running: bool,
    /// Installed on disk, loaded by the node after a restart.
    pub plugins: Vec<String>,
    pub loaded_plugins: Vec<String>,
}

#[derive(Debug, Default)]
pub struct State {
    pub client_missing: bool,
    pub fail_run: bool,
    pub fail_install: bool,
    /// The plugin manager reports success but installs nothing.
    pub silent_install_failure: bool,
    pub never_reachable: bool,
    pub containers: BTreeMap<String, FakeContainer>,
    pub volumes: BTreeSet<String>,
    pub calls: Vec<String>,
    pub next_id: u32,
}

#[derive(Debug, Clone, Default)]
pub struct FakeRuntime {
    pub state: Arc<Mutex<State>>,
}

fn failed(command: &str, stderr: &str) -> RuntimeError {
    RuntimeError::Failed {
        command: command.to_string(),
        status: String::from("exit status: 1"),
        stderr: stderr.to_string(),
    }
}

impl FakeRuntime {
    pub fn new() -> Self {
        FakeRuntime::default()
    }

    pub fn with<F: FnOnce(&mut State)>(self, f: F) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn container(&self, name: &str) -> Option<FakeContainer> {
        self.state.lock().unwrap().containers.get(name).cloned()
    }

    pub fn container_count(&self) -> usize {
        self.state.lock().unwrap().containers.len()
    }

    pub fn cluster(&self) -> FakeCluster {
        FakeCluster {
            state: self.state.clone(),
            url: Url::parse("http://localhost:9200").unwrap(),
        }
    }

    fn record(&self, call: String) -> std::sync::MutexGuard<'_, State> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    fn program(&self) -> &str {
        "docker"
    }

    async fn version(&self) -> Result<String, RuntimeError> {
        let state = self.record(String::from("version"));
        if state.client_missing {
            Err(RuntimeError::NotFound {
                program: String::from("docker"),
            })
        } else {
            Ok(String::from("Docker version 24.0.7, build afdd53b"))
        }
    }

    async fn stop(&self, name: &str) -> Result<(), RuntimeError> {
        let mut state = self.record(format!("stop {}", name));
        match state.containers.get_mut(name) {
            Some(container) => {
                container.running = false;
                container.loaded_plugins.clear();
                Ok(())
            }
            None => Err(failed("docker stop", "No such container")),
        }
    }

    async fn remove(&self, name: &str) -> Result<(), RuntimeError> {
        let mut state = self.record(format!("rm {}", name));
        match state.containers.get(name).map(|container| container.running) {
            Some(false) => {
                state.containers.remove(name);
                Ok(())
            }
            Some(true) => Err(failed("docker rm", "container is running")),
            None => Err(failed("docker rm", "No such container")),
        }
    }

    async fn run(&self, spec: &ContainerSpec) -> Result<String, RuntimeError> {
        let mut state = self.record(format!("run {}", spec.name));
        if state.fail_run {
            return Err(failed("docker run", "pull access denied"));
        }
        if state.containers.contains_key(&spec.name) {
            return Err(failed("docker run", "Conflict. The container name is already in use"));
        }
        state.volumes.insert(spec.volume.name.clone());
        state.containers.insert(
            spec.name.clone(),
            FakeContainer {
                spec: spec.clone(),
                running: true,
                plugins: Vec::new(),
                loaded_plugins: Vec::new(),
            },
        );
        state.next_id += 1;
        Ok(format!("{:064x}", state.next_id))
    }

    async fn exec(&self, name: &str, cmd: &[String]) -> Result<ExecOutput, RuntimeError> {
        let mut state = self.record(format!("exec {} {}", name, cmd.join(" ")));
        let fail_install = state.fail_install;
        let silent_install_failure = state.silent_install_failure;
        let container = match state.containers.get_mut(name) {
            Some(container) if container.running => container,
            _ => return Err(failed("docker exec", "container is not running")),
        };
        match cmd.get(1).map(String::as_str) {
            Some("install") if cmd[0] == PLUGIN_MANAGER => {
                if fail_install {
                    return Err(failed("docker exec", "Connection timed out"));
                }
                if !silent_install_failure {
                    container.plugins.push(String::from(PLUGIN));
                }
                Ok(ExecOutput {
                    stdout: String::from("-> Installed analysis-vietnamese\n"),
                    stderr: String::new(),
                })
            }
            Some("list") if cmd[0] == PLUGIN_MANAGER => Ok(ExecOutput {
                stdout: container
                    .plugins
                    .iter()
                    .map(|plugin| format!("{}\n", plugin))
                    .collect(),
                stderr: String::new(),
            }),
            _ => Err(failed("docker exec", "executable file not found")),
        }
    }

    async fn restart(&self, name: &str) -> Result<(), RuntimeError> {
        let mut state = self.record(format!("restart {}", name));
        match state.containers.get_mut(name) {
            Some(container) => {
                container.running = true;
                container.loaded_plugins = container.plugins.clone();
                Ok(())
            }
            None => Err(failed("docker restart", "No such container")),
        }
    }

    async fn is_running(&self, name: &str) -> Result<bool, RuntimeError> {
        let state = self.record(format!("inspect {}", name));
        Ok(state
            .containers
            .get(name)
            .map(|container| container.running)
            .unwrap_or(false))
    }

    async fn remove_volume(&self, name: &str) -> Result<(), RuntimeError> {
        let mut state = self.record(format!("volume rm {}", name));
        let in_use = state
            .containers
            .values()
            .any(|container| container.spec.volume.name == name);
        if in_use {
            return Err(failed("docker volume rm", "volume is in use"));
        }
        if state.volumes.remove(name) {
            Ok(())
        } else {
            Err(failed("docker volume rm", "no such volume"))
        }
    }
}

/// Reachable as soon as one container is running.
#[derive(Debug, Clone)]
pub struct FakeCluster {
    state: Arc<Mutex<State>>,
    url: Url,
}

impl FakeCluster {
    fn running(&self) -> Result<Vec<String>, ClusterError> {
        let state = self.state.lock().unwrap();
        let running = state.containers.values().find(|container| container.running);
        match running {
            Some(container) if !state.never_reachable => Ok(container.loaded_plugins.clone()),
            _ => Err(ClusterError::Unreachable {
                url: self.url.to_string(),
                details: String::from("Connection refused"),
            }),
        }
    }
}

#[async_trait]
impl Cluster for FakeCluster {
    fn url(&self) -> &Url {
        &self.url
    }

    async fn ping(&self) -> Result<(), ClusterError> {
        self.running().map(|_| ())
    }

    async fn info(&self) -> Result<ClusterInfo, ClusterError> {
        self.running().map(|_| ClusterInfo {
            cluster_name: String::from("docker-cluster"),
            version: String::from("8.7.0"),
        })
    }

    async fn plugins(&self) -> Result<Vec<InstalledPlugin>, ClusterError> {
        self.running().map(|plugins| {
            plugins
                .into_iter()
                .map(|component| InstalledPlugin {
                    node: String::from("node-1"),
                    component,
                    version: String::from("8.7.0"),
                })
                .collect()
        })
    }
}

pub fn container_spec() -> ContainerSpec {
    ContainerSpec {
        name: String::from("elasticsearch"),
        image: String::from("docker.elastic.co/elasticsearch/elasticsearch:8.7.0"),
        ports: vec![
            PortMapping {
                host: 9200,
                container: 9200,
            },
            PortMapping {
                host: 9300,
                container: 9300,
            },
        ],
        volume: VolumeMount {
            name: String::from("es-vietnamese-data"),
            target: String::from("/usr/share/elasticsearch/data"),
        },
        env: vec![
            EnvVar {
                key: String::from("discovery.type"),
                value: String::from("single-node"),
            },
            EnvVar {
                key: String::from("xpack.security.enabled"),
                value: String::from("false"),
            },
            EnvVar {
                key: String::from("xpack.security.http.ssl.enabled"),
                value: String::from("false"),
            },
        ],
    }
}

pub fn plugin_spec() -> PluginSpec {
    PluginSpec {
        name: String::from(PLUGIN),
        url: Url::parse(
            "https://github.com/duydo/elasticsearch-analysis-vietnamese/releases/download/v8.7.0/elasticsearch-analysis-vietnamese-8.7.0.zip",
        )
        .unwrap(),
    }
}

pub fn readiness() -> ReadinessPolicy {
    ReadinessPolicy::poll(
        std::time::Duration::from_secs(1),
        std::time::Duration::from_secs(1),
        std::time::Duration::from_secs(30),
    )
}
