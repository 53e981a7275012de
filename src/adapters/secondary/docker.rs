use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::domain::model::container::ContainerSpec;
use crate::domain::ports::secondary::runtime::{ContainerRuntime, Error, ExecOutput};

/// Drives containers through the docker command line client.
///
/// Any client accepting the same subcommands (eg podman) can be used by
/// changing the program.
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
}

impl DockerCli {
    pub fn new(program: impl Into<String>) -> Self {
        DockerCli {
            program: program.into(),
        }
    }

    fn command_line(&self, args: &[String]) -> String {
        format!("{} {}", self.program, args.join(" "))
    }

    async fn output(&self, args: &[String]) -> Result<std::process::Output, Error> {
        debug!("running {}", self.command_line(args));
        Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| {
                if source.kind() == ErrorKind::NotFound {
                    Error::NotFound {
                        program: self.program.clone(),
                    }
                } else {
                    Error::Spawn {
                        command: self.command_line(args),
                        source,
                    }
                }
            })
    }

    /// Runs the client and fails on a non zero exit status.
    async fn checked(&self, args: &[String]) -> Result<ExecOutput, Error> {
        let output = self.output(args).await?;
        let captured = ExecOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if output.status.success() {
            Ok(captured)
        } else {
            Err(Error::Failed {
                command: self.command_line(args),
                status: output.status.to_string(),
                stderr: captured.stderr.trim().to_string(),
            })
        }
    }
}

fn to_args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

/// Arguments of `docker run` for the given container.
pub fn run_args(spec: &ContainerSpec) -> Vec<String> {
    let mut args = to_args(&["run", "-d", "--name", &spec.name]);
    for port in &spec.ports {
        args.push(String::from("-p"));
        args.push(port.to_string());
    }
    args.push(String::from("-v"));
    args.push(spec.volume.to_string());
    for var in &spec.env {
        args.push(String::from("-e"));
        args.push(var.to_string());
    }
    args.push(spec.image.clone());
    args
}

/// Interprets `docker inspect --format {{.State.Running}}`.
fn parse_running(stdout: &str) -> bool {
    stdout.trim() == "true"
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    fn program(&self) -> &str {
        &self.program
    }

    async fn version(&self) -> Result<String, Error> {
        self.checked(&to_args(&["--version"]))
            .await
            .map(|output| output.stdout.trim().to_string())
    }

    async fn stop(&self, name: &str) -> Result<(), Error> {
        self.checked(&to_args(&["stop", name])).await.map(|_| ())
    }

    async fn remove(&self, name: &str) -> Result<(), Error> {
        self.checked(&to_args(&["rm", name])).await.map(|_| ())
    }

    async fn run(&self, spec: &ContainerSpec) -> Result<String, Error> {
        self.checked(&run_args(spec))
            .await
            .map(|output| output.stdout.trim().to_string())
    }

    async fn exec(&self, name: &str, cmd: &[String]) -> Result<ExecOutput, Error> {
        let mut exec = to_args(&["exec", name]);
        exec.extend(cmd.iter().cloned());
        self.checked(&exec).await
    }

    async fn restart(&self, name: &str) -> Result<(), Error> {
        self.checked(&to_args(&["restart", name])).await.map(|_| ())
    }

    async fn is_running(&self, name: &str) -> Result<bool, Error> {
        let output = self
            .output(&to_args(&["inspect", "--format", "{{.State.Running}}", name]))
            .await?;
        // inspect fails when there is no such container
        Ok(output.status.success() && parse_running(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn remove_volume(&self, name: &str) -> Result<(), Error> {
        self.checked(&to_args(&["volume", "rm", name])).await.map(|_| ())
    }
}
