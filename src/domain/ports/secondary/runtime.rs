use async_trait::async_trait;
use snafu::Snafu;

use crate::domain::model::container::ContainerSpec;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Container runtime client '{}' not found on this host", program))]
    NotFound { program: String },

    #[snafu(display("Could not execute `{}`: {}", command, source))]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[snafu(display("`{}` exited with {}: {}", command, status, stderr))]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Captured output of a command run inside a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    /// Non empty, trimmed stdout lines.
    pub fn lines(&self) -> Vec<String> {
        self.stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Operations on a container runtime, addressing containers and volumes by name.
#[async_trait]
pub trait ContainerRuntime {
    /// Name of the client program, used in operator hints.
    fn program(&self) -> &str;

    /// Version string of the client. Fails with `NotFound` when the client
    /// is not installed.
    async fn version(&self) -> Result<String, Error>;

    async fn stop(&self, name: &str) -> Result<(), Error>;

    async fn remove(&self, name: &str) -> Result<(), Error>;

    /// Launches a detached container and returns its id.
    async fn run(&self, spec: &ContainerSpec) -> Result<String, Error>;

    async fn exec(&self, name: &str, cmd: &[String]) -> Result<ExecOutput, Error>;

    async fn restart(&self, name: &str) -> Result<(), Error>;

    /// False when the container is stopped or does not exist.
    async fn is_running(&self, name: &str) -> Result<bool, Error>;

    async fn remove_volume(&self, name: &str) -> Result<(), Error>;
}

#[async_trait]
impl<T: ?Sized> ContainerRuntime for Box<T>
where
    T: ContainerRuntime + Send + Sync,
{
    fn program(&self) -> &str {
        (**self).program()
    }

    async fn version(&self) -> Result<String, Error> {
        (**self).version().await
    }

    async fn stop(&self, name: &str) -> Result<(), Error> {
        (**self).stop(name).await
    }

    async fn remove(&self, name: &str) -> Result<(), Error> {
        (**self).remove(name).await
    }

    async fn run(&self, spec: &ContainerSpec) -> Result<String, Error> {
        (**self).run(spec).await
    }

    async fn exec(&self, name: &str, cmd: &[String]) -> Result<ExecOutput, Error> {
        (**self).exec(name, cmd).await
    }

    async fn restart(&self, name: &str) -> Result<(), Error> {
        (**self).restart(name).await
    }

    async fn is_running(&self, name: &str) -> Result<bool, Error> {
        (**self).is_running(name).await
    }

    async fn remove_volume(&self, name: &str) -> Result<(), Error> {
        (**self).remove_volume(name).await
    }
}
