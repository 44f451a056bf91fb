use super::ContainerRuntime;
use crate::config::DockerSettings;
use crate::error::{Result, RuntimeError};
use crate::types::ContainerSnapshot;
use async_trait::async_trait;
use bollard::Docker;
use bollard::container::{ListContainersOptions, StartContainerOptions, StopContainerOptions};
use bollard::models::ContainerSummary;
use std::time::Duration;
use tracing::{debug, info};

/// Docker Engine API client.
///
/// A single `bollard::Docker` handle is opened at startup and cloned into
/// every request; the handle is a connection pool, not a live socket.
#[derive(Clone)]
pub struct DockerRuntime {
    /// Bounded by `request_timeout_secs`; used for list and ping
    docker: Docker,
    /// Same pool without a client-side deadline; used for stop and start
    commands: Docker,
    stop_timeout_secs: Option<i64>,
}

impl DockerRuntime {
    /// Open a client from the docker section of the configuration.
    ///
    /// This does not contact the daemon; an unreachable daemon surfaces on
    /// the first request instead.
    pub fn connect(settings: &DockerSettings) -> Result<Self> {
        let docker = match settings.socket.as_deref() {
            Some(socket) => {
                info!("🐳 Using Docker socket: {}", socket);
                Docker::connect_with_unix(
                    socket,
                    settings.request_timeout_secs,
                    bollard::API_DEFAULT_VERSION,
                )
            }
            None => {
                info!("🐳 Using local Docker defaults");
                Docker::connect_with_local_defaults().map(|docker| {
                    docker.with_timeout(Duration::from_secs(settings.request_timeout_secs))
                })
            }
        }
        .map_err(|e| RuntimeError::Unavailable {
            reason: e.to_string(),
        })?;

        // Stop only returns once the daemon's grace period is over, and start
        // can block on the container's own startup. Neither is cut short.
        let commands = docker.clone().with_timeout(Duration::MAX);

        Ok(Self {
            docker,
            commands,
            stop_timeout_secs: settings.stop_timeout_secs,
        })
    }

    /// Round-trip to the daemon, used for the startup reachability check.
    pub async fn ping(&self) -> Result<()> {
        self.docker
            .ping()
            .await
            .map(|_| ())
            .map_err(|e| {
                RuntimeError::Unavailable {
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn list_containers(&self) -> Result<Vec<ContainerSnapshot>> {
        let options = ListContainersOptions::<String> {
            all: true,
            ..Default::default()
        };

        let containers = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(|e| RuntimeError::Unavailable {
                reason: e.to_string(),
            })?;

        debug!("Docker reported {} containers", containers.len());
        Ok(containers.into_iter().map(ContainerSnapshot::from).collect())
    }

    async fn stop_container(&self, id: &str) -> Result<()> {
        let options = self
            .stop_timeout_secs
            .map(|t| StopContainerOptions { t });

        self.commands
            .stop_container(id, options)
            .await
            .map_err(|e| {
                RuntimeError::StopFailed {
                    id: id.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    async fn start_container(&self, id: &str) -> Result<()> {
        self.commands
            .start_container(id, None::<StartContainerOptions<String>>)
            .await
            .map_err(|e| {
                RuntimeError::StartFailed {
                    id: id.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

impl From<ContainerSummary> for ContainerSnapshot {
    fn from(value: ContainerSummary) -> Self {
        ContainerSnapshot {
            id: value.id.unwrap_or_default(),
            names: value.names.unwrap_or_default(),
            state: value.state.unwrap_or_default(),
        }
    }
}
