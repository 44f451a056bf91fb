//! Container runtime collaborator.
//!
//! The control core only needs three operations from the runtime: list every
//! container (running or not), stop one by id, and start one by id. Anything
//! that can provide those can drive the reconciler.

pub mod docker;

use crate::error::Result;
use crate::types::ContainerSnapshot;
use async_trait::async_trait;

pub use docker::DockerRuntime;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// List all containers known to the runtime, including stopped ones.
    ///
    /// Fails with `RuntimeError::Unavailable` when the runtime can't be reached.
    async fn list_containers(&self) -> Result<Vec<ContainerSnapshot>>;

    async fn stop_container(&self, id: &str) -> Result<()>;

    async fn start_container(&self, id: &str) -> Result<()>;
}
