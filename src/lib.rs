//! brokerctl - control surface for the Kafka and Zookeeper containers on a host
//!
//! Each request re-reads the container list from the local runtime, finds the
//! target container by its canonical name, and reports or changes its run state.

pub mod api;
pub mod config;
pub mod error;
pub mod lookup;
pub mod monitoring;
pub mod reconcile;
pub mod runtime;
pub mod types;

pub use config::ControlConfig;
pub use error::{ControlError, Result};

pub use lookup::find_container;
pub use reconcile::{handle_request, reconcile};
pub use runtime::{ContainerRuntime, DockerRuntime};
pub use types::{Action, ContainerSnapshot, ManagedService, StatusResponse, StatusResult};
