//! HTTP surface.
//!
//! | Path                | Service     | Action |
//! |---------------------|-------------|--------|
//! | `/broker/status`    | broker      | status |
//! | `/broker/kill`      | broker      | stop   |
//! | `/broker/start`     | broker      | start  |
//! | `/zookeeper/status` | coordinator | status |
//! | `/zookeeper/kill`   | coordinator | stop   |
//! | `/zookeeper/start`  | coordinator | start  |
//!
//! Every outcome of a reachable runtime is a 200 with a single-key body.

pub mod server;

pub use server::{ControlApiServer, shutdown_signal};
