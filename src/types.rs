use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the two services this process controls.
///
/// Container names are fixed identifiers, not configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagedService {
    /// Message broker, historically the `kafka` container
    Broker,
    /// Coordination service, historically the `zookeeper` container
    Coordinator,
}

impl ManagedService {
    pub const ALL: [ManagedService; 2] = [ManagedService::Broker, ManagedService::Coordinator];

    /// Canonical container name as reported by the runtime (first alias).
    pub fn container_name(&self) -> &'static str {
        match self {
            ManagedService::Broker => "/kafka",
            ManagedService::Coordinator => "/zookeeper",
        }
    }

    /// Key used in the single-field response payload.
    pub fn display_key(&self) -> &'static str {
        match self {
            ManagedService::Broker => "Kafka",
            ManagedService::Coordinator => "Zookeeper",
        }
    }

    /// First path segment of this service's HTTP routes.
    pub fn route_segment(&self) -> &'static str {
        match self {
            ManagedService::Broker => "broker",
            ManagedService::Coordinator => "zookeeper",
        }
    }
}

impl fmt::Display for ManagedService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_segment())
    }
}

impl FromStr for ManagedService {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "broker" | "kafka" => Ok(ManagedService::Broker),
            "zookeeper" | "coordinator" => Ok(ManagedService::Coordinator),
            other => Err(format!(
                "unknown service '{}' (expected broker|kafka or zookeeper|coordinator)",
                other
            )),
        }
    }
}

/// Requested lifecycle action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Status,
    Stop,
    Start,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Status, Action::Stop, Action::Start];

    /// Last path segment of the HTTP route for this action.
    pub fn route_segment(&self) -> &'static str {
        match self {
            Action::Status => "status",
            Action::Stop => "kill",
            Action::Start => "start",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_segment())
    }
}

/// Point-in-time read of one container, as reported by the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContainerSnapshot {
    /// Opaque handle used for lifecycle commands
    pub id: String,
    /// Aliases in runtime order; the first one is canonical
    pub names: Vec<String>,
    /// Free-text run state, e.g. "running" or "exited"
    pub state: String,
}

impl ContainerSnapshot {
    pub fn new(id: impl Into<String>, names: &[&str], state: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            names: names.iter().map(|n| n.to_string()).collect(),
            state: state.into(),
        }
    }

    pub fn canonical_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    pub fn is_running(&self) -> bool {
        self.state == "running"
    }
}

/// Outcome of one control request.
///
/// The wire strings are kept exactly as older consumers expect them,
/// including the lowercase `running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusResult {
    Running,
    NotRunning,
    AlreadyRunning,
    Started,
    Killed,
    CannotStart,
    InvalidContainer,
}

impl StatusResult {
    pub const ALL: [StatusResult; 7] = [
        StatusResult::Running,
        StatusResult::NotRunning,
        StatusResult::AlreadyRunning,
        StatusResult::Started,
        StatusResult::Killed,
        StatusResult::CannotStart,
        StatusResult::InvalidContainer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusResult::Running => "running",
            StatusResult::NotRunning => "Not Running",
            StatusResult::AlreadyRunning => "Already Running",
            StatusResult::Started => "Started",
            StatusResult::Killed => "Killed",
            StatusResult::CannotStart => "Cannot Start",
            StatusResult::InvalidContainer => "Invalid Container",
        }
    }
}

impl fmt::Display for StatusResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatusResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Response body: one key (the service's display key) mapped to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusResponse {
    pub service: ManagedService,
    pub result: StatusResult,
}

impl StatusResponse {
    pub fn new(service: ManagedService, result: StatusResult) -> Self {
        Self { service, result }
    }
}

impl Serialize for StatusResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.service.display_key(), &self.result)?;
        map.end()
    }
}
