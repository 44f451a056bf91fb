//! Lifecycle reconciliation: decide what a request does to a container and
//! what it reports back.
//!
//! | action | found | state     | command       | result                          |
//! |--------|-------|-----------|---------------|---------------------------------|
//! | status | no    |           |               | Not Running                     |
//! | status | yes   | running   |               | running                         |
//! | status | yes   | other     |               | Not Running                     |
//! | stop   | no    |           |               | Not Running                     |
//! | stop   | yes   | any       | stop(id)      | Killed / Invalid Container      |
//! | start  | no    |           |               | Not Running                     |
//! | start  | yes   | running   |               | Already Running                 |
//! | start  | yes   | other     | start(id)     | Started / Cannot Start          |

use crate::error::Result;
use crate::lookup::find_container;
use crate::runtime::ContainerRuntime;
use crate::types::{Action, ContainerSnapshot, ManagedService, StatusResponse, StatusResult};
use tracing::{debug, error, info, warn};

/// Apply `action` to an already looked-up container.
///
/// Never fails: command errors are logged and folded into the result.
/// Issues at most one runtime command.
pub async fn reconcile(
    action: Action,
    found: Option<&ContainerSnapshot>,
    runtime: &dyn ContainerRuntime,
) -> StatusResult {
    let Some(container) = found else {
        return StatusResult::NotRunning;
    };

    match action {
        Action::Status => {
            if container.is_running() {
                StatusResult::Running
            } else {
                StatusResult::NotRunning
            }
        }
        Action::Stop => {
            info!("🛑 Stopping container {} ({})", container.id, container.state);
            match runtime.stop_container(&container.id).await {
                Ok(()) => StatusResult::Killed,
                Err(e) => {
                    warn!("Failed to stop container {}: {}", container.id, e);
                    StatusResult::InvalidContainer
                }
            }
        }
        Action::Start => {
            if container.is_running() {
                debug!("Container {} already running, not starting", container.id);
                return StatusResult::AlreadyRunning;
            }

            info!("🚀 Starting container {} ({})", container.id, container.state);
            match runtime.start_container(&container.id).await {
                Ok(()) => StatusResult::Started,
                Err(e) => {
                    warn!("Failed to start container {}: {}", container.id, e);
                    StatusResult::CannotStart
                }
            }
        }
    }
}

/// Handle one control request end to end: list, look up, reconcile.
///
/// The only error returned is the runtime being unavailable for listing.
pub async fn handle_request(
    service: ManagedService,
    action: Action,
    runtime: &dyn ContainerRuntime,
) -> Result<StatusResponse> {
    let containers = runtime.list_containers().await.map_err(|e| {
        error!("Cannot enumerate containers for {} {}: {}", service, action, e);
        e
    })?;

    let found = find_container(&containers, service.container_name());
    debug!(
        "Lookup of {} among {} containers: {}",
        service.container_name(),
        containers.len(),
        found.map(|c| c.id.as_str()).unwrap_or("not found")
    );

    let result = reconcile(action, found, runtime).await;
    info!(service = %service, action = %action, result = %result, "Request handled");

    Ok(StatusResponse::new(service, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ControlError, RuntimeError};
    use crate::runtime::MockContainerRuntime;
    use mockall::predicate::eq;
    use proptest::prelude::*;
    use test_case::test_case;

    fn snapshot(state: &str) -> ContainerSnapshot {
        ContainerSnapshot::new("c0ffee", &["/kafka"], state)
    }

    fn no_commands() -> MockContainerRuntime {
        let mut runtime = MockContainerRuntime::new();
        runtime.expect_stop_container().never();
        runtime.expect_start_container().never();
        runtime
    }

    #[test_case(Action::Status ; "status")]
    #[test_case(Action::Stop ; "stop")]
    #[test_case(Action::Start ; "start")]
    #[tokio::test]
    async fn test_missing_container_reports_not_running(action: Action) {
        let runtime = no_commands();
        assert_eq!(
            reconcile(action, None, &runtime).await,
            StatusResult::NotRunning
        );
    }

    #[test_case("running", StatusResult::Running ; "running")]
    #[test_case("exited", StatusResult::NotRunning ; "exited")]
    #[test_case("paused", StatusResult::NotRunning ; "paused")]
    #[test_case("", StatusResult::NotRunning ; "empty state")]
    #[tokio::test]
    async fn test_status_issues_no_commands(state: &str, expected: StatusResult) {
        let runtime = no_commands();
        let container = snapshot(state);
        assert_eq!(
            reconcile(Action::Status, Some(&container), &runtime).await,
            expected
        );
    }

    #[test_case("running" ; "running")]
    #[test_case("exited" ; "exited")]
    #[tokio::test]
    async fn test_stop_is_unconditional_once_found(state: &str) {
        let mut runtime = MockContainerRuntime::new();
        runtime
            .expect_stop_container()
            .with(eq("c0ffee"))
            .times(1)
            .returning(|_| Ok(()));
        runtime.expect_start_container().never();

        let container = snapshot(state);
        assert_eq!(
            reconcile(Action::Stop, Some(&container), &runtime).await,
            StatusResult::Killed
        );
    }

    #[tokio::test]
    async fn test_stop_failure_reports_invalid_container() {
        let mut runtime = MockContainerRuntime::new();
        runtime.expect_stop_container().times(1).returning(|id| {
            Err(RuntimeError::StopFailed {
                id: id.to_string(),
                reason: "no such container".to_string(),
            }
            .into())
        });

        let container = snapshot("running");
        assert_eq!(
            reconcile(Action::Stop, Some(&container), &runtime).await,
            StatusResult::InvalidContainer
        );
    }

    #[tokio::test]
    async fn test_start_on_running_container_issues_no_command() {
        let runtime = no_commands();
        let container = snapshot("running");
        assert_eq!(
            reconcile(Action::Start, Some(&container), &runtime).await,
            StatusResult::AlreadyRunning
        );
    }

    #[tokio::test]
    async fn test_start_on_stopped_container() {
        let mut runtime = MockContainerRuntime::new();
        runtime
            .expect_start_container()
            .with(eq("c0ffee"))
            .times(1)
            .returning(|_| Ok(()));

        let container = snapshot("exited");
        assert_eq!(
            reconcile(Action::Start, Some(&container), &runtime).await,
            StatusResult::Started
        );
    }

    #[tokio::test]
    async fn test_start_failure_reports_cannot_start() {
        let mut runtime = MockContainerRuntime::new();
        runtime.expect_start_container().times(1).returning(|id| {
            Err(RuntimeError::StartFailed {
                id: id.to_string(),
                reason: "port is already allocated".to_string(),
            }
            .into())
        });

        let container = snapshot("created");
        assert_eq!(
            reconcile(Action::Start, Some(&container), &runtime).await,
            StatusResult::CannotStart
        );
    }

    #[tokio::test]
    async fn test_handle_request_looks_up_by_service_name() {
        let mut runtime = MockContainerRuntime::new();
        runtime.expect_list_containers().times(1).returning(|| {
            Ok(vec![
                ContainerSnapshot::new("k1", &["/kafka"], "running"),
                ContainerSnapshot::new("z1", &["/zookeeper"], "exited"),
            ])
        });
        runtime
            .expect_stop_container()
            .with(eq("z1"))
            .times(1)
            .returning(|_| Ok(()));

        let response = handle_request(ManagedService::Coordinator, Action::Stop, &runtime)
            .await
            .unwrap();
        assert_eq!(
            response,
            StatusResponse::new(ManagedService::Coordinator, StatusResult::Killed)
        );
    }

    #[tokio::test]
    async fn test_handle_request_propagates_unavailable_runtime() {
        let mut runtime = MockContainerRuntime::new();
        runtime.expect_list_containers().returning(|| {
            Err(RuntimeError::Unavailable {
                reason: "connection refused".to_string(),
            }
            .into())
        });

        let err = handle_request(ManagedService::Broker, Action::Status, &runtime)
            .await
            .unwrap_err();
        assert!(err.is_runtime_unavailable());
        assert!(matches!(
            err,
            ControlError::Runtime(RuntimeError::Unavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_repeated_status_is_stable() {
        let mut runtime = no_commands();
        runtime
            .expect_list_containers()
            .times(5)
            .returning(|| Ok(vec![ContainerSnapshot::new("k1", &["/kafka"], "running")]));

        for _ in 0..5 {
            let response = handle_request(ManagedService::Broker, Action::Status, &runtime)
                .await
                .unwrap();
            assert_eq!(response.result, StatusResult::Running);
        }
    }

    fn any_action() -> impl Strategy<Value = Action> {
        prop_oneof![Just(Action::Status), Just(Action::Stop), Just(Action::Start)]
    }

    proptest! {
        #[test]
        fn prop_result_is_always_a_defined_value(
            action in any_action(),
            state in prop_oneof![Just("running".to_string()), "[a-z]{0,10}"],
            present in any::<bool>(),
            command_ok in any::<bool>(),
        ) {
            let mut runtime = MockContainerRuntime::new();
            runtime.expect_stop_container().returning(move |id| {
                if command_ok {
                    Ok(())
                } else {
                    Err(RuntimeError::StopFailed { id: id.to_string(), reason: "boom".to_string() }.into())
                }
            });
            runtime.expect_start_container().returning(move |id| {
                if command_ok {
                    Ok(())
                } else {
                    Err(RuntimeError::StartFailed { id: id.to_string(), reason: "boom".to_string() }.into())
                }
            });

            let container = ContainerSnapshot::new("id", &["/kafka"], state);
            let found = present.then_some(&container);
            let result = tokio_test::block_on(reconcile(action, found, &runtime));

            prop_assert!(StatusResult::ALL.contains(&result));
            let body = serde_json::to_value(StatusResponse::new(ManagedService::Broker, result)).unwrap();
            prop_assert_eq!(body.as_object().map(|o| o.len()), Some(1));
        }
    }
}
