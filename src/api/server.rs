use crate::config::ServerSettings;
use crate::error::{ConfigError, ControlError, Result};
use crate::reconcile::handle_request;
use crate::runtime::ContainerRuntime;
use crate::types::{Action, ManagedService};
use serde::Serialize;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

// Convert ControlError to warp::Rejection
impl warp::reject::Reject for ControlError {}

/// HTTP control surface for the broker and coordinator containers
pub struct ControlApiServer {
    runtime: Arc<dyn ContainerRuntime>,
    bind_address: String,
    port: u16,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ControlApiServer {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        let defaults = ServerSettings::default();
        Self {
            runtime,
            bind_address: defaults.bind_address,
            port: defaults.port,
        }
    }

    pub fn with_address(mut self, address: String, port: u16) -> Self {
        self.bind_address = address;
        self.port = port;
        self
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.bind_address, self.port);
        addr.parse().map_err(|e| {
            ConfigError::InvalidValue {
                field: "server.bind_address".to_string(),
                reason: format!("Invalid bind address {}: {}", addr, e),
            }
            .into()
        })
    }

    /// The full route table, with rejection handling and request logging.
    pub fn routes(
        runtime: Arc<dyn ContainerRuntime>,
    ) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
        let rt = &runtime;

        let broker_status = Self::control_route(rt.clone(), ManagedService::Broker, Action::Status);
        let broker_kill = Self::control_route(rt.clone(), ManagedService::Broker, Action::Stop);
        let broker_start = Self::control_route(rt.clone(), ManagedService::Broker, Action::Start);

        let zookeeper_status =
            Self::control_route(rt.clone(), ManagedService::Coordinator, Action::Status);
        let zookeeper_kill =
            Self::control_route(rt.clone(), ManagedService::Coordinator, Action::Stop);
        let zookeeper_start =
            Self::control_route(rt.clone(), ManagedService::Coordinator, Action::Start);

        broker_status
            .or(broker_kill)
            .unify()
            .or(broker_start)
            .unify()
            .or(zookeeper_status)
            .unify()
            .or(zookeeper_kill)
            .unify()
            .or(zookeeper_start)
            .unify()
            .recover(Self::handle_rejection)
            .with(warp::log("brokerctl::api"))
    }

    /// `GET /<service>/<action>`
    fn control_route(
        runtime: Arc<dyn ContainerRuntime>,
        service: ManagedService,
        action: Action,
    ) -> BoxedFilter<(Response,)> {
        warp::path(service.route_segment())
            .and(warp::path(action.route_segment()))
            .and(warp::path::end())
            .and(warp::get())
            .and_then(move || {
                let rt = runtime.clone();
                async move { Self::control_handler(rt, service, action).await }
            })
            .boxed()
    }

    async fn control_handler(
        runtime: Arc<dyn ContainerRuntime>,
        service: ManagedService,
        action: Action,
    ) -> Result<Response, Rejection> {
        match handle_request(service, action, runtime.as_ref()).await {
            Ok(response) => Ok(warp::reply::json(&response).into_response()),
            Err(e) => {
                tracing::error!("Failed to handle {} {}: {}", service, action, e);
                Err(warp::reject::custom(e))
            }
        }
    }

    async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
        let (status, message) = if err.is_not_found() {
            (StatusCode::NOT_FOUND, "Not Found".to_string())
        } else if let Some(e) = err.find::<ControlError>() {
            if e.is_runtime_unavailable() {
                (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
            } else {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
            (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
        } else {
            tracing::warn!("Unhandled rejection: {:?}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            )
        };

        Ok(warp::reply::with_status(
            warp::reply::json(&ErrorBody { error: message }),
            status,
        ))
    }

    /// Serve until `shutdown` resolves.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let socket_addr = self.socket_addr()?;
        tracing::info!("🎛️  Starting control API on {}", socket_addr);

        let (addr, server) = warp::serve(Self::routes(self.runtime.clone()))
            .try_bind_with_graceful_shutdown(socket_addr, shutdown)
            .map_err(|e| {
                ControlError::Other(anyhow::anyhow!("Cannot bind {}: {}", socket_addr, e))
            })?;

        tracing::info!("✅ Control API listening on http://{}", addr);
        server.await;
        tracing::info!("Control API stopped");

        Ok(())
    }

    pub async fn start(&self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
