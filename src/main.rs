mod cli;

use anyhow::Result;
use brokerctl::api::ControlApiServer;
use brokerctl::monitoring::TracingConfig;
use brokerctl::{Action, ContainerRuntime, ControlConfig, DockerRuntime, ManagedService};
use clap::Parser;
use cli::{Cli, Commands};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ControlConfig::load(cli.config.as_deref())?;
    if let Some(socket) = cli.docker_socket.clone() {
        config.docker.socket = Some(socket);
    }

    // Initialize logging
    let _log_guard = TracingConfig::from_settings(&config.logging, cli.verbose).init_tracing()?;

    match cli.command {
        Commands::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            info!("🚀 brokerctl starting up...");
            let runtime = DockerRuntime::connect(&config.docker)?;
            if let Err(e) = runtime.ping().await {
                warn!("Docker is not reachable yet, requests will report it: {}", e);
            }

            ControlApiServer::new(Arc::new(runtime))
                .with_address(config.server.bind_address.clone(), config.server.port)
                .start()
                .await?;
        }

        Commands::Status { service } => run_once(&config, service, Action::Status).await?,
        Commands::Start { service } => run_once(&config, service, Action::Start).await?,
        Commands::Kill { service } => run_once(&config, service, Action::Stop).await?,

        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

/// One request against the local runtime, printed as the HTTP body would be.
async fn run_once(config: &ControlConfig, service: ManagedService, action: Action) -> Result<()> {
    let runtime = DockerRuntime::connect(&config.docker)?;
    let runtime: &dyn ContainerRuntime = &runtime;

    let response = brokerctl::handle_request(service, action, runtime).await?;
    println!("{}", serde_json::to_string(&response)?);

    Ok(())
}
