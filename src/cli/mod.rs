use brokerctl::ManagedService;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brokerctl")]
#[command(about = "Inspect, start and stop the Kafka and Zookeeper containers over HTTP")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BROKERCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Docker socket path (defaults to DOCKER_HOST or the platform socket)
    #[arg(long, global = true, env = "DOCKER_SOCKET")]
    pub docker_socket: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP control service
    Serve {
        /// Address to bind
        #[arg(short, long, env = "BROKERCTL_BIND")]
        bind: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "BROKERCTL_PORT")]
        port: Option<u16>,
    },

    /// Report whether a service's container is running
    Status {
        /// broker|kafka or zookeeper|coordinator
        service: ManagedService,
    },

    /// Start a service's container if it is not running
    Start {
        /// broker|kafka or zookeeper|coordinator
        service: ManagedService,
    },

    /// Stop a service's container
    Kill {
        /// broker|kafka or zookeeper|coordinator
        service: ManagedService,
    },

    /// Print the effective configuration as TOML
    Config,
}
