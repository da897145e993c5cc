//! CLI argument definitions for the Devlog binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// SQLite database (default, production-ready)
    Sqlite,
    /// PostgreSQL database (for shared deployments)
    Postgres,
    /// In-memory with JSON persistence (for development and ephemeral deployments)
    Inmemory,
}

/// Devlog coding-journal server
#[derive(Parser, Debug)]
#[command(name = "devlog")]
#[command(about = "Devlog: coding journal server with sessions and per-entry sharing")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Devlog server
    Serve(ServeArgs),
    /// Check health of a running Devlog server
    Health(HealthArgs),
}

/// Storage backend configuration
#[derive(clap::Args, Debug, Clone)]
pub struct BackendConfig {
    /// Storage backend to use
    #[arg(short, long, default_value = "sqlite", env = "DEVLOG_BACKEND")]
    pub backend: Backend,

    /// Data directory for storage files.
    /// For SQLite: stores devlog.db
    /// For InMemory: stores devlog.json
    #[arg(short = 'D', long, env = "DEVLOG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// PostgreSQL connection URL (required when backend=postgres)
    #[arg(long, env = "DEVLOG_POSTGRES_URL", hide_env_values = true)]
    pub postgres_url: Option<String>,
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3002, env = "DEVLOG_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "DEVLOG_HOST")]
    pub host: String,

    #[command(flatten)]
    pub backend_config: BackendConfig,

    /// Secret used to sign session tokens
    #[arg(long, env = "DEVLOG_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Origins allowed to make credentialed cross-site requests
    #[arg(
        long = "allowed-origin",
        env = "DEVLOG_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Seconds between sweeps of expired revocation records (0 disables)
    #[arg(long, default_value_t = 3600, env = "DEVLOG_REVOCATION_SWEEP_SECS")]
    pub revocation_sweep_secs: u64,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Base URL of the server to check
    #[arg(long, default_value = "http://127.0.0.1:3002", env = "DEVLOG_URL")]
    pub url: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}
