//! Command line and environment configuration for the server binary.

use std::path::Path;
use std::time::Duration;

use clap::Parser;
use common::{RedisStorageConfig, StorageConfig};

use super::auth::Credentials;
use crate::{Config, Error, Result};

/// CLI arguments for the server. Every flag can also be set through the
/// environment.
#[derive(Parser, Debug)]
#[command(name = "codexcuse")]
#[command(about = "HTTP service storing excuses per source")]
pub struct CliArgs {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "PORT")]
    pub port: u16,

    /// Deployment environment, embedded in every storage key
    #[arg(long, default_value = crate::DEFAULT_ENVIRONMENT, env = "GO_ENV")]
    pub environment: String,

    /// User name accepted by basic auth on /api routes
    #[arg(long, env = "BASIC_AUTH_API_USER", default_value = "")]
    pub auth_user: String,

    /// Password accepted by basic auth on /api routes
    #[arg(long, env = "BASIC_AUTH_API_PASS", default_value = "", hide_env_values = true)]
    pub auth_pass: String,

    /// Redis server URL
    #[arg(long, default_value = "redis://localhost:6379", env = "REDIS_URL")]
    pub redis_url: String,

    /// Number of pooled Redis connections
    #[arg(long, default_value = "10", env = "REDIS_POOL_SIZE")]
    pub redis_pool_size: usize,

    /// Host of a linked Redis container; overrides --redis-url with the port below
    #[arg(long, env = "REDIS_PORT_6379_TCP_ADDR", hide = true)]
    pub redis_link_addr: Option<String>,

    /// Port of a linked Redis container
    #[arg(long, env = "REDIS_PORT_6379_TCP_PORT", hide = true)]
    pub redis_link_port: Option<String>,

    /// Timeout in seconds for each storage round-trip
    #[arg(long, default_value = "20", env = "CONTEXT_TIMEOUT")]
    pub context_timeout: u64,

    /// Number of excuses per page
    #[arg(long, default_value = "10", env = "PAGE_SIZE")]
    pub page_size: u64,

    /// Keep data in memory instead of Redis
    #[arg(long, env = "CODEXCUSE_IN_MEMORY")]
    pub in_memory: bool,

    /// YAML file describing the storage backend; overrides the Redis flags
    #[arg(long, env = "CODEXCUSE_STORAGE_CONFIG")]
    pub storage_config: Option<String>,
}

impl CliArgs {
    /// Builds the store configuration.
    ///
    /// Storage is chosen, in order of precedence, from `--storage-config`,
    /// `--in-memory`, then the Redis flags.
    pub fn to_config(&self) -> Result<Config> {
        let storage = if let Some(path) = &self.storage_config {
            load_storage_config(path)?
        } else if self.in_memory {
            StorageConfig::InMemory
        } else {
            StorageConfig::Redis(RedisStorageConfig {
                url: self.redis_url(),
                pool_size: self.redis_pool_size,
            })
        };

        Ok(Config {
            storage,
            environment: self.environment.clone(),
            page_size: self.page_size,
            request_timeout: Duration::from_secs(self.context_timeout),
        })
    }

    /// The Redis URL, rewritten to point at a linked container when the
    /// link variables are set.
    pub fn redis_url(&self) -> String {
        match (self.redis_link_addr.as_deref(), self.redis_link_port.as_deref()) {
            (Some(addr), Some(port)) if !addr.is_empty() && !port.is_empty() => {
                format!("redis://{}:{}", addr, port)
            }
            _ => self.redis_url.clone(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub credentials: Credentials,
}

impl From<&CliArgs> for ServerConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            host: args.host.clone(),
            port: args.port,
            environment: args.environment.clone(),
            credentials: Credentials::new(args.auth_user.clone(), args.auth_pass.clone()),
        }
    }
}

/// Load a storage configuration from a YAML file.
pub fn load_storage_config<P: AsRef<Path>>(path: P) -> Result<StorageConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::InvalidInput(format!("Failed to read storage config file: {}", e))
    })?;

    serde_yaml::from_str(&contents)
        .map_err(|e| Error::InvalidInput(format!("Failed to parse storage config file: {}", e)))
}
