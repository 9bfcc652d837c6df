//! Server configuration.
//!
//! Every setting can be given as a command-line flag or through the
//! environment, the latter being how the service is usually deployed.

use std::time::Duration;

use clap::{Args, Parser};

/// Task manager and CRM backend.
#[derive(Parser, Debug, Clone)]
#[command(name = "workdesk", version, about = "Task manager and CRM backend")]
pub struct ServerConfig {
    /// Address to bind to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    #[command(flatten)]
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which document store to open at startup.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreConfig {
    /// MongoDB connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// MongoDB database name.
    #[arg(long, env = "DATABASE_NAME")]
    pub database_name: Option<String>,

    /// Seconds to wait for a reachable MongoDB server before an operation fails.
    #[arg(long, env = "DATABASE_TIMEOUT_SECS")]
    pub database_timeout_secs: Option<u64>,

    /// Keep data in process memory instead of MongoDB. Nothing survives a restart.
    #[arg(long)]
    pub in_memory: bool,
}

impl StoreConfig {
    pub fn database_timeout(&self) -> Option<Duration> {
        self.database_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_are_parsed() {
        let config = ServerConfig::try_parse_from([
            "workdesk",
            "--host",
            "127.0.0.1",
            "--port",
            "9100",
            "--database-url",
            "mongodb://db:27017",
            "--database-name",
            "crm",
            "--database-timeout-secs",
            "3",
        ])
        .unwrap();

        assert_eq!(config.socket_addr(), "127.0.0.1:9100");
        assert_eq!(config.store.database_url.as_deref(), Some("mongodb://db:27017"));
        assert_eq!(config.store.database_name.as_deref(), Some("crm"));
        assert_eq!(config.store.database_timeout(), Some(Duration::from_secs(3)));
        assert!(!config.store.in_memory);
    }

    #[test]
    fn in_memory_flag() {
        let config = ServerConfig::try_parse_from(["workdesk", "--in-memory"]).unwrap();

        assert!(config.store.in_memory);
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(ServerConfig::try_parse_from(["workdesk", "--port", "not-a-port"]).is_err());
    }
}
