//! Command-line and environment configuration for the server binary.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Incident management HTTP server.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "incident_server", version, about)]
pub struct ServerConfig {
    /// SQLite database file; created and migrated on startup.
    #[arg(long, env = "INCIDENTS_DB_PATH", default_value = "incidents.db")]
    pub db_path: PathBuf,

    /// Socket address to listen on.
    #[arg(long, env = "INCIDENTS_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// One of trace|debug|info|warn|error. Defaults per build mode.
    #[arg(long, env = "INCIDENTS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logs go to stderr when unset.
    #[arg(long, env = "INCIDENTS_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Insert demo incidents when the table is empty.
    #[arg(long)]
    pub seed_demo: bool,
}

impl ServerConfig {
    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(incident_core::default_log_level())
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;
    use clap::Parser;

    #[test]
    fn parses_explicit_flags() {
        let config = ServerConfig::try_parse_from([
            "incident_server",
            "--db-path",
            "/tmp/x.db",
            "--bind",
            "127.0.0.1:9000",
            "--log-level",
            "warn",
            "--seed-demo",
        ])
        .unwrap();

        assert_eq!(config.db_path.to_str(), Some("/tmp/x.db"));
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.effective_log_level(), "warn");
        assert!(config.seed_demo);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn log_level_falls_back_to_build_default() {
        let config = ServerConfig::try_parse_from(["incident_server"]).unwrap();

        assert_eq!(config.log_level, None);
        assert_eq!(
            config.effective_log_level(),
            incident_core::default_log_level()
        );
    }

    #[test]
    fn rejects_malformed_bind_address() {
        let result = ServerConfig::try_parse_from(["incident_server", "--bind", "nowhere"]);
        assert!(result.is_err());
    }
}
