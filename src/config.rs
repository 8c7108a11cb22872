use clap::{Parser, ValueEnum};
use std::time::Duration;

// ============================================================================
// Service Configuration
// ============================================================================
//
// Every option can be given as a flag or through the environment.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    Redis,
    Memory,
}

/// Order service
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// HTTP listen port
    #[arg(long, env = "SERVER_PORT", default_value_t = 3000)]
    pub server_port: u16,

    /// Redis address (host:port)
    #[arg(long, env = "REDIS_ADDR", default_value = "localhost:6379")]
    pub redis_addr: String,

    /// Storage backend
    #[arg(long, env = "STORE_BACKEND", value_enum, default_value_t = StoreBackend::Redis)]
    pub store: StoreBackend,

    /// Upper bound for any single store call, in milliseconds
    #[arg(long, env = "STORE_TIMEOUT_MS", default_value_t = 5000)]
    pub store_timeout_ms: u64,

    /// Connection attempts against the backend at startup
    #[arg(long, env = "CONNECT_ATTEMPTS", default_value_t = 5)]
    pub connect_attempts: u32,

    /// Orders per listing page
    #[arg(long, env = "PAGE_SIZE", default_value_t = 50)]
    pub page_size: u64,

    /// Grace period for in-flight requests on shutdown, in seconds
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value_t = 10)]
    pub shutdown_timeout_secs: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info,order_service=debug")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("page size must be at least 1");
        }
        if self.store_timeout_ms == 0 {
            anyhow::bail!("store timeout must be at least 1ms");
        }
        if self.connect_attempts == 0 {
            anyhow::bail!("connect attempts must be at least 1");
        }
        Ok(())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};
    use std::ffi::OsStr;

    // Parse flags only; variables exported in the test runner's shell
    // must not leak into the assertions.
    fn parse_flags(args: &[&str]) -> Result<Config, clap::Error> {
        let matches = Config::command()
            .mut_args(|arg| arg.env(None::<&'static str>))
            .try_get_matches_from(args)?;
        Config::from_arg_matches(&matches)
    }

    #[test]
    fn test_defaults() {
        let config = parse_flags(&["order_service"]).unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.redis_addr, "localhost:6379");
        assert_eq!(config.store, StoreBackend::Redis);
        assert_eq!(config.connect_attempts, 5);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.shutdown_timeout_secs, 10);
        assert_eq!(config.log_level, "info,order_service=debug");
        assert_eq!(config.store_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_every_option_reads_its_env_var() {
        let command = Config::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(OsStr::to_os_string)
        };

        for (id, var) in [
            ("server_port", "SERVER_PORT"),
            ("redis_addr", "REDIS_ADDR"),
            ("store", "STORE_BACKEND"),
            ("store_timeout_ms", "STORE_TIMEOUT_MS"),
            ("connect_attempts", "CONNECT_ATTEMPTS"),
            ("page_size", "PAGE_SIZE"),
            ("shutdown_timeout_secs", "SHUTDOWN_TIMEOUT_SECS"),
            ("log_level", "LOG_LEVEL"),
        ] {
            assert_eq!(env_of(id), Some(var.into()), "{}", id);
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse_flags(&[
            "order_service",
            "--server-port",
            "8080",
            "--store",
            "memory",
            "--page-size",
            "10",
        ])
        .unwrap();

        assert_eq!(config.server_port, 8080);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_zero_values_rejected() {
        for flag in ["--page-size", "--store-timeout-ms", "--connect-attempts"] {
            let config = parse_flags(&["order_service", flag, "0"]).unwrap();
            assert!(config.validate().is_err(), "{}", flag);
        }
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(parse_flags(&["order_service", "--store", "postgres"]).is_err());
    }
}
