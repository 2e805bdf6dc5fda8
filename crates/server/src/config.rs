//! Command-line and environment configuration for `recs-server`.

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;

use engine::ResolverConfig;

/// Content-based movie recommendation server
#[derive(Debug, Clone, Parser)]
#[command(name = "recs-server", version, about)]
pub struct ServerConfig {
    /// Path to the movie catalog CSV
    #[arg(long, env = "RECS_CATALOG", default_value = "data/movies.csv")]
    pub catalog: PathBuf,

    /// Address to bind
    #[arg(long, env = "RECS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "RECS_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Recommendations per request when the request doesn't specify
    #[arg(long, env = "RECS_DEFAULT_K", default_value_t = 5)]
    pub default_k: usize,

    /// Minimum title similarity (0.0 - 1.0) for a query to match
    #[arg(long, env = "RECS_CUTOFF", default_value_t = 0.6, value_parser = parse_cutoff)]
    pub cutoff: f64,

    /// Match titles case-insensitively
    #[arg(long, env = "RECS_IGNORE_CASE")]
    pub ignore_case: bool,
}

impl ServerConfig {
    /// Reject settings clap can't check on its own
    pub fn validate(&self) -> Result<()> {
        ensure!(self.default_k >= 1, "--default-k must be at least 1");
        Ok(())
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            cutoff: self.cutoff,
            ignore_case: self.ignore_case,
            ..Default::default()
        }
    }
}

/// Parse a similarity cutoff, which must lie in `[0, 1]`.
pub fn parse_cutoff(raw: &str) -> std::result::Result<f64, String> {
    let cutoff: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if (0.0..=1.0).contains(&cutoff) {
        Ok(cutoff)
    } else {
        Err(format!("cutoff must be between 0.0 and 1.0, got {}", cutoff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["recs-server"]).unwrap();

        assert_eq!(config.catalog, PathBuf::from("data/movies.csv"));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.default_k, 5);
        assert_eq!(config.resolver_config(), ResolverConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let config = ServerConfig::try_parse_from([
            "recs-server",
            "--port",
            "8080",
            "--cutoff",
            "0.75",
            "--ignore-case",
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        let resolver = config.resolver_config();
        assert_eq!(resolver.cutoff, 0.75);
        assert!(resolver.ignore_case);
    }

    #[test]
    fn test_invalid_values() {
        assert!(ServerConfig::try_parse_from(["recs-server", "--cutoff", "1.5"]).is_err());
        assert!(ServerConfig::try_parse_from(["recs-server", "--cutoff", "high"]).is_err());

        let config = ServerConfig::try_parse_from(["recs-server", "--default-k", "0"]).unwrap();
        assert!(config.validate().is_err());
    }
}
