use anyhow::{Context, Result};
use rendezvous_core::MatchmakingConfig;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_PATH_ENV: &str = "RENDEZVOUS_CONFIG_PATH";
const BIND_ADDR_ENV: &str = "RENDEZVOUS_BIND_ADDR";
const DEFAULT_CONFIG_PATH: &str = "rendezvous.toml";

/// Resolves the config file path: `RENDEZVOUS_CONFIG_PATH` if set, else the
/// default relative path. Resolution only — this does not check the file
/// exists.
pub fn config_path() -> PathBuf {
    env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Loads `MatchmakingConfig` from TOML at `path`, falling back to built-in
/// defaults if the file does not exist — a missing config file is a valid
/// fact for a fresh deployment, not an error. A file that exists but fails
/// to parse IS an error; we don't silently discard a config the operator
/// clearly intended to apply.
///
/// `RENDEZVOUS_BIND_ADDR`, if set, overrides `bind_addr` after the TOML is
/// loaded — the one setting operators most often need to override per
/// environment without editing a file.
pub fn load_config(path: &Path) -> Result<MatchmakingConfig> {
    let mut config = if path.exists() {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file at {}", path.display()))?;
        let config: MatchmakingConfig = toml::from_str(&raw)
            .with_context(|| format!("parsing config file at {}", path.display()))?;
        info!(path = %path.display(), "loaded matchmaking config");
        config
    } else {
        debug!(path = %path.display(), "no config file found, using defaults");
        MatchmakingConfig::default()
    };

    if let Ok(bind_addr) = env::var(BIND_ADDR_ENV) {
        info!(%bind_addr, "overriding bind_addr from {BIND_ADDR_ENV}");
        config.bind_addr = bind_addr;
    }

    Ok(config)
}

/// Loads a `.env` file from the working directory if one is present. A
/// missing `.env` is not an error — most deployments configure purely
/// through the process environment.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env file"),
        Err(dotenvy::Error::Io(_)) => {}
        Err(err) => tracing::warn!(error = %err, "failed to parse .env file"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/rendezvous.toml")).unwrap();
        assert_eq!(config.top_k, MatchmakingConfig::default().top_k);
    }

    #[test]
    fn existing_file_overrides_individual_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "top_k = 8\nbind_addr = \"127.0.0.1:9000\"").unwrap();

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.top_k, 8);
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.requeue_delay_ms, MatchmakingConfig::default().requeue_delay_ms);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "top_k = \"not a number\"").unwrap();

        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn env_override_wins_over_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = \"0.0.0.0:1\"").unwrap();

        env::set_var(BIND_ADDR_ENV, "0.0.0.0:4242");
        let config = load_config(file.path()).unwrap();
        env::remove_var(BIND_ADDR_ENV);

        assert_eq!(config.bind_addr, "0.0.0.0:4242");
    }
}
