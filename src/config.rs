use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GLOSSARY_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub glossary: GlossaryConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Input tables and logging
#[derive(Debug, Clone, Deserialize)]
pub struct GlossaryConfig {
    /// CSV with `term` and `definition` columns.
    #[serde(default = "default_terms_path")]
    pub terms_path: PathBuf,
    /// CSV with `source`, `target` and `relation` columns.
    #[serde(default = "default_links_path")]
    pub links_path: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            terms_path: default_terms_path(),
            links_path: default_links_path(),
            log_level: default_log_level(),
        }
    }
}

/// Query service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Size of the fixed worker pool serving queries.
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_authless")]
    pub authless: bool,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: default_worker_threads(),
            allowed_origins: Vec::new(),
            authless: default_authless(),
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_terms_path() -> PathBuf {
    PathBuf::from("terms.csv")
}

fn default_links_path() -> PathBuf {
    PathBuf::from("links.csv")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    50052
}

fn default_worker_threads() -> usize {
    10
}

fn default_authless() -> bool {
    true
}

fn default_api_key_env() -> String {
    "GLOSSARY_API_KEY".to_string()
}

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) first.
    /// Looks for the config file in this order:
    /// 1. Path in the GLOSSARY_CONFIG environment variable (must exist)
    /// 2. ./config.toml in current directory
    /// 3. Built-in defaults when neither is present
    pub fn load() -> Result<Self> {
        // .env is optional
        let _ = dotenv::dotenv();

        let config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => {
                let default_path = Path::new("config.toml");
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Config::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.glossary.terms_path.as_os_str().is_empty() {
            anyhow::bail!("glossary.terms_path must not be empty");
        }

        if self.glossary.links_path.as_os_str().is_empty() {
            anyhow::bail!("glossary.links_path must not be empty");
        }

        if self.server.port == 0 {
            anyhow::bail!("server.port must be greater than 0");
        }

        if self.server.worker_threads == 0 {
            anyhow::bail!("server.worker_threads must be greater than 0");
        }

        Ok(())
    }

    /// Bearer key for the HTTP transport, or None in authless mode
    pub fn api_key(&self) -> Result<Option<String>> {
        if self.server.authless {
            return Ok(None);
        }
        let key = std::env::var(&self.server.api_key_env).with_context(|| {
            format!(
                "Environment variable {} not set. Set it in your .env file or enable server.authless.",
                self.server.api_key_env
            )
        })?;
        Ok(Some(key))
    }

    pub fn terms_path(&self) -> &Path {
        &self.glossary.terms_path
    }

    pub fn links_path(&self) -> &Path {
        &self.glossary.links_path
    }

    /// `host:port` the HTTP transport binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn with_config_env(config_path: Option<&Path>, f: impl FnOnce()) {
        let original = std::env::var(CONFIG_ENV).ok();
        match config_path {
            Some(p) => std::env::set_var(CONFIG_ENV, p),
            None => std::env::remove_var(CONFIG_ENV),
        }
        f();
        std::env::remove_var(CONFIG_ENV);
        if let Some(val) = original {
            std::env::set_var(CONFIG_ENV, val);
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.terms_path(), Path::new("terms.csv"));
        assert_eq!(config.links_path(), Path::new("links.csv"));
        assert_eq!(config.server.port, 50052);
        assert_eq!(config.server.worker_threads, 10);
        assert_eq!(config.bind_addr(), "127.0.0.1:50052");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_env_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("glossary.toml");
        fs::write(
            &config_path,
            r#"
[glossary]
terms_path = "data/terms.csv"
log_level = "debug"

[server]
port = 6000
worker_threads = 4
"#,
        )
        .unwrap();

        with_config_env(Some(&config_path), || {
            let config = Config::load();
            assert!(config.is_ok(), "Config::load() failed: {:?}", config.err());
            let config = config.unwrap();
            assert_eq!(config.terms_path(), Path::new("data/terms.csv"));
            assert_eq!(config.links_path(), Path::new("links.csv"));
            assert_eq!(config.glossary.log_level, "debug");
            assert_eq!(config.server.port, 6000);
            assert_eq!(config.server.worker_threads, 4);
            assert_eq!(config.server.host, "127.0.0.1");
        });
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        with_config_env(Some(Path::new("nonexistent.toml")), || {
            let config = Config::load();
            assert!(config.is_err());
            assert!(config.unwrap_err().to_string().contains("nonexistent.toml"));
        });
    }

    #[test]
    fn test_zero_workers_rejected() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("glossary.toml");
        fs::write(&config_path, "[server]\nworker_threads = 0\n").unwrap();

        with_config_env(Some(&config_path), || {
            let err = Config::load().unwrap_err();
            assert!(err.to_string().contains("worker_threads"));
        });
    }

    #[test]
    fn test_api_key_authless() {
        let config = Config::default();
        assert_eq!(config.api_key().unwrap(), None);
    }

    #[test]
    fn test_api_key_required_when_not_authless() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let mut config = Config::default();
        config.server.authless = false;
        config.server.api_key_env = "GLOSSARY_TEST_MISSING_KEY".to_string();
        std::env::remove_var("GLOSSARY_TEST_MISSING_KEY");

        let err = config.api_key().unwrap_err();
        assert!(err.to_string().contains("GLOSSARY_TEST_MISSING_KEY"));
    }
}
