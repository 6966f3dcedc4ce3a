// ⚙️ Configuration - defaults → TOML file → environment → CLI flags
//
// The CLI layer is applied by the binaries after `Config::load`.

use crate::error::{LeagueError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str =
    "https://lightcoral-owl-713849.hostingersite.com/api-linamve/index.php";

/// Picked up from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "linamve.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint every `?action=` request is sent to
    pub api_base: String,
    pub timeout_secs: u64,
    /// Admin panel passphrase; the gate is off when unset
    pub admin_passphrase: Option<String>,
    pub log_level: String,
    pub log_file: PathBuf,
    pub server_addr: String,
    pub store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: 10,
            admin_passphrase: None,
            log_level: "info".to_string(),
            log_file: PathBuf::from("linamve.log"),
            server_addr: "127.0.0.1:8080".to_string(),
            store_path: PathBuf::from("linamve-store.json"),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file (explicit path or `./linamve.toml`), then
    /// `LINAMVE_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(explicit) => Self::from_file(explicit)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Config::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LeagueError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| LeagueError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LeagueError::Config(e.to_string()))
    }

    /// Overlay environment values; `lookup` is `std::env::var` outside tests
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup("LINAMVE_API_BASE") {
            self.api_base = base;
        }
        if let Some(raw) = lookup("LINAMVE_TIMEOUT_SECS") {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                LeagueError::Config(format!("LINAMVE_TIMEOUT_SECS must be a number, got '{}'", raw))
            })?;
        }
        if let Some(pass) = lookup("LINAMVE_ADMIN_PASSPHRASE") {
            self.admin_passphrase = Some(pass).filter(|p| !p.is_empty());
        }
        if let Some(level) = lookup("LINAMVE_LOG") {
            self.log_level = level;
        }
        if let Some(addr) = lookup("LINAMVE_SERVER_ADDR") {
            self.server_addr = addr;
        }
        if let Some(store) = lookup("LINAMVE_STORE") {
            self.store_path = PathBuf::from(store);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            return Err(LeagueError::Config("api_base must not be empty".to_string()));
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(LeagueError::Config(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }
        if self.timeout_secs == 0 {
            return Err(LeagueError::Config("timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
