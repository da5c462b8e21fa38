use code_runner::{Language, RunnerConfig, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server settings, loadable from a TOML file.
///
/// ```toml
/// addr = "127.0.0.1:8080"
/// timeout_secs = 5
/// max_concurrent = 8
///
/// [programs]
/// python = "python3.12"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,
    /// Wall-clock limit per run
    pub timeout_secs: u64,
    /// Upper bound on simultaneous runs; unbounded when absent
    pub max_concurrent: Option<usize>,
    /// Interpreter/compiler overrides keyed by language tag
    pub programs: HashMap<Language, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_concurrent: None,
            programs: HashMap::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.max_concurrent == Some(0) {
            return Err(ConfigError::Invalid(
                "max_concurrent must be greater than zero".to_string(),
            ));
        }
        if let Some((language, _)) = self.programs.iter().find(|(_, p)| p.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "program for {} must not be empty",
                language
            )));
        }
        Ok(())
    }

    pub fn runner_config(&self) -> RunnerConfig {
        self.programs.iter().fold(
            RunnerConfig::default().with_timeout(Duration::from_secs(self.timeout_secs)),
            |config, (language, program)| config.with_program(*language, program.clone()),
        )
    }
}
