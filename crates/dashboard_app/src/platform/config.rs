use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dashboard_engine::{ApiSettings, Role, Session, SessionEntity, SessionUser};
use dashboard_logging::{dashboard_info, redact};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::{LogDestination, DEFAULT_LOG_FILE};

pub const DEFAULT_CONFIG_FILE: &str = "bakery-admin.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Identity the CLI acts as when talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub user_id: String,
    pub role: Role,
    #[serde(default)]
    pub bakery_id: Option<String>,
    #[serde(default)]
    pub wallet_id: Option<String>,
}

impl SessionConfig {
    pub fn to_session(&self) -> Session {
        let entity = self.bakery_id.as_ref().map(|id| SessionEntity {
            id: id.clone(),
            wallet_id: self.wallet_id.clone(),
        });
        Session {
            user: Some(SessionUser {
                id: self.user_id.clone(),
                role: self.role,
                entity,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log: LogDestination,
    pub log_file: PathBuf,
    /// `None` browses signed out, which every page redirects away from.
    pub session: Option<SessionConfig>,
    /// Where browse sessions remember their last location.
    pub views_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            api_base_url: api.base_url,
            api_token: api.token,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            log: LogDestination::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            session: None,
            views_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::parse(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        dashboard_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        ron::from_str(content).map_err(|err| err.to_string())
    }

    /// API settings from the file, then overridden by `BAKERY_API_*`.
    pub fn api_settings(&self) -> ApiSettings {
        self.api_settings_with_env(|key| std::env::var(key).ok())
    }

    pub fn api_settings_with_env(&self, lookup: impl Fn(&str) -> Option<String>) -> ApiSettings {
        let settings = ApiSettings {
            base_url: self.api_base_url.clone(),
            token: self.api_token.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs.max(1)),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
        }
        .with_env(lookup);
        dashboard_info!(
            "API base={} token={}",
            settings.base_url,
            settings.token.as_deref().map(redact).unwrap_or_else(|| "none".to_string())
        );
        settings
    }

    pub fn session(&self) -> Session {
        self.session
            .as_ref()
            .map(SessionConfig::to_session)
            .unwrap_or_default()
    }
}
