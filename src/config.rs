use std::path::PathBuf;

use crate::conversation::HistoryWindow;
use crate::errors::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5001";
pub const DEFAULT_HISTORY_TURNS: usize = 20;
pub const DEFAULT_STORE_PATH: &str = ".vet_chat/store.json";

const API_BASE_URL_VAR: &str = "VET_CHAT_API_BASE_URL";
const HISTORY_TURNS_VAR: &str = "VET_CHAT_HISTORY_TURNS";
const STORE_VAR: &str = "VET_CHAT_STORE";
const HANDSHAKE_VAR: &str = "VET_CHAT_HANDSHAKE";

/// Settings for the native host, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub history: HistoryWindow,
    pub store_path: PathBuf,
    /// Raw handshake envelope to apply on startup.
    pub handshake: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            history: HistoryWindow::from_turns(DEFAULT_HISTORY_TURNS),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            handshake: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(API_BASE_URL_VAR) {
            let url = url.trim().trim_end_matches('/');
            if url.is_empty() {
                return Err(ConfigError::Empty { name: API_BASE_URL_VAR });
            }
            config.api_base_url = url.to_string();
        }

        if let Some(turns) = lookup(HISTORY_TURNS_VAR) {
            let turns = turns.trim().parse::<usize>().map_err(|_| ConfigError::NotANumber {
                name: HISTORY_TURNS_VAR,
                value: turns.clone(),
            })?;
            config.history = HistoryWindow::from_turns(turns);
        }

        if let Some(path) = lookup(STORE_VAR).filter(|p| !p.trim().is_empty()) {
            config.store_path = PathBuf::from(path);
        }

        config.handshake = lookup(HANDSHAKE_VAR).filter(|h| !h.trim().is_empty());

        Ok(config)
    }
}
