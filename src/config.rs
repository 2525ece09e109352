// src/config.rs
//
// Application configuration
//
// Read once at startup from config.json in the working directory.
// Every field has a usable default; the config file only overrides.

use std::{env, fs, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::integrations::{DEFAULT_API_BASE_URL, DEFAULT_IMAGE_BASE_URL};

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV_VAR: &str = "CINEGRID_API_KEY";

/// Default connectivity probe target (a public DNS resolver)
pub const DEFAULT_PROBE_ADDR: &str = "1.1.1.1:53";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub image_base_url: String,
    pub probe_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            probe_addr: DEFAULT_PROBE_ADDR.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    api_key: Option<String>,
    api_base_url: Option<String>,
    image_base_url: Option<String>,
    probe_addr: Option<String>,
}

pub fn load_config() -> AppConfig {
    let cfg_path = PathBuf::from("config.json");
    let mut cfg = AppConfig::default();

    match fs::read_to_string(&cfg_path) {
        Ok(raw) => match serde_json::from_str::<RawConfig>(&raw) {
            Ok(parsed) => {
                if parsed.api_key.is_some() {
                    cfg.api_key = parsed.api_key;
                }
                if let Some(url) = parsed.api_base_url {
                    cfg.api_base_url = url;
                }
                if let Some(url) = parsed.image_base_url {
                    cfg.image_base_url = url;
                }
                if let Some(addr) = parsed.probe_addr {
                    cfg.probe_addr = addr;
                }
                info!("Loaded config from {}", cfg_path.display());
            }
            Err(err) => {
                warn!("Failed to parse config.json ({}). Using defaults.", err);
            }
        },
        Err(_) => {
            info!("No config.json found; using defaults");
        }
    }

    // The environment always wins for the API key
    if let Ok(key) = env::var(API_KEY_ENV_VAR) {
        if !key.is_empty() {
            cfg.api_key = Some(key);
        }
    }

    cfg
}
