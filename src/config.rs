//! Walker configuration
//!
//! A flat map of string keys to string values, read from the first existing
//! file among an explicit path, `./walker.properties`, `./.walker.yaml` and
//! `~/.walker.yaml`. JSON and YAML are both accepted.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, WalkerError};
use crate::route::compiler::DEFAULT_SPEED;

pub const DEFAULT_SERVER: &str = "http://localhost:49215";
pub const DEFAULT_TIMEZONE_URL: &str = "http://api.timezonedb.com/v2.1/get-time-zone";
pub const DEFAULT_ROUTES_DIR: &str = "routes";
pub const DEFAULT_TIMEOUT: u64 = 10;

/// Raw key/value configuration
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties(pub BTreeMap<String, String>);

impl Properties {
    /// Load the first config file found, or an empty map when there is none
    pub fn discover(provided: Option<&str>) -> Result<Self> {
        let mut options: Vec<PathBuf> = vec![];

        if let Some(sprovided) = provided {
            let path = PathBuf::from(sprovided);
            if !path.exists() {
                return Err(WalkerError::Config(format!(
                    "{} does not exist",
                    path.display()
                )));
            }
            options.push(path);
        }

        options.push(PathBuf::from("walker.properties"));
        options.push(PathBuf::from(".walker.yaml"));

        if let Some(home) = dirs::home_dir() {
            options.push(home.join(".walker.yaml"));
        }

        match options.into_iter().find(|p| p.is_file()) {
            Some(path) => Self::load(&path),
            None => {
                log::debug!("no configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load a config file, YAML when the extension says so, JSON otherwise
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        let yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let map = if yaml {
            serde_yaml::from_str::<Option<BTreeMap<String, String>>>(&contents)
                .map_err(|e| WalkerError::Config(format!("{}: {}", path.display(), e)))?
                .unwrap_or_default()
        } else {
            serde_json::from_str::<BTreeMap<String, String>>(&contents)
                .map_err(|e| WalkerError::Config(format!("{}: {}", path.display(), e)))?
        };

        log::debug!(
            "loaded {} with keys {:?}",
            path.display(),
            map.keys().collect::<Vec<_>>()
        );

        Ok(Self(map))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
    }
}

/// Typed view over [`Properties`], built once at startup
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Metres per second
    pub speed: f64,
    pub timezone_api_key: Option<String>,
    pub timezone_url: String,
    /// Device control service base url
    pub server: String,
    pub routes_dir: PathBuf,
    /// Applied to every outgoing request
    pub timeout: Duration,
}

impl From<&Properties> for Settings {
    fn from(props: &Properties) -> Self {
        let speed = props
            .get("speed")
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(DEFAULT_SPEED);

        let timeout = props
            .get("timeout")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            speed,
            timezone_api_key: props.get("timezone_api_key").map(str::to_string),
            timezone_url: props
                .get("timezone_url")
                .unwrap_or(DEFAULT_TIMEZONE_URL)
                .to_string(),
            server: props
                .get("server")
                .unwrap_or(DEFAULT_SERVER)
                .trim_end_matches('/')
                .to_string(),
            routes_dir: PathBuf::from(props.get("routes_dir").unwrap_or(DEFAULT_ROUTES_DIR)),
            timeout: Duration::from_secs(timeout),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(&Properties::default())
    }
}
