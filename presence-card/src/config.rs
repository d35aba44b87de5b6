use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_presence_url")]
    pub presence_url: String,
    /// Defaults to a file under the user's config directory
    pub preferences_path: Option<PathBuf>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub json_log: bool,
}

impl Config {
    pub fn load() -> Config {
        envy::from_env().expect("failed to load config")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load()
    }
}

fn default_presence_url() -> String {
    "http://127.0.0.1:8080/api/discord".to_owned()
}

fn default_request_timeout() -> u64 {
    10
}
