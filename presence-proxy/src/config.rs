use model::Snowflake;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub discord_bot_token: String,
    pub discord_user_id: Snowflake,
    pub discord_guild_id: Snowflake,
    pub server_addr: String,

    #[serde(default = "default_api_base")]
    pub discord_api_base: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Value of the Access-Control-Allow-Origin header, omitted when unset
    pub allowed_origin: Option<String>,

    pub sentry_dsn: Option<String>,
    #[serde(default)]
    pub json_log: bool,
    #[serde(default)]
    pub debug_mode: bool,
}

impl Config {
    pub fn from_envvar() -> Config {
        envy::from_env().expect("Failed to load config from environment variables")
    }
}

fn default_api_base() -> String {
    "https://discord.com/api/v10".to_owned()
}

fn default_request_timeout() -> u64 {
    10
}
