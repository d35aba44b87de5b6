use super::PresenceSource;
use crate::{Config, Error, Result};

use async_trait::async_trait;
use model::guild::{Member, PartialGuild, Role, VoiceState};
use model::Snowflake;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub struct DiscordClient {
    client: reqwest::Client,
    base_url: Url,
    guild_id: Snowflake,
    user_id: Snowflake,
}

impl DiscordClient {
    pub fn new(config: &Config) -> Result<DiscordClient> {
        let mut token = HeaderValue::from_str(&format!("Bot {}", config.discord_bot_token))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, token);

        let client = reqwest::ClientBuilder::new()
            .use_rustls_tls()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        // Url::join drops the last path segment unless it ends in a slash
        let mut base = config.discord_api_base.clone();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(DiscordClient {
            client,
            base_url: Url::parse(&base)?,
            guild_id: config.discord_guild_id,
            user_id: config.discord_user_id,
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "Requesting Discord");

        let res = self.client.get(url.clone()).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Error::ResponseError(status).into();
        }

        let body = res.bytes().await?;

        match serde_json::from_slice(&body[..]) {
            Ok(v) => Ok(v),
            Err(e) => {
                debug!(
                    %url,
                    error = %e,
                    body = ?std::str::from_utf8(&body[..]),
                    "Error deserialising Discord response"
                );
                Err(Error::JsonError(e))
            }
        }
    }
}

#[async_trait]
impl PresenceSource for DiscordClient {
    async fn member(&self) -> Result<Member> {
        let mut url = self.endpoint(&format!(
            "guilds/{}/members/{}",
            self.guild_id, self.user_id
        ))?;
        url.query_pairs_mut().append_pair("with_presence", "true");

        self.get_json(url).await
    }

    async fn voice_state(&self) -> Result<VoiceState> {
        let url = self.endpoint(&format!(
            "guilds/{}/voice-states/{}",
            self.guild_id, self.user_id
        ))?;

        self.get_json(url).await
    }

    async fn roles(&self) -> Result<Vec<Role>> {
        let url = self.endpoint(&format!("guilds/{}/roles", self.guild_id))?;
        self.get_json(url).await
    }

    async fn guild(&self) -> Result<PartialGuild> {
        let url = self.endpoint(&format!("guilds/{}", self.guild_id))?;
        self.get_json(url).await
    }
}
