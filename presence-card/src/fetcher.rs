use crate::config::Config;
use crate::{Error, Result};

use async_trait::async_trait;
use model::presence::PresenceSnapshot;
use std::time::Duration;
use tracing::debug;

/// Retrieves one snapshot from the aggregation endpoint.
#[async_trait]
pub trait SnapshotFetcher: Send + Sync + 'static {
    async fn fetch(&self) -> Result<PresenceSnapshot>;
}

pub struct HttpFetcher {
    url: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            url: config.presence_url.clone(),
            client,
        })
    }
}

#[async_trait]
impl SnapshotFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<PresenceSnapshot> {
        debug!(url = %self.url, "Fetching snapshot");

        let res = self.client.get(&self.url).send().await?;

        if !res.status().is_success() {
            return Error::ResponseError(res.status()).into();
        }

        Ok(res.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::presence::GuildSummary;
    use model::Snowflake;
    use reqwest::StatusCode;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers a single request with the given status line and body.
    async fn serve_once(status: &'static str, body: String) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await.unwrap();

            let res = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(res.as_bytes()).await.unwrap();
        });

        addr
    }

    fn fetcher(addr: SocketAddr) -> HttpFetcher {
        let config: Config = envy::from_iter(vec![(
            "PRESENCE_URL".to_owned(),
            format!("http://{}/api/discord", addr),
        )])
        .unwrap();

        HttpFetcher::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_snapshot() {
        let snapshot = PresenceSnapshot {
            guild_summary: Some(GuildSummary {
                id: Snowflake(1),
                name: "Tickets".to_owned(),
                icon_ref: None,
            }),
            ..Default::default()
        };

        let addr = serve_once("200 OK", serde_json::to_string(&snapshot).unwrap()).await;
        let fetched = fetcher(addr).fetch().await.unwrap();

        assert_eq!(fetched, snapshot);
    }

    #[tokio::test]
    async fn test_error_status() {
        let addr = serve_once("502 Bad Gateway", "{}".to_owned()).await;

        match fetcher(addr).fetch().await {
            Err(Error::ResponseError(status)) => assert_eq!(status, StatusCode::BAD_GATEWAY),
            other => panic!("expected an error status, got {:?}", other),
        }
    }

    #[test]
    fn test_error_message() {
        let err = Error::ResponseError(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let addr = serve_once("200 OK", "not json".to_owned()).await;
        assert!(matches!(
            fetcher(addr).fetch().await,
            Err(Error::ReqwestError(_))
        ));
    }
}
