use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
}

#[async_trait]
pub trait StatsSource {
    async fn fetch(&self) -> Result<String, FetchError>;
}

pub struct HttpStatsSource {
    client: Client,
    url: String,
    request_timeout: Duration,
}

impl HttpStatsSource {
    pub fn new(cfg: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent("statwatch/0.1.0")
            .timeout(Duration::from_millis(cfg.client_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            url: cfg.stats_url(),
            request_timeout: Duration::from_millis(cfg.request_timeout_ms),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(&self.url)
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            return Err(FetchError::Status(status));
        }

        Ok(resp.text().await?)
    }
}
