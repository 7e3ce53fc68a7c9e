use crate::error::DiscoverError;
use crate::models::{AnswerResult, AskRequest, HealthStatus, TimedAnswer};
use crate::traits::AnswerBackend;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use tracing::debug;
use url::Url;

/// HTTP client for the discovery backend. No request timeout is applied; a
/// search waits until the network layer itself gives up.
pub struct AskClient {
    base_url: Url,
    client: Client,
}

impl AskClient {
    pub fn new(base_url: &str) -> Result<Self, DiscoverError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthStatus, DiscoverError> {
        let url = self.base_url.join("health")?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(DiscoverError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl AnswerBackend for AskClient {
    async fn ask(&self, request: &AskRequest) -> Result<TimedAnswer, DiscoverError> {
        let url = self.base_url.join("ask")?;
        let started = Instant::now();

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(DiscoverError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let result: AnswerResult = serde_json::from_str(&body)?;
        let elapsed_secs = round_to_tenth(started.elapsed().as_secs_f64());
        debug!(mode = %result.mode, elapsed_secs, "ask completed");

        Ok(TimedAnswer {
            result,
            elapsed_secs,
        })
    }
}

fn round_to_tenth(seconds: f64) -> f64 {
    (seconds * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_rounded_to_one_decimal() {
        assert_eq!(round_to_tenth(1.2345), 1.2);
        assert_eq!(round_to_tenth(0.96), 1.0);
        assert_eq!(round_to_tenth(0.0), 0.0);
    }

    #[test]
    fn endpoint_paths_join_onto_the_base_url() {
        let client = AskClient::new("http://localhost:8000").unwrap();
        assert_eq!(
            client.base_url().join("ask").unwrap().as_str(),
            "http://localhost:8000/ask"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(AskClient::new("not a url").is_err());
    }
}
