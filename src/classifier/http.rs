//! HTTP classifier client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::heuristic::extract_verdict;
use super::traits::{ClassifierClient, ClassifierVerdict};

/// Remote classifier reached over a JSON request/response channel. A
/// malformed payload is run through the text extractor before giving up.
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
    known_specialists: Vec<String>,
}

impl HttpClassifier {
    pub fn new(
        endpoint: &str,
        timeout: Duration,
        known_specialists: Vec<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build classifier HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            known_specialists,
        })
    }
}

#[async_trait]
impl ClassifierClient for HttpClassifier {
    async fn classify(&self, query: &str) -> Result<ClassifierVerdict> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await
            .context("classifier request failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("failed to read classifier response body")?;

        if !status.is_success() {
            anyhow::bail!("classifier returned {status}: {}", body.chars().take(200).collect::<String>());
        }

        match serde_json::from_str::<ClassifierVerdict>(&body) {
            Ok(verdict) => Ok(verdict),
            Err(parse_err) => {
                debug!(%parse_err, "classifier payload not valid JSON; trying text extraction");
                extract_verdict(&body, &self.known_specialists)
                    .context("classifier payload unusable: no known specialist mentioned")
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}
