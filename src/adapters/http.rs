use crate::utils::error::{EwclError, Result};
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct FetchSettings {
    pub timeout: Option<Duration>,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
    pub headers: HashMap<String, String>,
}

/// 替換端點模板中的 `{placeholder}`
pub fn render_endpoint(template: &str, placeholder: &str, value: &str) -> String {
    template.replace(&format!("{{{}}}", placeholder), value)
}

/// JSON over HTTP with per-request timeout, custom headers and fixed-delay retries.
#[derive(Debug, Clone)]
pub struct JsonFetcher {
    client: Client,
    settings: FetchSettings,
}

impl JsonFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        let attempts = self.settings.retry_attempts + 1;
        let mut attempt = 1;

        loop {
            match self.get_once(url).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < attempts && is_retryable(&e) => {
                    tracing::warn!(
                        "🔄 Attempt {}/{} for {} failed: {}; retrying in {:?}",
                        attempt,
                        attempts,
                        url,
                        e,
                        self.settings.retry_delay
                    );
                    tokio::time::sleep(self.settings.retry_delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// POST 不重試，避免重複觸發上游計算
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<serde_json::Value> {
        let request = self.prepare(self.client.post(url)).json(body);

        tracing::debug!("Making POST request to: {}", url);
        let response = request.send().await?;
        Self::read_json(url, response).await
    }

    async fn get_once(&self, url: &str) -> Result<serde_json::Value> {
        let request = self.prepare(self.client.get(url));

        tracing::debug!("Making API request to: {}", url);
        let response = request.send().await?;
        Self::read_json(url, response).await
    }

    fn prepare(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        for (key, value) in &self.settings.headers {
            request = request.header(key, value);
        }

        if let Some(timeout) = self.settings.timeout {
            request = request.timeout(timeout);
        }

        request
    }

    async fn read_json(url: &str, response: reqwest::Response) -> Result<serde_json::Value> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(EwclError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

fn is_retryable(error: &EwclError) -> bool {
    match error {
        EwclError::ApiError(e) => e.is_timeout() || e.is_connect(),
        EwclError::UpstreamStatus { status, .. } => *status >= 500,
        _ => false,
    }
}
