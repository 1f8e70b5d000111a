use super::ImageGenerator;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::error;

/// Image generation over a JSON endpoint: `POST {prompt, label}` → `{url}`
pub struct HttpImageClient {
    client: Client,
    endpoint: String,
    api_key: Option<Secret<String>>,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    prompt: &'a str,
    label: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    url: String,
}

impl HttpImageClient {
    pub fn new(endpoint: &str, api_key: Option<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.map(Secret::new),
        })
    }
}

#[async_trait]
impl ImageGenerator for HttpImageClient {
    async fn generate_image(&self, prompt: &str, label: &str) -> Result<String> {
        let mut request = self.client.post(&self.endpoint).json(&ImageRequest { prompt, label });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await.context("Failed to reach image API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Image generation failed: {} - {}", status, body);
            anyhow::bail!("Image API returned {}", status);
        }

        let body = response
            .json::<ImageResponse>()
            .await
            .context("Failed to parse image API response")?;

        if body.url.trim().is_empty() {
            anyhow::bail!("Image API returned an empty URL");
        }
        Ok(body.url)
    }
}
