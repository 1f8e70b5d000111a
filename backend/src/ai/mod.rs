//! Generative AI glue
//!
//! Prompts are sent to a text model, the first JSON span of the reply is
//! deserialized into a typed payload and validated. Any failure along the
//! way (AI disabled, transport error, missing or malformed JSON, schema
//! violation) yields a static fallback instead of an error.

pub mod fallback;
mod image;
mod ollama;
pub mod parse;
pub mod prompts;

pub use image::HttpImageClient;
pub use ollama::OllamaClient;

use crate::config::AiConfig;
use anyhow::Result;
use async_trait::async_trait;
use metrics::counter;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};
use validator::Validate;

/// Completes a prompt with free text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Produces an image URL for a prompt; `label` names the subject
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str, label: &str) -> Result<String>;
}

/// Stand-in used when AI is disabled or unconfigured
pub struct Disabled;

#[async_trait]
impl TextGenerator for Disabled {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        anyhow::bail!("text generation is disabled")
    }
}

#[async_trait]
impl ImageGenerator for Disabled {
    async fn generate_image(&self, _prompt: &str, _label: &str) -> Result<String> {
        anyhow::bail!("image generation is disabled")
    }
}

/// Text and image backends shared by all handlers
#[derive(Clone)]
pub struct AiServices {
    pub text: Arc<dyn TextGenerator>,
    pub image: Arc<dyn ImageGenerator>,
}

impl AiServices {
    pub fn disabled() -> Self {
        Self {
            text: Arc::new(Disabled),
            image: Arc::new(Disabled),
        }
    }

    pub fn from_config(config: &AiConfig) -> Result<Self> {
        if !config.enabled {
            return Ok(Self::disabled());
        }

        let text: Arc<dyn TextGenerator> = Arc::new(OllamaClient::new(
            &config.ollama_url,
            &config.model,
            config.request_timeout_secs,
        )?);

        let image: Arc<dyn ImageGenerator> = match &config.image_api_url {
            Some(url) => Arc::new(HttpImageClient::new(
                url,
                config.api_key.clone(),
                config.request_timeout_secs,
            )?),
            None => Arc::new(Disabled),
        };

        Ok(Self { text, image })
    }
}

/// A payload plus whether it came from the model
#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T> {
    pub value: T,
    pub ai_generated: bool,
}

/// Run a prompt and parse the reply as `T`, falling back on any failure.
///
/// `kind` labels the request in logs and metrics.
pub async fn generate_structured<T, F>(
    text: &dyn TextGenerator,
    kind: &'static str,
    prompt: &str,
    fallback: F,
) -> Generated<T>
where
    T: DeserializeOwned + Validate,
    F: FnOnce() -> T,
{
    let reply = match text.generate(prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(kind, error = %e, "AI request failed, using fallback");
            counter!("ai_requests_total", "kind" => kind, "outcome" => "request_failed").increment(1);
            return Generated { value: fallback(), ai_generated: false };
        }
    };

    match parse::parse_payload::<T>(&reply) {
        Ok(value) => {
            debug!(kind, "AI payload accepted");
            counter!("ai_requests_total", "kind" => kind, "outcome" => "success").increment(1);
            Generated { value, ai_generated: true }
        }
        Err(e) => {
            warn!(kind, error = %e, "AI reply rejected, using fallback");
            counter!("ai_requests_total", "kind" => kind, "outcome" => "invalid_reply").increment(1);
            Generated { value: fallback(), ai_generated: false }
        }
    }
}

/// Request an image, logging and swallowing failures
pub async fn try_generate_image(image: &dyn ImageGenerator, prompt: &str, label: &str) -> Option<String> {
    match image.generate_image(prompt, label).await {
        Ok(url) => Some(url),
        Err(e) => {
            warn!(label, error = %e, "Image generation failed");
            counter!("ai_image_failures_total").increment(1);
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Replies with a fixed string and records prompts
    pub struct CannedText {
        pub reply: Result<String, String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl CannedText {
        pub fn ok(reply: &str) -> Self {
            Self { reply: Ok(reply.to_string()), prompts: Mutex::new(Vec::new()) }
        }

        pub fn failing(message: &str) -> Self {
            Self { reply: Err(message.to_string()), prompts: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl TextGenerator for CannedText {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(|e| anyhow::anyhow!(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::CannedText;
    use super::*;
    use wellness_shared::models::DailyPlanPayload;

    const VALID_PLAN: &str = r#"Here is your plan:
    {"meals": [{"meal_type": "breakfast", "name": "Oats", "total_calories": 350,
      "foods": [{"name": "Rolled oats", "portion": "80 g", "calories": 300}]}]}
    Enjoy!"#;

    #[tokio::test]
    async fn test_valid_reply_is_used() {
        let text = CannedText::ok(VALID_PLAN);
        let result: Generated<DailyPlanPayload> =
            generate_structured(&text, "diet_plan", "prompt", || fallback::daily_plan(2000.0)).await;

        assert!(result.ai_generated);
        assert_eq!(result.value.meals[0].name, "Oats");
        assert_eq!(text.prompts.lock().unwrap().as_slice(), ["prompt"]);
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back() {
        let text = CannedText::failing("connection refused");
        let result: Generated<DailyPlanPayload> =
            generate_structured(&text, "diet_plan", "prompt", || fallback::daily_plan(2000.0)).await;

        assert!(!result.ai_generated);
        assert_eq!(result.value, fallback::daily_plan(2000.0));
    }

    #[tokio::test]
    async fn test_malformed_reply_falls_back() {
        for reply in ["no json here", "{\"meals\": [", "{\"meals\": []}"] {
            let text = CannedText::ok(reply);
            let result: Generated<DailyPlanPayload> =
                generate_structured(&text, "diet_plan", "p", || fallback::daily_plan(1800.0)).await;
            assert!(!result.ai_generated, "reply {:?} should fall back", reply);
        }
    }

    #[tokio::test]
    async fn test_disabled_services() {
        let ai = AiServices::from_config(&AiConfig::default()).unwrap();
        assert!(ai.text.generate("hi").await.is_err());
        assert_eq!(try_generate_image(ai.image.as_ref(), "a salad", "Salad").await, None);
    }
}
