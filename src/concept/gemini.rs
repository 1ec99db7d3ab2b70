use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::concept::errors::GenerationError;
use crate::concept::prompts::{generation_config, model_for, prompt_for};
use crate::concept::{AppIdea, GenerationKind, GenerationOutput, Generator};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120)
        }
    }
}

/// [`Generator`] backed by Google's Generative Language API.
pub struct GeminiGenerator {
    api_key: String,
    base_url: String,
    client: Client
}

impl GeminiGenerator {
    pub fn new(config: &GeminiConfig) -> Result<Self, GenerationError> {
        let api_key = config.api_key.as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(GenerationError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client
        })
    }

    fn endpoint(&self, kind: GenerationKind) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model_for(kind))
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, idea: &AppIdea, kind: GenerationKind) -> Result<GenerationOutput, GenerationError> {
        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt_for(idea, kind) }]
            }],
            "generationConfig": generation_config(kind)
        });

        debug!("Requesting {kind} from {}", model_for(kind));

        let response = self.client
            .post(self.endpoint(kind))
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message
            });
        }

        let json: Value = response.json().await?;

        Ok(extract_output(&json, kind))
    }
}

/// Pulls the useful part out of a `generateContent` response.
///
/// Images come back as the first `inlineData` part; everything else is the
/// concatenation of the text parts of the first candidate.
pub fn extract_output(response: &Value, kind: GenerationKind) -> GenerationOutput {
    let parts = response["candidates"]
        .as_array()
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate["content"]["parts"].as_array());

    let Some(parts) = parts else {
        return GenerationOutput::Empty
    };

    if kind == GenerationKind::Mockup {
        return parts.iter()
            .find_map(|part| {
                let inline = part.get("inlineData")?;
                Some(GenerationOutput::InlineData {
                    mime_type: inline["mimeType"].as_str().unwrap_or("image/png").to_string(),
                    data: inline["data"].as_str()?.to_string()
                })
            })
            .unwrap_or(GenerationOutput::Empty);
    }

    let text: String = parts.iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    if text.is_empty() {
        GenerationOutput::Empty
    } else {
        GenerationOutput::Text(text)
    }
}
