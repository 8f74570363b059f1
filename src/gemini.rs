use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::generator::{ImageGenerator, StructuredGenerator};

// Structures matching Gemini's models/{model}:generateContent endpoint
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "inline_data")]
    pub inline_data: Option<InlineData>,
    // Reasoning summaries; never part of the answer text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
            ..Default::default()
        }
    }
}

/// Base64 payload as delivered by the API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, alias = "mime_type")]
    pub mime_type: String,
    #[serde(default)]
    pub data: String,
}

#[derive(Deserialize, Debug, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    // usageMetadata, promptFeedback, etc. are ignored for now
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateContentResponse {
    fn into_first_parts(self) -> Vec<Part> {
        self.candidates
            .into_iter()
            .next()
            .map(|candidate| candidate.content.parts)
            .unwrap_or_default()
    }
}

/// Concatenated answer text of the parts, skipping thought summaries.
fn joined_text(parts: &[Part]) -> Option<String> {
    let text: String = parts
        .iter()
        .filter(|part| part.thought != Some(true))
        .filter_map(|part| part.text.as_deref())
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Shared HTTP client and credentials for every Gemini model.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_base: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_base: &str, api_key: &str) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Binds the client to one model identifier.
    pub fn model(&self, model: &str) -> GeminiModel {
        GeminiModel {
            client: self.clone(),
            model: model.trim().trim_start_matches("models/").to_string(),
        }
    }

    fn endpoint_for_model(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }

    #[instrument(skip(self, request))]
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<Vec<Part>> {
        let url = self.endpoint_for_model(model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .context(format!("Failed to send request to Gemini API at {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            warn!(%status, %error_body, "Gemini API request failed");
            return Err(anyhow::anyhow!(
                "Gemini API request for {} failed with status {}: {}",
                model,
                status,
                error_body
            ));
        }

        let body = response
            .json::<GenerateContentResponse>()
            .await
            .context("Failed to parse JSON response from Gemini API")?;

        let parts = body.into_first_parts();
        debug!(parts = parts.len(), "Received Gemini response");
        Ok(parts)
    }
}

/// One model on a [`GeminiClient`]; usable as a text tier or as the image model.
#[derive(Clone)]
pub struct GeminiModel {
    client: GeminiClient,
    model: String,
}

#[async_trait]
impl StructuredGenerator for GeminiModel {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
        schema: &Value,
    ) -> Result<Option<String>> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(prompt)],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part::text(system_instruction)],
            }),
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema.clone()),
                ..Default::default()
            },
        };

        let parts = self.client.generate_content(&self.model, &request).await?;
        Ok(joined_text(&parts))
    }
}

#[async_trait]
impl ImageGenerator for GeminiModel {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate_image(&self, prompt: &str) -> Result<Vec<Part>> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(prompt)],
            }],
            system_instruction: None,
            generation_config: GenerationConfig {
                response_modalities: Some(vec!["IMAGE".to_string()]),
                ..Default::default()
            },
        };

        self.client.generate_content(&self.model, &request).await
    }
}
