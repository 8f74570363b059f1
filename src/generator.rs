use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::gemini::Part;

/// A text model that can be constrained to a JSON response schema.
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    /// Model identifier, used in logs.
    fn model(&self) -> &str;

    /// Returns the raw response text, or `None` when the model answered with nothing.
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
        schema: &Value,
    ) -> Result<Option<String>>;
}

/// A model asked for image-only output.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    fn model(&self) -> &str;

    /// Returns the parts of the first candidate; callers pick out the image payload.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<Part>>;
}
