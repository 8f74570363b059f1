use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::constants::FALLBACK_IMAGE;
use crate::error::KaiError;
use crate::gemini::GeminiClient;
use crate::generator::{ImageGenerator, StructuredGenerator};
use crate::models::{AnalysisData, AnalysisResult, AnswerSet};
use crate::prompts::{render_analysis_prompt, SYSTEM_INSTRUCTION};
use crate::schema::ANALYSIS_SCHEMA;
use crate::visual;

/// Model identifiers for the two text tiers and the image step.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub primary_model: String,
    pub fallback_model: String,
    pub image_model: String,
}

/// Runs an analysis: text tiers in order, then a best-effort image.
///
/// Holds no mutable state, so one instance can serve any number of sessions.
#[derive(Clone)]
pub struct Analyzer {
    text_tiers: Vec<Arc<dyn StructuredGenerator>>,
    image: Arc<dyn ImageGenerator>,
}

impl Analyzer {
    pub fn new(
        text_tiers: Vec<Arc<dyn StructuredGenerator>>,
        image: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self { text_tiers, image }
    }

    pub fn from_gemini(client: &GeminiClient, models: &ModelSettings) -> Self {
        let primary: Arc<dyn StructuredGenerator> = Arc::new(client.model(&models.primary_model));
        let fallback: Arc<dyn StructuredGenerator> =
            Arc::new(client.model(&models.fallback_model));
        Self::new(
            vec![primary, fallback],
            Arc::new(client.model(&models.image_model)),
        )
    }

    #[instrument(skip_all)]
    pub async fn produce_analysis(&self, answers: &AnswerSet) -> Result<AnalysisResult, KaiError> {
        let prompt = render_analysis_prompt(answers.as_slice());
        let data = self.request_analysis(&prompt).await?;

        let gaps = data.conformance_gaps();
        if !gaps.is_empty() {
            warn!(?gaps, "Analysis does not match the requested shape; using it as-is");
        }

        let (image_url, is_image_fallback) = match self.generate_visual_anchor(&data.theme).await {
            Ok(url) => (url, false),
            Err(e) => {
                warn!(error = %e, "Image generation failed. Using fallback image.");
                (FALLBACK_IMAGE.to_string(), true)
            }
        };

        info!(theme = %data.theme, is_image_fallback, "Analysis complete");
        Ok(AnalysisResult::assemble(data, image_url, is_image_fallback))
    }

    /// Regenerates only the image for a theme; no fallback substitution.
    pub async fn generate_visual_anchor(&self, theme: &str) -> Result<String, KaiError> {
        visual::generate_visual_anchor(self.image.as_ref(), theme).await
    }

    /// Each tier gets exactly one attempt with the same prompt.
    async fn request_analysis(&self, prompt: &str) -> Result<AnalysisData, KaiError> {
        for (tier, generator) in self.text_tiers.iter().enumerate() {
            let model = generator.model();
            debug!(tier, model, "Requesting analysis");

            match generator
                .generate(prompt, SYSTEM_INSTRUCTION, &ANALYSIS_SCHEMA)
                .await
            {
                Ok(Some(text)) => match AnalysisData::from_model_text(&text) {
                    Ok(data) => return Ok(data),
                    Err(e) => {
                        warn!(tier, model, error = ?e, "Unparsable analysis, trying next model")
                    }
                },
                Ok(None) => warn!(tier, model, "Empty analysis response, trying next model"),
                Err(e) => warn!(tier, model, error = ?e, "Analysis request failed, trying next model"),
            }
        }

        error!(tiers = self.text_tiers.len(), "Every analysis model failed");
        Err(KaiError::ServiceUnavailable)
    }
}
