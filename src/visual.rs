//! Image step of an analysis, callable on its own so a failed image can be retried
//! without repeating the text analysis.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tracing::{debug, instrument, warn};

use crate::error::KaiError;
use crate::gemini::Part;
use crate::generator::ImageGenerator;

pub fn visual_anchor_prompt(theme: &str) -> String {
    format!(
        "A high-end, minimalist, and tidy digital art piece representing a life path journey with the theme: '{theme}'.
    Style: Serene, clean composition, ethereal lighting, soft cinematic atmosphere.
    Visuals: A clear path or road leading towards a gentle light, uncluttered environment, symbolic of healing and growth.
    Colors: Soothing pastels, deep calming blues or warm golds.
    No text, no chaotic elements. Perfectionist composition."
    )
}

/// First inline payload that is valid base64, wrapped as a PNG data URI.
pub fn first_image_data_uri(parts: &[Part]) -> Option<String> {
    parts
        .iter()
        .filter_map(|part| part.inline_data.as_ref())
        .filter(|inline| !inline.data.is_empty())
        .find(|inline| match BASE64.decode(inline.data.as_bytes()) {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Skipping inline payload that is not base64");
                false
            }
        })
        .map(|inline| format!("data:image/png;base64,{}", inline.data))
}

#[instrument(skip(generator), fields(model = generator.model()))]
pub async fn generate_visual_anchor(
    generator: &dyn ImageGenerator,
    theme: &str,
) -> Result<String, KaiError> {
    let prompt = visual_anchor_prompt(theme);
    let parts = generator
        .generate_image(&prompt)
        .await
        .map_err(|e| KaiError::ImageGeneration(format!("{:#}", e)))?;
    debug!(parts = parts.len(), "Image model answered");

    first_image_data_uri(&parts).ok_or(KaiError::NoImageData)
}
