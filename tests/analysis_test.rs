use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use kai::constants::FALLBACK_IMAGE;
use kai::gemini::Part;
use kai::generator::{ImageGenerator, StructuredGenerator};
use kai::prompts::SYSTEM_INSTRUCTION;
use kai::{Analyzer, AnswerSet, KaiError};

/// What a fake text tier does when called.
#[derive(Clone)]
enum TextReply {
    Json(String),
    Empty,
    Fail,
}

struct FakeText {
    name: &'static str,
    reply: TextReply,
    prompts: Mutex<Vec<String>>,
}

impl FakeText {
    fn new(name: &'static str, reply: TextReply) -> Arc<Self> {
        Arc::new(Self {
            name,
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructuredGenerator for FakeText {
    fn model(&self) -> &str {
        self.name
    }

    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
        schema: &Value,
    ) -> Result<Option<String>> {
        assert_eq!(system_instruction, SYSTEM_INSTRUCTION);
        assert_eq!(schema["type"], "OBJECT");
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            TextReply::Json(body) => Ok(Some(body.clone())),
            TextReply::Empty => Ok(None),
            TextReply::Fail => Err(anyhow!("429 RESOURCE_EXHAUSTED")),
        }
    }
}

#[derive(Clone)]
enum ImageReply {
    Inline(&'static str),
    TextOnly,
    Fail,
}

struct FakeImage {
    reply: ImageReply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeImage {
    fn new(reply: ImageReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for FakeImage {
    fn model(&self) -> &str {
        "fake-image"
    }

    async fn generate_image(&self, prompt: &str) -> Result<Vec<Part>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.reply {
            ImageReply::Inline(data) => Ok(vec![Part::text("caption"), Part::inline("image/png", data)]),
            ImageReply::TextOnly => Ok(vec![Part::text("I can only describe it")]),
            ImageReply::Fail => Err(anyhow!("Quota exceeded for image generation")),
        }
    }
}

fn analysis_json(theme: &str) -> String {
    serde_json::json!({
        "assessment": [
            {"name": "Fear Awareness", "percentage": 64},
            {"name": "Root Cause Clarity", "percentage": 22},
            {"name": "Emotional Regulation", "percentage": 47},
            {"name": "Self-Trust", "percentage": 35},
            {"name": "Courage Potential", "percentage": 81}
        ],
        "theme": theme,
        "vibeCheck": "You keep saying you don't know. That is the answer for now.",
        "deepDive": ["one", "two", "three"],
        "realityCheck": "Bestie, not knowing is also a choice.",
        "healingRoadmap": ["ground", "journal", "try one thing"],
        "visualDescription": "A loop that finally opens."
    })
    .to_string()
}

fn answers() -> AnswerSet {
    AnswerSet::new((1..=24).map(|i| format!("answer {}", i)).collect()).unwrap()
}

fn analyzer(
    primary: &Arc<FakeText>,
    fallback: &Arc<FakeText>,
    image: &Arc<FakeImage>,
) -> Analyzer {
    let tiers: Vec<Arc<dyn StructuredGenerator>> = vec![primary.clone(), fallback.clone()];
    Analyzer::new(tiers, image.clone())
}

#[test_log::test(tokio::test)]
async fn primary_success_never_touches_fallback() {
    let primary = FakeText::new("primary", TextReply::Json(analysis_json("Walking Through Fire")));
    let fallback = FakeText::new("fallback", TextReply::Fail);
    let image = FakeImage::new(ImageReply::Inline("iVBORw0KGgo="));

    let result = analyzer(&primary, &fallback, &image)
        .produce_analysis(&answers())
        .await
        .unwrap();

    assert_eq!(primary.calls(), 1);
    assert_eq!(fallback.calls(), 0);
    assert_eq!(image.calls(), 1);
    assert_eq!(result.theme, "Walking Through Fire");
    assert_eq!(result.image_url, "data:image/png;base64,iVBORw0KGgo=");
    assert!(!result.is_image_fallback);
}

#[test_log::test(tokio::test)]
async fn primary_error_escalates_once_with_identical_prompt() {
    let primary = FakeText::new("primary", TextReply::Fail);
    let fallback = FakeText::new("fallback", TextReply::Json(analysis_json("Quiet Storm")));
    let image = FakeImage::new(ImageReply::Inline("AAAA"));

    let result = analyzer(&primary, &fallback, &image)
        .produce_analysis(&answers())
        .await
        .unwrap();

    assert_eq!(fallback.calls(), 1);
    assert_eq!(primary.prompts(), fallback.prompts());
    assert_eq!(result.theme, "Quiet Storm");
}

#[test_log::test(tokio::test)]
async fn empty_primary_body_escalates() {
    let primary = FakeText::new("primary", TextReply::Empty);
    let fallback = FakeText::new("fallback", TextReply::Json(analysis_json("Quiet Storm")));
    let image = FakeImage::new(ImageReply::Inline("AAAA"));

    analyzer(&primary, &fallback, &image)
        .produce_analysis(&answers())
        .await
        .unwrap();

    assert_eq!(primary.calls(), 1);
    assert_eq!(fallback.calls(), 1);
    assert_eq!(primary.prompts(), fallback.prompts());
}

#[test_log::test(tokio::test)]
async fn unparsable_primary_body_escalates() {
    let primary = FakeText::new("primary", TextReply::Json("{\"theme\": \"half".to_string()));
    let fallback = FakeText::new("fallback", TextReply::Json(analysis_json("Second Wind")));
    let image = FakeImage::new(ImageReply::Inline("AAAA"));

    let result = analyzer(&primary, &fallback, &image)
        .produce_analysis(&answers())
        .await
        .unwrap();

    assert_eq!(fallback.calls(), 1);
    assert_eq!(result.theme, "Second Wind");
}

#[test_log::test(tokio::test)]
async fn both_tiers_failing_is_fatal_and_skips_image() {
    let primary = FakeText::new("primary", TextReply::Fail);
    let fallback = FakeText::new("fallback", TextReply::Empty);
    let image = FakeImage::new(ImageReply::Inline("AAAA"));

    let err = analyzer(&primary, &fallback, &image)
        .produce_analysis(&answers())
        .await
        .unwrap_err();

    assert!(matches!(err, KaiError::ServiceUnavailable));
    assert!(err.to_string().contains("overloaded"));
    assert_eq!(primary.calls(), 1);
    assert_eq!(fallback.calls(), 1);
    assert_eq!(image.calls(), 0);
}

#[test_log::test(tokio::test)]
async fn image_failure_degrades_to_placeholder() {
    let primary = FakeText::new("primary", TextReply::Json(analysis_json("Walking Through Fire")));
    let fallback = FakeText::new("fallback", TextReply::Fail);
    let image = FakeImage::new(ImageReply::Fail);

    let result = analyzer(&primary, &fallback, &image)
        .produce_analysis(&answers())
        .await
        .unwrap();

    assert_eq!(result.image_url, FALLBACK_IMAGE);
    assert!(result.is_image_fallback);
    assert_eq!(result.theme, "Walking Through Fire");
    assert_eq!(result.deep_dive.len(), 3);
}

#[test_log::test(tokio::test)]
async fn image_without_inline_payload_degrades_to_placeholder() {
    let primary = FakeText::new("primary", TextReply::Json(analysis_json("Walking Through Fire")));
    let fallback = FakeText::new("fallback", TextReply::Fail);
    let image = FakeImage::new(ImageReply::TextOnly);

    let result = analyzer(&primary, &fallback, &image)
        .produce_analysis(&answers())
        .await
        .unwrap();

    assert_eq!(result.image_url, FALLBACK_IMAGE);
    assert!(result.is_image_fallback);
}

#[test_log::test(tokio::test)]
async fn theme_is_the_only_input_to_the_image_prompt() {
    let primary = FakeText::new("primary", TextReply::Json(analysis_json("Stuck Loop")));
    let fallback = FakeText::new("fallback", TextReply::Fail);
    let image = FakeImage::new(ImageReply::Inline("AAAA"));

    analyzer(&primary, &fallback, &image)
        .produce_analysis(&answers())
        .await
        .unwrap();

    let prompts = image.prompts.lock().unwrap().clone();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("'Stuck Loop'"));
    assert!(!prompts[0].contains("answer 1"));
}

#[test_log::test(tokio::test)]
async fn dont_know_scenario_keeps_model_theme() {
    let primary = FakeText::new("primary", TextReply::Json(analysis_json("Stuck Loop")));
    let fallback = FakeText::new("fallback", TextReply::Fail);
    let image = FakeImage::new(ImageReply::Inline("AAAA"));
    let answers = AnswerSet::new(vec!["I don't know".to_string(); 24]).unwrap();

    let result = analyzer(&primary, &fallback, &image)
        .produce_analysis(&answers)
        .await
        .unwrap();

    let prompt = &primary.prompts()[0];
    for n in 1..=24 {
        assert!(prompt.contains(&format!("\nQ{}: I don't know\n", n)));
    }
    assert_eq!(result.theme, "Stuck Loop");
}

#[tokio::test]
async fn visual_anchor_retry_reports_missing_image() {
    let primary = FakeText::new("primary", TextReply::Fail);
    let fallback = FakeText::new("fallback", TextReply::Fail);
    let image = FakeImage::new(ImageReply::TextOnly);

    let err = analyzer(&primary, &fallback, &image)
        .generate_visual_anchor("Stuck Loop")
        .await
        .unwrap_err();

    assert!(matches!(err, KaiError::NoImageData));
    assert_eq!(primary.calls(), 0);
}

#[tokio::test]
async fn visual_anchor_retry_returns_data_uri() {
    let primary = FakeText::new("primary", TextReply::Fail);
    let fallback = FakeText::new("fallback", TextReply::Fail);
    let image = FakeImage::new(ImageReply::Inline("QkJC"));

    let url = analyzer(&primary, &fallback, &image)
        .generate_visual_anchor("Open Door")
        .await
        .unwrap();

    assert_eq!(url, "data:image/png;base64,QkJC");
}
