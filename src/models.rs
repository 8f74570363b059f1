use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::KaiError;
use crate::prompts::{ASSESSMENT_CATEGORIES, QUESTIONS};

/// The 24 answers of one session, index-aligned with [`QUESTIONS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet(Vec<String>);

impl AnswerSet {
    /// Content is not inspected; only the count has to match the question bank.
    pub fn new(answers: Vec<String>) -> Result<Self, KaiError> {
        if answers.len() != QUESTIONS.len() {
            return Err(KaiError::InvalidAnswerCount {
                expected: QUESTIONS.len(),
                actual: answers.len(),
            });
        }
        Ok(Self(answers))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub name: String,
    pub percentage: f64,
}

/// What the text model returns, before the image step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    pub assessment: Vec<ChartDataPoint>,
    pub theme: String,
    pub vibe_check: String,
    pub deep_dive: Vec<String>,
    pub reality_check: String,
    pub healing_roadmap: Vec<String>,
    pub visual_description: String,
}

impl AnalysisData {
    /// Parses model output, tolerating surrounding whitespace and a Markdown code fence.
    pub fn from_model_text(text: &str) -> Result<Self> {
        let body = strip_code_fence(text);
        serde_json::from_str(body).context("Model output does not match the analysis schema")
    }

    /// Differences from the shape the prompt asks for. These are reported, not enforced.
    pub fn conformance_gaps(&self) -> Vec<String> {
        let mut gaps = Vec::new();
        if self.assessment.len() != ASSESSMENT_CATEGORIES.len() {
            gaps.push(format!(
                "assessment has {} entries, expected {}",
                self.assessment.len(),
                ASSESSMENT_CATEGORIES.len()
            ));
        }
        for point in &self.assessment {
            if !(0.0..=100.0).contains(&point.percentage) {
                gaps.push(format!("{} is out of range: {}", point.name, point.percentage));
            }
            if !ASSESSMENT_CATEGORIES.contains(&point.name.as_str()) {
                gaps.push(format!("unknown assessment category '{}'", point.name));
            }
        }
        if self.deep_dive.len() != 3 {
            gaps.push(format!("deepDive has {} points, expected 3", self.deep_dive.len()));
        }
        if self.healing_roadmap.len() != 3 {
            gaps.push(format!(
                "healingRoadmap has {} steps, expected 3",
                self.healing_roadmap.len()
            ));
        }
        if self.theme.trim().is_empty() {
            gaps.push("theme is empty".to_string());
        }
        gaps
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_end().strip_suffix("```").unwrap_or(rest);
    // An info string (`json`) may sit on its own line or run straight into the body.
    let body = match rest.split_once('\n') {
        Some((tag, body)) if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body,
        _ => rest.trim_start().strip_prefix("json").unwrap_or(rest),
    };
    body.trim()
}

/// Display-ready analysis: parsed text fields plus the chosen image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub chart_data: Vec<ChartDataPoint>,
    pub image_url: String,
    pub visual_description: String,
    pub theme: String,
    pub vibe_check: String,
    pub deep_dive: Vec<String>,
    pub reality_check: String,
    pub healing_roadmap: Vec<String>,
    pub is_image_fallback: bool,
}

impl AnalysisResult {
    pub fn assemble(data: AnalysisData, image_url: String, is_image_fallback: bool) -> Self {
        Self {
            chart_data: data.assessment,
            image_url,
            visual_description: data.visual_description,
            theme: data.theme,
            vibe_check: data.vibe_check,
            deep_dive: data.deep_dive,
            reality_check: data.reality_check,
            healing_roadmap: data.healing_roadmap,
            is_image_fallback,
        }
    }
}
