//! Shadow-work quiz: a fixed bank of 24 questions whose answers are analysed by a
//! hosted Gemini model, with a fallback model tier and a best-effort illustration.

pub mod analysis;
pub mod chat;
pub mod constants;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod models;
pub mod prompts;
pub mod schema;
pub mod visual;
pub mod web_server;

pub use analysis::{Analyzer, ModelSettings};
pub use error::KaiError;
pub use models::{AnalysisResult, AnswerSet, ChartDataPoint};
