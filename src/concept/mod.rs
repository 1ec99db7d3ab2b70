//! AppCreator concept collector.
//!
//! Collects an [`AppIdea`] and relays it to a [`Generator`] for a roadmap, a
//! mockup image and starter code. The adapter never fails on a malformed
//! answer: it logs an [`AdapterParseError`](errors::AdapterParseError) and hands back an empty result.

mod collector;
mod errors;
mod gemini;
mod prompts;
#[cfg(test)]
mod tests;

use std::fmt;
use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use collector::ConceptCollector;
pub use errors::GenerationError;
pub use gemini::{GeminiConfig, GeminiGenerator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppIdea {
    pub title: String,
    pub description: String,
    pub target_audience: String
}

impl AppIdea {
    pub fn new(title: impl Into<String>, description: impl Into<String>, target_audience: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            target_audience: target_audience.into()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationKind {
    Roadmap,
    Mockup,
    StarterCode
}

impl Display for GenerationKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            GenerationKind::Roadmap => "roadmap",
            GenerationKind::Mockup => "mockup",
            GenerationKind::StarterCode => "starter code"
        })
    }
}

/// Raw answer from a generation service, before any shape is assumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutput {
    Text(String),
    InlineData {
        mime_type: String,
        /// Base64 payload as sent by the service.
        data: String
    },
    Empty
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub phase: String,
    pub tasks: Vec<String>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub title: String,
    pub code: String,
    pub lang: String
}

/// Everything one idea submission produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConceptBundle {
    pub idea: AppIdea,
    pub roadmap: Vec<RoadmapItem>,
    /// `data:` URI of the mockup image.
    pub mockup: Option<String>,
    pub snippets: Vec<CodeSnippet>
}

/// External content generation capability.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, idea: &AppIdea, kind: GenerationKind) -> Result<GenerationOutput, GenerationError>;
}
