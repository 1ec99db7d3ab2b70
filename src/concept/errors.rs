use thiserror::Error;

use crate::concept::GenerationKind;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("No API key configured for the generation service")]
    MissingApiKey,
    #[error("Generation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Generation service returned [{status}]: {message}")]
    Api {
        status: u16,
        message: String
    }
}

#[derive(Debug, Error)]
pub enum ConceptError {
    #[error("App title is required")]
    TitleRequired,
    #[error("App description is required")]
    DescriptionRequired,
    #[error(transparent)]
    Generation(#[from] GenerationError)
}

/// The collaborator answered, but not in the shape the request asked for.
///
/// Never returned to callers; the adapter logs it and falls back to an empty result.
#[derive(Debug, Error)]
#[error("Failed to parse {kind} response: {source}")]
pub struct AdapterParseError {
    pub kind: GenerationKind,
    pub source: serde_json::Error
}
