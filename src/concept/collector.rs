use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::concept::errors::{AdapterParseError, ConceptError};
use crate::concept::{AppIdea, CodeSnippet, ConceptBundle, GenerationKind, GenerationOutput, Generator, RoadmapItem};

/// Form-to-collaborator adapter with a parse-or-empty policy.
pub struct ConceptCollector<G> {
    generator: G
}

impl<G: Generator> ConceptCollector<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    #[cfg(test)]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Requests roadmap, mockup and starter code one after another.
    ///
    /// # Errors
    /// `TitleRequired`/`DescriptionRequired` before anything is sent, and
    /// `Generation` if the service itself cannot be reached. Malformed answers
    /// are not errors.
    pub async fn submit(&self, idea: &AppIdea) -> Result<ConceptBundle, ConceptError> {
        validate(idea)?;

        let roadmap = self.roadmap(idea).await?;
        let mockup = self.mockup(idea).await?;
        let snippets = self.starter_code(idea).await?;

        Ok(ConceptBundle {
            idea: idea.clone(),
            roadmap,
            mockup,
            snippets
        })
    }

    pub async fn roadmap(&self, idea: &AppIdea) -> Result<Vec<RoadmapItem>, ConceptError> {
        self.generate_list(idea, GenerationKind::Roadmap).await
    }

    pub async fn starter_code(&self, idea: &AppIdea) -> Result<Vec<CodeSnippet>, ConceptError> {
        self.generate_list(idea, GenerationKind::StarterCode).await
    }

    pub async fn mockup(&self, idea: &AppIdea) -> Result<Option<String>, ConceptError> {
        validate(idea)?;

        let output = self.generator.generate(idea, GenerationKind::Mockup).await?;

        Ok(match output {
            GenerationOutput::InlineData { mime_type, data } => {
                if STANDARD.decode(data.as_bytes()).is_ok() {
                    Some(format!("data:{mime_type};base64,{data}"))
                } else {
                    warn!("Discarding mockup: inline data is not valid base64");
                    None
                }
            }
            GenerationOutput::Text(_) | GenerationOutput::Empty => {
                debug!("Mockup response carried no inline image");
                None
            }
        })
    }

    async fn generate_list<T: DeserializeOwned>(&self, idea: &AppIdea, kind: GenerationKind) -> Result<Vec<T>, ConceptError> {
        validate(idea)?;

        let output = self.generator.generate(idea, kind).await?;

        Ok(parse_or_default(kind, &output))
    }
}

fn validate(idea: &AppIdea) -> Result<(), ConceptError> {
    if idea.title.trim().is_empty() {
        return Err(ConceptError::TitleRequired)
    }

    if idea.description.trim().is_empty() {
        return Err(ConceptError::DescriptionRequired)
    }

    Ok(())
}

fn parse_or_default<T: DeserializeOwned>(kind: GenerationKind, output: &GenerationOutput) -> Vec<T> {
    let text = match output {
        GenerationOutput::Text(text) if !text.trim().is_empty() => text.as_str(),
        _ => "[]"
    };

    match serde_json::from_str(text) {
        Ok(items) => items,
        Err(source) => {
            warn!("{}", AdapterParseError { kind, source });
            Vec::new()
        }
    }
}
