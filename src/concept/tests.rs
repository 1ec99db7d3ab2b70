use super::errors::ConceptError;
use super::gemini::extract_output;
use super::prompts::{generation_config, model_for, prompt_for};
use super::{
    AppIdea, CodeSnippet, ConceptCollector, GeminiConfig, GeminiGenerator, GenerationError, GenerationKind,
    GenerationOutput, Generator, RoadmapItem
};

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::json;

/// Canned collaborator that records which kinds were requested.
#[derive(Default)]
struct StubGenerator {
    responses: HashMap<GenerationKind, GenerationOutput>,
    unreachable: bool,
    calls: Mutex<Vec<GenerationKind>>
}

impl StubGenerator {
    fn with(mut self, kind: GenerationKind, output: GenerationOutput) -> Self {
        self.responses.insert(kind, output);
        self
    }

    fn calls(&self) -> Vec<GenerationKind> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Generator for StubGenerator {
    async fn generate(&self, _idea: &AppIdea, kind: GenerationKind) -> Result<GenerationOutput, GenerationError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(kind);
        }

        if self.unreachable {
            return Err(GenerationError::Api { status: 503, message: "unavailable".to_string() })
        }

        Ok(self.responses.get(&kind).cloned().unwrap_or(GenerationOutput::Empty))
    }
}

fn idea() -> AppIdea {
    AppIdea::new("FitTrack Pro", "Workout logging with streaks", "Gym beginners")
}

fn text(value: &str) -> GenerationOutput {
    GenerationOutput::Text(value.to_string())
}

#[tokio::test]
async fn test_malformed_roadmap_yields_empty_sequence() -> Result<()> {
    let collector = ConceptCollector::new(
        StubGenerator::default().with(GenerationKind::Roadmap, text("Sure! Here is your roadmap: phase one..."))
    );

    let roadmap = collector.roadmap(&idea()).await?;

    assert!(roadmap.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_wrongly_shaped_json_yields_empty_sequence() -> Result<()> {
    let collector = ConceptCollector::new(
        StubGenerator::default().with(GenerationKind::StarterCode, text(r#"{"title": "not an array"}"#))
    );

    assert!(collector.starter_code(&idea()).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_well_formed_roadmap_is_relayed_in_order() -> Result<()> {
    let payload = json!([
        { "phase": "Discovery", "tasks": ["Interview users", "Sketch flows"] },
        { "phase": "MVP", "tasks": ["Build logging"] }
    ]);
    let collector = ConceptCollector::new(
        StubGenerator::default().with(GenerationKind::Roadmap, text(&payload.to_string()))
    );

    let roadmap = collector.roadmap(&idea()).await?;

    assert_eq!(roadmap, vec![
        RoadmapItem { phase: "Discovery".to_string(), tasks: vec!["Interview users".to_string(), "Sketch flows".to_string()] },
        RoadmapItem { phase: "MVP".to_string(), tasks: vec!["Build logging".to_string()] },
    ]);

    Ok(())
}

#[tokio::test]
async fn test_empty_response_is_treated_as_empty_list() -> Result<()> {
    let collector = ConceptCollector::new(StubGenerator::default());

    assert!(collector.roadmap(&idea()).await?.is_empty());
    assert!(collector.starter_code(&idea()).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_mockup_inline_data_becomes_data_uri() -> Result<()> {
    let collector = ConceptCollector::new(StubGenerator::default().with(
        GenerationKind::Mockup,
        GenerationOutput::InlineData { mime_type: "image/png".to_string(), data: "aGVsbG8=".to_string() }
    ));

    assert_eq!(collector.mockup(&idea()).await?, Some("data:image/png;base64,aGVsbG8=".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_mockup_without_valid_image_is_none() -> Result<()> {
    let invalid = ConceptCollector::new(StubGenerator::default().with(
        GenerationKind::Mockup,
        GenerationOutput::InlineData { mime_type: "image/png".to_string(), data: "%%% not base64 %%%".to_string() }
    ));
    let text_only = ConceptCollector::new(StubGenerator::default().with(GenerationKind::Mockup, text("I cannot draw")));

    assert_eq!(invalid.mockup(&idea()).await?, None);
    assert_eq!(text_only.mockup(&idea()).await?, None);

    Ok(())
}

#[tokio::test]
async fn test_missing_required_fields_never_reach_the_generator() {
    let collector = ConceptCollector::new(StubGenerator::default());

    let no_title = collector.submit(&AppIdea::new("  ", "Something", "")).await;
    let no_description = collector.submit(&AppIdea::new("Title", "", "")).await;

    assert!(matches!(no_title, Err(ConceptError::TitleRequired)));
    assert!(matches!(no_description, Err(ConceptError::DescriptionRequired)));
    assert!(collector.generator().calls().is_empty());
}

#[tokio::test]
async fn test_submit_requests_each_kind_sequentially() -> Result<()> {
    let snippets = json!([{ "title": "Schema", "code": "CREATE TABLE workouts ();", "lang": "sql" }]);
    let collector = ConceptCollector::new(
        StubGenerator::default()
            .with(GenerationKind::Roadmap, text("not json"))
            .with(GenerationKind::StarterCode, text(&snippets.to_string()))
    );

    let bundle = collector.submit(&AppIdea::new("FitTrack Pro", "Workout logging", "")).await?;

    assert_eq!(collector.generator().calls(), vec![
        GenerationKind::Roadmap,
        GenerationKind::Mockup,
        GenerationKind::StarterCode,
    ]);
    assert!(bundle.roadmap.is_empty());
    assert_eq!(bundle.mockup, None);
    assert_eq!(bundle.snippets, vec![CodeSnippet {
        title: "Schema".to_string(),
        code: "CREATE TABLE workouts ();".to_string(),
        lang: "sql".to_string()
    }]);

    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_is_reported() {
    let collector = ConceptCollector::new(StubGenerator { unreachable: true, ..StubGenerator::default() });

    let result = collector.submit(&idea()).await;

    assert!(matches!(result, Err(ConceptError::Generation(GenerationError::Api { status: 503, .. }))));
    assert_eq!(collector.generator().calls(), vec![GenerationKind::Roadmap]);
}

#[test]
fn test_extract_output_joins_text_parts() {
    let response = json!({
        "candidates": [{ "content": { "parts": [{ "text": "[{\"phase\":" }, { "text": "\"A\",\"tasks\":[]}]" }] } }]
    });

    assert_eq!(
        extract_output(&response, GenerationKind::Roadmap),
        GenerationOutput::Text("[{\"phase\":\"A\",\"tasks\":[]}]".to_string())
    );
}

#[test]
fn test_extract_output_finds_inline_image() {
    let response = json!({
        "candidates": [{ "content": { "parts": [
            { "text": "Here is your mockup" },
            { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
        ] } }]
    });

    assert_eq!(
        extract_output(&response, GenerationKind::Mockup),
        GenerationOutput::InlineData { mime_type: "image/png".to_string(), data: "aGVsbG8=".to_string() }
    );
}

#[test]
fn test_extract_output_without_candidates_is_empty() {
    assert_eq!(extract_output(&json!({ "promptFeedback": {} }), GenerationKind::StarterCode), GenerationOutput::Empty);
    assert_eq!(extract_output(&json!({ "candidates": [] }), GenerationKind::Mockup), GenerationOutput::Empty);
}

#[test]
fn test_gemini_generator_requires_api_key() -> Result<()> {
    let missing = GeminiGenerator::new(&GeminiConfig::default());
    let blank = GeminiGenerator::new(&GeminiConfig { api_key: Some("  ".to_string()), ..GeminiConfig::default() });

    assert!(matches!(missing, Err(GenerationError::MissingApiKey)));
    assert!(matches!(blank, Err(GenerationError::MissingApiKey)));

    GeminiGenerator::new(&GeminiConfig { api_key: Some("AIzaTestKey".to_string()), ..GeminiConfig::default() })
        .map_err(|error| anyhow!("{error}"))?;

    Ok(())
}

#[test]
fn test_prompts_carry_the_idea_and_schema_hints() {
    let idea = idea();

    assert!(prompt_for(&idea, GenerationKind::Roadmap).contains("\"FitTrack Pro\""));
    assert!(prompt_for(&idea, GenerationKind::Mockup).contains("Gym beginners"));
    assert_eq!(model_for(GenerationKind::Mockup), "gemini-2.5-flash-image");
    assert_eq!(generation_config(GenerationKind::StarterCode)["responseSchema"]["items"]["required"], json!(["title", "code", "lang"]));
    assert_eq!(generation_config(GenerationKind::Mockup)["imageConfig"]["aspectRatio"], "9:16");
}

#[test]
fn test_mockup_prompt_is_the_fixed_template() {
    assert_eq!(
        prompt_for(&idea(), GenerationKind::Mockup),
        "A professional, high-fidelity mobile/web UI mockup for an app called \"FitTrack Pro\". \n  \
         The app is for Gym beginners and its purpose is Workout logging with streaks. \n  \
         Clean, modern design, soft shadows, vibrant color palette, beautiful typography. \n  \
         The mockup should look like a Dribbble masterpiece."
    );
}

#[test]
fn test_starter_code_prompt_names_the_three_stacks() {
    assert_eq!(
        prompt_for(&idea(), GenerationKind::StarterCode),
        "Generate 3 essential code snippets for the app \"FitTrack Pro\" (Workout logging with streaks).\n  \
         Include: \n  \
         1. A core React component (TypeScript/Tailwind).\n  \
         2. A sample backend API route (Node.js/Express or Python/FastAPI).\n  \
         3. A database schema (Prisma/SQL or MongoDB).\n  \
         Return as a JSON array of objects with 'title', 'code', and 'lang' fields."
    );
}
