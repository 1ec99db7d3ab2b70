use serde_json::{json, Value};

use crate::concept::{AppIdea, GenerationKind};

pub fn model_for(kind: GenerationKind) -> &'static str {
    match kind {
        GenerationKind::Roadmap => "gemini-3-flash-preview",
        GenerationKind::Mockup => "gemini-2.5-flash-image",
        GenerationKind::StarterCode => "gemini-3-pro-preview"
    }
}

pub fn prompt_for(idea: &AppIdea, kind: GenerationKind) -> String {
    match kind {
        GenerationKind::Roadmap => format!(
            "Create a 4-phase development roadmap for an app called \"{}\". \n  Description: {}. \n  Target Audience: {}. \n  Provide specific, actionable technical and business tasks for each phase.",
            idea.title, idea.description, idea.target_audience
        ),
        GenerationKind::Mockup => format!(
            "A professional, high-fidelity mobile/web UI mockup for an app called \"{}\". \n  The app is for {} and its purpose is {}. \n  Clean, modern design, soft shadows, vibrant color palette, beautiful typography. \n  The mockup should look like a Dribbble masterpiece.",
            idea.title, idea.target_audience, idea.description
        ),
        GenerationKind::StarterCode => format!(
            "Generate 3 essential code snippets for the app \"{}\" ({}).\n  Include: \n  1. A core React component (TypeScript/Tailwind).\n  2. A sample backend API route (Node.js/Express or Python/FastAPI).\n  3. A database schema (Prisma/SQL or MongoDB).\n  Return as a JSON array of objects with 'title', 'code', and 'lang' fields.",
            idea.title, idea.description
        )
    }
}

/// `generationConfig` for the request: a JSON response schema for the list
/// kinds, an aspect ratio for the image.
pub fn generation_config(kind: GenerationKind) -> Value {
    match kind {
        GenerationKind::Roadmap => json!({
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "phase": { "type": "STRING" },
                        "tasks": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["phase", "tasks"]
                }
            }
        }),
        GenerationKind::Mockup => json!({
            "imageConfig": { "aspectRatio": "9:16" }
        }),
        GenerationKind::StarterCode => json!({
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "code": { "type": "STRING" },
                        "lang": { "type": "STRING" }
                    },
                    "required": ["title", "code", "lang"]
                }
            }
        })
    }
}
