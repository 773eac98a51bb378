//! `generateContent` request body.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::gemini::prompt;

/// Request body for a grounded `generateContent` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub tools: Vec<Tool>,
    #[serde(rename = "systemInstruction")]
    pub system_instruction: Content,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
        }
    }

    fn to_json(&self) -> Value {
        let parts: Vec<Value> = self.parts.iter().map(|p| json!({ "text": p.text })).collect();
        json!({ "parts": parts })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    pub google_search: GoogleSearch,
}

/// Marker enabling the hosted Google Search tool; serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GoogleSearch {}

impl GenerateContentRequest {
    /// Search request for one university.
    pub fn transfer_requirements(name: &str, domain: &str) -> Self {
        Self {
            contents: vec![Content::text(prompt::user_query(name, domain))],
            tools: vec![Tool {
                google_search: GoogleSearch::default(),
            }],
            system_instruction: Content::text(prompt::system_instruction(name, domain)),
        }
    }

    /// JSON body sent on the wire.
    pub fn to_json(&self) -> Value {
        let contents: Vec<Value> = self.contents.iter().map(Content::to_json).collect();
        let tools: Vec<Value> = self
            .tools
            .iter()
            .map(|_| json!({ "google_search": {} }))
            .collect();
        json!({
            "contents": contents,
            "tools": tools,
            "systemInstruction": self.system_instruction.to_json(),
        })
    }
}
