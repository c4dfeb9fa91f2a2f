//! Request payload for the number-parsing model

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Fixed instruction sent with every parse request
pub const SYSTEM_INSTRUCTION: &str = "You are a specialized text parser for financial calculations. \
Your task is to convert the user-provided text into a single numerical value. \
You must handle currency denominations common in India (like 'lakh' = 100000 and 'crore' = 10000000). \
Ignore surrounding text. \
If the input is a percentage, return the raw number (e.g., '12 percent' should be 12, not 0.12). \
If the input is a currency amount (like 'one lakh' or '1,50,000'), return the total numerical value. \
The response MUST be a JSON object conforming to the provided schema.";

/// `generateContent` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Content {
    fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

/// `{ value: NUMBER }`, the only shape the resolver accepts
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "value": {
                "type": "NUMBER",
                "description": "The converted numerical value."
            }
        },
        "required": ["value"]
    })
}

impl GenerateContentRequest {
    /// Build a parse request for free-form user text
    pub fn for_text(text: &str) -> Self {
        Self {
            contents: vec![Content::text(text)],
            system_instruction: Content::text(SYSTEM_INSTRUCTION),
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        }
    }
}
