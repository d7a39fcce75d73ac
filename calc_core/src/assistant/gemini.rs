//! Gemini `generateContent` wire format.
//!
//! Only serialization lives here; sending the request is up to the caller.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::drawing::snapshot::PNG_MIME;
use crate::errors::{CalcError, CalcResult};

use super::{InterpretationRequest, InterpretationResponse};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// JSON schema the model must answer with
pub static RESPONSE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "explanation": {
                "type": "STRING",
                "description": "Brief summary of the problem."
            },
            "steps": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Steps to solve the problem."
            },
            "solution": {
                "type": "STRING",
                "description": "The final answer."
            }
        },
        "required": ["explanation", "steps", "solution"]
    })
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Either inline data or text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

/// URL of the `generateContent` method for `model`
///
/// ```rust
/// use calc_core::assistant::gemini::endpoint_url;
///
/// assert_eq!(
///     endpoint_url("https://example.test/v1beta/", "m"),
///     "https://example.test/v1beta/models/m:generateContent"
/// );
/// ```
pub fn endpoint_url(base: &str, model: &str) -> String {
    format!("{}/models/{model}:generateContent", base.trim_end_matches('/'))
}

/// Build the request body. The image part, if any, precedes the prompt.
pub fn build_request(request: &InterpretationRequest) -> GenerateContentRequest {
    let mut parts = Vec::with_capacity(2);
    if let Some(image) = &request.image {
        parts.push(Part {
            inline_data: Some(Blob {
                mime_type: PNG_MIME.to_string(),
                data: image.to_base64(),
            }),
            text: None,
        });
    }
    parts.push(Part {
        inline_data: None,
        text: Some(request.prompt()),
    });

    GenerateContentRequest {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: RESPONSE_SCHEMA.clone(),
        },
    }
}

/// Extract the solution from a raw `generateContent` response body.
///
/// The answer is the JSON text of the first text part of the first
/// candidate.
pub fn parse_response(body: &str) -> CalcResult<InterpretationResponse> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| CalcError::interpretation(format!("malformed response envelope: {e}")))?;

    let text = response
        .candidates
        .first()
        .and_then(|c| c.content.parts.iter().find_map(|p| p.text.as_deref()))
        .ok_or_else(|| CalcError::interpretation("response has no text part"))?;

    serde_json::from_str(text)
        .map_err(|e| CalcError::interpretation(format!("answer does not match schema: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::CanvasSnapshot;
    use crate::i18n::Language;
    use crate::units::PhysicalSize;

    #[test]
    fn test_text_only_body() {
        let request = InterpretationRequest::new("1+1", None, Language::En).unwrap();
        let body = serde_json::to_value(build_request(&request)).unwrap();

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts.as_array().unwrap().len(), 1);
        assert!(parts[0]["text"].as_str().unwrap().contains("\"1+1\""));
        assert!(parts[0].get("inlineData").is_none());
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"],
            json!(["explanation", "steps", "solution"])
        );
    }

    #[test]
    fn test_image_part_comes_first() {
        let image = CanvasSnapshot::new(vec![1, 2, 3], PhysicalSize { width: 1, height: 1 });
        let request = InterpretationRequest::new("", Some(image), Language::En).unwrap();
        let body = serde_json::to_value(build_request(&request)).unwrap();

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "AQID");
        assert!(parts[1]["text"].as_str().unwrap().starts_with("Recognize"));
    }

    #[test]
    fn test_parse_response() {
        let body = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{
                        "text": "{\"explanation\":\"Linear equation\",\"steps\":[\"Divide by 2\"],\"solution\":\"x = 5\"}"
                    }]
                },
                "finishReason": "STOP"
            }]
        })
        .to_string();

        let response = parse_response(&body).unwrap();
        assert_eq!(response.solution, "x = 5");
        assert_eq!(response.steps, vec!["Divide by 2"]);
    }

    #[test]
    fn test_parse_failures_are_interpretation_errors() {
        for body in [
            "not json",
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":"{}"}]}}]}"#,
        ] {
            let err = parse_response(body).unwrap_err();
            assert_eq!(err.error_code(), "AI_ERROR");
        }
    }
}
