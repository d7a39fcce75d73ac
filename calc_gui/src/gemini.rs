//! Gemini client for the AI assistant.
//!
//! Sends one `generateContent` request per submission and maps every
//! failure to [`CalcError::InterpretationRequest`].

use std::time::Duration;

use calc_core::assistant::gemini::{build_request, endpoint_url, parse_response, API_KEY_HEADER};
use calc_core::config::AssistantConfig;
use calc_core::{CalcError, CalcResult, InterpretationRequest, InterpretationResponse};

/// Current application version (from Cargo.toml)
const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reusable HTTP client plus the settings it was built from
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: AssistantConfig,
}

impl GeminiClient {
    pub fn new(config: AssistantConfig) -> CalcResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("Calcula/{}", CURRENT_VERSION))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CalcError::interpretation(format!("Failed to create HTTP client: {}", e)))?;
        Ok(GeminiClient { http, config })
    }

    /// Ask the model to solve `request`
    pub async fn solve(self, request: InterpretationRequest) -> CalcResult<InterpretationResponse> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| CalcError::interpretation("no API key configured"))?;

        let url = endpoint_url(&self.config.endpoint, &self.config.model);
        let body = build_request(&request);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CalcError::interpretation(format!("Network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CalcError::interpretation(format!("Gemini API returned {}", status)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| CalcError::interpretation(format!("Failed to read response: {}", e)))?;

        parse_response(&text)
    }
}
