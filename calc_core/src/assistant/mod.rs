//! # AI Assistant
//!
//! Request and response types for the problem-solving collaborator, the
//! prompt sent to it, and the [`AssistantSession`] state behind the AI
//! panel. The collaborator itself is remote; [`gemini`] holds the wire
//! format and the front end owns the HTTP client.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::assistant::InterpretationRequest;
//! use calc_core::i18n::Language;
//!
//! let request = InterpretationRequest::new("2x = 10", None, Language::En).unwrap();
//! assert_eq!(
//!     request.prompt(),
//!     "Explain this math problem step-by-step: \"2x = 10\". Respond in English."
//! );
//! ```

pub mod gemini;
pub mod session;

use serde::{Deserialize, Serialize};

use crate::drawing::CanvasSnapshot;
use crate::i18n::Language;

pub use session::AssistantSession;

/// One question for the collaborator: typed text, a sketch, or both.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpretationRequest {
    pub problem_text: Option<String>,
    pub image: Option<CanvasSnapshot>,
    pub language: Language,
}

impl InterpretationRequest {
    /// Build a request; blank text counts as no text.
    ///
    /// Returns `None` when there is neither text nor an image.
    pub fn new(text: &str, image: Option<CanvasSnapshot>, language: Language) -> Option<Self> {
        let text = text.trim();
        let problem_text = (!text.is_empty()).then(|| text.to_string());
        if problem_text.is_none() && image.is_none() {
            return None;
        }
        Some(InterpretationRequest {
            problem_text,
            image,
            language,
        })
    }

    /// Instruction text sent alongside the optional image
    pub fn prompt(&self) -> String {
        let suffix = self.language.strings().prompt_suffix;
        match (&self.image, &self.problem_text) {
            (Some(_), Some(text)) => format!(
                "Recognize the math problem in this image and explain it step-by-step. Note: {text}. {suffix}"
            ),
            (Some(_), None) => format!(
                "Recognize the math problem in this image and explain it step-by-step. {suffix}"
            ),
            (None, text) => format!(
                "Explain this math problem step-by-step: \"{}\". {suffix}",
                text.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// Worked solution returned by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretationResponse {
    /// Brief summary of the problem
    pub explanation: String,
    /// Solution steps, in order
    pub steps: Vec<String>,
    /// Final answer
    pub solution: String,
}
