//! State of the AI panel.

use crate::drawing::{CanvasSnapshot, Color, SnapshotUpdate, Tool};
use crate::errors::CalcResult;
use crate::i18n::Language;

use super::{InterpretationRequest, InterpretationResponse};

/// Typed input, drawing controls, and the outcome of the last request.
///
/// At most one request is in flight: [`AssistantSession::begin_submit`]
/// refuses while `loading`.
///
/// ```rust
/// use calc_core::assistant::{AssistantSession, InterpretationResponse};
/// use calc_core::i18n::Language;
///
/// let mut session = AssistantSession::new();
/// session.set_input("integrate x^2");
/// let request = session.begin_submit(Language::En).unwrap();
/// assert!(session.is_loading());
/// assert!(session.begin_submit(Language::En).is_none());
///
/// session.finish(Ok(InterpretationResponse {
///     explanation: "Power rule".into(),
///     steps: vec!["Raise the exponent".into()],
///     solution: "x^3/3 + C".into(),
/// }), Language::En);
/// assert!(!session.is_loading());
/// assert_eq!(session.input(), "integrate x^2");
/// # drop(request);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssistantSession {
    input: String,
    loading: bool,
    result: Option<InterpretationResponse>,
    error: Option<String>,
    drawing_mode: bool,
    tool: Tool,
    color: Color,
    canvas: Option<CanvasSnapshot>,
}

impl AssistantSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last successful answer
    pub fn result(&self) -> Option<&InterpretationResponse> {
        self.result.as_ref()
    }

    /// Localized error of the last failed request
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_drawing_mode(&self) -> bool {
        self.drawing_mode
    }

    /// Show or hide the canvas. Opening it selects the pen.
    ///
    /// The latest snapshot is kept while the canvas is hidden.
    pub fn toggle_drawing_mode(&mut self) {
        self.drawing_mode = !self.drawing_mode;
        if self.drawing_mode {
            self.tool = Tool::Pen;
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn select_eraser(&mut self) {
        self.tool = Tool::Eraser;
    }

    /// Pick a palette color, switching back to the pen
    pub fn select_color(&mut self, color: Color) {
        self.color = color;
        self.tool = Tool::Pen;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn canvas(&self) -> Option<&CanvasSnapshot> {
        self.canvas.as_ref()
    }

    /// Take in whatever the drawing surface exported
    pub fn canvas_changed(&mut self, update: SnapshotUpdate) {
        self.canvas = update.into_snapshot();
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && (!self.input.trim().is_empty() || self.canvas.is_some())
    }

    /// Start a request, or `None` if there is nothing to send or one is
    /// already running. Clears any previous error.
    pub fn begin_submit(&mut self, language: Language) -> Option<InterpretationRequest> {
        if self.loading {
            return None;
        }
        let request = InterpretationRequest::new(&self.input, self.canvas.clone(), language)?;
        self.loading = true;
        self.error = None;
        tracing::info!(
            has_text = request.problem_text.is_some(),
            has_image = request.image.is_some(),
            language = %language,
            "submitting problem"
        );
        Some(request)
    }

    /// Record the outcome of the running request.
    ///
    /// A failure shows the localized error and keeps the previous answer,
    /// the input and the drawing for a retry.
    pub fn finish(&mut self, outcome: CalcResult<InterpretationResponse>, language: Language) {
        self.loading = false;
        match outcome {
            Ok(response) => {
                tracing::info!(steps = response.steps.len(), "problem solved");
                self.result = Some(response);
            }
            Err(e) => {
                tracing::warn!(code = e.error_code(), error = %e, "problem could not be solved");
                self.error = Some(language.strings().error_ai.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::units::PhysicalSize;

    fn snapshot() -> CanvasSnapshot {
        CanvasSnapshot::new(vec![9, 9], PhysicalSize { width: 2, height: 2 })
    }

    fn response() -> InterpretationResponse {
        InterpretationResponse {
            explanation: "x".into(),
            steps: vec![],
            solution: "1".into(),
        }
    }

    #[test]
    fn test_nothing_to_submit() {
        let mut session = AssistantSession::new();
        assert!(!session.can_submit());
        session.set_input("   ");
        assert!(!session.can_submit());
        assert!(session.begin_submit(Language::En).is_none());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_drawing_alone_is_enough() {
        let mut session = AssistantSession::new();
        session.canvas_changed(SnapshotUpdate::Snapshot(snapshot()));
        assert!(session.can_submit());
        let request = session.begin_submit(Language::En).unwrap();
        assert!(request.image.is_some());
        assert!(request.problem_text.is_none());
        assert!(!session.can_submit());
    }

    #[test]
    fn test_clear_removes_snapshot() {
        let mut session = AssistantSession::new();
        session.canvas_changed(SnapshotUpdate::Snapshot(snapshot()));
        session.canvas_changed(SnapshotUpdate::Cleared);
        assert!(session.canvas().is_none());
        assert!(!session.can_submit());
    }

    #[test]
    fn test_failure_keeps_input_and_result() {
        let mut session = AssistantSession::new();
        session.set_input("1+1");
        session.begin_submit(Language::En).unwrap();
        session.finish(Ok(response()), Language::En);

        session.begin_submit(Language::Tr).unwrap();
        session.finish(Err(CalcError::interpretation("timeout")), Language::Tr);

        assert_eq!(session.error(), Some(Language::Tr.strings().error_ai));
        assert_eq!(session.result(), Some(&response()));
        assert_eq!(session.input(), "1+1");
        assert!(session.can_submit());

        session.dismiss_error();
        assert!(session.error().is_none());
    }

    #[test]
    fn test_submit_clears_error() {
        let mut session = AssistantSession::new();
        session.set_input("2+2");
        session.begin_submit(Language::En).unwrap();
        session.finish(Err(CalcError::interpretation("down")), Language::En);
        session.begin_submit(Language::En).unwrap();
        assert!(session.error().is_none());
    }

    #[test]
    fn test_opening_drawing_resets_to_pen() {
        let mut session = AssistantSession::new();
        session.toggle_drawing_mode();
        session.select_eraser();
        session.toggle_drawing_mode();
        assert!(!session.is_drawing_mode());
        assert_eq!(session.tool(), Tool::Eraser);
        session.toggle_drawing_mode();
        assert_eq!(session.tool(), Tool::Pen);
    }

    #[test]
    fn test_palette_selects_pen() {
        let mut session = AssistantSession::new();
        session.select_eraser();
        session.select_color(Color::YELLOW);
        assert_eq!(session.tool(), Tool::Pen);
        assert_eq!(session.color(), Color::YELLOW);
    }

    #[test]
    fn test_snapshot_survives_hiding_canvas() {
        let mut session = AssistantSession::new();
        session.toggle_drawing_mode();
        session.canvas_changed(SnapshotUpdate::Snapshot(snapshot()));
        session.toggle_drawing_mode();
        assert!(session.canvas().is_some());
    }
}
