//! # Calculator State Machine
//!
//! Holds the display text of the standard and scientific calculators and
//! applies keypad actions to it. Evaluation goes through
//! [`crate::expression::evaluate`]; successful results are reported to a
//! [`HistorySink`].
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculator::Calculator;
//! use calc_core::history::History;
//! use calc_core::i18n::Language;
//!
//! let mut calc = Calculator::new();
//! let mut history = History::new();
//! let strings = Language::En.strings();
//!
//! calc.input("2");
//! calc.input("+");
//! calc.input("3");
//! calc.calculate(&mut history, strings);
//!
//! assert_eq!(calc.display(), "5");
//! assert_eq!(calc.caption(), "2+3 =");
//! assert_eq!(history.len(), 1);
//! ```

pub mod keypad;

use serde::{Deserialize, Serialize};

use crate::expression;
use crate::history::HistorySink;
use crate::i18n::Strings;

pub use keypad::{Key, KeyAction, KeyInput, KeyRole};

/// Which panel the application shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorMode {
    #[default]
    Standard,
    Scientific,
    Ai,
}

impl CalculatorMode {
    pub const ALL: [CalculatorMode; 3] = [
        CalculatorMode::Standard,
        CalculatorMode::Scientific,
        CalculatorMode::Ai,
    ];

    /// Localized label
    pub fn label(&self, strings: &Strings) -> &'static str {
        match self {
            CalculatorMode::Standard => strings.standard,
            CalculatorMode::Scientific => strings.scientific,
            CalculatorMode::Ai => strings.ai_assistant,
        }
    }

    /// Keypad layout for the calculator modes, `None` for AI
    pub fn keypad(&self) -> Option<Vec<Key>> {
        match self {
            CalculatorMode::Standard => Some(keypad::standard()),
            CalculatorMode::Scientific => Some(keypad::scientific()),
            CalculatorMode::Ai => None,
        }
    }

    /// Whether keyboard shortcuts drive the calculator in this mode
    pub fn accepts_keyboard(&self) -> bool {
        !matches!(self, CalculatorMode::Ai)
    }
}

/// Display state of one calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculator {
    display: String,
    caption: String,
    should_reset: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator {
            display: "0".to_string(),
            caption: String::new(),
            should_reset: false,
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current display text
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Previous expression followed by `" ="`, or empty
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Whether the next input replaces the display
    pub fn should_reset(&self) -> bool {
        self.should_reset
    }

    /// Append keypad text.
    ///
    /// After a result or an error the display is replaced instead, and a lone
    /// `"0"` is always replaced.
    pub fn input(&mut self, text: &str) {
        if self.should_reset {
            self.display = text.to_string();
            self.should_reset = false;
        } else if self.display == "0" {
            self.display = text.to_string();
        } else {
            self.display.push_str(text);
        }
    }

    /// Remove the last character, leaving `"0"` rather than an empty display
    pub fn backspace(&mut self) {
        if self.display.chars().count() > 1 {
            self.display.pop();
        } else {
            self.display = "0".to_string();
        }
    }

    /// AC: reset the display and caption
    pub fn clear(&mut self) {
        self.display = "0".to_string();
        self.caption.clear();
    }

    /// Evaluate the display.
    ///
    /// On success the `(expression, result)` pair goes to `sink` and the
    /// expression moves into the caption. On failure the display shows
    /// `strings.error_math`. Either way the next input starts fresh.
    pub fn calculate(&mut self, sink: &mut dyn HistorySink, strings: &Strings) {
        match expression::evaluate(&self.display) {
            Ok(evaluation) => {
                sink.record(&self.display, &evaluation.display);
                self.caption = format!("{} =", self.display);
                self.display = evaluation.display;
            }
            Err(e) => {
                tracing::warn!(code = e.error_code(), error = %e, "calculation failed");
                self.display = strings.error_math.to_string();
            }
        }
        self.should_reset = true;
    }

    /// Apply a keypad or keyboard action
    pub fn apply(&mut self, action: KeyAction, sink: &mut dyn HistorySink, strings: &Strings) {
        match action {
            KeyAction::Input(text) => self.input(text),
            KeyAction::Clear => self.clear(),
            KeyAction::Backspace => self.backspace(),
            KeyAction::Calculate => self.calculate(sink, strings),
        }
    }

    /// Apply a keyboard key; returns `false` if the key has no shortcut
    pub fn handle_key(
        &mut self,
        key: KeyInput,
        sink: &mut dyn HistorySink,
        strings: &Strings,
    ) -> bool {
        match keypad::action_for(key) {
            Some(action) => {
                self.apply(action, sink, strings);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::History;
    use crate::i18n::Language;

    fn type_text(calc: &mut Calculator, text: &str) {
        for c in text.chars() {
            calc.input(&c.to_string());
        }
    }

    #[test]
    fn test_initial_state() {
        let calc = Calculator::new();
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.caption(), "");
        assert!(!calc.should_reset());
    }

    #[test]
    fn test_leading_zero_replaced() {
        let mut calc = Calculator::new();
        calc.input("7");
        assert_eq!(calc.display(), "7");
        calc.input("0");
        assert_eq!(calc.display(), "70");
    }

    #[test]
    fn test_backspace() {
        let mut calc = Calculator::new();
        type_text(&mut calc, "12");
        calc.backspace();
        assert_eq!(calc.display(), "1");
        calc.backspace();
        assert_eq!(calc.display(), "0");
        calc.backspace();
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_backspace_multibyte() {
        let mut calc = Calculator::new();
        type_text(&mut calc, "6×");
        calc.backspace();
        assert_eq!(calc.display(), "6");
    }

    #[test]
    fn test_calculate_records_history() {
        let mut calc = Calculator::new();
        let mut history = History::new();
        type_text(&mut calc, "2+3×4");
        calc.calculate(&mut history, Language::En.strings());

        assert_eq!(calc.display(), "14");
        assert_eq!(calc.caption(), "2+3×4 =");
        assert!(calc.should_reset());
        let entry = history.latest().unwrap();
        assert_eq!(entry.expression, "2+3×4");
        assert_eq!(entry.result, "14");
    }

    #[test]
    fn test_result_replaced_by_next_input() {
        let mut calc = Calculator::new();
        let mut history = History::new();
        type_text(&mut calc, "4/2");
        calc.calculate(&mut history, Language::En.strings());
        calc.input("9");
        assert_eq!(calc.display(), "9");
        assert!(!calc.should_reset());
    }

    #[test]
    fn test_error_then_fresh_input() {
        let mut calc = Calculator::new();
        let mut history = History::new();
        type_text(&mut calc, "1/0");
        calc.calculate(&mut history, Language::De.strings());

        assert_eq!(calc.display(), "Fehler");
        assert!(history.is_empty());

        calc.input("5");
        assert_eq!(calc.display(), "5");
    }

    #[test]
    fn test_error_keeps_previous_caption() {
        let mut calc = Calculator::new();
        let mut history = History::new();
        let strings = Language::En.strings();
        type_text(&mut calc, "1+1");
        calc.calculate(&mut history, strings);
        calc.input("ln(");
        type_text(&mut calc, "-1)");
        calc.calculate(&mut history, strings);

        assert_eq!(calc.display(), "Error");
        assert_eq!(calc.caption(), "1+1 =");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_clear_keeps_reset_flag() {
        let mut calc = Calculator::new();
        let mut history = History::new();
        type_text(&mut calc, "2*2");
        calc.calculate(&mut history, Language::En.strings());
        calc.clear();
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.caption(), "");
        assert!(calc.should_reset());
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let mut calc = Calculator::new();
        let mut history = History::new();
        let strings = Language::En.strings();
        for key in [
            KeyInput::Char('6'),
            KeyInput::Char('*'),
            KeyInput::Char('7'),
            KeyInput::Enter,
        ] {
            assert!(calc.handle_key(key, &mut history, strings));
        }
        assert_eq!(calc.display(), "42");
        assert_eq!(history.latest().unwrap().expression, "6×7");

        assert!(!calc.handle_key(KeyInput::Char('q'), &mut history, strings));
        assert!(calc.handle_key(KeyInput::Escape, &mut history, strings));
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_percent_key() {
        let mut calc = Calculator::new();
        let mut history = History::new();
        let strings = Language::En.strings();
        calc.input("50");
        calc.apply(KeyAction::Input("/100"), &mut history, strings);
        calc.apply(KeyAction::Calculate, &mut history, strings);
        assert_eq!(calc.display(), "0.5");
    }

    #[test]
    fn test_mode_keypads() {
        assert_eq!(CalculatorMode::Standard.keypad().unwrap().len(), 19);
        assert_eq!(CalculatorMode::Scientific.keypad().unwrap().len(), 31);
        assert!(CalculatorMode::Ai.keypad().is_none());
        assert!(!CalculatorMode::Ai.accepts_keyboard());
    }
}
