//! Keypad layouts and keyboard mapping.
//!
//! Layouts are plain data, laid out row-major on a four-column grid. The GUI
//! renders them and the keyboard shortcuts resolve to the same [`KeyAction`]s.

use serde::{Deserialize, Serialize};

/// Grid width shared by both layouts
pub const COLUMNS: usize = 4;

/// What pressing a key does to the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeyAction {
    /// Append text to the display
    Input(&'static str),
    /// AC
    Clear,
    /// C
    Backspace,
    /// =
    Calculate,
}

/// Color role of a key, mapped to a palette by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyRole {
    /// Digits, point and percent
    Neutral,
    /// Arithmetic operators
    Operator,
    /// Scientific functions and constants
    Function,
    /// AC
    Clear,
    /// C
    Backspace,
    /// =
    Equals,
}

/// One keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Key {
    pub label: &'static str,
    pub action: KeyAction,
    pub role: KeyRole,
    /// Columns occupied (the `0` key spans two)
    pub span: usize,
}

impl Key {
    const fn new(label: &'static str, action: KeyAction, role: KeyRole) -> Self {
        Key { label, action, role, span: 1 }
    }

    const fn input(label: &'static str, text: &'static str, role: KeyRole) -> Self {
        Key::new(label, KeyAction::Input(text), role)
    }

    const fn wide(self) -> Self {
        Key { span: 2, ..self }
    }
}

const STANDARD: [Key; 19] = [
    Key::new("AC", KeyAction::Clear, KeyRole::Clear),
    Key::new("C", KeyAction::Backspace, KeyRole::Backspace),
    Key::input("%", "/100", KeyRole::Neutral),
    Key::input("÷", "÷", KeyRole::Operator),
    Key::input("7", "7", KeyRole::Neutral),
    Key::input("8", "8", KeyRole::Neutral),
    Key::input("9", "9", KeyRole::Neutral),
    Key::input("×", "×", KeyRole::Operator),
    Key::input("4", "4", KeyRole::Neutral),
    Key::input("5", "5", KeyRole::Neutral),
    Key::input("6", "6", KeyRole::Neutral),
    Key::input("-", "-", KeyRole::Operator),
    Key::input("1", "1", KeyRole::Neutral),
    Key::input("2", "2", KeyRole::Neutral),
    Key::input("3", "3", KeyRole::Neutral),
    Key::input("+", "+", KeyRole::Operator),
    Key::input("0", "0", KeyRole::Neutral).wide(),
    Key::input(".", ".", KeyRole::Neutral),
    Key::new("=", KeyAction::Calculate, KeyRole::Equals),
];

const SCIENTIFIC_EXTRA: [Key; 12] = [
    Key::input("sin", "sin(", KeyRole::Function),
    Key::input("cos", "cos(", KeyRole::Function),
    Key::input("tan", "tan(", KeyRole::Function),
    Key::input("√", "√(", KeyRole::Function),
    Key::input("log", "log(", KeyRole::Function),
    Key::input("ln", "ln(", KeyRole::Function),
    Key::input("π", "π", KeyRole::Function),
    Key::input("e", "e", KeyRole::Function),
    Key::input("^", "**", KeyRole::Function),
    Key::input("!", "!", KeyRole::Function),
    Key::input("(", "(", KeyRole::Function),
    Key::input(")", ")", KeyRole::Function),
];

/// Standard arithmetic keypad
pub fn standard() -> Vec<Key> {
    STANDARD.to_vec()
}

/// Scientific function rows followed by the standard keypad
pub fn scientific() -> Vec<Key> {
    SCIENTIFIC_EXTRA.iter().chain(STANDARD.iter()).copied().collect()
}

/// Split a layout into grid rows of [`COLUMNS`] cells.
///
/// ```rust
/// use calc_core::calculator::keypad::{rows, standard};
///
/// let rows = rows(&standard());
/// assert_eq!(rows.len(), 5);
/// assert_eq!(rows[4].len(), 3); // "0" is two columns wide
/// ```
pub fn rows(keys: &[Key]) -> Vec<Vec<Key>> {
    let mut rows = Vec::new();
    let mut current = Vec::new();
    let mut used = 0;

    for key in keys {
        if used + key.span > COLUMNS && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            used = 0;
        }
        used += key.span;
        current.push(*key);
        if used == COLUMNS {
            rows.push(std::mem::take(&mut current));
            used = 0;
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

/// A physical keyboard key, independent of any windowing toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Enter,
    Backspace,
    Escape,
}

/// Resolve a keyboard key to a calculator action.
///
/// Returns `None` for keys without a shortcut.
pub fn action_for(key: KeyInput) -> Option<KeyAction> {
    let action = match key {
        KeyInput::Enter => KeyAction::Calculate,
        KeyInput::Backspace => KeyAction::Backspace,
        KeyInput::Escape => KeyAction::Clear,
        KeyInput::Char(c) => KeyAction::Input(match c {
            '0' => "0",
            '1' => "1",
            '2' => "2",
            '3' => "3",
            '4' => "4",
            '5' => "5",
            '6' => "6",
            '7' => "7",
            '8' => "8",
            '9' => "9",
            '.' => ".",
            '+' => "+",
            '-' => "-",
            '*' => "×",
            '/' => "÷",
            _ => return None,
        }),
    };
    Some(action)
}
