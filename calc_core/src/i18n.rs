//! # Localization
//!
//! Display strings for the supported languages. The core itself only reads
//! [`Strings::error_math`], [`Strings::error_ai`] and
//! [`Strings::prompt_suffix`]; the rest is for the front ends.
//!
//! ```rust
//! use calc_core::i18n::Language;
//!
//! let lang: Language = "de".parse().unwrap();
//! assert_eq!(lang, Language::De);
//! assert_eq!(lang.strings().error_math, "Fehler");
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Tr,
    De,
}

impl Language {
    /// All languages in menu order
    pub const ALL: [Language; 3] = [Language::En, Language::Tr, Language::De];

    /// Two-letter language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
            Language::De => "de",
        }
    }

    /// Name of the language in that language
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Tr => "Türkçe",
            Language::De => "Deutsch",
        }
    }

    pub fn strings(&self) -> &'static Strings {
        match self {
            Language::En => &EN,
            Language::Tr => &TR,
            Language::De => &DE,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "tr" => Ok(Language::Tr),
            "de" => Ok(Language::De),
            other => Err(CalcError::invalid_input(
                "language",
                other,
                "expected one of: en, tr, de",
            )),
        }
    }
}

/// Every display string, for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    pub app_title: &'static str,
    pub app_subtitle: &'static str,
    pub mode_selection: &'static str,
    pub standard: &'static str,
    pub scientific: &'static str,
    pub ai_assistant: &'static str,
    pub history: &'static str,
    pub history_clear: &'static str,
    pub history_empty: &'static str,
    pub error_math: &'static str,
    pub error_ai: &'static str,
    pub ai_title: &'static str,
    pub ai_placeholder: &'static str,
    pub ai_placeholder_drawing: &'static str,
    pub ai_solve: &'static str,
    pub ai_loading: &'static str,
    pub ai_summary: &'static str,
    pub ai_steps: &'static str,
    pub ai_result: &'static str,
    pub ai_drawing_hint: &'static str,
    pub ai_dismiss: &'static str,
    pub draw_clear: &'static str,
    pub draw_hint: &'static str,
    pub eraser_mode: &'static str,
    pub eraser: &'static str,
    /// Appended to every interpretation prompt to pick the answer language
    pub prompt_suffix: &'static str,
}

pub static EN: Strings = Strings {
    app_title: "Calcula",
    app_subtitle: "Standard, scientific and AI-assisted calculation",
    mode_selection: "Mode",
    standard: "Standard",
    scientific: "Scientific",
    ai_assistant: "AI Assistant",
    history: "History",
    history_clear: "Clear",
    history_empty: "No calculations yet",
    error_math: "Error",
    error_ai: "The AI service could not solve this problem. Please try again.",
    ai_title: "AI Math Solver",
    ai_placeholder: "Type a math problem...",
    ai_placeholder_drawing: "Add a note about your drawing (optional)...",
    ai_solve: "Solve",
    ai_loading: "Solving...",
    ai_summary: "Summary",
    ai_steps: "Steps",
    ai_result: "Result",
    ai_drawing_hint: "Type a problem or draw it to get a step-by-step solution.",
    ai_dismiss: "Dismiss",
    draw_clear: "Clear",
    draw_hint: "Draw your problem here",
    eraser_mode: "(Eraser mode)",
    eraser: "Eraser",
    prompt_suffix: "Respond in English.",
};

pub static TR: Strings = Strings {
    app_title: "Calcula",
    app_subtitle: "Standart, bilimsel ve yapay zekâ destekli hesaplama",
    mode_selection: "Mod",
    standard: "Standart",
    scientific: "Bilimsel",
    ai_assistant: "Yapay Zekâ Asistanı",
    history: "Geçmiş",
    history_clear: "Temizle",
    history_empty: "Henüz hesaplama yok",
    error_math: "Hata",
    error_ai: "Yapay zekâ servisi bu problemi çözemedi. Lütfen tekrar deneyin.",
    ai_title: "Yapay Zekâ Matematik Çözücü",
    ai_placeholder: "Bir matematik problemi yazın...",
    ai_placeholder_drawing: "Çiziminiz hakkında not ekleyin (isteğe bağlı)...",
    ai_solve: "Çöz",
    ai_loading: "Çözülüyor...",
    ai_summary: "Özet",
    ai_steps: "Adımlar",
    ai_result: "Sonuç",
    ai_drawing_hint: "Adım adım çözüm için problemi yazın veya çizin.",
    ai_dismiss: "Kapat",
    draw_clear: "Temizle",
    draw_hint: "Probleminizi buraya çizin",
    eraser_mode: "(Silgi Modu)",
    eraser: "Silgi",
    prompt_suffix: "Yanıtı Türkçe ver.",
};

pub static DE: Strings = Strings {
    app_title: "Calcula",
    app_subtitle: "Standard-, wissenschaftliche und KI-gestützte Berechnung",
    mode_selection: "Modus",
    standard: "Standard",
    scientific: "Wissenschaftlich",
    ai_assistant: "KI-Assistent",
    history: "Verlauf",
    history_clear: "Löschen",
    history_empty: "Noch keine Berechnungen",
    error_math: "Fehler",
    error_ai: "Der KI-Dienst konnte diese Aufgabe nicht lösen. Bitte erneut versuchen.",
    ai_title: "KI-Mathe-Löser",
    ai_placeholder: "Mathe-Aufgabe eingeben...",
    ai_placeholder_drawing: "Notiz zur Zeichnung hinzufügen (optional)...",
    ai_solve: "Lösen",
    ai_loading: "Wird gelöst...",
    ai_summary: "Zusammenfassung",
    ai_steps: "Schritte",
    ai_result: "Ergebnis",
    ai_drawing_hint: "Aufgabe eingeben oder zeichnen, um eine Schritt-für-Schritt-Lösung zu erhalten.",
    ai_dismiss: "Schließen",
    draw_clear: "Löschen",
    draw_hint: "Zeichne deine Aufgabe hier",
    eraser_mode: "(Radiergummi)",
    eraser: "Radiergummi",
    prompt_suffix: "Antworte auf Deutsch.",
};
