//! Header
//!
//! Title, subtitle and the language switcher.

use iced::widget::{column, pick_list, row, text, Space};
use iced::{Alignment, Element, Length};

use calc_core::{Language, Strings};

use crate::Message;

/// Language entry as shown in the switcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LanguageOption(Language);

impl std::fmt::Display for LanguageOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.0.native_name(), self.0.code().to_uppercase())
    }
}

/// Render the application header
pub fn view_header(language: Language, strings: &'static Strings) -> Element<'static, Message> {
    let options: Vec<LanguageOption> = Language::ALL.iter().copied().map(LanguageOption).collect();

    row![
        column![
            text(strings.app_title).size(32),
            text(strings.app_subtitle).size(14).color([0.58, 0.64, 0.72]),
        ]
        .spacing(4),
        Space::new().width(Length::Fill),
        pick_list(options, Some(LanguageOption(language)), |option| {
            Message::LanguageSelected(option.0)
        })
        .text_size(12)
        .width(Length::Fixed(150.0)),
    ]
    .align_y(Alignment::Center)
    .into()
}
