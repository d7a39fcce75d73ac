//! Mode Selection Panel
//!
//! Standard, scientific and AI assistant buttons.

use iced::widget::{button, column, container, text, Column};
use iced::{Element, Length, Padding};

use calc_core::{CalculatorMode, Strings};

use crate::Message;

/// Render the mode selection panel
pub fn view_mode_panel(mode: CalculatorMode, strings: &'static Strings) -> Element<'static, Message> {
    let mut buttons: Column<'static, Message> = column![].spacing(6);

    for option in CalculatorMode::ALL {
        let style = if option == mode {
            match option {
                CalculatorMode::Standard => button::primary,
                CalculatorMode::Scientific => button::success,
                CalculatorMode::Ai => button::danger,
            }
        } else {
            button::text
        };
        buttons = buttons.push(
            button(text(option.label(strings)).size(14))
                .on_press(Message::ModeSelected(option))
                .padding(Padding::from([10, 12]))
                .style(style)
                .width(Length::Fill),
        );
    }

    container(
        column![
            text(strings.mode_selection.to_uppercase()).size(12).color([0.58, 0.64, 0.72]),
            buttons,
        ]
        .spacing(12),
    )
    .padding(16)
    .style(container::bordered_box)
    .width(Length::Fill)
    .into()
}
