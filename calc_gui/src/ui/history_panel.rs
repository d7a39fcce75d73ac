//! History Panel
//!
//! Newest-first list of successful calculations with a clear button.

use iced::widget::{button, column, container, row, scrollable, text, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use calc_core::{History, Strings};

use crate::Message;

/// Render the history panel
pub fn view_history_panel<'a>(history: &'a History, strings: &'static Strings) -> Element<'a, Message> {
    let mut header = row![
        text(strings.history.to_uppercase()).size(12).color([0.58, 0.64, 0.72]),
        Space::new().width(Length::Fill),
    ]
    .align_y(Alignment::Center);

    if !history.is_empty() {
        header = header.push(
            button(text(strings.history_clear).size(11).color([0.96, 0.25, 0.37]))
                .on_press(Message::ClearHistory)
                .padding(Padding::from([2, 6]))
                .style(button::text),
        );
    }

    let body: Element<'a, Message> = if history.is_empty() {
        container(text(strings.history_empty).size(12).color([0.4, 0.45, 0.53]))
            .center_x(Length::Fill)
            .padding(Padding::from([40, 0]))
            .into()
    } else {
        let mut entries: Column<'a, Message> = column![].spacing(8);
        for entry in history.iter() {
            entries = entries.push(
                container(
                    column![
                        text(&entry.expression).size(11).color([0.5, 0.55, 0.63]),
                        container(text(&entry.result).size(18)).align_right(Length::Fill),
                    ]
                    .spacing(2),
                )
                .padding(10)
                .style(container::rounded_box)
                .width(Length::Fill),
            );
        }
        scrollable(entries).height(Length::Fill).into()
    };

    container(column![header, body].spacing(12))
        .padding(16)
        .height(Length::Fixed(400.0))
        .style(container::bordered_box)
        .width(Length::Fill)
        .into()
}
