//! Calculator Panel
//!
//! Display with caption above a keypad grid. The keypad layout comes from
//! `calc_core::calculator::keypad`; this module only maps key roles to
//! button styles.

use iced::widget::{button, column, container, row, text, Column, Row};
use iced::{Color, Element, Length, Padding, Theme};

use calc_core::calculator::keypad::{self, Key, KeyRole};
use calc_core::Calculator;

use crate::Message;

const KEY_HEIGHT: f32 = 56.0;

const FUNCTION_TINT: Color = Color::from_rgb(0.31, 0.27, 0.9);
const BACKSPACE_TINT: Color = Color::from_rgb(0.85, 0.47, 0.02);

/// Render the calculator display and keypad
pub fn view_calculator_panel(calculator: &Calculator, keys: Vec<Key>) -> Element<'_, Message> {
    let display = container(
        column![
            text(calculator.caption()).size(14).color([0.4, 0.45, 0.53]),
            text(calculator.display()).size(40),
        ]
        .spacing(4)
        .align_x(iced::Alignment::End),
    )
    .padding(24)
    .width(Length::Fill)
    .style(container::rounded_box);

    let mut grid: Column<'_, Message> = column![].spacing(10);
    for keys_in_row in keypad::rows(&keys) {
        let mut cells: Row<'_, Message> = row![].spacing(10);
        for key in keys_in_row {
            cells = cells.push(view_key(key));
        }
        grid = grid.push(cells);
    }

    container(column![display, grid].spacing(20))
        .padding(24)
        .max_width(460.0)
        .style(container::bordered_box)
        .into()
}

fn view_key(key: Key) -> Element<'static, Message> {
    let role = key.role;
    let size = if role == KeyRole::Function { 14 } else { 18 };

    button(container(text(key.label).size(size)).center(Length::Fill))
        .on_press(Message::KeypadPressed(key.action))
        .padding(Padding::ZERO)
        .height(Length::Fixed(KEY_HEIGHT))
        .width(Length::FillPortion(key.span as u16))
        .style(move |theme: &Theme, status| key_style(role, theme, status))
        .into()
}

fn key_style(role: KeyRole, theme: &Theme, status: button::Status) -> button::Style {
    match role {
        KeyRole::Neutral => button::secondary(theme, status),
        KeyRole::Operator => button::primary(theme, status),
        KeyRole::Equals => button::success(theme, status),
        KeyRole::Clear => button::danger(theme, status),
        KeyRole::Function => tinted(FUNCTION_TINT, theme, status),
        KeyRole::Backspace => tinted(BACKSPACE_TINT, theme, status),
    }
}

fn tinted(base: Color, theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => Color { a: 0.85, ..base },
        button::Status::Pressed => Color { a: 0.7, ..base },
        _ => base,
    };
    button::Style {
        background: Some(background.into()),
        text_color: Color::WHITE,
        ..button::primary(theme, status)
    }
}
