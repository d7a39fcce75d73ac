//! AI Assistant Panel
//!
//! Problem input, optional drawing canvas with its toolbar, the solve
//! button, and the explanation cards of the last answer.

use iced::widget::{button, column, container, row, text, text_input, Column, Space};
use iced::{Border, Element, Length, Padding, Theme};

use calc_core::drawing::{Color, Tool, PALETTE};
use calc_core::{AssistantSession, DrawingSurface, InterpretationResponse, Strings};

use crate::ui::drawing_canvas::view_drawing_canvas;
use crate::Message;

const MUTED: [f32; 3] = [0.58, 0.64, 0.72];
const ERROR_TEXT: [f32; 3] = [0.99, 0.65, 0.65];

/// Render the assistant panel
pub fn view_assistant_panel<'a>(
    session: &'a AssistantSession,
    surface: Option<&'a DrawingSurface>,
    canvas_image: Option<&'a iced::widget::image::Handle>,
    strings: &'static Strings,
) -> Element<'a, Message> {
    let drawing = session.is_drawing_mode();

    let mut toolbar = row![text(strings.ai_title).size(18), Space::new().width(Length::Fill)]
        .spacing(8)
        .align_y(iced::Alignment::Center);
    if drawing {
        toolbar = toolbar.push(view_tool_picker(session, strings));
    }
    toolbar = toolbar.push(
        button(text("✎").size(16))
            .on_press(Message::ToggleDrawing)
            .padding([6, 10])
            .style(if drawing { button::primary } else { button::secondary }),
    );

    let mut content: Column<'a, Message> = column![toolbar].spacing(14);

    if drawing {
        if let Some(surface) = surface {
            content = content.push(
                container(view_drawing_canvas(
                    surface,
                    canvas_image,
                    session.tool() == Tool::Eraser,
                    strings,
                ))
                .style(container::bordered_box),
            );
        }
    }

    let placeholder = if drawing {
        strings.ai_placeholder_drawing
    } else {
        strings.ai_placeholder
    };
    let mut input = text_input(placeholder, session.input()).padding(10).size(15);
    let mut solve = button(
        text(if session.is_loading() { strings.ai_loading } else { strings.ai_solve }).size(15),
    )
    .padding([10, 18])
    .style(button::success);
    if !session.is_loading() {
        input = input.on_input(Message::AssistantInputChanged).on_submit(Message::Solve);
    }
    if session.can_submit() {
        solve = solve.on_press(Message::Solve);
    }
    content = content.push(row![input, solve].spacing(10));

    if let Some(error) = session.error() {
        content = content.push(
            container(
                row![
                    text(error).size(13).color(ERROR_TEXT).width(Length::Fill),
                    button(text(strings.ai_dismiss).size(12))
                        .on_press(Message::DismissError)
                        .style(button::text),
                ]
                .align_y(iced::Alignment::Center),
            )
            .padding(10)
            .style(|theme: &Theme| {
                let palette = theme.extended_palette();
                container::Style {
                    background: Some(palette.danger.weak.color.scale_alpha(0.2).into()),
                    border: Border {
                        color: palette.danger.base.color,
                        width: 1.0,
                        radius: 6.0.into(),
                    },
                    ..container::Style::default()
                }
            }),
        );
    }

    match session.result() {
        Some(result) => content = content.push(view_result(result, strings)),
        None if !session.is_loading() => {
            content = content.push(text(strings.ai_drawing_hint).size(13).color(MUTED));
        }
        None => {}
    }

    container(content)
        .padding(20)
        .style(container::bordered_box)
        .width(Length::Fill)
        .into()
}

/// Eraser toggle plus one swatch per palette color
fn view_tool_picker<'a>(session: &AssistantSession, strings: &'static Strings) -> Element<'a, Message> {
    let eraser_active = session.tool() == Tool::Eraser;
    let mut picker = row![button(text(strings.eraser).size(12))
        .on_press(Message::SelectEraser)
        .padding([6, 10])
        .style(if eraser_active { button::primary } else { button::secondary })]
    .spacing(6)
    .align_y(iced::Alignment::Center);

    for color in PALETTE {
        let selected = !eraser_active && session.color() == color;
        picker = picker.push(
            button(Space::new().width(16).height(16))
                .on_press(Message::SelectColor(color))
                .padding(0)
                .style(move |_theme: &Theme, _status| swatch_style(color, selected)),
        );
    }
    picker.into()
}

fn swatch_style(color: Color, selected: bool) -> button::Style {
    button::Style {
        background: Some(to_iced(color).into()),
        border: Border {
            color: if selected { iced::Color::WHITE } else { iced::Color::TRANSPARENT },
            width: 2.0,
            radius: 10.0.into(),
        },
        ..button::Style::default()
    }
}

fn to_iced(color: Color) -> iced::Color {
    iced::Color::from_rgb8(color.r, color.g, color.b)
}

fn view_result<'a>(result: &'a InterpretationResponse, strings: &'static Strings) -> Element<'a, Message> {
    let mut steps: Column<'a, Message> = column![].spacing(8);
    for (index, step) in result.steps.iter().enumerate() {
        steps = steps.push(
            row![
                text(format!("{}.", index + 1)).size(14).color(MUTED),
                text(step).size(14).width(Length::Fill),
            ]
            .spacing(8),
        );
    }

    column![
        card(strings.ai_summary, text(&result.explanation).size(14).into()),
        card(strings.ai_steps, steps.into()),
        card(strings.ai_result, text(&result.solution).size(22).into()),
    ]
    .spacing(12)
    .into()
}

fn card<'a>(title: &'static str, body: Element<'a, Message>) -> Element<'a, Message> {
    container(column![text(title.to_uppercase()).size(11).color(MUTED), body].spacing(8))
        .padding(Padding::from(14))
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}
