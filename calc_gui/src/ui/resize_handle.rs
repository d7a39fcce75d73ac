//! Canvas Resize Handle
//!
//! A horizontal grip under the drawing canvas. Pressing it starts a resize
//! drag; the pointer is then tracked window-wide by a subscription until
//! the button is released.

use iced::widget::{container, mouse_area, rule};
use iced::{mouse, Element, Length};

use crate::Message;

/// Create the draggable grip below the canvas
pub fn view_resize_handle(is_dragging: bool) -> Element<'static, Message> {
    let grip = container(rule::horizontal(if is_dragging { 3 } else { 1 }))
        .padding(iced::Padding {
            top: 6.0,
            right: 0.0,
            bottom: 6.0,
            left: 0.0,
        })
        .width(Length::Fill);

    // mouse_area publishes on press, so the drag starts while the button is held
    mouse_area(grip)
        .on_press(Message::ResizeStarted)
        .interaction(mouse::Interaction::ResizingVertically)
        .into()
}
