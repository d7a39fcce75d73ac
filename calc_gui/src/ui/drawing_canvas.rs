//! Drawing Canvas
//!
//! The raster of a [`DrawingSurface`] shown as an image, with a transparent
//! canvas layer on top that turns pointer input into [`CanvasEvent`]s. All
//! pixels are produced by the surface; this layer never paints.

use iced::widget::canvas::{self, Action, Geometry};
use iced::widget::{button, canvas as canvas_widget, column, container, image, stack, text};
use iced::{mouse, touch, ContentFit, Element, Length, Point, Rectangle, Renderer, Theme};

use calc_core::{DrawingSurface, Strings};

use crate::ui::resize_handle::view_resize_handle;
use crate::Message;

/// Pointer input in window coordinates
///
/// Published together with the canvas bounds, so the surface can be laid
/// out before the pointer is interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    /// Canvas bounds differ from what the surface was last told
    Layout,
    Pressed(Point),
    Moved(Point),
    Released,
    Left,
}

/// Canvas program forwarding pointer input
pub struct PointerLayer {
    known_bounds: Rectangle,
    drawing: bool,
}

impl PointerLayer {
    fn pointer_event(&self, event: &canvas::Event, bounds: Rectangle, cursor: mouse::Cursor) -> Option<CanvasEvent> {
        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                cursor.position_over(bounds).map(CanvasEvent::Pressed)
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) if self.drawing => {
                Some(match cursor.position_over(bounds) {
                    Some(position) => CanvasEvent::Moved(position),
                    None => CanvasEvent::Left,
                })
            }
            canvas::Event::Mouse(mouse::Event::CursorLeft) if self.drawing => Some(CanvasEvent::Left),
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) if self.drawing => {
                Some(CanvasEvent::Released)
            }
            canvas::Event::Touch(touch::Event::FingerPressed { position, .. })
                if bounds.contains(*position) =>
            {
                Some(CanvasEvent::Pressed(*position))
            }
            canvas::Event::Touch(touch::Event::FingerMoved { position, .. }) if self.drawing => {
                Some(CanvasEvent::Moved(*position))
            }
            canvas::Event::Touch(touch::Event::FingerLifted { .. } | touch::Event::FingerLost { .. })
                if self.drawing =>
            {
                Some(CanvasEvent::Released)
            }
            _ => None,
        }
    }
}

impl canvas::Program<Message> for PointerLayer {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        match self.pointer_event(event, bounds, cursor) {
            Some(pointer) => Some(Action::publish(Message::Canvas(bounds, pointer)).and_capture()),
            None if bounds != self.known_bounds => {
                Some(Action::publish(Message::Canvas(bounds, CanvasEvent::Layout)))
            }
            None => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        _renderer: &Renderer,
        _theme: &Theme,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        Vec::new()
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Render the drawing canvas with its clear button, hint and resize handle
pub fn view_drawing_canvas<'a>(
    surface: &'a DrawingSurface,
    raster: Option<&'a image::Handle>,
    eraser_active: bool,
    strings: &'static Strings,
) -> Element<'a, Message> {
    let height = Length::Fixed(surface.height().value());
    let size = surface.css_size();
    let origin = surface.origin();
    let layer = PointerLayer {
        known_bounds: Rectangle {
            x: origin.x.value(),
            y: origin.y.value(),
            width: size.width.value(),
            height: size.height.value(),
        },
        drawing: surface.is_drawing(),
    };

    let picture: Element<'a, Message> = match raster {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(height)
            .content_fit(ContentFit::Fill)
            .into(),
        None => container(text("")).width(Length::Fill).height(height).into(),
    };

    let clear = container(
        button(text(strings.draw_clear).size(11))
            .on_press(Message::ClearCanvas)
            .padding([4, 10])
            .style(button::secondary),
    )
    .align_right(Length::Fill)
    .padding(8);

    let hint = if eraser_active {
        format!("{} {}", strings.draw_hint, strings.eraser_mode)
    } else {
        strings.draw_hint.to_string()
    };
    let hint = container(text(hint).size(10).color([0.28, 0.33, 0.41]))
        .align_bottom(height)
        .padding(10);

    column![
        stack![
            picture,
            canvas_widget(layer).width(Length::Fill).height(height),
            hint,
            clear,
        ],
        view_resize_handle(surface.is_resizing()),
    ]
    .into()
}
