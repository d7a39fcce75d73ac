//! # Calcula GUI Application
//!
//! Desktop front end built with Iced. Holds the application state, routes
//! messages into `calc_core`, and owns the only asynchronous work: the Gemini
//! request issued when the user asks the assistant to solve a problem.
//!
//! ## Layout
//!
//! - Header with title and language switcher
//! - Left column: mode selection and calculation history
//! - Right column: calculator keypad, or the AI assistant with its drawing canvas

mod gemini;
mod ui;

use iced::widget::{column, container, image, row, scrollable};
use iced::{event, keyboard, mouse, window, Element, Event, Length, Rectangle, Subscription, Task, Theme};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use calc_core::calculator::{KeyAction, KeyInput};
use calc_core::drawing::{Color, DrawingSurface, SnapshotUpdate};
use calc_core::units::{CssPoint, CssPx, CssSize};
use calc_core::{
    AppConfig, AssistantSession, CalcError, CalcResult, Calculator, CalculatorMode, History,
    InterpretationResponse, Language,
};

use crate::gemini::GeminiClient;
use crate::ui::drawing_canvas::CanvasEvent;

/// Canvas width used until the first layout report arrives
const INITIAL_CANVAS_WIDTH: f32 = 640.0;

fn main() -> iced::Result {
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "invalid configuration, using defaults");
            AppConfig::default()
        }
    };

    iced::application(move || App::new(config.clone()), App::update, App::view)
        .title(App::title)
        .subscription(App::subscription)
        .theme(App::theme)
        .window_size((1100.0, 780.0))
        .run()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[derive(Debug, Clone)]
pub enum Message {
    // Header / navigation
    LanguageSelected(Language),
    ModeSelected(CalculatorMode),

    // Calculator
    KeypadPressed(KeyAction),
    KeyboardInput(KeyInput),
    ClearHistory,

    // Assistant
    AssistantInputChanged(String),
    Solve,
    Solved(u64, Result<InterpretationResponse, CalcError>),
    DismissError,
    ToggleDrawing,
    SelectEraser,
    SelectColor(Color),

    // Drawing surface
    /// Pointer or layout change, with the canvas bounds at the time
    Canvas(Rectangle, CanvasEvent),
    ClearCanvas,
    ResizeStarted,
    ResizeMoved(f32),
    ResizeEnded,
    /// Vertical scroll offset of the page content
    Scrolled(f32),
}

pub struct App {
    config: AppConfig,
    language: Language,
    mode: CalculatorMode,
    calculator: Calculator,
    history: History,
    session: AssistantSession,
    surface: Option<DrawingSurface>,
    canvas_image: Option<image::Handle>,
    client: Option<GeminiClient>,
    /// Identifies the assistant session a response belongs to
    generation: u64,
    /// Converts window y to content y for the resize drag
    scroll_offset: f32,
}

impl App {
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        let client = match GeminiClient::new(config.assistant.clone()) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::error!(error = %e, "assistant unavailable");
                None
            }
        };

        let mut app = App {
            language: config.language,
            config,
            mode: CalculatorMode::default(),
            calculator: Calculator::new(),
            history: History::new(),
            session: AssistantSession::new(),
            surface: None,
            canvas_image: None,
            client,
            generation: 0,
            scroll_offset: 0.0,
        };
        app.reset_surface();
        (app, Task::none())
    }

    fn title(&self) -> String {
        let strings = self.language.strings();
        format!("{} - {}", strings.app_title, self.mode.label(strings))
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    // ========================================================================
    // Update
    // ========================================================================

    fn update(&mut self, message: Message) -> Task<Message> {
        let strings = self.language.strings();
        match message {
            Message::LanguageSelected(language) => {
                tracing::debug!(language = %language, "language changed");
                self.language = language;
            }
            Message::ModeSelected(mode) => self.switch_mode(mode),

            Message::KeypadPressed(action) => {
                self.calculator.apply(action, &mut self.history, strings);
            }
            Message::KeyboardInput(key) => {
                if self.mode.accepts_keyboard() {
                    self.calculator.handle_key(key, &mut self.history, strings);
                }
            }
            Message::ClearHistory => self.history.clear(),

            Message::AssistantInputChanged(text) => self.session.set_input(text),
            Message::Solve => return self.solve(),
            Message::Solved(generation, outcome) => {
                if generation == self.generation {
                    self.session.finish(outcome, self.language);
                } else {
                    tracing::debug!("discarding response for a closed session");
                }
            }
            Message::DismissError => self.session.dismiss_error(),
            Message::ToggleDrawing => {
                self.session.toggle_drawing_mode();
                self.sync_surface_style();
            }
            Message::SelectEraser => {
                self.session.select_eraser();
                self.sync_surface_style();
            }
            Message::SelectColor(color) => {
                self.session.select_color(color);
                self.sync_surface_style();
            }

            Message::Canvas(bounds, event) => self.on_canvas_event(bounds, event),
            Message::ClearCanvas => {
                if let Some(surface) = self.surface.as_mut() {
                    let update = surface.clear();
                    self.session.canvas_changed(update);
                }
                self.refresh_canvas_image();
            }
            Message::ResizeStarted => {
                if let Some(surface) = self.surface.as_mut() {
                    surface.begin_resize();
                }
            }
            Message::ResizeMoved(window_y) => {
                let content_y = CssPx(window_y + self.scroll_offset);
                let result = self.surface.as_mut().map(|s| s.resize_drag(content_y));
                if let Some(Err(e)) = result {
                    tracing::warn!(error = %e, "canvas resize failed");
                }
                self.refresh_canvas_image();
            }
            Message::ResizeEnded => {
                let update = self.surface.as_mut().map(DrawingSurface::end_resize);
                self.accept_snapshot(update);
            }
            Message::Scrolled(offset) => self.scroll_offset = offset,
        }
        Task::none()
    }

    fn switch_mode(&mut self, mode: CalculatorMode) {
        if mode == self.mode {
            return;
        }
        tracing::debug!(from = ?self.mode, to = ?mode, "mode changed");
        if mode == CalculatorMode::Ai {
            self.calculator = Calculator::new();
        } else if self.mode == CalculatorMode::Ai {
            self.session = AssistantSession::new();
            self.generation += 1;
            self.reset_surface();
        }
        self.mode = mode;
    }

    fn solve(&mut self) -> Task<Message> {
        let Some(request) = self.session.begin_submit(self.language) else {
            return Task::none();
        };
        let generation = self.generation;
        match self.client.clone() {
            Some(client) => Task::perform(client.solve(request), move |outcome| {
                Message::Solved(generation, outcome)
            }),
            None => Task::done(Message::Solved(
                generation,
                Err(CalcError::interpretation("HTTP client unavailable")),
            )),
        }
    }

    fn on_canvas_event(&mut self, bounds: Rectangle, event: CanvasEvent) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        // Bounds first, so a press arriving with new bounds lands where it was made
        let origin = CssPoint::new(bounds.x, bounds.y);
        let size = CssSize::new(CssPx(bounds.width), surface.height());
        if origin != surface.origin() || size != surface.css_size() {
            if let Err(e) = surface.layout(origin, size) {
                tracing::warn!(error = %e, "canvas layout failed");
            }
            self.refresh_canvas_image();
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        match event {
            CanvasEvent::Layout => {}
            CanvasEvent::Pressed(point) => {
                surface.pointer_down(CssPoint::new(point.x, point.y));
            }
            CanvasEvent::Moved(point) => {
                if surface.pointer_move(CssPoint::new(point.x, point.y)) {
                    self.refresh_canvas_image();
                }
            }
            CanvasEvent::Released => {
                let update = surface.pointer_up();
                self.accept_snapshot(Some(update));
            }
            CanvasEvent::Left => {
                let update = surface.pointer_leave();
                self.accept_snapshot(Some(update));
            }
        }
    }

    fn accept_snapshot(&mut self, update: Option<CalcResult<Option<SnapshotUpdate>>>) {
        match update {
            Some(Ok(Some(update))) => self.session.canvas_changed(update),
            Some(Err(e)) => tracing::warn!(error = %e, "canvas snapshot failed"),
            _ => {}
        }
        self.refresh_canvas_image();
    }

    fn reset_surface(&mut self) {
        let width = CssPx(INITIAL_CANVAS_WIDTH);
        let size = CssSize::new(width, self.config.canvas_height);
        self.surface = match DrawingSurface::new(size, self.config.device_pixel_ratio) {
            Ok(surface) => Some(surface),
            Err(e) => {
                tracing::error!(error = %e, "drawing surface unavailable");
                None
            }
        };
        self.sync_surface_style();
        self.refresh_canvas_image();
    }

    fn sync_surface_style(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.set_tool(self.session.tool());
            surface.set_color(self.session.color());
        }
    }

    fn refresh_canvas_image(&mut self) {
        self.canvas_image = self.surface.as_ref().map(|surface| {
            let size = surface.physical_size();
            image::Handle::from_rgba(size.width, size.height, surface.raster().rgba().to_vec())
        });
    }

    // ========================================================================
    // View
    // ========================================================================

    fn view(&self) -> Element<'_, Message> {
        let strings = self.language.strings();

        let sidebar = column![
            ui::mode_panel::view_mode_panel(self.mode, strings),
            ui::history_panel::view_history_panel(&self.history, strings),
        ]
        .spacing(16)
        .width(Length::Fixed(260.0));

        let main_panel: Element<'_, Message> = match self.mode.keypad() {
            Some(keys) => ui::calculator_panel::view_calculator_panel(&self.calculator, keys),
            None => ui::assistant_panel::view_assistant_panel(
                &self.session,
                self.surface.as_ref(),
                self.canvas_image.as_ref(),
                strings,
            ),
        };

        let content = column![
            ui::header::view_header(self.language, strings),
            row![sidebar, container(main_panel).width(Length::Fill)].spacing(24),
        ]
        .spacing(20)
        .padding(24);

        scrollable(content)
            .height(Length::Fill)
            .on_scroll(|viewport| Message::Scrolled(viewport.absolute_offset().y))
            .into()
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = Vec::new();
        if self.mode.accepts_keyboard() {
            subscriptions.push(event::listen_with(keyboard_shortcut));
        }
        if self.surface.as_ref().is_some_and(DrawingSurface::is_resizing) {
            subscriptions.push(event::listen_with(resize_tracking));
        }
        Subscription::batch(subscriptions)
    }
}

/// Calculator shortcuts, active only in the calculator modes
fn keyboard_shortcut(event: Event, status: event::Status, _window: window::Id) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    let Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = event else {
        return None;
    };
    let input = match key.as_ref() {
        keyboard::Key::Named(keyboard::key::Named::Enter) => KeyInput::Enter,
        keyboard::Key::Named(keyboard::key::Named::Backspace) => KeyInput::Backspace,
        keyboard::Key::Named(keyboard::key::Named::Escape) => KeyInput::Escape,
        keyboard::Key::Character(c) => KeyInput::Char(c.chars().next()?),
        _ => return None,
    };
    Some(Message::KeyboardInput(input))
}

/// Window-wide pointer tracking while the canvas resize handle is held
fn resize_tracking(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Mouse(mouse::Event::CursorMoved { position }) => Some(Message::ResizeMoved(position.y)),
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => Some(Message::ResizeEnded),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Point;

    fn ai_app() -> App {
        let (mut app, _) = App::new(AppConfig::default());
        let _ = app.update(Message::ModeSelected(CalculatorMode::Ai));
        let _ = app.update(Message::ToggleDrawing);
        app
    }

    fn surface(app: &App) -> &DrawingSurface {
        app.surface.as_ref().unwrap()
    }

    #[test]
    fn test_resize_drag_in_scrolled_page() {
        let mut app = ai_app();
        let bounds = Rectangle::new(Point::new(0.0, 600.0), iced::Size::new(640.0, 256.0));
        let _ = app.update(Message::Canvas(bounds, CanvasEvent::Layout));
        let _ = app.update(Message::Scrolled(200.0));

        // Grip at content y 856 is at window y 656
        let _ = app.update(Message::ResizeStarted);
        let _ = app.update(Message::ResizeMoved(700.0));
        assert_eq!(surface(&app).height(), CssPx(300.0));

        let _ = app.update(Message::ResizeEnded);
        assert!(!surface(&app).is_resizing());
        assert!(app.session.canvas().is_some());
    }

    #[test]
    fn test_first_press_after_layout_change_draws() {
        let mut app = ai_app();
        let bounds = Rectangle::new(Point::new(20.0, 100.0), iced::Size::new(500.0, 256.0));

        let _ = app.update(Message::Canvas(bounds, CanvasEvent::Pressed(Point::new(70.0, 150.0))));
        assert!(surface(&app).is_drawing());
        assert_eq!(surface(&app).css_size().width, CssPx(500.0));

        let _ = app.update(Message::Canvas(bounds, CanvasEvent::Moved(Point::new(170.0, 150.0))));
        let _ = app.update(Message::Canvas(bounds, CanvasEvent::Released));

        // Window (120, 150) is canvas-local (100, 50)
        assert_eq!(surface(&app).pixel_at(100, 50), Some(Color::GREEN));
        assert!(app.session.canvas().is_some());
    }

    #[test]
    fn test_leaving_ai_mode_drops_pending_answer() {
        let mut app = ai_app();
        app.session.set_input("2+2");
        let generation = app.generation;
        let _ = app.update(Message::ModeSelected(CalculatorMode::Standard));

        let answer = InterpretationResponse {
            explanation: "sum".into(),
            steps: vec!["add".into()],
            solution: "4".into(),
        };
        let _ = app.update(Message::Solved(generation, Ok(answer)));
        assert!(app.session.result().is_none());
    }
}
