//! UI module for the Calcula GUI
//!
//! # Panel Structure
//! - `header` - Title, subtitle and language switcher
//! - `mode_panel` - Left sidebar: standard / scientific / AI mode buttons
//! - `history_panel` - Left sidebar: recent calculations
//! - `calculator_panel` - Display and keypad of the calculator modes
//! - `assistant_panel` - Problem input and answer cards of the AI mode
//!
//! # Assistant Panel Children
//! - `drawing_canvas` - Raster image with a pointer-capturing canvas layer
//! - `resize_handle` - Drag grip below the canvas

pub mod assistant_panel;
pub mod calculator_panel;
pub mod header;
pub mod history_panel;
pub mod mode_panel;

pub mod drawing_canvas;
pub mod resize_handle;
