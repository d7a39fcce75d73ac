//! # calc_core - Calcula Calculation Engine
//!
//! `calc_core` holds everything in Calcula that is not presentation: the
//! expression evaluator behind the standard and scientific keypads, the
//! raster drawing surface used to sketch problems, and the request/response
//! protocol of the AI problem solver. Front ends (`calc_gui`, `calc_cli`)
//! own the event loop and the network client and call into this crate.
//!
//! ## Design Philosophy
//!
//! - **Pure evaluation**: an expression's result depends only on its text
//! - **Owned raster**: only the drawing surface mutates pixels; others see snapshots
//! - **Rich Errors**: Structured error types, not just strings
//! - **No I/O**: networking and windowing stay in the binaries
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculator::Calculator;
//! use calc_core::history::History;
//! use calc_core::i18n::Language;
//!
//! let mut calc = Calculator::new();
//! let mut history = History::new();
//!
//! calc.input("10!");
//! calc.calculate(&mut history, Language::En.strings());
//! assert_eq!(calc.display(), "3628800");
//! ```
//!
//! ## Modules
//!
//! - [`expression`] - Expression preprocessing, parsing and result formatting
//! - [`calculator`] - Calculator display state machine and keypad layouts
//! - [`history`] - Bounded history of successful calculations
//! - [`drawing`] - Raster drawing surface and PNG snapshots
//! - [`assistant`] - AI solver request/response types and session state
//! - [`i18n`] - Display strings for English, Turkish and German
//! - [`config`] - Application settings from defaults and environment
//! - [`units`] - CSS and physical pixel units
//! - [`errors`] - Structured error types

pub mod assistant;
pub mod calculator;
pub mod config;
pub mod drawing;
pub mod errors;
pub mod expression;
pub mod history;
pub mod i18n;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use assistant::{AssistantSession, InterpretationRequest, InterpretationResponse};
pub use calculator::{Calculator, CalculatorMode};
pub use config::AppConfig;
pub use drawing::{CanvasSnapshot, DrawingSurface, SnapshotUpdate};
pub use errors::{CalcError, CalcResult, MathErrorKind};
pub use expression::{evaluate, Evaluation};
pub use history::{History, HistoryEntry, HistorySink};
pub use i18n::{Language, Strings};
