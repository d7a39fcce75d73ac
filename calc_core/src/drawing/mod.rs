//! # Drawing Surface
//!
//! A raster canvas for sketching problems by hand. The surface owns its
//! pixels exclusively; everyone else sees [`CanvasSnapshot`]s, PNG images
//! exported when a stroke ends and when a resize drag finishes.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::drawing::{Color, DrawingSurface, SnapshotUpdate, Tool};
//! use calc_core::units::{CssPoint, CssPx, DevicePixelRatio};
//!
//! let mut surface = DrawingSurface::with_width(CssPx(320.0), DevicePixelRatio::ONE).unwrap();
//! surface.pointer_down(CssPoint::new(10.0, 10.0));
//! surface.pointer_move(CssPoint::new(60.0, 10.0));
//! let update = surface.pointer_up().unwrap();
//! assert!(matches!(update, Some(SnapshotUpdate::Snapshot(_))));
//! assert_eq!(surface.pixel_at(30, 10), Some(Color::GREEN));
//!
//! surface.set_tool(Tool::Eraser);
//! assert_eq!(surface.clear(), SnapshotUpdate::Cleared);
//! ```

pub mod raster;
pub mod snapshot;
pub mod stroke;
pub mod surface;
pub mod tool;

use crate::units::CssPx;

pub use snapshot::{CanvasSnapshot, SnapshotUpdate};
pub use surface::DrawingSurface;
pub use tool::{Color, StrokeStyle, Tool, PALETTE};

/// Height of a new surface
pub const DEFAULT_HEIGHT: CssPx = CssPx(256.0);

/// Lower bound of the resize handle
pub const MIN_HEIGHT: CssPx = CssPx(150.0);

/// Upper bound of the resize handle
pub const MAX_HEIGHT: CssPx = CssPx(800.0);
