//! In-progress freehand stroke.

use crate::units::CssPoint;

use super::tool::StrokeStyle;

/// A stroke being drawn.
///
/// The style is fixed when the stroke starts. Points are canvas-local CSS
/// pixels; the stroke is dropped once the pointer is released.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    style: StrokeStyle,
    points: Vec<CssPoint>,
}

impl Stroke {
    pub fn begin(start: CssPoint, style: StrokeStyle) -> Self {
        Stroke {
            style,
            points: vec![start],
        }
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn points(&self) -> &[CssPoint] {
        &self.points
    }

    /// Append a point and return the new segment `(from, to)`
    pub fn extend(&mut self, point: CssPoint) -> (CssPoint, CssPoint) {
        let from = self.points.last().copied().unwrap_or(point);
        self.points.push(point);
        (from, point)
    }
}
