//! The drawing surface state machine.
//!
//! Pointer input arrives in window coordinates; [`DrawingSurface::layout`]
//! tells the surface where it sits so positions can be made canvas-local.
//! Every change of raster size goes through [`DrawingSurface::reallocate`],
//! which swaps in a new raster only once it is fully built.

use crate::errors::CalcResult;
use crate::units::{CssPoint, CssPx, CssSize, DevicePixelRatio, PhysicalSize};

use super::raster::Raster;
use super::snapshot::{CanvasSnapshot, SnapshotUpdate};
use super::stroke::Stroke;
use super::tool::{Color, StrokeStyle, Tool};
use super::{DEFAULT_HEIGHT, MAX_HEIGHT, MIN_HEIGHT};

/// Freehand canvas with pen and eraser, resizable by a drag handle.
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    raster: Raster,
    css_size: CssSize,
    origin: CssPoint,
    tool: Tool,
    color: Color,
    style: StrokeStyle,
    stroke: Option<Stroke>,
    resizing: bool,
    revision: u64,
}

impl DrawingSurface {
    /// Create a background-filled surface
    pub fn new(css_size: CssSize, dpr: DevicePixelRatio) -> CalcResult<Self> {
        let raster = Raster::new(css_size, dpr)?;
        let mut surface = DrawingSurface {
            raster,
            css_size,
            origin: CssPoint::default(),
            tool: Tool::Pen,
            color: Color::default(),
            style: StrokeStyle::for_tool(Tool::Pen, Color::default()),
            stroke: None,
            resizing: false,
            revision: 0,
        };
        surface.apply_style();
        Ok(surface)
    }

    /// Surface of the default height
    pub fn with_width(width: CssPx, dpr: DevicePixelRatio) -> CalcResult<Self> {
        Self::new(CssSize::new(width, DEFAULT_HEIGHT), dpr)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn css_size(&self) -> CssSize {
        self.css_size
    }

    pub fn height(&self) -> CssPx {
        self.css_size.height
    }

    /// Window position of the top-left corner, as last reported by [`Self::layout`]
    pub fn origin(&self) -> CssPoint {
        self.origin
    }

    pub fn physical_size(&self) -> PhysicalSize {
        self.raster.size()
    }

    pub fn device_pixel_ratio(&self) -> DevicePixelRatio {
        self.raster.device_pixel_ratio()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Current pen color (kept while the eraser is active)
    pub fn color(&self) -> Color {
        self.color
    }

    /// Style the next stroke will use
    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    /// Incremented whenever pixels change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Color at a physical pixel
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<Color> {
        self.raster.pixel(x, y)
    }

    // ========================================================================
    // Layout
    // ========================================================================

    /// Report the on-screen top-left and size of the surface.
    ///
    /// A size change reallocates the raster, preserving content.
    pub fn layout(&mut self, origin: CssPoint, size: CssSize) -> CalcResult<()> {
        self.origin = origin;
        if size != self.css_size {
            self.reallocate(size, self.device_pixel_ratio())?;
        }
        Ok(())
    }

    pub fn container_resized(&mut self, size: CssSize) -> CalcResult<()> {
        self.reallocate(size, self.device_pixel_ratio())
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: DevicePixelRatio) -> CalcResult<()> {
        if dpr == self.device_pixel_ratio() {
            return Ok(());
        }
        self.reallocate(self.css_size, dpr)
    }

    fn reallocate(&mut self, size: CssSize, dpr: DevicePixelRatio) -> CalcResult<()> {
        let next = self.raster.resized(size, dpr)?;
        tracing::debug!(
            width = next.size().width,
            height = next.size().height,
            dpr = dpr.value(),
            "canvas raster reallocated"
        );
        self.raster = next;
        self.css_size = size;
        self.revision += 1;
        self.apply_style();
        Ok(())
    }

    // ========================================================================
    // Tools
    // ========================================================================

    /// Change tool for subsequent strokes
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.apply_style();
    }

    /// Change pen color for subsequent strokes
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.apply_style();
    }

    fn apply_style(&mut self) {
        self.style = StrokeStyle::for_tool(self.tool, self.color);
    }

    // ========================================================================
    // Pointer
    // ========================================================================

    fn local(&self, screen: CssPoint) -> CssPoint {
        screen.relative_to(self.origin)
    }

    /// Start a stroke; ignored outside the surface or during a resize drag.
    ///
    /// Returns whether a stroke started.
    pub fn pointer_down(&mut self, screen: CssPoint) -> bool {
        let point = self.local(screen);
        if self.resizing || !self.css_size.contains(point) {
            return false;
        }
        self.stroke = Some(Stroke::begin(point, self.style));
        true
    }

    /// Extend the active stroke; returns whether anything was drawn
    pub fn pointer_move(&mut self, screen: CssPoint) -> bool {
        let point = self.local(screen);
        let Some(stroke) = self.stroke.as_mut() else {
            return false;
        };
        let (from, to) = stroke.extend(point);
        let style = stroke.style();
        self.raster.stroke_segment(from, to, style);
        self.revision += 1;
        true
    }

    /// End the active stroke and export a snapshot.
    ///
    /// `None` when no stroke was in progress.
    pub fn pointer_up(&mut self) -> CalcResult<Option<SnapshotUpdate>> {
        if self.stroke.take().is_none() {
            return Ok(None);
        }
        self.snapshot().map(|s| Some(SnapshotUpdate::Snapshot(s)))
    }

    /// Leaving the surface ends the stroke like a release
    pub fn pointer_leave(&mut self) -> CalcResult<Option<SnapshotUpdate>> {
        self.pointer_up()
    }

    /// Fill with background. The exported image becomes empty.
    pub fn clear(&mut self) -> SnapshotUpdate {
        self.raster.fill_background();
        self.stroke = None;
        self.revision += 1;
        SnapshotUpdate::Cleared
    }

    // ========================================================================
    // Resize Handle
    // ========================================================================

    pub fn begin_resize(&mut self) {
        self.stroke = None;
        self.resizing = true;
    }

    /// Follow the handle to window y `pointer_y`.
    ///
    /// Height becomes `pointer_y - top`, clamped to
    /// [[`MIN_HEIGHT`], [`MAX_HEIGHT`]]. Returns the new height.
    pub fn resize_drag(&mut self, pointer_y: CssPx) -> CalcResult<CssPx> {
        if !self.resizing {
            return Ok(self.height());
        }
        let height = (pointer_y - self.origin.y).clamp(MIN_HEIGHT, MAX_HEIGHT);
        if height != self.height() {
            self.reallocate(CssSize::new(self.css_size.width, height), self.device_pixel_ratio())?;
        }
        Ok(height)
    }

    /// Finish a resize drag, always exporting a snapshot
    pub fn end_resize(&mut self) -> CalcResult<Option<SnapshotUpdate>> {
        if !self.resizing {
            return Ok(None);
        }
        self.resizing = false;
        self.snapshot().map(|s| Some(SnapshotUpdate::Snapshot(s)))
    }

    /// Encode the current raster as PNG
    pub fn snapshot(&self) -> CalcResult<CanvasSnapshot> {
        let png = self.raster.encode_png()?;
        Ok(CanvasSnapshot::new(png, self.raster.size()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> DrawingSurface {
        DrawingSurface::new(CssSize::new(CssPx(100.0), CssPx(200.0)), DevicePixelRatio::ONE)
            .unwrap()
    }

    fn line(surface: &mut DrawingSurface, from: (f32, f32), to: (f32, f32)) {
        assert!(surface.pointer_down(CssPoint::new(from.0, from.1)));
        surface.pointer_move(CssPoint::new(to.0, to.1));
    }

    #[test]
    fn test_default_style() {
        let surface = surface();
        assert_eq!(surface.tool(), Tool::Pen);
        assert_eq!(surface.style().color, Color::GREEN);
        assert_eq!(surface.style().width, 3.0);
    }

    #[test]
    fn test_stroke_exports_snapshot() {
        let mut surface = surface();
        line(&mut surface, (10.0, 20.0), (90.0, 20.0));
        assert!(surface.is_drawing());
        assert_eq!(surface.pixel_at(50, 20), Some(Color::GREEN));

        let update = surface.pointer_up().unwrap();
        let snapshot = update.and_then(SnapshotUpdate::into_snapshot).unwrap();
        assert_eq!(&snapshot.png_bytes()[0..4], &[137, 80, 78, 71]);
        assert!(!surface.is_drawing());
    }

    #[test]
    fn test_release_without_stroke_is_silent() {
        let mut surface = surface();
        assert_eq!(surface.pointer_up().unwrap(), None);
        assert_eq!(surface.pointer_leave().unwrap(), None);
    }

    #[test]
    fn test_move_without_press_draws_nothing() {
        let mut surface = surface();
        assert!(!surface.pointer_move(CssPoint::new(50.0, 50.0)));
        assert_eq!(surface.revision(), 0);
    }

    #[test]
    fn test_screen_coordinates_are_translated() {
        let mut surface = surface();
        surface
            .layout(CssPoint::new(300.0, 400.0), surface.css_size())
            .unwrap();
        line(&mut surface, (310.0, 430.0), (390.0, 430.0));
        assert_eq!(surface.pixel_at(50, 30), Some(Color::GREEN));
        assert!(!surface.pointer_down(CssPoint::new(10.0, 10.0)));
    }

    #[test]
    fn test_tool_change_only_affects_new_strokes() {
        let mut surface = surface();
        line(&mut surface, (10.0, 20.0), (90.0, 20.0));
        surface.pointer_up().unwrap();

        surface.set_tool(Tool::Eraser);
        assert_eq!(surface.pixel_at(50, 20), Some(Color::GREEN));
        assert_eq!(surface.style().width, 15.0);

        line(&mut surface, (50.0, 0.0), (50.0, 60.0));
        assert_eq!(surface.pixel_at(50, 20), Some(Color::BACKGROUND));
        assert_eq!(surface.pixel_at(20, 20), Some(Color::GREEN));
    }

    #[test]
    fn test_style_fixed_at_stroke_start() {
        let mut surface = surface();
        assert!(surface.pointer_down(CssPoint::new(10.0, 50.0)));
        surface.set_color(Color::RED);
        surface.pointer_move(CssPoint::new(90.0, 50.0));
        assert_eq!(surface.pixel_at(50, 50), Some(Color::GREEN));
        assert_eq!(surface.style().color, Color::RED);
    }

    #[test]
    fn test_clear() {
        let mut surface = surface();
        line(&mut surface, (10.0, 20.0), (90.0, 20.0));
        assert_eq!(surface.clear(), SnapshotUpdate::Cleared);
        assert_eq!(surface.pixel_at(50, 20), Some(Color::BACKGROUND));
        assert!(!surface.is_drawing());
    }

    #[test]
    fn test_resize_preserves_content() {
        let mut surface = surface();
        line(&mut surface, (10.0, 20.0), (90.0, 20.0));
        surface.pointer_up().unwrap();

        surface
            .container_resized(CssSize::new(CssPx(150.0), CssPx(200.0)))
            .unwrap();
        assert_eq!(surface.physical_size(), PhysicalSize { width: 150, height: 200 });
        assert_eq!(surface.pixel_at(50, 20), Some(Color::GREEN));
        assert_eq!(surface.pixel_at(120, 20), Some(Color::BACKGROUND));
    }

    #[test]
    fn test_dpr_change_keeps_physical_pixels() {
        let mut surface = surface();
        line(&mut surface, (10.0, 20.0), (90.0, 20.0));
        surface
            .set_device_pixel_ratio(DevicePixelRatio::new(2.0).unwrap())
            .unwrap();
        assert_eq!(surface.physical_size(), PhysicalSize { width: 200, height: 400 });
        assert_eq!(surface.pixel_at(50, 20), Some(Color::GREEN));
        assert_eq!(surface.pixel_at(150, 20), Some(Color::BACKGROUND));
    }

    #[test]
    fn test_resize_drag_clamps() {
        let mut surface = surface();
        surface
            .layout(CssPoint::new(0.0, 100.0), surface.css_size())
            .unwrap();

        // Ignored before the handle is pressed
        assert_eq!(surface.resize_drag(CssPx(900.0)).unwrap(), CssPx(200.0));

        surface.begin_resize();
        assert!(surface.is_resizing());
        assert_eq!(surface.resize_drag(CssPx(400.0)).unwrap(), CssPx(300.0));
        assert_eq!(surface.resize_drag(CssPx(120.0)).unwrap(), CssPx(150.0));
        assert_eq!(surface.resize_drag(CssPx(5000.0)).unwrap(), CssPx(800.0));
        assert_eq!(surface.physical_size().height, 800);
        assert_eq!(surface.css_size().width, CssPx(100.0));
    }

    #[test]
    fn test_end_resize_always_exports() {
        let mut surface = surface();
        assert_eq!(surface.end_resize().unwrap(), None);
        surface.begin_resize();
        let update = surface.end_resize().unwrap();
        assert!(matches!(update, Some(SnapshotUpdate::Snapshot(_))));
        assert!(!surface.is_resizing());
    }

    #[test]
    fn test_no_drawing_while_resizing() {
        let mut surface = surface();
        surface.begin_resize();
        assert!(!surface.pointer_down(CssPoint::new(10.0, 10.0)));
    }
}
