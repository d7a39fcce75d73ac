//! Pixel buffer of the drawing surface, backed by a tiny-skia [`Pixmap`].
//!
//! Drawing commands take CSS-pixel coordinates and are scaled by the device
//! pixel ratio; the buffer itself is sized in physical pixels.

use tiny_skia::{
    LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke as SkStroke, Transform,
};

use crate::errors::{CalcError, CalcResult};
use crate::units::{CssPoint, CssSize, DevicePixelRatio, PhysicalSize};

use super::tool::{Color, StrokeStyle};

/// Opaque raster filled with [`Color::BACKGROUND`] where nothing is drawn.
#[derive(Debug, Clone)]
pub struct Raster {
    pixmap: Pixmap,
    dpr: DevicePixelRatio,
}

impl Raster {
    /// Allocate a background-filled raster of `css × dpr` physical pixels
    pub fn new(css: CssSize, dpr: DevicePixelRatio) -> CalcResult<Self> {
        let mut raster = Raster {
            pixmap: allocate(css.to_physical(dpr))?,
            dpr,
        };
        raster.fill_background();
        Ok(raster)
    }

    /// A new raster at the new size and ratio, holding this raster's pixels
    /// at the top-left corner, 1:1 in physical pixels.
    ///
    /// Pixels beyond the new bounds are clipped and any new area is
    /// background. `self` is left untouched, so a failed allocation keeps
    /// the caller's raster usable.
    pub fn resized(&self, css: CssSize, dpr: DevicePixelRatio) -> CalcResult<Raster> {
        let mut next = Raster::new(css, dpr)?;
        next.pixmap.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(next)
    }

    pub fn size(&self) -> PhysicalSize {
        PhysicalSize {
            width: self.pixmap.width(),
            height: self.pixmap.height(),
        }
    }

    pub fn device_pixel_ratio(&self) -> DevicePixelRatio {
        self.dpr
    }

    pub fn fill_background(&mut self) {
        let bg = Color::BACKGROUND;
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
    }

    /// Composite one line segment with round caps and joins
    pub fn stroke_segment(&mut self, from: CssPoint, to: CssPoint, style: StrokeStyle) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.x.value(), from.y.value());
        builder.line_to(to.x.value(), to.y.value());
        let Some(path) = builder.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(style.color.r, style.color.g, style.color.b, 255);
        paint.anti_alias = true;

        let stroke = SkStroke {
            width: style.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..SkStroke::default()
        };

        let scale = self.dpr.value();
        self.pixmap.stroke_path(
            &path,
            &paint,
            &stroke,
            Transform::from_scale(scale, scale),
            None,
        );
    }

    /// Color at a physical pixel, `None` outside the raster
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgb(pixel.red(), pixel.green(), pixel.blue()))
    }

    /// RGBA8 bytes, row-major. The raster is opaque, so these are straight
    /// (not premultiplied) colors.
    pub fn rgba(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn encode_png(&self) -> CalcResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| CalcError::raster("encode_png", e.to_string()))
    }
}

fn allocate(size: PhysicalSize) -> CalcResult<Pixmap> {
    Pixmap::new(size.width, size.height).ok_or_else(|| {
        CalcError::raster(
            "allocate",
            format!("cannot allocate a {}x{} raster", size.width, size.height),
        )
    })
}
