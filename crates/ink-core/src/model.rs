//! Core data model for the drawing engine.
//!
//! Ink is captured as smoothed `kurbo::BezPath` strokes. The engine keeps a
//! single mutable [`PenPaint`]; every committed [`StrokeRecord`] copies the
//! color and width out of it by value, so later pen changes never reach back
//! into history.

use kurbo::{BezPath, Cap, Join};
use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// 32-bit packed color, `0xAARRGGBB`, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Argb(pub u32);

impl Argb {
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Byte order used by raster buffers: `[r, g, b, a]`.
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    pub const fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_argb(a, r, g, b)
    }
}

// ─── Paint ───────────────────────────────────────────────────────────────

/// Porter-Duff operator applied when ink lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// New pixels over existing pixels, weighted by alpha.
    #[default]
    SrcOver,
    /// Destination becomes fully transparent.
    Clear,
}

/// The pen's paint descriptor.
///
/// Only `color` and `width` vary between strokes. The remaining fields are
/// fixed by [`PenPaint::new`]: anti-aliased, dithered, bitmap-filtered,
/// stroke-only with round joins and caps, blended source-over.
#[derive(Debug, Clone, PartialEq)]
pub struct PenPaint {
    pub color: Argb,
    pub width: f32,
    pub anti_alias: bool,
    pub dither: bool,
    pub filter_bitmap: bool,
    pub join: Join,
    pub cap: Cap,
    pub blend: BlendMode,
}

impl PenPaint {
    pub fn new(color: Argb, width: f32) -> Self {
        Self {
            color,
            width,
            anti_alias: true,
            dither: true,
            filter_bitmap: true,
            join: Join::Round,
            cap: Cap::Round,
            blend: BlendMode::SrcOver,
        }
    }

    /// Copy a committed stroke's color and width into this paint.
    pub fn apply_stroke(&mut self, stroke: &StrokeRecord) {
        self.color = stroke.color();
        self.width = stroke.width();
    }
}

impl Default for PenPaint {
    fn default() -> Self {
        Self::new(Argb::BLACK, 1.0)
    }
}

// ─── Strokes ─────────────────────────────────────────────────────────────

/// One committed DOWN…UP gesture. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeRecord {
    path: BezPath,
    color: Argb,
    width: f32,
}

impl StrokeRecord {
    pub fn new(path: BezPath, color: Argb, width: f32) -> Self {
        Self { path, color, width }
    }

    /// Capture `path` with the paint's color and width as they are right now.
    pub fn capture(path: BezPath, paint: &PenPaint) -> Self {
        Self::new(path, paint.color, paint.width)
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn color(&self) -> Argb {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

// ─── Export formats ──────────────────────────────────────────────────────

/// Codec requested for an export.
///
/// `Webp` has no encoder here; like any unrecognized format it falls
/// through to PNG with a `.png` extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl CompressFormat {
    /// Parse a format name. Unknown names become `Png`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Self::Jpeg,
            "webp" => Self::Webp,
            _ => Self::Png,
        }
    }

    /// The format actually written to disk.
    pub fn effective(self) -> Self {
        match self {
            Self::Jpeg => Self::Jpeg,
            Self::Png | Self::Webp => Self::Png,
        }
    }

    /// File extension, including the leading dot.
    pub fn extension(self) -> &'static str {
        match self.effective() {
            Self::Jpeg => ".jpg",
            _ => ".png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_channels() {
        let c = Argb(0x80FF_4020);
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c.red(), 0xFF);
        assert_eq!(c.green(), 0x40);
        assert_eq!(c.blue(), 0x20);
        assert_eq!(c.to_rgba8(), [0xFF, 0x40, 0x20, 0x80]);
        assert_eq!(Argb::from_rgba8(c.to_rgba8()), c);
        assert_eq!(Argb::from_argb(0xFF, 0, 0, 0), Argb::BLACK);
    }

    #[test]
    fn pen_paint_fixed_invariants() {
        let paint = PenPaint::new(Argb(0xFF00FF00), 7.5);
        assert!(paint.anti_alias);
        assert!(paint.dither);
        assert!(paint.filter_bitmap);
        assert_eq!(paint.join, Join::Round);
        assert_eq!(paint.cap, Cap::Round);
        assert_eq!(paint.blend, BlendMode::SrcOver);
    }

    #[test]
    fn stroke_captures_paint_by_value() {
        let mut paint = PenPaint::new(Argb(0xFF112233), 3.0);
        let mut path = BezPath::new();
        path.move_to((1.0, 1.0));
        path.line_to((1.0, 1.0));
        let stroke = StrokeRecord::capture(path, &paint);

        paint.color = Argb::WHITE;
        paint.width = 40.0;

        assert_eq!(stroke.color(), Argb(0xFF112233));
        assert_eq!(stroke.width(), 3.0);
    }

    #[test]
    fn apply_stroke_restores_color_and_width() {
        let stroke = StrokeRecord::new(BezPath::new(), Argb(0xFFFF0000), 12.0);
        let mut paint = PenPaint::default();
        paint.apply_stroke(&stroke);
        assert_eq!(paint.color, Argb(0xFFFF0000));
        assert_eq!(paint.width, 12.0);
    }

    #[test]
    fn compress_format_fallthrough() {
        assert_eq!(CompressFormat::from_name("JPG"), CompressFormat::Jpeg);
        assert_eq!(CompressFormat::from_name("jpeg"), CompressFormat::Jpeg);
        assert_eq!(CompressFormat::from_name("webp"), CompressFormat::Webp);
        assert_eq!(CompressFormat::from_name("tiff"), CompressFormat::Png);
        assert_eq!(CompressFormat::Png.extension(), ".png");
        assert_eq!(CompressFormat::Jpeg.extension(), ".jpg");
        assert_eq!(CompressFormat::Webp.extension(), ".png");
        assert_eq!(CompressFormat::Webp.effective(), CompressFormat::Png);
    }
}
