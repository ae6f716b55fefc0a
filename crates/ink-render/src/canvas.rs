//! Off-screen canvas buffer.
//!
//! A premultiplied RGBA raster (tiny-skia `Pixmap`) that ink is baked into
//! immediately, plus an untouched copy of the loaded background image that
//! undo rebuilds from. There is no display list: every draw call mutates
//! pixels on the spot.

use crate::paint::{solid_paint, to_skia_paint, to_skia_path, to_skia_stroke};
use image::{Rgba, RgbaImage};
use ink_core::kurbo::BezPath;
use ink_core::model::{Argb, BlendMode, PenPaint};
use tiny_skia::{ColorU8, Pixmap, Rect, Transform};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("cannot allocate a {width}x{height} canvas")]
    InvalidSize { width: u32, height: u32 },
}

#[derive(Debug)]
pub struct CanvasBuffer {
    pixmap: Pixmap,
    /// Pristine copy of the last loaded image.
    background: Option<Pixmap>,
}

impl CanvasBuffer {
    /// Allocate a transparent buffer.
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        Ok(Self {
            pixmap: alloc(width, height)?,
            background: None,
        })
    }

    /// A buffer holding a copy of `bitmap`, which also becomes the background.
    pub fn from_image(bitmap: &RgbaImage) -> Result<Self, CanvasError> {
        let pixmap = pixmap_from_rgba(bitmap)?;
        Ok(Self {
            background: Some(pixmap.clone()),
            pixmap,
        })
    }

    /// Replace the buffer wholesale with a copy of `bitmap` and remember it
    /// as the pristine background. Dimensions follow the bitmap.
    pub fn load_image(&mut self, bitmap: &RgbaImage) -> Result<(), CanvasError> {
        *self = Self::from_image(bitmap)?;
        log::debug!("canvas: loaded {}x{} background", self.width(), self.height());
        Ok(())
    }

    /// Reset pixels to the pristine background, or to transparent if no
    /// image was ever loaded.
    pub fn restore_background(&mut self) {
        self.clear();
        if let Some(background) = &self.background {
            self.pixmap = background.clone();
        }
    }

    /// Every pixel becomes fully transparent.
    pub fn clear(&mut self) {
        self.fill(Argb::TRANSPARENT, BlendMode::Clear);
    }

    /// Paint `color` over the whole buffer, source-over.
    pub fn set_background_color(&mut self, color: Argb) {
        self.fill(color, BlendMode::SrcOver);
    }

    fn fill(&mut self, color: Argb, blend: BlendMode) {
        let Some(rect) = Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32) else {
            return;
        };
        let paint = solid_paint(color, blend);
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Stroke `path` with the pen's paint.
    pub fn draw_path(&mut self, path: &BezPath, pen: &PenPaint) {
        let Some(skia_path) = to_skia_path(path) else {
            return;
        };
        log::trace!(
            "canvas: stroke {} els color={:#010x} width={}",
            path.elements().len(),
            pen.color.0,
            pen.width
        );
        let paint = to_skia_paint(pen);
        let stroke = to_skia_stroke(pen);
        self.pixmap
            .stroke_path(&skia_path, &paint, &stroke, Transform::identity(), None);
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn background(&self) -> Option<&Pixmap> {
        self.background.as_ref()
    }

    /// Straight-alpha color at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Argb> {
        // Pixmap::pixel only bounds-checks the flat index.
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Argb::from_rgba8([c.red(), c.green(), c.blue(), c.alpha()]))
    }

    /// Whether the current pixels equal the pristine background (or are all
    /// transparent when there is none).
    pub fn matches_background(&self) -> bool {
        match &self.background {
            Some(background) => background.data() == self.pixmap.data(),
            None => self.pixmap.data().iter().all(|&b| b == 0),
        }
    }

    /// Copy out as a straight-alpha RGBA image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut out = RgbaImage::new(self.width(), self.height());
        for (dst, src) in out.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }
}

fn alloc(width: u32, height: u32) -> Result<Pixmap, CanvasError> {
    Pixmap::new(width, height).ok_or(CanvasError::InvalidSize { width, height })
}

fn pixmap_from_rgba(bitmap: &RgbaImage) -> Result<Pixmap, CanvasError> {
    let mut pixmap = alloc(bitmap.width(), bitmap.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(bitmap.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}
