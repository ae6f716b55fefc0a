//! Per-frame composition of the canvas buffer onto the display surface.
//!
//! The buffer already carries every baked stroke, so a frame is one bitmap
//! blit: 1:1 at the origin when it fits, otherwise scaled down to the
//! display height and centred horizontally.

use crate::canvas::CanvasBuffer;
use crate::paint::to_skia_transform;
use ink_core::layout::Viewport;
use ink_core::model::Argb;
use ink_core::transform::Fit;
use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint};

/// Draw `buffer` onto `display` over the view's `background` color and
/// return the fit that was applied. The caller publishes
/// `fit.display_transform()` for input mapping.
pub fn composite(display: &mut Pixmap, buffer: &CanvasBuffer, background: Argb) -> Fit {
    let [r, g, b, a] = background.to_rgba8();
    display.fill(Color::from_rgba8(r, g, b, a));

    let viewport = Viewport::new(display.width() as f32, display.height() as f32);
    let fit = Fit::compute(viewport, buffer.width(), buffer.height());
    let quality = match fit {
        Fit::Identity => FilterQuality::Nearest,
        Fit::Scaled { .. } => FilterQuality::Bilinear,
    };
    let paint = PixmapPaint {
        quality,
        ..PixmapPaint::default()
    };
    display.draw_pixmap(
        0,
        0,
        buffer.pixmap().as_ref(),
        &paint,
        to_skia_transform(fit.to_affine()),
        None,
    );
    log::trace!("composite: {:?}", fit);
    fit
}
