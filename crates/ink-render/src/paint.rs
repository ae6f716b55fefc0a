//! Stroke model → tiny-skia drawing primitives.
//!
//! Converts `kurbo` paths and the engine's `PenPaint` descriptor into the
//! path, paint, and stroke types tiny-skia rasterizes with.

use ink_core::kurbo::{Affine, BezPath, Cap, Join, PathEl};
use ink_core::model::{Argb, BlendMode, PenPaint};
use tiny_skia::{LineCap, LineJoin, Paint, Path, PathBuilder, Stroke, Transform};

/// Build a tiny-skia path. Returns `None` for an empty path.
pub fn to_skia_path(path: &BezPath) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Solid-color paint with the pen's anti-aliasing and blend mode.
pub fn to_skia_paint(pen: &PenPaint) -> Paint<'static> {
    let mut paint = solid_paint(pen.color, pen.blend);
    paint.anti_alias = pen.anti_alias;
    paint
}

pub fn to_skia_stroke(pen: &PenPaint) -> Stroke {
    Stroke {
        width: pen.width,
        line_cap: map_cap(pen.cap),
        line_join: map_join(pen.join),
        ..Stroke::default()
    }
}

pub fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

pub(crate) fn solid_paint(color: Argb, blend: BlendMode) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.blend_mode = map_blend(blend);
    paint
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn map_cap(cap: Cap) -> LineCap {
    match cap {
        Cap::Butt => LineCap::Butt,
        Cap::Round => LineCap::Round,
        Cap::Square => LineCap::Square,
    }
}

fn map_join(join: Join) -> LineJoin {
    match join {
        Join::Miter => LineJoin::Miter,
        Join::Round => LineJoin::Round,
        Join::Bevel => LineJoin::Bevel,
    }
}

fn map_blend(blend: BlendMode) -> tiny_skia::BlendMode {
    match blend {
        BlendMode::SrcOver => tiny_skia::BlendMode::SourceOver,
        BlendMode::Clear => tiny_skia::BlendMode::Clear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_has_no_skia_path() {
        assert!(to_skia_path(&BezPath::new()).is_none());
    }

    #[test]
    fn quad_path_converts() {
        let mut bez = BezPath::new();
        bez.move_to((10.0, 10.0));
        bez.quad_to((10.0, 10.0), (15.0, 10.0));
        bez.line_to((20.0, 12.0));
        let path = to_skia_path(&bez).expect("path");
        let bounds = path.bounds();
        assert_eq!(bounds.left(), 10.0);
        assert_eq!(bounds.right(), 20.0);
        assert_eq!(bounds.bottom(), 12.0);
    }

    #[test]
    fn pen_maps_to_round_source_over_stroke() {
        let pen = PenPaint::new(Argb(0xFF00FF00), 6.0);
        let stroke = to_skia_stroke(&pen);
        assert_eq!(stroke.width, 6.0);
        assert_eq!(stroke.line_cap, LineCap::Round);
        assert_eq!(stroke.line_join, LineJoin::Round);

        let paint = to_skia_paint(&pen);
        assert!(paint.anti_alias);
        assert_eq!(paint.blend_mode, tiny_skia::BlendMode::SourceOver);
    }

    #[test]
    fn affine_coefficients_carry_over() {
        let t = to_skia_transform(Affine::translate((75.0, 0.0)) * Affine::scale(0.5));
        assert_eq!(t.sx, 0.5);
        assert_eq!(t.sy, 0.5);
        assert_eq!(t.tx, 75.0);
        assert_eq!(t.ty, 0.0);
    }
}
