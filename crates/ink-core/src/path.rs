//! Freehand path smoothing.
//!
//! Pointer samples are turned into a chain of quadratic segments: each
//! accepted sample uses the previous anchor as the control point and the
//! midpoint between anchor and sample as the end point. Samples closer than
//! the touch tolerance to the anchor on both axes are dropped as jitter.

use kurbo::{BezPath, Point};

/// Dead-band, in canvas units, below which a move does not emit a segment.
pub const TOUCH_TOLERANCE: f64 = 4.0;

/// Incremental builder for one stroke's path.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    path: BezPath,
    anchor: Point,
    tolerance: f64,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::with_tolerance(TOUCH_TOLERANCE)
    }

    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            path: BezPath::new(),
            anchor: Point::ZERO,
            tolerance,
        }
    }

    /// Start a fresh path at `p`, discarding anything accumulated so far.
    pub fn begin(&mut self, p: Point) {
        self.path = BezPath::new();
        self.path.move_to(p);
        self.anchor = p;
    }

    /// Feed a sample. Returns `true` if a quadratic segment was emitted.
    pub fn extend(&mut self, p: Point) -> bool {
        let dx = (p.x - self.anchor.x).abs();
        let dy = (p.y - self.anchor.y).abs();
        if dx < self.tolerance && dy < self.tolerance {
            return false;
        }
        let mid = self.anchor.midpoint(p);
        self.path.quad_to(self.anchor, mid);
        self.anchor = p;
        true
    }

    /// Close the stroke with a line to the last accepted anchor and hand
    /// the finished path out. The builder is left empty.
    pub fn end(&mut self) -> BezPath {
        self.path.line_to(self.anchor);
        std::mem::take(&mut self.path)
    }

    /// The path built so far.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;
    use pretty_assertions::assert_eq;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn jitter_below_tolerance_emits_no_curve() {
        let mut b = PathBuilder::new();
        b.begin(pt(50.0, 50.0));
        assert!(!b.extend(pt(52.0, 51.0)));
        assert!(!b.extend(pt(53.0, 52.0)));
        let path = b.end();
        assert_eq!(
            path.elements(),
            &[PathEl::MoveTo(pt(50.0, 50.0)), PathEl::LineTo(pt(50.0, 50.0))]
        );
    }

    #[test]
    fn move_beyond_tolerance_emits_midpoint_quad() {
        let mut b = PathBuilder::new();
        b.begin(pt(10.0, 10.0));
        assert!(b.extend(pt(20.0, 10.0)));
        assert_eq!(b.anchor(), pt(20.0, 10.0));
        let path = b.end();
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(pt(10.0, 10.0)),
                PathEl::QuadTo(pt(10.0, 10.0), pt(15.0, 10.0)),
                PathEl::LineTo(pt(20.0, 10.0)),
            ]
        );
    }

    #[test]
    fn tolerance_is_inclusive_on_either_axis() {
        let mut b = PathBuilder::new();
        b.begin(pt(0.0, 0.0));
        assert!(b.extend(pt(0.0, 4.0)));
        assert!(!b.extend(pt(3.9, 7.9)));
        assert!(b.extend(pt(-4.0, 4.0)));
    }

    #[test]
    fn anchor_only_advances_on_accepted_samples() {
        let mut b = PathBuilder::new();
        b.begin(pt(0.0, 0.0));
        b.extend(pt(1.0, 1.0));
        b.extend(pt(2.0, 2.0));
        b.extend(pt(3.0, 3.0));
        // Cumulative drift from the anchor finally crosses the dead-band.
        assert!(b.extend(pt(4.0, 0.0)));
        let els = b.end();
        assert_eq!(els.elements().len(), 3);
        assert_eq!(els.elements()[2], PathEl::LineTo(pt(4.0, 0.0)));
    }

    #[test]
    fn begin_discards_previous_path() {
        let mut b = PathBuilder::new();
        b.begin(pt(0.0, 0.0));
        b.extend(pt(10.0, 10.0));
        b.begin(pt(5.0, 5.0));
        assert_eq!(b.path().elements(), &[PathEl::MoveTo(pt(5.0, 5.0))]);
    }

    #[test]
    fn end_leaves_builder_empty() {
        let mut b = PathBuilder::with_tolerance(1.0);
        b.begin(pt(0.0, 0.0));
        let _ = b.end();
        assert!(b.path().elements().is_empty());
        assert_eq!(b.tolerance(), 1.0);
    }
}
