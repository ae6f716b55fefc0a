//! Display fit and pointer mapping.
//!
//! When the canvas buffer is taller than the display it is drawn scaled by
//! `display_height / buffer_height` and centred horizontally. Input mapping
//! only undoes the scale, not the centring offset; this holds while the
//! scaled canvas is no wider than the display.

use crate::layout::Viewport;
use kurbo::{Affine, Point};

/// Scale between canvas space and display space, as last published by the
/// compositor. A proportion of zero means "drawn 1:1, no fit applied".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayTransform {
    proportion: f32,
}

impl DisplayTransform {
    pub const IDENTITY: Self = Self { proportion: 0.0 };

    /// Build from a raw proportion. Non-finite or non-positive values
    /// collapse to the identity sentinel.
    pub fn from_proportion(proportion: f32) -> Self {
        if proportion.is_finite() && proportion > 0.0 {
            Self { proportion }
        } else {
            Self::IDENTITY
        }
    }

    pub fn proportion(&self) -> f32 {
        self.proportion
    }

    pub fn is_scaled(&self) -> bool {
        self.proportion != 0.0
    }

    /// Map a pointer position in view space to canvas space.
    pub fn to_canvas(&self, x: f32, y: f32) -> Point {
        if self.is_scaled() {
            Point::new((x / self.proportion) as f64, (y / self.proportion) as f64)
        } else {
            Point::new(x as f64, y as f64)
        }
    }
}

/// How the buffer is placed on the display for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fit {
    /// Buffer fits; drawn at the origin without a transform.
    Identity,
    /// Buffer is taller than the display: scale, then centre horizontally.
    Scaled { proportion: f32, offset_x: f32 },
}

impl Fit {
    pub fn compute(display: Viewport, buffer_width: u32, buffer_height: u32) -> Self {
        if buffer_height == 0 {
            return Self::Identity;
        }
        let proportion = display.height / buffer_height as f32;
        if proportion < 1.0 && proportion > 0.0 {
            let offset_x = (display.width - buffer_width as f32 * proportion) / 2.0;
            Self::Scaled {
                proportion,
                offset_x,
            }
        } else {
            Self::Identity
        }
    }

    /// The transform input mapping should use until the next frame.
    pub fn display_transform(&self) -> DisplayTransform {
        match *self {
            Self::Identity => DisplayTransform::IDENTITY,
            Self::Scaled { proportion, .. } => DisplayTransform::from_proportion(proportion),
        }
    }

    /// Canvas → display affine: scale first, then translate.
    pub fn to_affine(&self) -> Affine {
        match *self {
            Self::Identity => Affine::IDENTITY,
            Self::Scaled {
                proportion,
                offset_x,
            } => Affine::translate((offset_x as f64, 0.0)) * Affine::scale(proportion as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISPLAY: Viewport = Viewport {
        width: 400.0,
        height: 500.0,
    };

    #[test]
    fn identity_maps_unchanged() {
        let t = DisplayTransform::IDENTITY;
        assert!(!t.is_scaled());
        assert_eq!(t.to_canvas(12.5, 30.0), Point::new(12.5, 30.0));
    }

    #[test]
    fn scaled_divides_both_axes() {
        let t = DisplayTransform::from_proportion(0.5);
        assert_eq!(t.to_canvas(10.0, 20.0), Point::new(20.0, 40.0));
    }

    #[test]
    fn invalid_proportions_collapse_to_identity() {
        assert_eq!(DisplayTransform::from_proportion(0.0), DisplayTransform::IDENTITY);
        assert_eq!(DisplayTransform::from_proportion(-1.0), DisplayTransform::IDENTITY);
        assert_eq!(DisplayTransform::from_proportion(f32::NAN), DisplayTransform::IDENTITY);
    }

    #[test]
    fn tall_buffer_is_scaled_and_centred() {
        let fit = Fit::compute(DISPLAY, 500, 1000);
        assert_eq!(
            fit,
            Fit::Scaled {
                proportion: 0.5,
                offset_x: 75.0
            }
        );
        assert_eq!(fit.display_transform().proportion(), 0.5);

        let p = fit.to_affine() * Point::new(100.0, 100.0);
        assert_eq!(p, Point::new(125.0, 50.0));
    }

    #[test]
    fn buffer_that_fits_is_drawn_one_to_one() {
        assert_eq!(Fit::compute(DISPLAY, 300, 500), Fit::Identity);
        assert_eq!(Fit::compute(DISPLAY, 300, 200), Fit::Identity);
        assert_eq!(Fit::compute(DISPLAY, 300, 0), Fit::Identity);
        assert_eq!(Fit::Identity.display_transform(), DisplayTransform::IDENTITY);
        assert_eq!(Fit::Identity.to_affine(), Affine::IDENTITY);
    }
}
