//! View measurement policy.
//!
//! A loaded image decides the view's size. Images taller than the space on
//! offer are shrunk to the available height, keeping their aspect ratio;
//! anything else is shown at its natural size. Wide images are not
//! rescaled.

/// The display (view) dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Choose the view size given the space offered by the host and the size of
/// the loaded bitmap, if any.
pub fn measure(available_width: u32, available_height: u32, bitmap: Option<(u32, u32)>) -> (u32, u32) {
    let Some((bitmap_width, bitmap_height)) = bitmap else {
        return (available_width, available_height);
    };
    if bitmap_height > available_height {
        let width = available_height as u64 * bitmap_width as u64 / bitmap_height as u64;
        (width as u32, available_height)
    } else {
        (bitmap_width, bitmap_height)
    }
}
