pub mod canvas;
pub mod compositor;
pub mod export;
pub mod paint;

pub use canvas::{CanvasBuffer, CanvasError};
pub use compositor::composite;
pub use export::{ExportError, save_bitmap, save_image, try_save_image};

// Hosts hand bitmaps and display surfaces across this boundary
pub use image::RgbaImage;
pub use tiny_skia::Pixmap;
