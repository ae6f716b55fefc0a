//! The drawing engine behind a host view.
//!
//! Holds the canvas buffer, the pen, and the stroke history. The host view
//! forwards its measure / size / draw / pointer callbacks here and polls
//! [`DrawingEngine::take_invalidation`] to learn when to repaint.
//!
//! Nothing in the public API fails loudly: bad input and missing state are
//! logged and ignored, exports report `false`.

use crate::history::History;
use crate::input::{InputEvent, PointerAction};
use crate::tools::{PenStep, PenTool};
use image::RgbaImage;
use ink_core::config::EngineConfig;
use ink_core::kurbo::BezPath;
use ink_core::layout::measure;
use ink_core::model::{Argb, CompressFormat, PenPaint, StrokeRecord};
use ink_core::transform::DisplayTransform;
use ink_render::canvas::CanvasBuffer;
use ink_render::{compositor, export};
use std::path::Path;
use tiny_skia::{Color, Pixmap};

#[derive(Debug)]
pub struct DrawingEngine {
    config: EngineConfig,
    canvas: Option<CanvasBuffer>,
    paint: PenPaint,
    /// Pointer events are only consumed once the pen is initialized.
    draw_mode: bool,
    pen: PenTool,
    history: History,
    /// Newest stroke ever committed; survives undo.
    last_stroke: Option<StrokeRecord>,
    transform: DisplayTransform,
    /// View background, shown wherever the canvas doesn't cover the display.
    view_background: Argb,
    needs_redraw: bool,
}

impl Default for DrawingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        log::debug!("engine: init");
        Self {
            paint: PenPaint::new(config.pen.color, config.pen.width),
            pen: PenTool::with_tolerance(config.touch_tolerance as f64),
            config,
            canvas: None,
            draw_mode: false,
            history: History::new(),
            last_stroke: None,
            transform: DisplayTransform::IDENTITY,
            view_background: Argb::TRANSPARENT,
            needs_redraw: false,
        }
    }

    // ─── Host view callbacks ─────────────────────────────────────────────

    /// Pick the view size for the space the host offers.
    pub fn on_measure(&self, available_width: u32, available_height: u32) -> (u32, u32) {
        let size = measure(
            available_width,
            available_height,
            self.canvas.as_ref().map(CanvasBuffer::size),
        );
        log::debug!("on_measure: {}x{}", size.0, size.1);
        size
    }

    /// Final view size. Allocates a transparent buffer on first layout; a
    /// buffer that already exists (e.g. from a loaded image) is kept.
    pub fn on_size_changed(&mut self, width: u32, height: u32) {
        if self.canvas.is_some() {
            return;
        }
        match CanvasBuffer::new(width, height) {
            Ok(canvas) => {
                log::debug!("on_size_changed: allocated {width}x{height} canvas");
                self.canvas = Some(canvas);
            }
            Err(err) => log::warn!("on_size_changed: {err}"),
        }
    }

    /// Composite the buffer onto `display` and publish the fit used, so the
    /// next pointer event maps through it.
    pub fn on_draw(&mut self, display: &mut Pixmap) {
        match &self.canvas {
            Some(canvas) => {
                let fit = compositor::composite(display, canvas, self.view_background);
                self.transform = fit.display_transform();
            }
            None => {
                let [r, g, b, a] = self.view_background.to_rgba8();
                display.fill(Color::from_rgba8(r, g, b, a));
            }
        }
    }

    /// Handle one pointer event. Returns whether it was consumed.
    pub fn on_pointer_event(&mut self, event: &InputEvent) -> bool {
        if !self.draw_mode {
            return false;
        }
        let Some(canvas) = self.canvas.as_mut() else {
            log::warn!("pointer event before the canvas exists; ignored");
            return false;
        };

        let (x, y) = event.position();
        let p = self.transform.to_canvas(x, y);
        let action = event.action();
        log::trace!("pointer {:?} view=({x}, {y}) canvas=({}, {})", action, p.x, p.y);

        // After undoing everything, pick up where the user left off.
        if action == PointerAction::Down && self.history.is_empty() {
            if let Some(last) = &self.last_stroke {
                self.paint.apply_stroke(last);
            }
        }

        match self.pen.handle(action, p) {
            PenStep::Began | PenStep::Extended => {
                if let Some(path) = self.pen.current_path() {
                    canvas.draw_path(path, &self.paint);
                }
            }
            PenStep::Finished(path) => {
                canvas.draw_path(&path, &self.paint);
                let stroke = StrokeRecord::capture(path, &self.paint);
                log::debug!(
                    "stroke committed: color={:#010x} width={} (history {})",
                    stroke.color().0,
                    stroke.width(),
                    self.history.len() + 1
                );
                self.history.push(stroke.clone());
                self.last_stroke = Some(stroke);
            }
            PenStep::Ignored => {}
        }

        self.invalidate();
        true
    }

    /// Whether a repaint was requested since the last call. Clears the flag.
    pub fn take_invalidation(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    // ─── Pen ─────────────────────────────────────────────────────────────

    /// Enable drawing and install a fresh pen from the configured defaults.
    pub fn initialize_pen(&mut self) {
        log::debug!("initialize_pen");
        self.draw_mode = true;
        self.paint = PenPaint::new(self.config.pen.color, self.config.pen.width);
    }

    pub fn set_pen_size(&mut self, width: f32) {
        if !width.is_finite() || width < 0.0 {
            log::warn!("set_pen_size: ignoring invalid width {width}");
            return;
        }
        self.paint.width = width;
    }

    pub fn pen_size(&self) -> f32 {
        self.paint.width
    }

    pub fn set_pen_color(&mut self, color: Argb) {
        self.paint.color = color;
    }

    pub fn pen_color(&self) -> Argb {
        self.paint.color
    }

    pub fn paint(&self) -> &PenPaint {
        &self.paint
    }

    // ─── Canvas ──────────────────────────────────────────────────────────

    /// Paint `color` over the canvas now and use it as the view background.
    pub fn set_background_color(&mut self, color: Argb) {
        self.view_background = color;
        match self.canvas.as_mut() {
            Some(canvas) => canvas.set_background_color(color),
            None => log::warn!("set_background_color before the canvas exists; view only"),
        }
        self.invalidate();
    }

    /// Replace the canvas with a copy of `bitmap`, which becomes the
    /// pristine background for undo. History is left as it is.
    pub fn load_image(&mut self, bitmap: &RgbaImage) {
        log::debug!("load_image: {}x{}", bitmap.width(), bitmap.height());
        match CanvasBuffer::from_image(bitmap) {
            Ok(canvas) => self.canvas = Some(canvas),
            Err(err) => log::warn!("load_image: {err}"),
        }
        self.invalidate();
    }

    /// The current composed buffer.
    pub fn image_bitmap(&self) -> Option<&CanvasBuffer> {
        self.canvas.as_ref()
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Drop the newest stroke and rebuild the canvas from the background by
    /// replaying the rest. Each replayed stroke's color and width are applied
    /// to the pen first. No-op on empty history.
    pub fn undo(&mut self) {
        if self.history.pop().is_none() {
            return;
        }
        log::debug!("undo: recall last path ({} left)", self.history.len());

        if let Some(canvas) = self.canvas.as_mut() {
            canvas.restore_background();
        }
        for stroke in self.history.iter() {
            self.paint.apply_stroke(stroke);
            if let Some(canvas) = self.canvas.as_mut() {
                canvas.draw_path(stroke.path(), &self.paint);
            }
        }
        self.invalidate();
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn last_stroke(&self) -> Option<&StrokeRecord> {
        self.last_stroke.as_ref()
    }

    /// The live path while a stroke is in progress.
    pub fn current_path(&self) -> Option<&BezPath> {
        self.pen.current_path()
    }

    pub fn display_transform(&self) -> DisplayTransform {
        self.transform
    }

    pub fn is_draw_mode(&self) -> bool {
        self.draw_mode
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Encode the canvas to `dir/filename` plus the format's extension.
    /// Quality above 100 is rejected without touching the filesystem.
    pub fn save_image(&self, dir: &Path, filename: &str, format: CompressFormat, quality: u32) -> bool {
        match &self.canvas {
            Some(canvas) => export::save_image(canvas, dir, filename, format, quality),
            None => {
                log::warn!("save_image: no canvas to save");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(w: u32, h: u32) -> DrawingEngine {
        let mut engine = DrawingEngine::new();
        engine.on_size_changed(w, h);
        engine
    }

    #[test]
    fn events_are_refused_until_pen_initialized() {
        let mut engine = engine(50, 50);
        assert!(!engine.on_pointer_event(&InputEvent::from_pointer_down(1.0, 1.0)));
        assert!(!engine.take_invalidation());

        engine.initialize_pen();
        assert!(engine.on_pointer_event(&InputEvent::from_pointer_down(1.0, 1.0)));
        assert!(engine.take_invalidation());
        assert!(!engine.take_invalidation());
    }

    #[test]
    fn events_without_canvas_are_refused() {
        let mut engine = DrawingEngine::new();
        engine.initialize_pen();
        assert!(!engine.on_pointer_event(&InputEvent::from_pointer_down(1.0, 1.0)));
    }

    #[test]
    fn initialize_pen_resets_to_config_defaults() {
        let mut engine = engine(10, 10);
        engine.set_pen_color(Argb(0xFF00FF00));
        engine.set_pen_size(9.0);
        engine.initialize_pen();
        assert_eq!(engine.pen_color(), Argb::BLACK);
        assert_eq!(engine.pen_size(), 1.0);
        assert!(engine.is_draw_mode());
    }

    #[test]
    fn invalid_pen_size_is_ignored() {
        let mut engine = engine(10, 10);
        engine.initialize_pen();
        engine.set_pen_size(5.0);
        engine.set_pen_size(f32::NAN);
        engine.set_pen_size(-2.0);
        assert_eq!(engine.pen_size(), 5.0);
    }

    #[test]
    fn size_change_keeps_existing_buffer() {
        let mut engine = DrawingEngine::new();
        engine.load_image(&RgbaImage::new(30, 60));
        engine.on_size_changed(100, 100);
        assert_eq!(engine.image_bitmap().map(CanvasBuffer::size), Some((30, 60)));
    }

    #[test]
    fn measure_follows_loaded_image() {
        let mut engine = DrawingEngine::new();
        assert_eq!(engine.on_measure(300, 400), (300, 400));
        engine.load_image(&RgbaImage::new(200, 800));
        assert_eq!(engine.on_measure(300, 400), (100, 400));
    }

    #[test]
    fn draw_publishes_proportion_for_input() {
        let mut engine = DrawingEngine::new();
        engine.load_image(&RgbaImage::new(100, 200));
        engine.initialize_pen();

        let mut display = Pixmap::new(50, 100).unwrap();
        engine.on_draw(&mut display);
        assert_eq!(engine.display_transform().proportion(), 0.5);

        engine.on_pointer_event(&InputEvent::from_pointer_down(10.0, 20.0));
        let start = engine.current_path().and_then(|p| p.elements().first().copied());
        assert_eq!(
            start,
            Some(ink_core::kurbo::PathEl::MoveTo(ink_core::kurbo::Point::new(20.0, 40.0)))
        );
    }

    #[test]
    fn draw_without_canvas_shows_view_background() {
        let mut engine = DrawingEngine::new();
        engine.set_background_color(Argb(0xFFFF0000));
        let mut display = Pixmap::new(4, 4).unwrap();
        engine.on_draw(&mut display);
        assert_eq!(display.pixel(1, 1).map(|p| p.red()), Some(255));
        assert_eq!(engine.display_transform(), DisplayTransform::IDENTITY);
    }

    #[test]
    fn save_without_canvas_fails() {
        let engine = DrawingEngine::new();
        assert!(!engine.save_image(Path::new("/tmp"), "nothing", CompressFormat::Png, 100));
    }
}
