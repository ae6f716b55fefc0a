//! Stroke scripts: a recorded session replayed headlessly.
//!
//! ```json
//! {
//!   "width": 200, "height": 120,
//!   "background": "paper.png",
//!   "config": { "pen": { "width": 3 } },
//!   "steps": [ { "pen_color": 4294901760 }, { "down": [10, 10] },
//!              { "move": [40, 12] }, { "up": [40, 12] }, "undo" ]
//! }
//! ```
//!
//! Pointer coordinates are view coordinates; the canvas is laid out 1:1,
//! so they land on the canvas unchanged.

use anyhow::Context as _;
use ink_core::config::EngineConfig;
use ink_core::model::Argb;
use ink_editor::{DrawingEngine, InputEvent, PointerAction};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Script {
    pub width: u32,
    pub height: u32,
    /// Image to draw on, relative to the script's directory.
    #[serde(default)]
    pub background: Option<PathBuf>,
    #[serde(default)]
    pub config: EngineConfig,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    PenColor(Argb),
    PenSize(f32),
    BackgroundColor(Argb),
    Down([f32; 2]),
    Move([f32; 2]),
    Up([f32; 2]),
    Undo,
}

impl Script {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let script: Self = serde_json::from_str(text).context("parse stroke script")?;
        script.config.validate()?;
        Ok(script)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read script '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Play the script into a fresh engine. `base_dir` resolves the
    /// background path.
    pub fn replay(&self, base_dir: &Path) -> anyhow::Result<DrawingEngine> {
        let mut engine = DrawingEngine::with_config(self.config.clone());

        if let Some(rel) = &self.background {
            let path = base_dir.join(rel);
            let bitmap = image::open(&path)
                .with_context(|| format!("open background '{}'", path.display()))?
                .to_rgba8();
            engine.load_image(&bitmap);
        }
        let (w, h) = engine.on_measure(self.width, self.height);
        engine.on_size_changed(w, h);
        engine.initialize_pen();

        for (i, step) in self.steps.iter().enumerate() {
            log::trace!("step {i}: {step:?}");
            match *step {
                Step::PenColor(color) => engine.set_pen_color(color),
                Step::PenSize(width) => engine.set_pen_size(width),
                Step::BackgroundColor(color) => engine.set_background_color(color),
                Step::Down([x, y]) => pointer(&mut engine, PointerAction::Down, x, y),
                Step::Move([x, y]) => pointer(&mut engine, PointerAction::Move, x, y),
                Step::Up([x, y]) => pointer(&mut engine, PointerAction::Up, x, y),
                Step::Undo => engine.undo(),
            }
        }
        log::info!(
            "replayed {} steps, {} strokes in history",
            self.steps.len(),
            engine.history().len()
        );
        Ok(engine)
    }
}

fn pointer(engine: &mut DrawingEngine, action: PointerAction, x: f32, y: f32) {
    if !engine.on_pointer_event(&InputEvent::new(action, x, y)) {
        log::warn!("pointer {action:?} at ({x}, {y}) was not consumed");
    }
}
