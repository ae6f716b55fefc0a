//! Pen tool: the stroke-capture state machine.
//!
//! `Idle --Down--> Drawing --Move*--> Drawing --Up--> Idle`
//!
//! The tool only shapes the path. Painting the live path, restoring paint
//! and committing to history are the engine's job; it acts on the
//! [`PenStep`] each event returns.

use crate::input::PointerAction;
use ink_core::kurbo::{BezPath, Point};
use ink_core::path::PathBuilder;

/// Capture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenState {
    Idle,
    Drawing,
}

/// What happened to the stroke on this event.
#[derive(Debug, Clone, PartialEq)]
pub enum PenStep {
    /// A new stroke started at the event position.
    Began,
    /// The in-progress path may have grown; redraw it.
    Extended,
    /// The stroke ended; this is its final path.
    Finished(BezPath),
    /// Move or up with no stroke in progress.
    Ignored,
}

// ─── Pen Tool (freehand) ─────────────────────────────────────────────────

#[derive(Debug)]
pub struct PenTool {
    state: PenState,
    builder: PathBuilder,
}

impl Default for PenTool {
    fn default() -> Self {
        Self::new()
    }
}

impl PenTool {
    pub fn new() -> Self {
        Self::with_builder(PathBuilder::new())
    }

    /// A pen whose smoothing dead-band is `tolerance` canvas units.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self::with_builder(PathBuilder::with_tolerance(tolerance))
    }

    fn with_builder(builder: PathBuilder) -> Self {
        Self {
            state: PenState::Idle,
            builder,
        }
    }

    /// Feed one pointer sample, already in canvas space.
    pub fn handle(&mut self, action: PointerAction, p: Point) -> PenStep {
        match (action, self.state) {
            // A second down mid-stroke abandons the unfinished path.
            (PointerAction::Down, _) => {
                self.builder.begin(p);
                self.state = PenState::Drawing;
                PenStep::Began
            }
            (PointerAction::Move, PenState::Drawing) => {
                self.builder.extend(p);
                PenStep::Extended
            }
            (PointerAction::Up, PenState::Drawing) => {
                self.state = PenState::Idle;
                PenStep::Finished(self.builder.end())
            }
            (PointerAction::Move | PointerAction::Up, PenState::Idle) => PenStep::Ignored,
        }
    }

    pub fn state(&self) -> PenState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == PenState::Drawing
    }

    /// The live path while a stroke is in progress.
    pub fn current_path(&self) -> Option<&BezPath> {
        self.is_drawing().then(|| self.builder.path())
    }
}
