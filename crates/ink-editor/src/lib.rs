pub mod engine;
pub mod history;
pub mod input;
pub mod tools;

pub use engine::DrawingEngine;
pub use history::History;
pub use input::{InputEvent, PointerAction};
pub use tools::{PenState, PenStep, PenTool};
