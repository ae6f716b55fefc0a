pub mod config;
pub mod layout;
pub mod model;
pub mod path;
pub mod transform;

pub use config::{ConfigError, EngineConfig, ExportDefaults, PenDefaults};
pub use layout::{Viewport, measure};
pub use model::*;
pub use path::{PathBuilder, TOUCH_TOLERANCE};
pub use transform::{DisplayTransform, Fit};

// Re-export kurbo so downstream crates share one geometry version
pub use kurbo;
