//! Engine configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. Loaded from JSON.

use crate::model::{Argb, CompressFormat};
use crate::path::TOUCH_TOLERANCE;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Pen state installed by `initialize_pen`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenDefaults {
    /// Default: opaque black.
    pub color: Argb,
    /// Default: **1.0**.
    pub width: f32,
}

impl Default for PenDefaults {
    fn default() -> Self {
        Self {
            color: Argb::BLACK,
            width: 1.0,
        }
    }
}

/// Format and quality used when the caller doesn't pick one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportDefaults {
    pub format: CompressFormat,
    /// 0..=100. Default: **100**.
    pub quality: u32,
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            format: CompressFormat::Png,
            quality: 100,
        }
    }
}

/// Configuration for a `DrawingEngine`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Smoothing dead-band in canvas units. Default: **4.0**.
    pub touch_tolerance: f32,
    pub pen: PenDefaults,
    pub export: ExportDefaults,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            touch_tolerance: TOUCH_TOLERANCE as f32,
            pen: PenDefaults::default(),
            export: ExportDefaults::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    /// `Parse` for malformed JSON, `Invalid` if a value is out of range.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        log::debug!(
            "config: touch_tolerance={} pen.width={} export={:?}@{}",
            config.touch_tolerance,
            config.pen.width,
            config.export.format,
            config.export.quality
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.touch_tolerance.is_finite() || self.touch_tolerance < 0.0 {
            return Err(ConfigError::invalid(format!(
                "touch_tolerance must be finite and >= 0, got {}",
                self.touch_tolerance
            )));
        }
        if !self.pen.width.is_finite() || self.pen.width <= 0.0 {
            return Err(ConfigError::invalid(format!(
                "pen.width must be finite and > 0, got {}",
                self.pen.width
            )));
        }
        if self.export.quality > 100 {
            return Err(ConfigError::invalid(format!(
                "export.quality must be <= 100, got {}",
                self.export.quality
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.touch_tolerance, 4.0);
        assert_eq!(config.pen.color, Argb::BLACK);
    }

    #[test]
    fn partial_override() {
        let config = EngineConfig::from_json(
            r#"{ "pen": { "color": 4294901760 }, "export": { "format": "jpeg", "quality": 80 } }"#,
        )
        .unwrap();
        assert_eq!(config.pen.color, Argb(0xFFFF0000));
        assert_eq!(config.pen.width, 1.0);
        assert_eq!(config.export.format, CompressFormat::Jpeg);
        assert_eq!(config.export.quality, 80);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = EngineConfig::from_json(r#"{ "export": { "quality": 101 } }"#).unwrap_err();
        assert!(err.to_string().contains("invalid config:"));

        let err = EngineConfig::from_json(r#"{ "pen": { "width": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = EngineConfig::from_json(r#"{ "touch_tolerance": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = EngineConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("config parse error:"));
    }
}
