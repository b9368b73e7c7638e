//! Animation configuration read by the manager every tick.
//!
//! Mirrors the compositor's `animations:*`, `general:border_size` and
//! `decoration:rounding` settings plus the per-property knob table that
//! animated values point into.

use std::io::Read;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Vec2;
use crate::interp::DEFAULT_CURVE;

/// Property names seeded into every default config.
pub const PROPERTY_WINDOWS: &str = "windows";
pub const PROPERTY_FADE: &str = "fade";
pub const PROPERTY_BORDER: &str = "border";
pub const PROPERTY_WORKSPACES: &str = "workspaces";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config json parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("animation_speed must be > 0, got {0}")]
    NonPositiveSpeed(f32),
    #[error("property '{name}' has negative speed {speed}")]
    NegativePropertySpeed { name: String, speed: f32 },
    #[error("curve '{0}' has non-finite control points")]
    BadCurve(String),
    #[error("curve definition with empty name")]
    EmptyCurveName,
}

/// Per-property knobs. `speed == 0` defers to the global speed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationProperty {
    pub enabled: bool,
    pub speed: f32,
    pub curve: String,
}

impl Default for AnimationProperty {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 0.0,
            curve: DEFAULT_CURVE.to_string(),
        }
    }
}

/// A named cubic-bezier definition.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CurveDef {
    pub name: String,
    pub p1: Vec2,
    pub p2: Vec2,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Global switch; when off every value snaps to its goal.
    pub animations_enabled: bool,
    /// Global speed in units of 100ms; used when a property's speed is 0.
    pub animation_speed: f32,
    /// Curve used when a property names an unregistered curve.
    pub default_curve: String,
    /// Global window open/close style ("popin", "slide").
    pub windows_style: String,
    pub border_size: i32,
    pub rounding: i32,
    pub curves: Vec<CurveDef>,
    pub properties: HashMap<String, AnimationProperty>,
}

impl Default for Config {
    fn default() -> Self {
        let properties = [
            PROPERTY_WINDOWS,
            PROPERTY_FADE,
            PROPERTY_BORDER,
            PROPERTY_WORKSPACES,
        ]
        .into_iter()
        .map(|name| (name.to_string(), AnimationProperty::default()))
        .collect();
        Self {
            animations_enabled: true,
            animation_speed: 1.0,
            default_curve: DEFAULT_CURVE.to_string(),
            windows_style: String::new(),
            border_size: 1,
            rounding: 0,
            curves: Vec::new(),
            properties,
        }
    }
}

impl Config {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ConfigError> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Self::from_json_str(&buf)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.animation_speed > 0.0) {
            return Err(ConfigError::NonPositiveSpeed(self.animation_speed));
        }
        for (name, prop) in &self.properties {
            if !(prop.speed >= 0.0) {
                return Err(ConfigError::NegativePropertySpeed {
                    name: name.clone(),
                    speed: prop.speed,
                });
            }
        }
        for curve in &self.curves {
            if curve.name.is_empty() {
                return Err(ConfigError::EmptyCurveName);
            }
            let pts = [curve.p1.x, curve.p1.y, curve.p2.x, curve.p2.y];
            if pts.iter().any(|v| !v.is_finite()) {
                return Err(ConfigError::BadCurve(curve.name.clone()));
            }
        }
        Ok(())
    }

    /// Knobs for `name`; `None` when the property is not configured.
    pub fn property(&self, name: &str) -> Option<&AnimationProperty> {
        self.properties.get(name)
    }

    pub fn property_mut(&mut self, name: &str) -> &mut AnimationProperty {
        self.properties.entry(name.to_string()).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = Config::from_json_str(r#"{ "border_size": 3, "windows_style": "slide" }"#)
            .expect("valid config");
        assert_eq!(cfg.border_size, 3);
        assert_eq!(cfg.windows_style, "slide");
        assert!(cfg.animations_enabled);
        assert_eq!(cfg.animation_speed, 1.0);
        assert!(cfg.property(PROPERTY_WINDOWS).is_some());
    }

    #[test]
    fn rejects_zero_speed() {
        let err = Config::from_json_str(r#"{ "animation_speed": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveSpeed(_)));
    }

    #[test]
    fn rejects_negative_property_speed() {
        let err = Config::from_json_str(
            r#"{ "properties": { "fade": { "speed": -1.0 } } }"#,
        )
        .unwrap_err();
        assert!(
            matches!(err, ConfigError::NegativePropertySpeed { ref name, .. } if name == "fade")
        );
    }

    #[test]
    fn parse_error_is_reported() {
        let err = Config::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config json parse error"));
    }

    #[test]
    fn property_fields_default_individually() {
        let cfg = Config::from_json_str(r#"{ "properties": { "border": { "speed": 4 } } }"#)
            .expect("valid config");
        let border = cfg.property(PROPERTY_BORDER).expect("border");
        assert_eq!(border.speed, 4.0);
        assert!(border.enabled);
        assert_eq!(border.curve, DEFAULT_CURVE);
        // an explicit table replaces the seeded one
        assert!(cfg.property(PROPERTY_FADE).is_none());
    }
}
