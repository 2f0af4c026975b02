/*
    Parallax Thumbs - interactive parallax thumbnail cards
    Copyright (C) 2026 veyl

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod host;
pub mod resolver;

/// Declarative configuration of one parallax card, the persisted form stored
/// inside a fenced `parallax` block. Every field except `layers` is optional
/// in the block body and falls back to the documented default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub align: Align,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default, rename = "offsetX")]
    pub offset_x: f64,
    #[serde(default, rename = "offsetY")]
    pub offset_y: f64,
    /// Maximum tilt angle in degrees.
    #[serde(default = "default_intensity")]
    pub intensity: f64,
    /// Interpolation factor applied to the tilt on every pointer event.
    #[serde(default = "default_follow")]
    pub follow: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Paint order is insertion order; the first layer is painted first.
    pub layers: Vec<LayerSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayerSpec {
    #[serde(default)]
    pub src: String,
    /// Signed apparent elevation; larger magnitudes shift more under the
    /// pointer, producing the parallax illusion.
    #[serde(default)]
    pub depth: f64,
}

fn default_width() -> f64 {
    320.0
}

fn default_height() -> f64 {
    180.0
}

fn default_scale() -> f64 {
    1.0
}

fn default_intensity() -> f64 {
    14.0
}

fn default_follow() -> f64 {
    0.12
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            align: Align::default(),
            scale: default_scale(),
            offset_x: 0.0,
            offset_y: 0.0,
            intensity: default_intensity(),
            follow: default_follow(),
            badge: None,
            layers: Vec::new(),
        }
    }
}

/// Horizontal placement of the card inside its stage container.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Tolerant name lookup: any casing is accepted, anything unknown is
    /// treated as left, matching how the block body is interpreted.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "center" => Align::Center,
            "right" => Align::Right,
            _ => Align::Left,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

impl<'de> Deserialize<'de> for Align {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Align::from_name(&name))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("missing \"layers\" array")]
    MissingLayers,
    #[error("\"layers\" must be an array")]
    LayersNotAnArray,
}

impl CardConfig {
    /// Parses a block body. The layer list must be present and must be an
    /// array; everything else is defaulted per the field table.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        match value.get("layers") {
            None => return Err(ConfigError::MissingLayers),
            Some(layers) if !layers.is_array() => return Err(ConfigError::LayersNotAnArray),
            Some(_) => {}
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Pretty-printed JSON, the exact text persisted into the block body.
    pub fn serialize(&self) -> String {
        // Infallible for this type: plain derived struct, no maps with
        // non-string keys, no custom Serialize that can error.
        serde_json::to_string_pretty(self).expect("card config serializes to JSON")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Live visual state of one rendered card. Exclusively owned by that card;
/// the settings panel edits it through the card, never through a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct CardState {
    /// Interpolated tilt angles in degrees, relaxed to zero on pointer leave.
    pub rot_x: f64,
    pub rot_y: f64,
    pub scale: f64,
    /// Translation of the card relative to its container, in pixels.
    pub pan: Vec2,
    /// Current rendered box dimensions; tracks manual resizes independently
    /// of the declared width/height.
    pub size: Vec2,
    pub intensity: f64,
    pub follow: f64,
    pub align: Align,
}

impl CardState {
    pub fn from_config(config: &CardConfig) -> Self {
        Self {
            rot_x: 0.0,
            rot_y: 0.0,
            scale: config.scale,
            pan: Vec2::new(config.offset_x, config.offset_y),
            size: Vec2::new(config.width, config.height),
            intensity: config.intensity,
            follow: config.follow,
            align: config.align,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CardConfig {
        CardConfig {
            width: 360.0,
            height: 200.0,
            align: Align::Center,
            scale: 1.25,
            offset_x: -12.0,
            offset_y: 30.0,
            intensity: 16.0,
            follow: 0.12,
            badge: Some("NEW".to_string()),
            layers: vec![
                LayerSpec {
                    src: "images/back.png".to_string(),
                    depth: -2.0,
                },
                LayerSpec {
                    src: "images/front.png".to_string(),
                    depth: 1.0,
                },
            ],
        }
    }

    #[test]
    fn round_trips_through_serialized_text() {
        let config = sample();
        let parsed = CardConfig::parse(&config.serialize()).expect("round trip parses");
        assert_eq!(parsed, config);
    }

    #[test]
    fn round_trips_without_badge() {
        let mut config = sample();
        config.badge = None;
        let text = config.serialize();
        assert!(!text.contains("badge"));
        assert_eq!(CardConfig::parse(&text).unwrap(), config);
    }

    #[test]
    fn fills_defaults_for_missing_fields() {
        let config = CardConfig::parse(r#"{"layers":[{"src":"a.png","depth":1}]}"#).unwrap();
        assert_eq!(config.width, 320.0);
        assert_eq!(config.height, 180.0);
        assert_eq!(config.align, Align::Left);
        assert_eq!(config.scale, 1.0);
        assert_eq!(config.offset_x, 0.0);
        assert_eq!(config.offset_y, 0.0);
        assert_eq!(config.intensity, 14.0);
        assert_eq!(config.follow, 0.12);
        assert_eq!(config.badge, None);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = CardConfig::parse("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_layers_is_rejected() {
        let err = CardConfig::parse(r#"{"width":100}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingLayers));
    }

    #[test]
    fn non_array_layers_is_rejected() {
        let err = CardConfig::parse(r#"{"layers":"nope"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::LayersNotAnArray));
    }

    #[test]
    fn non_object_bodies_count_as_missing_layers() {
        assert!(matches!(
            CardConfig::parse("3").unwrap_err(),
            ConfigError::MissingLayers
        ));
        assert!(matches!(
            CardConfig::parse("null").unwrap_err(),
            ConfigError::MissingLayers
        ));
    }

    #[test]
    fn align_accepts_any_casing_and_falls_back_to_left() {
        let config = CardConfig::parse(r#"{"align":"CENTER","layers":[]}"#).unwrap();
        assert_eq!(config.align, Align::Center);
        let config = CardConfig::parse(r#"{"align":"diagonal","layers":[]}"#).unwrap();
        assert_eq!(config.align, Align::Left);
    }

    #[test]
    fn layer_fields_default_when_absent() {
        let config = CardConfig::parse(r#"{"layers":[{}]}"#).unwrap();
        assert_eq!(config.layers[0].src, "");
        assert_eq!(config.layers[0].depth, 0.0);
    }

    #[test]
    fn state_is_seeded_from_the_config() {
        let config = sample();
        let state = CardState::from_config(&config);
        assert_eq!(state.rot_x, 0.0);
        assert_eq!(state.rot_y, 0.0);
        assert_eq!(state.scale, 1.25);
        assert_eq!(state.pan, Vec2::new(-12.0, 30.0));
        assert_eq!(state.size, Vec2::new(360.0, 200.0));
        assert_eq!(state.align, Align::Center);
    }
}
