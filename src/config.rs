//! Wall defaults and drawing tolerances.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::topology::WallMaterial;

/// Defaults applied to new walls and tolerances used while merging and
/// snapping. All lengths are in meters, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WallConfig {
    pub default_thickness: f64,
    pub default_height: f64,
    pub default_material: WallMaterial,
    /// Endpoints closer than this merge into one corner; the pointer snaps
    /// to corners within this distance.
    pub corner_tolerance: f64,
    /// Coordinate match distance for alignment guides.
    pub guide_tolerance: f64,
    /// Walls shorter than this are rejected as degenerate.
    pub min_wall_length: f64,
    pub snap_to_axis: bool,
    /// Base angle tolerance; cardinal and diagonal bands derive from it.
    pub axis_snap_tolerance_deg: f64,
    pub auto_merge_corners: bool,
    /// Chord count used to measure curved walls.
    pub bezier_samples: u32,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            default_thickness: 0.2,
            default_height: 2.7,
            default_material: WallMaterial::Concrete,
            corner_tolerance: 0.15,
            guide_tolerance: 0.05,
            min_wall_length: 1e-3,
            snap_to_axis: true,
            axis_snap_tolerance_deg: 10.0,
            auto_merge_corners: true,
            bezier_samples: 24,
        }
    }
}

impl WallConfig {
    /// Parses and validates a configuration from JSON. Missing fields take
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Malformed` for invalid JSON and
    /// `ConfigError::OutOfRange` if a value fails validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Malformed` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(ConfigError::from)?)
    }

    /// Checks every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OutOfRange` naming the first offending field.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        positive("defaultThickness", self.default_thickness)?;
        positive("defaultHeight", self.default_height)?;
        non_negative("cornerTolerance", self.corner_tolerance)?;
        non_negative("guideTolerance", self.guide_tolerance)?;
        positive("minWallLength", self.min_wall_length)?;
        if !(self.axis_snap_tolerance_deg > 0.0 && self.axis_snap_tolerance_deg <= 90.0) {
            return Err(ConfigError::OutOfRange {
                field: "axisSnapToleranceDeg",
                value: self.axis_snap_tolerance_deg,
                reason: "must be in (0, 90]",
            });
        }
        if self.bezier_samples == 0 {
            return Err(ConfigError::OutOfRange {
                field: "bezierSamples",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Applies a partial update. The configuration is left untouched if the
    /// result would not validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OutOfRange` if the updated configuration is invalid.
    pub fn apply(&mut self, update: &ConfigUpdate) -> std::result::Result<(), ConfigError> {
        let mut next = self.clone();
        if let Some(v) = update.default_thickness {
            next.default_thickness = v;
        }
        if let Some(v) = update.default_height {
            next.default_height = v;
        }
        if let Some(v) = update.default_material {
            next.default_material = v;
        }
        if let Some(v) = update.corner_tolerance {
            next.corner_tolerance = v;
        }
        if let Some(v) = update.guide_tolerance {
            next.guide_tolerance = v;
        }
        if let Some(v) = update.snap_to_axis {
            next.snap_to_axis = v;
        }
        if let Some(v) = update.axis_snap_tolerance_deg {
            next.axis_snap_tolerance_deg = v;
        }
        if let Some(v) = update.auto_merge_corners {
            next.auto_merge_corners = v;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// Partial configuration update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigUpdate {
    pub default_thickness: Option<f64>,
    pub default_height: Option<f64>,
    pub default_material: Option<WallMaterial>,
    pub corner_tolerance: Option<f64>,
    pub guide_tolerance: Option<f64>,
    pub snap_to_axis: Option<bool>,
    pub axis_snap_tolerance_deg: Option<f64>,
    pub auto_merge_corners: Option<bool>,
}

fn positive(field: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            reason: "must be a positive finite number",
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            reason: "must be a non-negative finite number",
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FloorplanError;

    #[test]
    fn defaults_validate() {
        WallConfig::default().validate().unwrap();
    }

    #[test]
    fn json_round_trip_with_partial_input() {
        let json = r#"{"cornerTolerance": 0.25, "defaultMaterial": "brick"}"#;
        let config = WallConfig::from_json(json).unwrap();
        assert!((config.corner_tolerance - 0.25).abs() < 1e-12);
        assert_eq!(config.default_material, WallMaterial::Brick);
        assert!((config.default_height - 2.7).abs() < 1e-12);

        let json = config.to_json().unwrap();
        assert_eq!(WallConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = WallConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, FloorplanError::Config(ConfigError::Malformed(_))));
    }

    #[test]
    fn out_of_range_json_is_rejected() {
        let err = WallConfig::from_json(r#"{"axisSnapToleranceDeg": 120}"#).unwrap_err();
        assert!(matches!(
            err,
            FloorplanError::Config(ConfigError::OutOfRange { field: "axisSnapToleranceDeg", .. })
        ));
    }

    #[test]
    fn apply_is_all_or_nothing() {
        let mut config = WallConfig::default();
        let bad = ConfigUpdate {
            snap_to_axis: Some(false),
            corner_tolerance: Some(-1.0),
            ..ConfigUpdate::default()
        };
        assert!(config.apply(&bad).is_err());
        assert!(config.snap_to_axis);

        let good = ConfigUpdate {
            snap_to_axis: Some(false),
            corner_tolerance: Some(0.3),
            ..ConfigUpdate::default()
        };
        config.apply(&good).unwrap();
        assert!(!config.snap_to_axis);
        assert!((config.corner_tolerance - 0.3).abs() < 1e-12);
    }
}
