//! JSON API
//!
//! String-in/string-out entry points for hosts that talk JSON. Requests carry
//! a `schema_version`; anything other than [`SCHEMA_VERSION`] is rejected.

use serde::{Deserialize, Serialize};

use crate::analysis::{PossessionAnalysis, PossessionAnalyzer};
use crate::config::EngineConfig;
use crate::error::{CoreError, CoreResult};
use crate::snapshot::{MoverId, PossessionSnapshot};
use crate::value::{ValueField, ValueModel};

/// Request/response schema version
pub const SCHEMA_VERSION: u8 = 1;

/// Analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub schema_version: u8,
    pub snapshot: PossessionSnapshot,
    /// Defaults to the possessing mover nearest the ball
    #[serde(default)]
    pub carrier_id: Option<MoverId>,
    /// Grid cell size (m); defaults to the config's `default_resolution_m`
    #[serde(default)]
    pub resolution: Option<f32>,
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

impl AnalyzeRequest {
    fn into_parts(self) -> CoreResult<(PossessionSnapshot, Option<MoverId>, f32, EngineConfig)> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(CoreError::SchemaVersion { found: self.schema_version, expected: SCHEMA_VERSION });
        }
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let resolution = self.resolution.unwrap_or(config.default_resolution_m);
        Ok((self.snapshot, self.carrier_id, resolution, config))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub schema_version: u8,
    #[serde(flatten)]
    pub analysis: PossessionAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldResponse {
    pub schema_version: u8,
    /// Value grid with the control grid it was derived from
    pub field: ValueField,
}

/// Run the full per-instant analysis.
pub fn analyze(request: AnalyzeRequest) -> CoreResult<AnalyzeResponse> {
    let (snapshot, carrier, resolution, config) = request.into_parts()?;
    let analysis = PossessionAnalyzer::new(&config).analyze(&snapshot, carrier, resolution)?;
    Ok(AnalyzeResponse { schema_version: SCHEMA_VERSION, analysis })
}

/// Build the control and value grids only.
pub fn fields(request: AnalyzeRequest) -> CoreResult<FieldResponse> {
    let (snapshot, _, resolution, config) = request.into_parts()?;
    let field = ValueModel::new(&config).generate_value_field(&snapshot, resolution);
    Ok(FieldResponse { schema_version: SCHEMA_VERSION, field })
}

/// JSON wrapper around [`analyze`].
pub fn analyze_json(request_json: &str) -> CoreResult<String> {
    let request: AnalyzeRequest = serde_json::from_str(request_json)?;
    let response = analyze(request)?;
    Ok(serde_json::to_string(&response)?)
}

/// JSON wrapper around [`fields`].
pub fn field_json(request_json: &str) -> CoreResult<String> {
    let request: AnalyzeRequest = serde_json::from_str(request_json)?;
    let response = fields(request)?;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn request(extra: Value) -> String {
        let mut req = json!({
            "schema_version": 1,
            "snapshot": {
                "team": [
                    {"id": 1, "role": "CM", "x": 0.0, "y": 0.0, "vx": 2.0, "vy": 0.0},
                    {"id": 2, "role": "ST", "x": 22.0, "y": 6.0},
                    {"id": 3, "role": "LB", "x": -12.0, "y": -25.0}
                ],
                "opponent": [
                    {"id": 10, "role": "CB", "x": 28.0, "y": 0.0},
                    {"id": 11, "role": "DM", "x": 8.0, "y": 2.0}
                ],
                "ball": {"x": 0.5, "y": 0.0},
                "attacking_right": true
            },
            "resolution": 5.0
        });
        if let (Some(obj), Some(more)) = (req.as_object_mut(), extra.as_object()) {
            for (k, v) in more {
                obj.insert(k.clone(), v.clone());
            }
        }
        req.to_string()
    }

    #[test]
    fn test_analyze_json_ok() {
        let out: Value = serde_json::from_str(&analyze_json(&request(json!({}))).unwrap()).unwrap();
        assert_eq!(out["schema_version"], 1);
        assert_eq!(out["carrier"], 1);
        assert_eq!(out["pass_options"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(out["field"]["cols"], 21);
    }

    #[test]
    fn test_schema_version_mismatch() {
        let err = analyze_json(&request(json!({"schema_version": 2}))).unwrap_err();
        assert!(matches!(err, CoreError::SchemaVersion { found: 2, expected: 1 }));
        assert!(err.is_request_error());
    }

    #[test]
    fn test_malformed_json() {
        let err = analyze_json("{not json").unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn test_unknown_carrier() {
        let err = analyze_json(&request(json!({"carrier_id": 10}))).unwrap_err();
        assert!(matches!(err, CoreError::UnknownCarrier { id: MoverId(10) }));
    }

    #[test]
    fn test_invalid_config_override() {
        let err = analyze_json(&request(json!({"config": {"default_resolution_m": -1.0}}))).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
        assert!(!err.is_request_error());
    }

    #[test]
    fn test_tiny_resolution_rejected_or_capped() {
        let err = field_json(&request(json!({
            "resolution": 1e-9,
            "config": {"control": {"min_resolution_m": 1e-9}}
        })))
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));

        let out: Value = serde_json::from_str(
            &field_json(&request(json!({
                "resolution": 1e-9,
                "config": {"control": {"min_resolution_m": 0.05, "max_grid_cells": 5000}}
            })))
            .unwrap(),
        )
        .unwrap();
        let cells = out["field"]["values"].as_array().map_or(0, |a| a.len());
        assert!(cells > 0 && cells <= 5000);
    }

    #[test]
    fn test_default_resolution_from_config() {
        let mut req: AnalyzeRequest = serde_json::from_str(&request(json!({}))).unwrap();
        req.resolution = None;
        let resp = fields(req).unwrap();
        assert_eq!(resp.field.grid.resolution(), 2.0);
        assert_eq!(resp.field.grid.cols(), 53);
    }

    #[test]
    fn test_field_json_shape() {
        let out: Value = serde_json::from_str(&field_json(&request(json!({}))).unwrap()).unwrap();
        let field = &out["field"];
        assert_eq!(field["cols"], 21);
        assert_eq!(field["rows"], 14);
        assert_eq!(field["values"].as_array().map(|a| a.len()), Some(21 * 14));
        assert_eq!(field["control"]["values"].as_array().map(|a| a.len()), Some(21 * 14));
        assert_eq!(field["control"]["neutral"], 0.5);
    }
}
