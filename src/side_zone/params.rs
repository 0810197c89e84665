// ==============================================================================
// params.rs — HARNESS PARAMS -> TrackState
// ------------------------------------------------------------------------------
// The training harness hands the reward function a loose key/value mapping with
// dozens of fields. We pull out the two we need and keep the rest verbatim:
// - is_left_of_center : bool
// - closest_waypoints : [number, number]  (nearest first)
//
// Any JSON number is a valid index. Whole numbers that fit an i64 (including
// floats like 22.0) keep their value; anything else decodes to None, which
// lies in no zone.
//
// Malformed input is reported, never patched up. An empty closest_waypoints
// list decodes; the evaluator is the one that rejects it.
// ==============================================================================

use serde_json::{Map, Value};

use crate::error::RewardError;
use crate::side_zone::TrackState;

const IS_LEFT_OF_CENTER: &str = "is_left_of_center";
const CLOSEST_WAYPOINTS: &str = "closest_waypoints";

fn waypoint_index(v: &Value) -> Result<Option<i64>, RewardError> {
    let n = v.as_number().ok_or(RewardError::InvalidType {
        field: CLOSEST_WAYPOINTS,
        expected: "array of numbers",
    })?;

    if let Some(i) = n.as_i64() {
        return Ok(Some(i));
    }

    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
    Ok(n.as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64))
}

impl TrackState {
    pub fn from_params(params: &Value) -> Result<Self, RewardError> {
        let obj = params.as_object().ok_or(RewardError::InvalidType {
            field: "params",
            expected: "object",
        })?;

        let is_left_of_center = obj
            .get(IS_LEFT_OF_CENTER)
            .ok_or(RewardError::MissingField(IS_LEFT_OF_CENTER))?
            .as_bool()
            .ok_or(RewardError::InvalidType {
                field: IS_LEFT_OF_CENTER,
                expected: "bool",
            })?;

        let closest_waypoints = obj
            .get(CLOSEST_WAYPOINTS)
            .ok_or(RewardError::MissingField(CLOSEST_WAYPOINTS))?
            .as_array()
            .ok_or(RewardError::InvalidType {
                field: CLOSEST_WAYPOINTS,
                expected: "array of numbers",
            })?
            .iter()
            .map(waypoint_index)
            .collect::<Result<Vec<_>, _>>()?;

        let extra: Map<String, Value> = obj
            .iter()
            .filter(|(k, _)| k.as_str() != IS_LEFT_OF_CENTER && k.as_str() != CLOSEST_WAYPOINTS)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            is_left_of_center,
            closest_waypoints,
            extra,
        })
    }
}
