//! Core shared types for `side_zone`.
// side_zone/types.rs
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RewardError;

// ============================================
// Side of the centerline
// ============================================

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn from_left_flag(is_left_of_center: bool) -> Self {
        if is_left_of_center { Side::Left } else { Side::Right }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================
// ----- per-step input record ----------------
// ============================================

/// One simulator step as seen by the reward function.
///
/// Only `is_left_of_center` and `closest_waypoints[0]` are read; anything
/// else the harness sends rides along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackState {
    pub is_left_of_center: bool,

    /// [nearest, second-nearest] waypoint index. `None` is a numeric index
    /// that names no real waypoint (fractional, or beyond `i64`).
    pub closest_waypoints: Vec<Option<i64>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrackState {
    pub fn new(is_left_of_center: bool, closest_waypoints: [i64; 2]) -> Self {
        Self {
            is_left_of_center,
            closest_waypoints: closest_waypoints.into_iter().map(Some).collect(),
            extra: Map::new(),
        }
    }

    pub fn side(&self) -> Side {
        Side::from_left_flag(self.is_left_of_center)
    }

    /// `closest_waypoints[0]`, failing when the list is empty.
    pub fn nearest_waypoint(&self) -> Result<Option<i64>, RewardError> {
        self.closest_waypoints
            .first()
            .copied()
            .ok_or(RewardError::IndexOutOfRange {
                field: "closest_waypoints",
                index: 0,
                len: self.closest_waypoints.len(),
            })
    }
}
