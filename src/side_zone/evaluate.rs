use serde_json::Value;

use crate::error::RewardError;
use crate::side_zone::{Side, TrackState, LEFT_ZONE, RIGHT_ZONE};

/// Baseline reward. Kept above zero so a step is never scored as exactly nothing.
pub const REWARD_FLOOR: f64 = 1e-3;

/// Reward for holding the preferred side inside a zone.
pub const REWARD_MATCH: f64 = 1.0;

/// Score one step: full reward when the agent holds the side its nearest
/// waypoint's zone prefers, the floor otherwise.
pub fn evaluate(state: &TrackState) -> Result<f64, RewardError> {
    let nearest = state.nearest_waypoint()?;
    let side = state.side();

    let mut reward = REWARD_FLOOR;

    if nearest.is_some_and(|w| LEFT_ZONE.contains(w)) && side == Side::Left {
        reward = REWARD_MATCH;
    }
    if nearest.is_some_and(|w| RIGHT_ZONE.contains(w)) && side == Side::Right {
        reward = REWARD_MATCH;
    }

    Ok(reward)
}

/// Decode raw harness params and score them.
pub fn evaluate_params(params: &Value) -> Result<f64, RewardError> {
    evaluate(&TrackState::from_params(params)?)
}
