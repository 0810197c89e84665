//! side_zone - engine-agnostic side-of-track reward (pure types + evaluator)

pub mod types;
pub mod zones;
pub mod params;
pub mod evaluate;

pub use types::*;
pub use zones::{Zone, LEFT_ZONE, RIGHT_ZONE, preferred_side};
pub use evaluate::{evaluate, evaluate_params, REWARD_FLOOR, REWARD_MATCH};
