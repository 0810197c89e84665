pub mod config;
pub mod error;
pub mod net;
pub mod session;
pub mod side_zone;
pub mod track;

pub use error::RewardError;
pub use side_zone::{Side, TrackState, evaluate, evaluate_params};
