// ==============================================================================
// track.rs — CENTERLINE LOCATOR (WAYPOINTS -> TrackState)
// ------------------------------------------------------------------------------
// The simulator reports closest_waypoints and is_left_of_center every step.
// This module derives the same two values from a planar position so a track
// state can be built outside the simulator (CLI `locate`, tests).
//
// closest_waypoints(pos):
// - Euclidean distance to every waypoint
// - nearest first, then second-nearest; ties go to the lower index
//
// is_left_of_center(pos):
// - track is a closed loop in waypoint order
// - heading at nearest waypoint i is w[i] -> w[(i+1) % n]
// - left when perp(heading, pos - w[i]) > 0 (counter-clockwise of heading)
// ==============================================================================

use std::cmp::Ordering;
use std::path::Path;

use anyhow::Context;
use nalgebra::{Point2, Vector2, distance};
use serde::{Deserialize, Serialize};

use crate::error::RewardError;
use crate::side_zone::TrackState;

/// On-disk track description: `{"waypoints": [[x, y], ...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackFile {
    pub waypoints: Vec<[f64; 2]>,
}

impl TrackFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading track file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing track file {}", path.display()))
    }
}

#[derive(Debug, Clone)]
pub struct Centerline {
    waypoints: Vec<Point2<f64>>,
}

impl Centerline {
    pub fn new(waypoints: Vec<[f64; 2]>) -> Result<Self, RewardError> {
        if waypoints.len() < 2 {
            return Err(RewardError::TrackTooShort(waypoints.len()));
        }
        Ok(Self {
            waypoints: waypoints.into_iter().map(|[x, y]| Point2::new(x, y)).collect(),
        })
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// [nearest, second-nearest] waypoint index for `pos`.
    pub fn closest_waypoints(&self, pos: Point2<f64>) -> [usize; 2] {
        let mut order: Vec<(usize, f64)> = self
            .waypoints
            .iter()
            .enumerate()
            .map(|(i, w)| (i, distance(w, &pos)))
            .collect();

        order.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        [order[0].0, order[1].0]
    }

    /// Direction of travel leaving waypoint `i`.
    #[inline]
    fn heading(&self, i: usize) -> Vector2<f64> {
        let next = (i + 1) % self.waypoints.len();
        self.waypoints[next] - self.waypoints[i]
    }

    fn left_of(&self, nearest: usize, pos: Point2<f64>) -> bool {
        let offset = pos - self.waypoints[nearest];
        self.heading(nearest).perp(&offset) > 0.0
    }

    pub fn is_left_of_center(&self, pos: Point2<f64>) -> bool {
        let [nearest, _] = self.closest_waypoints(pos);
        self.left_of(nearest, pos)
    }

    pub fn track_state(&self, pos: Point2<f64>) -> TrackState {
        let [a, b] = self.closest_waypoints(pos);
        TrackState::new(self.left_of(a, pos), [a as i64, b as i64])
    }
}
