// ==============================================================================
// zones.rs — WAYPOINT ZONES THAT PREFER ONE SIDE OF THE TRACK
// ------------------------------------------------------------------------------
// A zone is a union of half-open waypoint index ranges [start, end) tagged with
// the side of the centerline the agent is rewarded for holding there.
//
// LEFT_ZONE  = [22,40) ∪ [76,92) ∪ [100,112)
// RIGHT_ZONE = [48,56)
//
// The two zones are disjoint. Bounds are tuned for one specific track layout
// and are fixed; membership is a plain range check, no set is built.
// ==============================================================================

use std::ops::Range;

use crate::side_zone::Side;

#[derive(Debug)]
pub struct Zone {
    pub side: Side,
    pub ranges: &'static [Range<i64>],
}

impl Zone {
    #[inline]
    pub fn contains(&self, waypoint: i64) -> bool {
        self.ranges.iter().any(|r| r.contains(&waypoint))
    }
}

pub const LEFT_ZONE: Zone = Zone {
    side: Side::Left,
    ranges: &[22..40, 76..92, 100..112],
};

pub const RIGHT_ZONE: Zone = Zone {
    side: Side::Right,
    ranges: &[48..56],
};

/// Side rewarded at `waypoint`, `None` outside both zones.
pub fn preferred_side(waypoint: i64) -> Option<Side> {
    [LEFT_ZONE, RIGHT_ZONE]
        .into_iter()
        .find(|zone| zone.contains(waypoint))
        .map(|zone| zone.side)
}
