//! Event clocks - narrative progress trackers.
//!
//! A clock has a fixed number of segments and fills as elapsed segments
//! accumulate. Clocks can be bucketed into a group scoped to a game;
//! advancing the group advances every member clock.

use serde::{Deserialize, Serialize};

use crate::ids::{ClockGroupId, ClockId, GameId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventClock {
    pub id: ClockId,
    pub name: String,
    pub description: Option<String>,
    pub segments: i64,
    pub elapsed_segments: i64,
    pub game_id: GameId,
    pub group_id: Option<ClockGroupId>,
}

impl EventClock {
    /// Whether the clock has filled. Elapsed segments are deliberately not
    /// clamped to `segments`, so an over-advanced clock still reads as full.
    pub fn is_filled(&self) -> bool {
        self.elapsed_segments >= self.segments
    }
}

/// A named bucket of clocks advanced together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventClockGroup {
    pub id: ClockGroupId,
    pub name: String,
    pub description: Option<String>,
    pub game_id: GameId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(segments: i64, elapsed: i64) -> EventClock {
        EventClock {
            id: ClockId::new(),
            name: "Pirate fleet musters".into(),
            description: None,
            segments,
            elapsed_segments: elapsed,
            game_id: GameId::new(),
            group_id: None,
        }
    }

    #[test]
    fn test_is_filled() {
        assert!(!clock(8, 7).is_filled());
        assert!(clock(8, 8).is_filled());
        // over-advanced clocks stay full
        assert!(clock(8, 11).is_filled());
    }
}
