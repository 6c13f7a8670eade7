use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every state change in the engine produces an Event.
///
/// The presentation layer renders these into text, ring progress, tab
/// state, and sound; it only reads them and never mutates engine state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_seconds: u32,
        total_seconds: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    /// One second elapsed. `remaining_seconds` may be zero: the display
    /// shows 00:00 and completion fires on the following tick.
    TimerTicked {
        mode: Mode,
        remaining_seconds: u32,
        total_seconds: u32,
        at: DateTime<Utc>,
    },
    /// A mode ran down naturally. This is the audio-cue event; `skip()`
    /// never emits it.
    TimerCompleted {
        mode: Mode,
        sessions_completed: u32,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        mode: Mode,
        total_seconds: u32,
        sessions_completed: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    DurationUpdated {
        mode: Mode,
        minutes: u32,
        /// True when the edit hit the current mode while idle and the
        /// countdown was recomputed immediately.
        applied: bool,
        at: DateTime<Utc>,
    },
    /// Full state dump for presentation bootstrap and status output.
    StateSnapshot {
        mode: Mode,
        running: bool,
        remaining_seconds: u32,
        total_seconds: u32,
        sessions_completed: u32,
        fraction_elapsed: f64,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::TimerCompleted {
            mode: Mode::Work,
            sessions_completed: 3,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TimerCompleted");
        assert_eq!(json["mode"], "work");
        assert_eq!(json["sessions_completed"], 3);
    }
}
