use serde::{Deserialize, Serialize};

/// Which phase the timer is counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Work,
    Break,
}

impl Mode {
    /// The mode the timer advances to when this one completes.
    pub fn next(self) -> Self {
        match self {
            Mode::Work => Mode::Break,
            Mode::Break => Mode::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Work => "Work",
            Mode::Break => "Break",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const MINUTES_MIN: u32 = 1;
pub const WORK_MINUTES_MAX: u32 = 90;
pub const BREAK_MINUTES_MAX: u32 = 30;

/// Clamp `minutes` into the valid range for `mode`.
///
/// `None` and zero both read as "unset" and fall back to the mode default,
/// so a cleared or zeroed input field never produces a dead timer.
pub fn clamp_minutes(mode: Mode, minutes: Option<i64>) -> u32 {
    let (default, max) = match mode {
        Mode::Work => (DEFAULT_WORK_MINUTES, WORK_MINUTES_MAX),
        Mode::Break => (DEFAULT_BREAK_MINUTES, BREAK_MINUTES_MAX),
    };
    match minutes {
        None | Some(0) => default,
        Some(n) => n.clamp(i64::from(MINUTES_MIN), i64::from(max)) as u32,
    }
}

/// Per-mode countdown durations, minutes granularity. Values are clamped
/// on the way in, so a `Durations` is always within the valid ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    work_minutes: u32,
    break_minutes: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl Durations {
    pub fn new(work_minutes: i64, break_minutes: i64) -> Self {
        let mut durations = Self::default();
        durations.set(Mode::Work, Some(work_minutes));
        durations.set(Mode::Break, Some(break_minutes));
        durations
    }

    /// Normalize and store a minutes value for `mode`. Returns what was
    /// actually stored.
    pub fn set(&mut self, mode: Mode, minutes: Option<i64>) -> u32 {
        let value = clamp_minutes(mode, minutes);
        match mode {
            Mode::Work => self.work_minutes = value,
            Mode::Break => self.break_minutes = value,
        }
        value
    }

    pub fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_minutes,
            Mode::Break => self.break_minutes,
        }
    }

    /// Duration of `mode` in seconds.
    pub fn seconds(&self, mode: Mode) -> u32 {
        self.minutes(mode) * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let d = Durations::default();
        assert_eq!(d.minutes(Mode::Work), 25);
        assert_eq!(d.minutes(Mode::Break), 5);
        assert_eq!(d.seconds(Mode::Work), 1500);
    }

    #[test]
    fn clamps_above_max() {
        assert_eq!(clamp_minutes(Mode::Work, Some(120)), 90);
        assert_eq!(clamp_minutes(Mode::Break, Some(45)), 30);
    }

    #[test]
    fn clamps_below_min() {
        assert_eq!(clamp_minutes(Mode::Work, Some(-5)), 1);
        assert_eq!(clamp_minutes(Mode::Break, Some(-1)), 1);
    }

    #[test]
    fn missing_and_zero_fall_back_to_default() {
        assert_eq!(clamp_minutes(Mode::Work, None), 25);
        assert_eq!(clamp_minutes(Mode::Work, Some(0)), 25);
        assert_eq!(clamp_minutes(Mode::Break, None), 5);
        assert_eq!(clamp_minutes(Mode::Break, Some(0)), 5);
    }

    #[test]
    fn new_clamps_both_fields() {
        let d = Durations::new(200, 45);
        assert_eq!(d.minutes(Mode::Work), 90);
        assert_eq!(d.minutes(Mode::Break), 30);
    }

    #[test]
    fn mode_next_alternates() {
        assert_eq!(Mode::Work.next(), Mode::Break);
        assert_eq!(Mode::Break.next(), Mode::Work);
    }
}
