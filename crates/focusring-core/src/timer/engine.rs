//! Timer engine implementation.
//!
//! The engine is a tick-count state machine. It does not own a clock or
//! any threads - the caller holds the one-second periodic registration
//! and invokes `tick()` once per elapsed second while the timer runs.
//!
//! ## Mode Cycle
//!
//! ```text
//! Work -(complete)-> Break -(complete)-> Work -> ...
//! ```
//!
//! Natural completion auto-restarts the countdown for the next mode;
//! `skip()` advances without restarting and without the audio cue.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(Durations::default());
//! engine.start();
//! // Once per second while running:
//! for event in engine.tick() { /* render */ }
//! ```

use chrono::Utc;

use super::durations::{Durations, Mode};
use crate::events::Event;

/// Core timer engine.
///
/// Exclusively owns the countdown state; every mutation goes through the
/// command handlers below and returns the events it emitted.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    durations: Durations,
    mode: Mode,
    /// Duration of the current mode in seconds.
    total_seconds: u32,
    /// Counts down from `total_seconds` to 0 inclusive; the tick after
    /// 0 runs mode completion.
    remaining_seconds: u32,
    running: bool,
    /// Completed Work periods. Break periods never count.
    sessions_completed: u32,
}

impl TimerEngine {
    /// Create an idle engine in Work mode with a full countdown.
    pub fn new(durations: Durations) -> Self {
        let total_seconds = durations.seconds(Mode::Work);
        Self {
            durations,
            mode: Mode::Work,
            total_seconds,
            remaining_seconds: total_seconds,
            running: false,
            sessions_completed: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    /// 0.0 ..= 1.0 fraction of the current countdown already elapsed.
    pub fn fraction_elapsed(&self) -> f64 {
        crate::display::fraction_elapsed(self.remaining_seconds, self.total_seconds)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            running: self.running,
            remaining_seconds: self.remaining_seconds,
            total_seconds: self.total_seconds,
            sessions_completed: self.sessions_completed,
            fraction_elapsed: self.fraction_elapsed(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down. No-op while already running, so a second
    /// `start()` can never produce a double-speed countdown.
    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_seconds: self.remaining_seconds,
            total_seconds: self.total_seconds,
            at: Utc::now(),
        })
    }

    /// Pause. No-op while idle. Leaves `remaining_seconds` untouched.
    pub fn stop(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            mode: self.mode,
            remaining_seconds: self.remaining_seconds,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.running {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Stop and rewind the current mode to a full countdown. Mode and
    /// session count are unchanged; calling it twice is the same as once.
    pub fn reset(&mut self) -> Event {
        self.running = false;
        self.remaining_seconds = self.total_seconds;
        Event::TimerReset {
            mode: self.mode,
            remaining_seconds: self.remaining_seconds,
            at: Utc::now(),
        }
    }

    /// Stop, set `mode`, and recompute the countdown from the current
    /// durations. Re-selecting the active mode rewinds it.
    pub fn switch_mode(&mut self, mode: Mode) -> Event {
        self.running = false;
        self.mode = mode;
        self.total_seconds = self.durations.seconds(mode);
        self.remaining_seconds = self.total_seconds;
        Event::ModeSwitched {
            mode,
            total_seconds: self.total_seconds,
            sessions_completed: self.sessions_completed,
            at: Utc::now(),
        }
    }

    /// Run mode completion immediately: count the session when leaving
    /// Work, then switch. Unlike natural completion this emits no
    /// `TimerCompleted` (no chime) and does not restart the countdown.
    pub fn skip(&mut self) -> Event {
        self.running = false;
        if self.mode == Mode::Work {
            self.sessions_completed += 1;
        }
        self.switch_mode(self.mode.next())
    }

    /// Advance the countdown by one second.
    ///
    /// Ignored while idle. A tick that lands exactly on zero is not yet
    /// complete (the display shows 00:00); the following tick stops the
    /// timer, emits the completion cue, counts the session when Work
    /// finished, switches mode, and restarts for the fully automatic
    /// work/break cycle.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.running {
            return Vec::new();
        }
        if self.remaining_seconds == 0 {
            // The engine stops itself before transitioning.
            self.running = false;
            let finished = self.mode;
            if finished == Mode::Work {
                self.sessions_completed += 1;
            }
            let completed = Event::TimerCompleted {
                mode: finished,
                sessions_completed: self.sessions_completed,
                at: Utc::now(),
            };
            let switched = self.switch_mode(finished.next());
            let mut events = vec![completed, switched];
            events.extend(self.start());
            return events;
        }
        self.remaining_seconds -= 1;
        vec![Event::TimerTicked {
            mode: self.mode,
            remaining_seconds: self.remaining_seconds,
            total_seconds: self.total_seconds,
            at: Utc::now(),
        }]
    }

    /// Record a duration edit. Values are normalized, never rejected.
    ///
    /// When the edit hits the current mode while idle the countdown is
    /// recomputed immediately (live preview). While running the new value
    /// only takes effect on the next mode switch or reset.
    pub fn update_duration(&mut self, mode: Mode, minutes: Option<i64>) -> Event {
        let stored = self.durations.set(mode, minutes);
        let applied = mode == self.mode && !self.running;
        if applied {
            self.total_seconds = self.durations.seconds(mode);
            self.remaining_seconds = self.total_seconds;
        }
        Event::DurationUpdated {
            mode,
            minutes: stored,
            applied,
            at: Utc::now(),
        }
    }
}
