mod durations;
mod engine;

pub use durations::{
    clamp_minutes, Durations, Mode, BREAK_MINUTES_MAX, DEFAULT_BREAK_MINUTES,
    DEFAULT_WORK_MINUTES, MINUTES_MIN, WORK_MINUTES_MAX,
};
pub use engine::TimerEngine;
