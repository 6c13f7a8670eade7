//! Presentation helpers shared by any host rendering the timer.
//!
//! Pure formatting only. The values here mirror what the engine exposes:
//! an `MM:SS` readout, a title-bar string, the elapsed fraction scaled
//! against a fixed ring circumference, and the capped session-dot row.

use std::f64::consts::PI;

/// Radius of the circular progress indicator, in user units.
pub const RING_RADIUS: f64 = 120.0;

/// Cap on the row of session indicator dots. The numeric count keeps
/// counting past it.
pub const SESSION_DOT_CAP: u32 = 20;

/// Circumference the ring's dash pattern is scaled against.
pub fn ring_circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// Stroke dash offset for a given elapsed fraction: a full offset at
/// 0.0 (empty ring) down to zero at 1.0 (closed ring).
pub fn ring_dash_offset(fraction: f64) -> f64 {
    ring_circumference() * (1.0 - fraction)
}

/// Fraction of the countdown already elapsed, 0.0 ..= 1.0.
pub fn fraction_elapsed(remaining_seconds: u32, total_seconds: u32) -> f64 {
    if total_seconds == 0 {
        return 0.0;
    }
    1.0 - f64::from(remaining_seconds) / f64::from(total_seconds)
}

/// Zero-padded `MM:SS`.
pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Title-bar text mirroring the on-screen countdown.
pub fn window_title(remaining_seconds: u32) -> String {
    format!("{} — Pomodoro", format_mm_ss(remaining_seconds))
}

/// Number of dots to render for `sessions` completed.
pub fn session_dot_count(sessions: u32) -> u32 {
    sessions.min(SESSION_DOT_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_mm_ss_zero_padded() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(90), "01:30");
        assert_eq!(format_mm_ss(1500), "25:00");
        assert_eq!(format_mm_ss(5400), "90:00");
    }

    #[test]
    fn window_title_tracks_countdown() {
        assert_eq!(window_title(1500), "25:00 — Pomodoro");
    }

    #[test]
    fn fraction_elapsed_bounds() {
        assert_eq!(fraction_elapsed(1500, 1500), 0.0);
        assert_eq!(fraction_elapsed(0, 1500), 1.0);
        assert!((fraction_elapsed(750, 1500) - 0.5).abs() < 1e-9);
        // Degenerate total never divides by zero.
        assert_eq!(fraction_elapsed(0, 0), 0.0);
    }

    #[test]
    fn ring_offset_closes_as_time_elapses() {
        let circumference = ring_circumference();
        assert!((circumference - 2.0 * PI * 120.0).abs() < 1e-9);
        assert!((ring_dash_offset(0.0) - circumference).abs() < 1e-9);
        assert!(ring_dash_offset(1.0).abs() < 1e-9);
        assert!(ring_dash_offset(0.25) > ring_dash_offset(0.75));
    }

    #[test]
    fn session_dots_cap_at_twenty() {
        assert_eq!(session_dot_count(0), 0);
        assert_eq!(session_dot_count(7), 7);
        assert_eq!(session_dot_count(20), 20);
        assert_eq!(session_dot_count(35), 20);
    }
}
