//! Completion chime description.
//!
//! The engine never produces audio itself. On natural completion it emits
//! [`TimerCompleted`](crate::Event::TimerCompleted); hosts with an audio
//! context render this two-tone chime from the description below, hosts
//! without one degrade to whatever cue they have. Either way the cue is
//! best-effort: a host that cannot play it must carry on silently.

use serde::Serialize;

/// Gain at tone onset.
pub const PEAK_GAIN: f32 = 0.3;

/// Gain the exponential decay ramps down to by the end of each tone.
pub const FLOOR_GAIN: f32 = 0.001;

/// The two sine tones: 440 Hz then 660 Hz, staggered by 0.2 s, each with
/// a 0.6 s decay envelope.
pub const TONES: [Tone; 2] = [
    Tone {
        frequency_hz: 440.0,
        start_secs: 0.0,
        duration_secs: 0.6,
    },
    Tone {
        frequency_hz: 660.0,
        start_secs: 0.2,
        duration_secs: 0.6,
    },
];

/// One sine tone within the chime.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Tone {
    pub frequency_hz: f32,
    /// Offset from the start of the chime at which this tone begins.
    pub start_secs: f32,
    pub duration_secs: f32,
}

impl Tone {
    /// Envelope gain `t` seconds into the chime: exponential decay from
    /// [`PEAK_GAIN`] to [`FLOOR_GAIN`] across the tone window, zero
    /// outside it.
    pub fn gain_at(&self, t: f32) -> f32 {
        let local = t - self.start_secs;
        if local < 0.0 || local > self.duration_secs {
            return 0.0;
        }
        PEAK_GAIN * (FLOOR_GAIN / PEAK_GAIN).powf(local / self.duration_secs)
    }

    /// End of this tone relative to the start of the chime.
    pub fn end_secs(&self) -> f32 {
        self.start_secs + self.duration_secs
    }
}

/// Total chime length in seconds.
pub fn total_secs() -> f32 {
    TONES.iter().map(Tone::end_secs).fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chime_is_two_staggered_tones() {
        assert_eq!(TONES[0].frequency_hz, 440.0);
        assert_eq!(TONES[1].frequency_hz, 660.0);
        assert_eq!(TONES[1].start_secs - TONES[0].start_secs, 0.2);
        assert!((total_secs() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn envelope_decays_from_peak_to_floor() {
        let tone = TONES[0];
        assert!((tone.gain_at(0.0) - PEAK_GAIN).abs() < 1e-6);
        assert!((tone.gain_at(tone.duration_secs) - FLOOR_GAIN).abs() < 1e-4);
        assert!(tone.gain_at(0.1) > tone.gain_at(0.3));
    }

    #[test]
    fn envelope_is_silent_outside_the_tone_window() {
        let second = TONES[1];
        assert_eq!(second.gain_at(0.1), 0.0);
        assert_eq!(second.gain_at(second.end_secs() + 0.01), 0.0);
    }
}
