//! Decorative waveform strip.
//!
//! The bars are not derived from the audio. They are a pseudo-random shape
//! seeded from the track id, so each track keeps the same picture between
//! frames and sessions.

use std::f64::consts::PI;
use std::time::Duration;

/// Sum of the id's character codes.
pub fn seed(id: &str) -> u64 {
    id.chars().map(|c| c as u64).sum()
}

/// Bar heights in `0.0..=1.0`, `bars` entries long.
pub fn bar_heights(id: &str, bars: usize) -> Vec<f64> {
    if bars == 0 {
        return Vec::new();
    }
    let seed = seed(id);
    (0..bars)
        .map(|i| {
            let envelope = (i as f64 / bars as f64 * PI).sin();
            let jitter = ((i as u64).wrapping_mul(seed) % 10) as f64;
            (envelope * (0.5 + 0.5 * jitter.sin())).clamp(0.0, 1.0)
        })
        .collect()
}

/// Map a click at `click_x` within a strip `width` cells wide to a position.
pub fn seek_target(duration: Duration, click_x: u16, width: u16) -> Duration {
    if width == 0 {
        return Duration::ZERO;
    }
    let ratio = (f64::from(click_x) / f64::from(width)).clamp(0.0, 1.0);
    duration.mul_f64(ratio)
}

/// How many of `bars` lie before the playhead.
pub fn progress_bars(position: Duration, duration: Duration, bars: usize) -> usize {
    if duration.is_zero() {
        return 0;
    }
    let ratio = (position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0);
    ((ratio * bars as f64) as usize).min(bars)
}
