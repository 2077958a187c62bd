//! Clock-style formatting shared by the track list, the header and toasts.

use std::time::Duration;

/// Format `seconds` as `M:SS`.
///
/// Minutes are never folded into hours, so one hour renders as `60:00`.
/// Fractions are truncated; negative and non-finite inputs render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a `Duration` as `M:SS`.
pub fn format_duration(d: Duration) -> String {
    format_time(d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(59.99), "0:59");
    }

    #[test]
    fn garbage_input_renders_as_zero() {
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn durations_truncate_subsecond_parts() {
        assert_eq!(format_duration(Duration::from_millis(125_900)), "2:05");
    }
}
