//! Timecode formatting shared by the overlay and description stages.
//!
//! Both consumers must render the same `HH:MM:SS` string for the same
//! offset; keeping the formatter in one place guarantees that.

/// Format a second offset as `HH:MM:SS`.
///
/// Fractional seconds are truncated and negative inputs are clamped to
/// zero, matching how chapter markers behave on video platforms.
///
/// # Examples
/// ```
/// use reel_models::timestamp::format_timecode;
/// assert_eq!(format_timecode(0.0), "00:00:00");
/// assert_eq!(format_timecode(3661.0), "01:01:01");
/// ```
pub fn format_timecode(total_secs: f64) -> String {
    let total_secs = total_secs.max(0.0);
    let hours = (total_secs / 3600.0).floor() as u32;
    let mins = ((total_secs % 3600.0) / 60.0).floor() as u32;
    let secs = (total_secs % 60.0).floor() as u32;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timecode() {
        assert_eq!(format_timecode(0.0), "00:00:00");
        assert_eq!(format_timecode(90.0), "00:01:30");
        assert_eq!(format_timecode(630.0), "00:10:30");
        assert_eq!(format_timecode(3661.0), "01:01:01");
    }

    #[test]
    fn test_fractional_seconds_truncate() {
        assert_eq!(format_timecode(29.97), "00:00:29");
    }

    #[test]
    fn test_negative_clamps_to_zero() {
        assert_eq!(format_timecode(-5.0), "00:00:00");
    }
}
