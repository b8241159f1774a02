const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub const ZERO_TIME: &str = "00:00:00.000";

/// Formats a position in seconds as `HH:mm:ss.SSS`.
///
/// Unknown (or zero/non-finite) positions render as `00:00:00.000`. The
/// clock wraps every 24 hours, and negative positions count back from
/// midnight, so `-1.0` renders as `23:59:59.000`.
pub fn format_time(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds.filter(|s| s.is_finite() && *s != 0.0) else {
        return ZERO_TIME.to_string();
    };
    let total_ms = ((seconds * 1000.0).trunc() as i64).rem_euclid(MS_PER_DAY);
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let secs = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_known_time() {
        assert_eq!(format_time(Some(65.5)), "00:01:05.500");
        assert_eq!(format_time(Some(3723.25)), "01:02:03.250");
    }

    #[test]
    fn test_format_unknown_time() {
        assert_eq!(format_time(None), "00:00:00.000");
        assert_eq!(format_time(Some(0.0)), "00:00:00.000");
        assert_eq!(format_time(Some(f64::NAN)), "00:00:00.000");
    }

    #[test]
    fn test_format_wraps_like_a_clock() {
        assert_eq!(format_time(Some(86_400.0 + 1.25)), "00:00:01.250");
        assert_eq!(format_time(Some(-1.0)), "23:59:59.000");
    }
}
