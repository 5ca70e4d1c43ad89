/// Size formatting — scaled, human-readable byte counts and their inverse.
///
/// The display form is coarse on purpose: anything non-zero below one
/// kilobyte is shown as `1 KB`, and every other value is rounded to a whole
/// number of its largest binary unit (KB = 1024). The inverse,
/// [`magnitude`], recovers a comparable number from that display string and
/// is what the Size column sorts on by default.

/// Unit suffixes indexed by `place - 1`, where `place = floor(log_1024(n))`.
const SUFFIXES: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];

/// Value returned by [`magnitude`] for strings that are not `<number> <unit>`.
///
/// Smaller than any real magnitude so that malformed cells sort first and
/// sorting stays total.
pub const MAGNITUDE_SENTINEL: f64 = -1.0;

/// Format a signed byte count as `"0"` or `"<n> <unit>"`.
///
/// Non-zero values under 1024 bytes display as `1 KB` (with the sign kept).
/// Larger values are divided by `1024^place` and rounded half-to-even.
pub fn format_size(byte_count: i64) -> String {
    if byte_count == 0 {
        return "0".to_string();
    }
    let scaled = format_unsigned_parts(byte_count.unsigned_abs());
    let sign = if byte_count < 0 { "-" } else { "" };
    format!("{sign}{} {}", scaled.0, scaled.1)
}

/// Format an unsigned byte count, as reported by file metadata.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0".to_string();
    }
    let (value, suffix) = format_unsigned_parts(bytes);
    format!("{value} {suffix}")
}

/// Scaled value and suffix for a non-zero magnitude.
fn format_unsigned_parts(bytes: u64) -> (u64, &'static str) {
    // floor(log_1024(bytes)) in integer arithmetic, so exact powers of 1024
    // land on the right unit.
    let mut place = 0usize;
    let mut rest = bytes;
    while rest >= 1024 {
        rest /= 1024;
        place += 1;
    }
    if place < 1 {
        return (1, SUFFIXES[0]);
    }

    let divisor = 1024f64.powi(place as i32);
    let scaled = (bytes as f64 / divisor).round_ties_even() as u64;
    (scaled, SUFFIXES[place - 1])
}

/// Recover a comparable magnitude (in KB) from a display string.
///
/// The unit table only scales MB, GB and TB; `PB` and `EB` keep a factor
/// of 1, so they compare like KB values. Strings with fewer than two
/// whitespace-separated tokens, or whose first token is not a finite
/// number, yield [`MAGNITUDE_SENTINEL`].
pub fn magnitude(display: &str) -> f64 {
    let mut tokens = display.split_whitespace();
    let (Some(number), Some(unit)) = (tokens.next(), tokens.next()) else {
        return MAGNITUDE_SENTINEL;
    };

    let value = match number.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return MAGNITUDE_SENTINEL,
    };

    let factor = match unit {
        "MB" => 1024.0,
        "GB" => 1024.0 * 1024.0,
        "TB" => 1024.0 * 1024.0 * 1024.0,
        _ => 1.0,
    };
    value * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_zero() {
        assert_eq!(format_size(0), "0");
        assert_eq!(format_bytes(0), "0");
    }

    #[test]
    fn test_format_size_small_rounds_up_to_one_kb() {
        assert_eq!(format_size(1), "1 KB");
        assert_eq!(format_size(500), "1 KB");
        assert_eq!(format_size(1023), "1 KB");
        assert_eq!(format_size(-5), "-1 KB");
    }

    #[test]
    fn test_format_size_kb() {
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "2 KB");
        assert_eq!(format_size(-2048), "-2 KB");
        // Half-to-even: 2.5 KB rounds down to 2.
        assert_eq!(format_size(2560), "2 KB");
    }

    #[test]
    fn test_format_size_larger_units() {
        assert_eq!(format_size(10_485_760), "10 MB");
        assert_eq!(format_size(1_073_741_824), "1 GB");
        assert_eq!(format_size(1_099_511_627_776), "1 TB");
        assert_eq!(format_size(1_125_899_906_842_624), "1 PB");
        assert_eq!(format_size(1_152_921_504_606_846_976), "1 EB");
    }

    #[test]
    fn test_format_size_extremes_do_not_panic() {
        assert_eq!(format_size(i64::MAX), "8 EB");
        assert_eq!(format_size(i64::MIN), "-8 EB");
        assert_eq!(format_bytes(u64::MAX), "16 EB");
    }

    #[test]
    fn test_format_bytes_matches_signed_form() {
        for bytes in [1u64, 999, 4096, 7_340_032, 3_221_225_472] {
            assert_eq!(format_bytes(bytes), format_size(bytes as i64));
        }
    }

    #[test]
    fn test_magnitude_units() {
        assert_eq!(magnitude("1 KB"), 1.0);
        assert_eq!(magnitude("3 MB"), 3.0 * 1024.0);
        assert_eq!(magnitude("2 GB"), 2.0 * 1024.0 * 1024.0);
        assert_eq!(magnitude("1 TB"), 1024.0 * 1024.0 * 1024.0);
        assert_eq!(magnitude("-2 KB"), -2.0);
    }

    /// PB and EB are not scaled by the inverse; "1 PB" compares like "1 KB".
    #[test]
    fn test_magnitude_does_not_scale_pb_or_eb() {
        assert_eq!(magnitude("1 PB"), 1.0);
        assert_eq!(magnitude("5 EB"), 5.0);
        assert!(magnitude("1 PB") < magnitude("1 MB"));
    }

    #[test]
    fn test_magnitude_malformed_yields_sentinel() {
        assert_eq!(magnitude("0"), MAGNITUDE_SENTINEL);
        assert_eq!(magnitude(""), MAGNITUDE_SENTINEL);
        assert_eq!(magnitude("   "), MAGNITUDE_SENTINEL);
        assert_eq!(magnitude("abc KB"), MAGNITUDE_SENTINEL);
        assert_eq!(magnitude("NaN KB"), MAGNITUDE_SENTINEL);
    }

    #[test]
    fn test_magnitude_monotonic_within_tier() {
        let mut previous = f64::MIN;
        for bytes in (0..4 * 1024 * 1024i64).step_by(4099) {
            let m = magnitude(&format_size(bytes));
            assert!(m >= previous, "magnitude decreased at {bytes} bytes");
            previous = m;
        }
    }
}
