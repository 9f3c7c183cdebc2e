//! Compact display formatting for follower-style counts.

/// Shown in place of a count that is missing or zero.
pub const PLACEHOLDER_DASH: &str = "—";

/// Render a count as a compact string: `999`, `1.5K`, `2.4M`.
///
/// `None` and zero both render as [`PLACEHOLDER_DASH`].
#[must_use]
#[allow(clippy::cast_precision_loss)] // display only; one decimal place
pub fn format_count(count: Option<u64>) -> String {
    match count {
        None | Some(0) => PLACEHOLDER_DASH.to_string(),
        Some(n) if n >= 1_000_000 => format!("{}M", one_decimal(n as f64 / 1_000_000.0)),
        Some(n) if n >= 1_000 => format!("{}K", one_decimal(n as f64 / 1_000.0)),
        Some(n) => n.to_string(),
    }
}

/// Like [`format_count`], but a whole number of thousands or millions drops
/// the decimal: `125K` rather than `125.0K`. Used for fixed fallback values.
#[must_use]
pub fn format_whole(count: u64) -> String {
    let compact = format_count(Some(count));
    match compact.strip_suffix(['K', 'M']) {
        Some(number) if number.ends_with(".0") => {
            let suffix = &compact[number.len()..];
            format!("{}{suffix}", &number[..number.len() - 2])
        }
        _ => compact,
    }
}

/// One decimal place, with exact midpoints rounded up.
///
/// `{:.1}` already rounds the exact binary value correctly and only differs
/// on exact ties, where it picks the even digit. A tie at one decimal is a
/// value ending in `.x5` that is exactly representable, which means a whole
/// number of quarters with an odd count.
fn one_decimal(x: f64) -> String {
    let quarters = x * 4.0;
    if quarters.fract() == 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let quarters = quarters as u64;
        if quarters % 2 == 1 {
            let tenths = (quarters * 5 + 1) / 2;
            return format!("{}.{}", tenths / 10, tenths % 10);
        }
    }
    format!("{x:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_zero_render_dash() {
        assert_eq!(format_count(None), "—");
        assert_eq!(format_count(Some(0)), "—");
    }

    #[test]
    fn small_counts_render_verbatim() {
        assert_eq!(format_count(Some(1)), "1");
        assert_eq!(format_count(Some(999)), "999");
    }

    #[test]
    fn thousands_render_with_k_suffix() {
        assert_eq!(format_count(Some(1_000)), "1.0K");
        assert_eq!(format_count(Some(1_500)), "1.5K");
        assert_eq!(format_count(Some(4_200)), "4.2K");
        assert_eq!(format_count(Some(125_000)), "125.0K");
    }

    #[test]
    fn millions_render_with_m_suffix() {
        assert_eq!(format_count(Some(1_000_000)), "1.0M");
        assert_eq!(format_count(Some(2_350_000)), "2.4M");
        assert_eq!(format_count(Some(1_100_000)), "1.1M");
    }

    #[test]
    fn exact_midpoints_round_up() {
        assert_eq!(format_count(Some(1_250)), "1.3K");
        assert_eq!(format_count(Some(3_250)), "3.3K");
        assert_eq!(format_count(Some(1_750)), "1.8K");
        assert_eq!(format_count(Some(1_250_000)), "1.3M");
        assert_eq!(format_count(Some(12_750_000)), "12.8M");
    }

    #[test]
    fn inexact_midpoints_follow_binary_value() {
        // 1.15 and 2.35 are stored just below and just above the midpoint.
        assert_eq!(format_count(Some(1_150)), "1.1K");
        assert_eq!(format_count(Some(2_350_000)), "2.4M");
    }

    #[test]
    fn whole_format_drops_trailing_zero_decimal() {
        assert_eq!(format_whole(125_000), "125K");
        assert_eq!(format_whole(2_000_000), "2M");
        assert_eq!(format_whole(1_500), "1.5K");
        assert_eq!(format_whole(342), "342");
        assert_eq!(format_whole(0), "—");
    }

    #[test]
    fn formatting_is_deterministic() {
        for n in [None, Some(0), Some(7), Some(3_210), Some(9_876_543)] {
            assert_eq!(format_count(n), format_count(n));
        }
    }
}
