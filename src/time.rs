//! Relative-time handling for long-term logs.
//!
//! Instruments print elapsed time as `H:MM:SS` and restart that clock with
//! every new log section. [`TimeNormalizer`] turns the labels into fractional
//! hours and stitches restarted sections into one non-decreasing axis.

use once_cell::sync::Lazy;
use regex::Regex;

pub const RELATIVE_TIME_PATTERN: &str = r"\d+:\d{2}:\d{2}";

/// Forward jump (hours) above which the clock is considered restarted
pub const ROLLOVER_THRESHOLD_H: f64 = 1.0;

/// Hour values keep this many decimal places
const HOUR_DECIMALS: i32 = 5;

static RELATIVE_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(RELATIVE_TIME_PATTERN).expect("Failed to compile relative time regex")
});

/// Last `H:MM:SS` match on a line; leading columns may hold absolute times
pub fn last_relative_time(line: &str) -> Option<&str> {
    RELATIVE_TIME_REGEX.find_iter(line).last().map(|m| m.as_str())
}

/// Parse `H:MM:SS` to whole seconds. `None` when malformed or when the
/// total overflows.
pub fn parse_relative_seconds(label: &str) -> Option<u64> {
    let parts: Vec<&str> = label.trim().split(':').collect();
    if parts.len() != 3 {
        return None;
    }

    let hours: u64 = parts[0].parse().ok()?;
    let minutes: u64 = parts[1].parse().ok()?;
    let seconds: u64 = parts[2].parse().ok()?;

    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// `H:MM:SS` label to fractional hours rounded to 5 decimals
pub fn label_to_hours(label: &str) -> Option<f64> {
    parse_relative_seconds(label).map(|s| round_to(s as f64 / 3600.0, HOUR_DECIMALS))
}

/// Render hours back to `HH:MM:SS`, rounded to the nearest second.
/// Hours are not wrapped at 24.
pub fn hours_to_label(hours: f64) -> String {
    let total = (hours * 3600.0).round().max(0.0) as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeNormalizer {
    pub threshold_h: f64,
}

impl Default for TimeNormalizer {
    fn default() -> Self {
        Self {
            threshold_h: ROLLOVER_THRESHOLD_H,
        }
    }
}

impl TimeNormalizer {
    pub fn new(threshold_h: f64) -> Self {
        Self { threshold_h }
    }

    /// Stitch raw hour values into a monotonic axis.
    ///
    /// Walks consecutive pairs. A pair whose value goes backwards, or whose
    /// absolute difference exceeds the threshold, marks a clock restart: the
    /// previous raw value is added to a running offset applied to every later
    /// point.
    pub fn normalize(&self, raw: &[f64]) -> Vec<f64> {
        let mut normalized = Vec::with_capacity(raw.len());
        let Some(&first) = raw.first() else {
            return normalized;
        };
        normalized.push(first);

        let mut offset = 0.0;
        for pair in raw.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if next < prev || (next - prev).abs() > self.threshold_h {
                tracing::debug!("Clock restart detected: {} -> {} h", prev, next);
                offset += prev;
            }
            normalized.push(round_to(offset + next, HOUR_DECIMALS));
        }
        normalized
    }

    /// Labels to normalized hours; labels that do not parse are dropped
    pub fn normalize_labels<S: AsRef<str>>(&self, labels: &[S]) -> Vec<f64> {
        let raw: Vec<f64> = labels
            .iter()
            .filter_map(|l| label_to_hours(l.as_ref()))
            .collect();
        self.normalize(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relative_seconds() {
        assert_eq!(parse_relative_seconds("0:00:00"), Some(0));
        assert_eq!(parse_relative_seconds("1:00:00"), Some(3600));
        assert_eq!(parse_relative_seconds("125:30:15"), Some(451815));
        assert_eq!(parse_relative_seconds("12:30"), None);
        assert_eq!(parse_relative_seconds("a:00:00"), None);
    }

    #[test]
    fn test_huge_hour_field_does_not_overflow() {
        assert_eq!(parse_relative_seconds("9999999999999999:00:00"), None);
        assert_eq!(label_to_hours("9999999999999999:00:00"), None);
        assert_eq!(parse_relative_seconds("99999999999999999999:00:00"), None);
        assert_eq!(
            parse_relative_seconds("5124095576030408:00:15"),
            Some(5124095576030408 * 3600 + 15)
        );
    }

    #[test]
    fn test_label_to_hours_rounds() {
        assert_eq!(label_to_hours("0:30:00"), Some(0.5));
        assert_eq!(label_to_hours("0:05:00"), Some(0.08333));
        assert_eq!(label_to_hours("2:00:00"), Some(2.0));
    }

    #[test]
    fn test_last_relative_time() {
        let line = "12\t01.02.2024 12:30:45\t3:10:05\t0.5";
        assert_eq!(last_relative_time(line), Some("3:10:05"));
        assert_eq!(last_relative_time("no time here"), None);
    }

    #[test]
    fn test_rollover_is_stitched() {
        let normalizer = TimeNormalizer::default();
        let out = normalizer.normalize(&[0.1, 0.5, 0.05, 0.3]);
        assert_eq!(out, vec![0.1, 0.5, 0.55, 0.8]);
    }

    #[test]
    fn test_large_jump_counts_as_restart() {
        let normalizer = TimeNormalizer::default();
        // 23.5 h section, then restart near zero
        let out = normalizer.normalize(&[23.0, 23.5, 0.1, 0.2]);
        assert_eq!(out, vec![23.0, 23.5, 23.6, 23.7]);
        // Exactly the threshold is not a restart
        assert_eq!(normalizer.normalize(&[1.0, 2.0]), vec![1.0, 2.0]);
        // Just above it is
        assert_eq!(normalizer.normalize(&[1.0, 2.5]), vec![1.0, 3.5]);
    }

    #[test]
    fn test_offsets_accumulate() {
        let normalizer = TimeNormalizer::default();
        let out = normalizer.normalize(&[0.2, 0.4, 0.1, 0.3, 0.1]);
        assert_eq!(out, vec![0.2, 0.4, 0.5, 0.7, 0.8]);
        assert!(out.windows(2).all(|w| w[0] <= w[1]));
        assert!(normalizer.normalize(&[]).is_empty());
    }

    #[test]
    fn test_hours_to_label() {
        assert_eq!(hours_to_label(0.0), "00:00:00");
        assert_eq!(hours_to_label(0.08333), "00:05:00");
        assert_eq!(hours_to_label(26.5), "26:30:00");
    }
}
