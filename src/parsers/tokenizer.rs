//! Numeric token scanner shared by every extractor.
//!
//! Tokens are found left to right, non-overlapping, with the pattern
//! `[-+]?\d*\.?\d+|NaN|nan|NAN`. Several extractors address columns by token
//! position, so the boundaries this pattern produces are part of the log
//! format: `"01.02.2024"` yields `01.02` and `.2024`, a bare `-` is skipped.

use once_cell::sync::Lazy;
use regex::Regex;

pub const NUMBER_PATTERN: &str = r"[-+]?\d*\.?\d+|NaN|nan|NAN";

static NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(NUMBER_PATTERN).expect("Failed to compile number regex"));

/// Raw token text in line order
pub fn tokens(line: &str) -> impl Iterator<Item = &str> {
    NUMBER_REGEX.find_iter(line).map(|m| m.as_str())
}

/// Convert one token; anything unparseable becomes NaN
pub fn to_float_or_nan(token: &str) -> f64 {
    if token.eq_ignore_ascii_case("nan") {
        return f64::NAN;
    }
    token.parse::<f64>().unwrap_or(f64::NAN)
}

/// All numeric tokens of a line
pub fn numbers(line: &str) -> Vec<f64> {
    tokens(line).map(to_float_or_nan).collect()
}

pub fn has_numbers(line: &str) -> bool {
    NUMBER_REGEX.is_match(line)
}

/// Token at a fixed position, NaN if the line is too short
pub fn number_at(values: &[f64], index: usize) -> f64 {
    values.get(index).copied().unwrap_or(f64::NAN)
}

pub fn last_number(line: &str) -> Option<f64> {
    tokens(line).last().map(to_float_or_nan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a
                .iter()
                .zip(b)
                .all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
    }

    #[test]
    fn test_row_with_nan() {
        let values = numbers("Set, A 1.0 2.5 NaN -3");
        assert!(same(&values, &[1.0, 2.5, f64::NAN, -3.0]));
    }

    #[test]
    fn test_token_boundaries() {
        assert_eq!(tokens("2525 .5").collect::<Vec<_>>(), vec!["2525", ".5"]);
        assert_eq!(tokens("a - b").count(), 0);
        assert_eq!(tokens("+4.25x-1").collect::<Vec<_>>(), vec!["+4.25", "-1"]);
        assert_eq!(
            tokens("01.02.2024 12:30:45").collect::<Vec<_>>(),
            vec!["01.02", ".2024", "12", "30", "45"]
        );
        // A trailing dot is not part of the token
        assert_eq!(tokens("7.").collect::<Vec<_>>(), vec!["7"]);
    }

    #[test]
    fn test_nan_case_variants() {
        let values = numbers("nan NAN NaN");
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|v| v.is_nan()));
        // Mixed case is not a token
        assert_eq!(tokens("Nan").count(), 0);
    }

    #[test]
    fn test_fixed_position_and_last() {
        let values = numbers("1 2 3");
        assert_eq!(number_at(&values, 2), 3.0);
        assert!(number_at(&values, 5).is_nan());
        assert_eq!(last_number("t 0:10:00 0.512"), Some(0.512));
        assert_eq!(last_number("no digits"), None);
        assert!(has_numbers("x 1"));
        assert!(!has_numbers("Current, A  Power, W"));
    }
}
