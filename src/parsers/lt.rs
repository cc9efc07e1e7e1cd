//! GIVIK long-term (burn-in) log parser.
//!
//! Two generations exist, told apart by the first line:
//! - GIVIK 1: 96 `#`. Data follows the last line of 96 `-`; each row ends
//!   with the relative time and the average power.
//! - GIVIK 2: 258 `#`, repeated at the start of every section. Inside a
//!   section, data follows a line of 261 `-`; values sit at fixed token
//!   positions.
//!
//! The relative clock restarts with each section, so the hour axis is
//! stitched with [`TimeNormalizer`].

use once_cell::sync::Lazy;
use regex::Regex;

use super::detect::{FormatDetector, GIVIK1_HEADER_LEN, GIVIK2_HEADER_LEN};
use super::sections::{Marker, SectionScanner};
use super::tokenizer;
use super::types::{FormatKind, MetaValue, ParseError, Parseable, SeriesStore};
use crate::fit::{fit_all, FitMode};
use crate::time::{self, TimeNormalizer};

/// GIVIK 1 data separator: 96 `-`
pub const GIVIK1_DATA_SEPARATOR_LEN: usize = 96;
/// GIVIK 2 data separator inside each section: 261 `-`
pub const GIVIK2_DATA_SEPARATOR_LEN: usize = 261;

/// Token positions of a GIVIK 2 data row. Positions 0..=8 are the pulse
/// counter, the absolute timestamp and the relative time. Position 12
/// (pulse power) is not extracted.
pub mod givik2_columns {
    pub const CURRENT: usize = 9;
    pub const VOLTAGE: usize = 10;
    pub const POWER_AVG: usize = 11;
    pub const TANK_TEMP: usize = 13;
}

pub const RELATIVE_TIME: &str = "Reletive time";
pub const RELATIVE_TIME_H: &str = "Reletive time, h";
pub const CURRENT: &str = "Current, A";
pub const VOLTAGE: &str = "Voltage, V";
pub const POWER_AVG: &str = "Power (avg), W";
pub const TANK_TEMP: &str = "Tank water temp., C";
pub const POWER_SLOPE: &str = "Avg. power(time) slope, W/h";

static METADATA_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("Pulse width, ms", r"Pulse width:\s*([0-9]*\.?[0-9]+)\s*ms"),
        (
            "Repetition frequency, Hz",
            r"Repetition frequency:\s*([0-9]*\.?[0-9]+)\s*Hz",
        ),
        (
            "Set operating current, A",
            r"Set operating current:\s*([0-9]*\.?[0-9]+)\s*A",
        ),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("Failed to compile regex")))
    .collect()
});

/// Samples collected across every section of one file
#[derive(Default)]
struct Samples {
    labels: Vec<String>,
    hours: Vec<f64>,
    current: Vec<f64>,
    voltage: Vec<f64>,
    power_avg: Vec<f64>,
    tank_temp: Vec<f64>,
}

/// Long-term log file parser
#[derive(Clone, Copy, Debug, Default)]
pub struct LongTerm {
    normalizer: TimeNormalizer,
}

impl LongTerm {
    pub fn new(normalizer: TimeNormalizer) -> Self {
        Self { normalizer }
    }

    /// Relative-time label of a data row plus its raw hour value. Rows
    /// without a time (blank lines, trailers) yield `None`.
    fn row_time(line: &str, line_no: usize) -> Option<(&str, f64)> {
        let Some(label) = time::last_relative_time(line) else {
            if !line.trim().is_empty() {
                tracing::warn!("Skipping line {} without relative time", line_no + 1);
            }
            return None;
        };
        let Some(hours) = time::label_to_hours(label) else {
            tracing::warn!("Skipping line {}: bad relative time {:?}", line_no + 1, label);
            return None;
        };
        Some((label, hours))
    }

    fn parse_givik1(&self, lines: &[&str], store: &mut SeriesStore) -> Result<(), ParseError> {
        let separator = Marker::Run {
            ch: '-',
            len: GIVIK1_DATA_SEPARATOR_LEN,
        };
        let scanner = SectionScanner::new(lines);
        let Some(last_separator) = scanner.find_last(&separator) else {
            return Err(ParseError::SectionNotFound {
                path: store.source_path().to_string(),
                marker: separator.describe(),
            });
        };

        let mut samples = Samples::default();
        for (line_no, line) in lines.iter().enumerate().skip(last_separator + 1) {
            let Some((label, hours)) = Self::row_time(line, line_no) else {
                continue;
            };
            samples.labels.push(label.to_string());
            samples.hours.push(hours);
            samples
                .power_avg
                .push(tokenizer::last_number(line).unwrap_or(f64::NAN));
        }

        let hours = self.normalizer.normalize(&samples.hours);
        store.add_labels(RELATIVE_TIME, samples.labels);
        store.add_numeric(RELATIVE_TIME_H, hours);
        store.add_numeric(POWER_AVG, samples.power_avg);
        Ok(())
    }

    fn parse_givik2(&self, lines: &[&str], store: &mut SeriesStore) {
        let scanner = SectionScanner::new(lines);
        let sections = scanner.sections(
            &Marker::Run {
                ch: '#',
                len: GIVIK2_HEADER_LEN,
            },
            &Marker::Run {
                ch: '-',
                len: GIVIK2_DATA_SEPARATOR_LEN,
            },
        );

        let mut samples = Samples::default();
        for (n, section) in sections.iter().enumerate() {
            let Some(data_lines) = section.data_lines() else {
                tracing::warn!(
                    "Section {} (line {}) of {} has no data start, skipped",
                    n,
                    section.start + 1,
                    store.source_path()
                );
                continue;
            };

            for line_no in data_lines {
                let line = lines[line_no];
                let Some((label, hours)) = Self::row_time(line, line_no) else {
                    continue;
                };
                let values = tokenizer::numbers(line);

                samples.labels.push(label.to_string());
                samples.hours.push(hours);
                samples
                    .current
                    .push(tokenizer::number_at(&values, givik2_columns::CURRENT));
                samples
                    .voltage
                    .push(tokenizer::number_at(&values, givik2_columns::VOLTAGE));
                samples
                    .power_avg
                    .push(tokenizer::number_at(&values, givik2_columns::POWER_AVG));
                samples
                    .tank_temp
                    .push(tokenizer::number_at(&values, givik2_columns::TANK_TEMP));
            }
        }

        let hours = self.normalizer.normalize(&samples.hours);
        let labels = hours.iter().map(|&h| time::hours_to_label(h)).collect();

        store.add_labels(RELATIVE_TIME, labels);
        store.add_numeric(RELATIVE_TIME_H, hours);
        store.add_numeric(CURRENT, samples.current);
        store.add_numeric(VOLTAGE, samples.voltage);
        store.add_numeric(POWER_AVG, samples.power_avg);
        store.add_numeric(TANK_TEMP, samples.tank_temp);
    }

    fn parse_metadata_givik2(lines: &[&str], store: &mut SeriesStore) {
        let scanner = SectionScanner::new(lines);
        for (name, pattern) in METADATA_PATTERNS.iter() {
            if let Some(value) = scanner.first_capture(pattern) {
                store.set_metadata(*name, MetaValue::Number(tokenizer::to_float_or_nan(value)));
            }
        }
    }

    /// Average power drift over the whole run, endpoint to endpoint
    fn add_power_slope(store: &mut SeriesStore) {
        let (Some(hours), Some(power)) = (store.numeric(RELATIVE_TIME_H), store.numeric(POWER_AVG))
        else {
            return;
        };
        let Ok(result) = fit_all(hours, power, FitMode::TwoPoint) else {
            return;
        };
        if result.window_points.len() < 2 {
            return;
        }
        store.set_metadata(POWER_SLOPE, MetaValue::Number(result.slope));
    }
}

impl Parseable for LongTerm {
    fn parse(&self, path: &str, lines: &[&str]) -> Result<SeriesStore, ParseError> {
        let first_line = lines.first().ok_or_else(|| ParseError::EmptyFile {
            path: path.to_string(),
        })?;
        let kind = FormatDetector::givik_version(path, first_line)?;
        let mut store = SeriesStore::new(path, kind);

        if kind == FormatKind::LtV1 {
            self.parse_givik1(lines, &mut store)?;
        } else {
            self.parse_givik2(lines, &mut store);
            Self::parse_metadata_givik2(lines, &mut store);
        }
        Self::add_power_slope(&mut store);

        tracing::info!(
            "Parsed {} log: {} series, {} samples",
            kind.name(),
            store.len(),
            store.numeric(RELATIVE_TIME_H).map_or(0, |h| h.len())
        );
        store.validated()
    }
}
