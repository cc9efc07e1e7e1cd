//! Pulsed-test log parser.
//!
//! The first line names the measurement mode. `LIV` mode files carry a
//! current/power/voltage table after a line of asterisks; `Spectrum` mode
//! files carry a per-current spectral summary in the same place plus a
//! wavelength/intensity table headed by `Current, A <values>`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::detect::{FormatDetector, PULSE_LIV_KEYWORD, PULSE_SPECTRUM_KEYWORD};
use super::sections::{Marker, SectionScanner};
use super::tokenizer;
use super::types::{MetaValue, ParseError, Parseable, SeriesStore};

/// Table marker line of the LIV and spectrum summary tables
pub const TABLE_MARKER: &str = "**************";

/// Column names of the LIV table, by token position
pub const LIV_COLUMNS: [&str; 4] = ["Current, A", "Power, W", "Voltage, V", "Current Monitor, mV"];

/// Column names of the spectrum summary table, by token position
pub const SPECTRUM_COLUMNS: [&str; 5] = [
    "Current, A",
    "FWHM, nm",
    "Mean WL, nm",
    "Max WL, nm",
    "Dispersion",
];

static INTENSITY_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Current, A\s+[-+]?\d*\.?\d+").expect("Failed to compile regex")
});

static METADATA_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("Pulse width, ns", r"Pulse Width:\s+([0-9]*\.?[0-9]+)\s+ns"),
        ("Period, us", r"Period:\s+([0-9]*\.?[0-9]+)\s+us"),
        ("Frequency, Hz", r"Frequency:\s*([0-9]*\.?[0-9]+)\s*Hz"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("Failed to compile regex")))
    .collect()
});

/// Pulse log file parser
pub struct Pulse;

impl Pulse {
    /// Read the fixed-position table after the asterisk marker into
    /// `columns.len()` series. Returns `false` when the marker is absent.
    fn parse_table(lines: &[&str], columns: &[&str], store: &mut SeriesStore) -> bool {
        let scanner = SectionScanner::new(lines);
        let Some(marker_i) = scanner.find_first(&Marker::Contains(TABLE_MARKER)) else {
            tracing::warn!("No table marker in {}", store.source_path());
            return false;
        };

        let mut values: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
        let rows = lines
            .iter()
            .skip(marker_i)
            .skip_while(|line| !tokenizer::has_numbers(line))
            .map(|line| tokenizer::numbers(line))
            .take_while(|row| !row.is_empty());

        for row in rows {
            for (position, column) in values.iter_mut().enumerate() {
                column.push(tokenizer::number_at(&row, position));
            }
        }

        for (name, column) in columns.iter().zip(values) {
            store.add_numeric(*name, column);
        }
        true
    }

    /// Wavelength/intensity table: header with the currents, a separator,
    /// then one row per wavelength until a line without numbers
    fn parse_intensity(lines: &[&str], store: &mut SeriesStore) {
        let Some(header_i) = lines
            .iter()
            .position(|line| INTENSITY_HEADER_REGEX.is_match(line))
        else {
            tracing::debug!("No intensity table in {}", store.source_path());
            return;
        };

        let currents: Vec<&str> = tokenizer::tokens(lines[header_i]).collect();
        let mut wavelengths = Vec::new();
        let mut intensities: Vec<Vec<f64>> = vec![Vec::new(); currents.len()];

        for line in lines.iter().skip(header_i + 2) {
            let row = tokenizer::numbers(line);
            if row.is_empty() {
                break;
            }
            wavelengths.push(row[0]);
            for (j, column) in intensities.iter_mut().enumerate() {
                column.push(tokenizer::number_at(&row, j + 1));
            }
        }

        store.add_numeric(
            "Current, A",
            currents.iter().map(|c| tokenizer::to_float_or_nan(c)).collect(),
        );
        store.add_numeric("Wavelength, nm", wavelengths);
        for (current, column) in currents.iter().zip(intensities) {
            store.add_numeric(format!("Intensity (current={} A)", current), column);
        }
    }

    fn parse_metadata(lines: &[&str], store: &mut SeriesStore) {
        let scanner = SectionScanner::new(lines);
        for (name, pattern) in METADATA_PATTERNS.iter() {
            if let Some(value) = scanner.first_capture(pattern) {
                store.set_metadata(*name, MetaValue::Number(tokenizer::to_float_or_nan(value)));
            }
        }
    }
}

impl Parseable for Pulse {
    fn parse(&self, path: &str, lines: &[&str]) -> Result<SeriesStore, ParseError> {
        let mode = lines.first().ok_or_else(|| ParseError::EmptyFile {
            path: path.to_string(),
        })?;
        let kind = FormatDetector::pulse_mode(path, mode)?;
        let mut store = SeriesStore::new(path, kind);

        if mode.contains(PULSE_LIV_KEYWORD) {
            Self::parse_table(lines, &LIV_COLUMNS, &mut store);
        }
        if mode.contains(PULSE_SPECTRUM_KEYWORD) {
            Self::parse_table(lines, &SPECTRUM_COLUMNS, &mut store);
            Self::parse_intensity(lines, &mut store);
        }
        Self::parse_metadata(lines, &mut store);

        tracing::info!(
            "Parsed {} log: {} series, mode {:?}",
            kind.name(),
            store.len(),
            mode.trim()
        );
        store.validated()
    }
}
