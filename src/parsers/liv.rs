//! LIV sweep log parser.
//!
//! Format: free text with `### LIV Data ###` / `### Spectrum LIV Data ###`
//! sections. Each section holds a handful of rows that start with a row
//! name (`Set, A`, `Power, W`, ...) followed by one value per sweep step.
//! Newer files add a `### Spectrum Data ###` block with per-current
//! intensity tables.

use once_cell::sync::Lazy;
use regex::Regex;

use super::detect::{LIV_SECTION_MARKERS, SPECTRUM_DATA_MARKER};
use super::sections::{Marker, SectionScanner};
use super::tokenizer;
use super::types::{FormatKind, MetaValue, ParseError, Parseable, SeriesStore};
use crate::time::round_to;

/// Lines scanned from each LIV section marker, marker line included
pub const LIV_SECTION_WINDOW: usize = 7;

pub const LIV_ROW_MARKERS: [&str; 8] = [
    "Set, A",
    "AI_Voltage",
    "AI_Current",
    "OPM",
    "Power, W",
    "Voltage, V",
    "Current, A",
    "WLmean, nm",
];

/// Row whose name is qualified by the DAT value on the line above it
pub const WLMEAN_MARKER: &str = "WLmean, nm";

/// Sub-tables read from the spectrum block
pub const MAX_SPECTRUM_TABLES: usize = 2;

static DURATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Duration:\s*([0-9]*\.?[0-9]+)us").expect("Failed to compile regex")
});
static FREQUENCY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Frequency:\s*([0-9]*\.?[0-9]+)Hz").expect("Failed to compile regex")
});

/// One DAT block of the spectrum table
#[derive(Clone, Debug, Default)]
struct SpectrumTable {
    dat: String,
    /// Current values as printed in the header
    currents: Vec<String>,
    wavelengths: Vec<f64>,
    /// One column per current
    intensities: Vec<Vec<f64>>,
    /// Index of the first line after the table
    end: usize,
}

/// LIV log file parser
pub struct Liv;

impl Liv {
    /// Row name and values when `line` starts with `marker`
    fn parse_row<'a>(line: &str, marker: &'a str) -> Option<(&'a str, Vec<f64>)> {
        line.strip_prefix(marker)
            .map(|rest| (marker, tokenizer::numbers(rest)))
    }

    fn parse_liv_sections(lines: &[&str], store: &mut SeriesStore) {
        let scanner = SectionScanner::new(lines);
        let markers: Vec<Marker> = LIV_SECTION_MARKERS
            .iter()
            .map(|m| Marker::Contains(*m))
            .collect();
        let section_starts = scanner.find_all_of(&markers);

        if section_starts.is_empty() {
            tracing::warn!("No LIV sections in {}", store.source_path());
            return;
        }

        for start in section_starts {
            let end = (start + LIV_SECTION_WINDOW).min(lines.len());
            for i in start..end {
                for marker in LIV_ROW_MARKERS {
                    let Some((name, values)) = Self::parse_row(lines[i], marker) else {
                        continue;
                    };

                    if marker == WLMEAN_MARKER {
                        let dat = i
                            .checked_sub(1)
                            .and_then(|prev| tokenizer::tokens(lines[prev]).next());
                        match dat {
                            Some(dat) => {
                                store.add_numeric(format!("{} (DAT={}ms)", name, dat), values)
                            }
                            None => store.add_numeric(name, values),
                        }
                    } else {
                        store.add_numeric(name, values);
                    }
                }
            }
        }
    }

    /// Read one sub-table starting the search at `from`: DAT line, header
    /// with currents, separator, then rows until a line without numbers.
    /// The search stops at the next `###` section heading.
    fn read_spectrum_table(lines: &[&str], from: usize) -> Option<SpectrumTable> {
        let dat_i = (from..lines.len())
            .take_while(|&i| !lines[i].contains("###"))
            .find(|&i| tokenizer::has_numbers(lines[i]))?;
        let dat = tokenizer::tokens(lines[dat_i]).next()?.to_string();

        let header = lines.get(dat_i + 1)?;
        let currents: Vec<String> = tokenizer::tokens(header).map(str::to_string).collect();
        if currents.is_empty() {
            tracing::warn!("Spectrum table at line {} has no currents", dat_i + 1);
            return None;
        }

        let mut table = SpectrumTable {
            dat,
            intensities: vec![Vec::new(); currents.len()],
            currents,
            ..Default::default()
        };

        // dat_i + 2 is the separator line
        let mut i = dat_i + 3;
        while let Some(line) = lines.get(i) {
            let values = tokenizer::numbers(line);
            if values.is_empty() {
                break;
            }
            table.wavelengths.push(values[0]);
            for (j, column) in table.intensities.iter_mut().enumerate() {
                column.push(tokenizer::number_at(&values, j + 1));
            }
            i += 1;
        }
        table.end = i;
        Some(table)
    }

    fn parse_spectrum_tables(lines: &[&str], store: &mut SeriesStore) {
        let scanner = SectionScanner::new(lines);
        let Some(marker_i) = scanner.find_first(&Marker::Contains(SPECTRUM_DATA_MARKER)) else {
            tracing::debug!("No spectrum block in {}", store.source_path());
            return;
        };

        let mut cursor = marker_i + 1;
        for table_no in 1..=MAX_SPECTRUM_TABLES {
            let Some(table) = Self::read_spectrum_table(lines, cursor) else {
                break;
            };
            cursor = table.end;

            let currents = table
                .currents
                .iter()
                .map(|c| tokenizer::to_float_or_nan(c))
                .collect();
            store.add_numeric("Current, A", currents);
            store.add_numeric(format!("Wavelength{}, nm", table_no), table.wavelengths);
            for (current, column) in table.currents.iter().zip(table.intensities) {
                store.add_numeric(
                    format!("Intensity (current={}, DAT={} ms)", current, table.dat),
                    column,
                );
            }
        }
    }

    fn parse_metadata(lines: &[&str], store: &mut SeriesStore) {
        let scanner = SectionScanner::new(lines);

        if let Some(us) = scanner
            .first_capture(&DURATION_REGEX)
            .and_then(|v| v.parse::<f64>().ok())
        {
            store.set_metadata("Duration, ms", MetaValue::Number(round_to(us / 1000.0, 2)));
        }
        if let Some(hz) = scanner
            .first_capture(&FREQUENCY_REGEX)
            .and_then(|v| v.parse::<f64>().ok())
        {
            store.set_metadata("Frequency, Hz", MetaValue::Number(hz));
        }
    }
}

impl Parseable for Liv {
    fn parse(&self, path: &str, lines: &[&str]) -> Result<SeriesStore, ParseError> {
        let mut store = SeriesStore::new(path, FormatKind::Liv);

        Self::parse_liv_sections(lines, &mut store);
        Self::parse_spectrum_tables(lines, &mut store);
        Self::parse_metadata(lines, &mut store);

        tracing::info!(
            "Parsed LIV log: {} series, {} metadata entries",
            store.len(),
            store.metadata().count()
        );
        store.validated()
    }
}
