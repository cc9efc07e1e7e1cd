//! Classify a log file by its header.

use super::sections::{is_run, Marker, SectionScanner};
use super::types::{FormatKind, ParseError};

/// First line of a GIVIK generation 1 long-term log: 96 `#`
pub const GIVIK1_HEADER_LEN: usize = 96;
/// First line (and every section boundary) of a GIVIK generation 2 log: 258 `#`
pub const GIVIK2_HEADER_LEN: usize = 258;

pub const LIV_SECTION_MARKERS: [&str; 2] = ["### LIV Data ###", "### Spectrum LIV Data ###"];
pub const SPECTRUM_DATA_MARKER: &str = "### Spectrum Data ###";

/// Mode keywords on the first line of a pulsed-test log
pub const PULSE_LIV_KEYWORD: &str = "LIV";
pub const PULSE_SPECTRUM_KEYWORD: &str = "Spectrum";

pub struct FormatDetector;

impl FormatDetector {
    /// GIVIK generation from the first line alone
    pub fn givik_version(path: &str, first_line: &str) -> Result<FormatKind, ParseError> {
        if is_run(first_line, '#', GIVIK1_HEADER_LEN) {
            Ok(FormatKind::LtV1)
        } else if is_run(first_line, '#', GIVIK2_HEADER_LEN) {
            Ok(FormatKind::LtV2)
        } else {
            Err(ParseError::UnrecognizedFormat {
                path: path.to_string(),
            })
        }
    }

    /// Pulse variant from the free-text mode line. Spectrum wins when both
    /// keywords are present.
    pub fn pulse_mode(path: &str, mode_line: &str) -> Result<FormatKind, ParseError> {
        if mode_line.contains(PULSE_SPECTRUM_KEYWORD) {
            Ok(FormatKind::PulseSpectrum)
        } else if mode_line.contains(PULSE_LIV_KEYWORD) {
            Ok(FormatKind::PulseLiv)
        } else {
            Err(ParseError::UnrecognizedFormat {
                path: path.to_string(),
            })
        }
    }

    /// Detect if the lines look like an LIV sweep log
    pub fn is_liv(lines: &[&str]) -> bool {
        let scanner = SectionScanner::new(lines);
        LIV_SECTION_MARKERS
            .iter()
            .chain(std::iter::once(&SPECTRUM_DATA_MARKER))
            .any(|m| scanner.find_first(&Marker::Contains(*m)).is_some())
    }

    /// Decide which extractor handles a file.
    ///
    /// Order: GIVIK header, LIV section markers, pulse mode line.
    pub fn classify(path: &str, lines: &[&str]) -> Result<FormatKind, ParseError> {
        let Some(first_line) = lines.first() else {
            return Err(ParseError::EmptyFile {
                path: path.to_string(),
            });
        };

        if let Ok(kind) = Self::givik_version(path, first_line) {
            return Ok(kind);
        }
        if Self::is_liv(lines) {
            return Ok(FormatKind::Liv);
        }
        Self::pulse_mode(path, first_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_givik_version() {
        let v1 = "#".repeat(96);
        let v2 = "#".repeat(258);
        assert_eq!(FormatDetector::givik_version("f", &v1), Ok(FormatKind::LtV1));
        assert_eq!(FormatDetector::givik_version("f", &v2), Ok(FormatKind::LtV2));

        for other in ["#".repeat(97), "#".repeat(257), "hello".to_string(), String::new()] {
            assert_eq!(
                FormatDetector::givik_version("f", &other),
                Err(ParseError::UnrecognizedFormat {
                    path: "f".to_string()
                })
            );
        }
    }

    #[test]
    fn test_pulse_mode() {
        assert_eq!(
            FormatDetector::pulse_mode("f", "Mode: Pulse LIV"),
            Ok(FormatKind::PulseLiv)
        );
        assert_eq!(
            FormatDetector::pulse_mode("f", "Mode: Spectrum"),
            Ok(FormatKind::PulseSpectrum)
        );
        assert!(FormatDetector::pulse_mode("f", "Mode: CW").is_err());
    }

    #[test]
    fn test_classify() {
        let v2 = "#".repeat(258);
        assert_eq!(FormatDetector::classify("f", &[v2.as_str(), "x"]), Ok(FormatKind::LtV2));
        assert_eq!(
            FormatDetector::classify("f", &["LIV test", "### LIV Data ###"]),
            Ok(FormatKind::Liv)
        );
        assert_eq!(
            FormatDetector::classify("f", &["Pulse LIV", "****"]),
            Ok(FormatKind::PulseLiv)
        );
        assert_eq!(
            FormatDetector::classify("f", &[]),
            Err(ParseError::EmptyFile {
                path: "f".to_string()
            })
        );
        assert!(matches!(
            FormatDetector::classify("f", &["random text"]),
            Err(ParseError::UnrecognizedFormat { .. })
        ));
    }
}
