pub mod detect;
pub mod liv;
pub mod lt;
pub mod pulse;
pub mod sections;
pub mod tokenizer;
pub mod types;

pub use detect::FormatDetector;
pub use liv::Liv;
pub use lt::LongTerm;
pub use pulse::Pulse;
pub use sections::{Marker, Section, SectionScanner};
pub use types::{FormatKind, MetaValue, ParseError, Parseable, Series, SeriesStore};

use crate::config::EngineConfig;
use crate::time::TimeNormalizer;

/// Classify and parse one file with default settings
pub fn parse(path: &str, contents: &str) -> Result<SeriesStore, ParseError> {
    parse_with(path, contents, &EngineConfig::default())
}

/// Classify `contents` and run the matching extractor
pub fn parse_with(
    path: &str,
    contents: &str,
    config: &EngineConfig,
) -> Result<SeriesStore, ParseError> {
    let lines: Vec<&str> = contents.lines().collect();
    let kind = FormatDetector::classify(path, &lines)?;
    tracing::debug!("{}: classified as {}", path, kind);

    match kind {
        FormatKind::Liv => Liv.parse(path, &lines),
        FormatKind::LtV1 | FormatKind::LtV2 => {
            LongTerm::new(TimeNormalizer::new(config.rollover_threshold_h)).parse(path, &lines)
        }
        FormatKind::PulseLiv | FormatKind::PulseSpectrum => Pulse.parse(path, &lines),
    }
}
