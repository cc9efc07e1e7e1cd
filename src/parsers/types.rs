use serde::ser::SerializeStruct;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Instrument/firmware variant that produced a log file
#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumString, PartialEq, Eq, Hash, Serialize)]
pub enum FormatKind {
    /// LIV sweep log with `### LIV Data ###` sections
    #[strum(serialize = "LIV")]
    Liv,
    /// GIVIK long-term log, 96 character header generation
    #[strum(serialize = "LT_V1")]
    LtV1,
    /// GIVIK long-term log, 258 character header generation
    #[strum(serialize = "LT_V2")]
    LtV2,
    #[strum(serialize = "PULSE_LIV")]
    PulseLiv,
    #[strum(serialize = "PULSE_SPECTRUM")]
    PulseSpectrum,
}

impl FormatKind {
    pub fn name(&self) -> &'static str {
        match self {
            FormatKind::Liv => "LIV",
            FormatKind::LtV1 => "Long-term (GIVIK 1)",
            FormatKind::LtV2 => "Long-term (GIVIK 2)",
            FormatKind::PulseLiv => "Pulse LIV",
            FormatKind::PulseSpectrum => "Pulse spectrum",
        }
    }

    pub fn is_long_term(&self) -> bool {
        matches!(self, FormatKind::LtV1 | FormatKind::LtV2)
    }

    pub fn is_pulse(&self) -> bool {
        matches!(self, FormatKind::PulseLiv | FormatKind::PulseSpectrum)
    }
}

/// One named column of extracted samples
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Series {
    /// Numeric samples, NaN where a token was missing or malformed
    Numeric(Vec<f64>),
    /// Time labels such as `"12:04:31"`
    Labels(Vec<String>),
}

impl Series {
    pub fn len(&self) -> usize {
        match self {
            Series::Numeric(v) => v.len(),
            Series::Labels(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            Series::Numeric(v) => Some(v),
            Series::Labels(_) => None,
        }
    }

    pub fn as_labels(&self) -> Option<&[String]> {
        match self {
            Series::Numeric(_) => None,
            Series::Labels(v) => Some(v),
        }
    }
}

/// Scalar metadata value pulled from the raw text
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Number(f64),
    Text(String),
}

impl MetaValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetaValue::Number(n) => Some(*n),
            MetaValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for MetaValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetaValue::Number(n) => write!(f, "{}", n),
            MetaValue::Text(s) => f.write_str(s),
        }
    }
}

/// Parsed log file: named series in display order plus scalar metadata.
///
/// Keys are unique. Re-adding a key replaces the values but keeps the
/// position the key was first inserted at.
#[derive(Clone, Debug)]
pub struct SeriesStore {
    source_path: String,
    format_kind: FormatKind,
    series: Vec<(String, Series)>,
    scalar_metadata: Vec<(String, MetaValue)>,
    display_name: Option<String>,
}

impl SeriesStore {
    pub(crate) fn new(source_path: &str, format_kind: FormatKind) -> Self {
        Self {
            source_path: source_path.to_string(),
            format_kind,
            series: Vec::new(),
            scalar_metadata: Vec::new(),
            display_name: None,
        }
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn format_kind(&self) -> FormatKind {
        self.format_kind
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Attach the caller-supplied label used in multi-file comparisons
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.display_name = Some(name.into());
    }

    pub(crate) fn add_series(&mut self, name: impl Into<String>, values: Series) {
        let name = name.into();
        match self.series.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = values,
            None => self.series.push((name, values)),
        }
    }

    pub(crate) fn add_numeric(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.add_series(name, Series::Numeric(values));
    }

    pub(crate) fn add_labels(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.add_series(name, Series::Labels(values));
    }

    pub(crate) fn set_metadata(&mut self, name: impl Into<String>, value: MetaValue) {
        let name = name.into();
        match self.scalar_metadata.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.scalar_metadata.push((name, value)),
        }
    }

    /// Series in display order
    pub fn series(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.series.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn series_names(&self) -> Vec<&str> {
        self.series.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn numeric(&self, name: &str) -> Option<&[f64]> {
        self.get(name).and_then(Series::as_numeric)
    }

    pub fn labels(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(Series::as_labels)
    }

    /// Metadata in insertion order
    pub fn metadata(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.scalar_metadata.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up one metadata entry; `None` means "unknown", never zero
    pub fn meta(&self, name: &str) -> Option<&MetaValue> {
        self.scalar_metadata
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Number of numeric series holding at least one sample
    pub fn populated_numeric_count(&self) -> usize {
        self.series
            .iter()
            .filter(|(_, s)| matches!(s, Series::Numeric(v) if !v.is_empty()))
            .count()
    }

    /// A store is usable only with at least two populated numeric series
    pub fn is_valid(&self) -> bool {
        self.populated_numeric_count() >= 2
    }

    /// Consume the store, turning a degenerate extraction into an error
    pub(crate) fn validated(self) -> Result<Self, ParseError> {
        let numeric_series = self.populated_numeric_count();
        if numeric_series >= 2 {
            Ok(self)
        } else {
            Err(ParseError::Degenerate {
                path: self.source_path,
                format: self.format_kind,
                numeric_series,
            })
        }
    }
}

struct OrderedMap<'a, V>(&'a [(String, V)]);

impl<V: Serialize> Serialize for OrderedMap<'_, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl Serialize for SeriesStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("SeriesStore", 5)?;
        state.serialize_field("source_path", &self.source_path)?;
        state.serialize_field("format_kind", &self.format_kind)?;
        state.serialize_field("display_name", &self.display_name)?;
        state.serialize_field("series", &OrderedMap(&self.series))?;
        state.serialize_field("scalar_metadata", &OrderedMap(&self.scalar_metadata))?;
        state.end()
    }
}

/// Per-file parse failure
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unrecognized log format: {path}")]
    UnrecognizedFormat { path: String },

    #[error("section marker {marker:?} not found in {path}")]
    SectionNotFound { path: String, marker: String },

    #[error("{path}: {format} extraction produced {numeric_series} numeric series, at least 2 required")]
    Degenerate {
        path: String,
        format: FormatKind,
        numeric_series: usize,
    },

    #[error("empty file: {path}")]
    EmptyFile { path: String },
}

/// Trait for format-specific extractors
pub trait Parseable {
    fn parse(&self, path: &str, lines: &[&str]) -> Result<SeriesStore, ParseError>;
}
