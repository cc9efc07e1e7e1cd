//! givik-log - parsing and normalization of laboratory instrument logs
//!
//! Reads LIV sweep logs, GIVIK long-term (LT) logs of both generations and
//! pulsed-test logs into ordered named series, and fits lines over
//! user-selected windows of those series.
//!
//! ## Module Structure
//!
//! - [`parsers`] - Format detection and one extractor per log family
//! - [`time`] - Relative-clock parsing and rollover normalization
//! - [`fit`] - Two-point and least-squares window fits, best-window search
//! - [`state`] - Loaded files and parallel batch parsing
//! - [`config`] - Engine settings loaded from JSON

pub mod config;
pub mod fit;
pub mod parsers;
pub mod state;
pub mod time;
