//! Marker search over the lines of a log file.

use std::ops::Range;

use regex::Regex;

/// Something a line can be tested against
#[derive(Clone, Copy, Debug)]
pub enum Marker<'a> {
    /// Line contains the text anywhere
    Contains(&'a str),
    /// Line starts with the text
    Prefix(&'a str),
    /// Whole line is exactly `len` repetitions of `ch`
    Run { ch: char, len: usize },
}

impl Marker<'_> {
    pub fn matches(&self, line: &str) -> bool {
        match *self {
            Marker::Contains(text) => line.contains(text),
            Marker::Prefix(text) => line.starts_with(text),
            Marker::Run { ch, len } => is_run(line, ch, len),
        }
    }

    /// Human-readable form for error messages
    pub fn describe(&self) -> String {
        match *self {
            Marker::Contains(text) | Marker::Prefix(text) => text.to_string(),
            Marker::Run { ch, len } => format!("{} x {:?}", len, ch),
        }
    }
}

/// Exact-length run check: `len` copies of `ch` and nothing else
pub fn is_run(line: &str, ch: char, len: usize) -> bool {
    line.len() == len * ch.len_utf8() && line.chars().all(|c| c == ch)
}

/// A repeated section of a file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    /// Index of the boundary line opening the section
    pub start: usize,
    /// Index one past the last line of the section
    pub end: usize,
    /// Index of the data-start separator, `None` if the section has none
    pub data_start: Option<usize>,
}

impl Section {
    /// Line range holding the data rows, if the section has a data start
    pub fn data_lines(&self) -> Option<Range<usize>> {
        self.data_start.map(|i| (i + 1)..self.end)
    }
}

pub struct SectionScanner<'a> {
    lines: &'a [&'a str],
}

impl<'a> SectionScanner<'a> {
    pub fn new(lines: &'a [&'a str]) -> Self {
        Self { lines }
    }

    /// Every line index matching the marker, in file order
    pub fn find_all(&self, marker: &Marker) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| marker.matches(line))
            .map(|(i, _)| i)
            .collect()
    }

    /// Occurrences of each marker, scanned independently and concatenated in
    /// marker order
    pub fn find_all_of(&self, markers: &[Marker]) -> Vec<usize> {
        markers.iter().flat_map(|m| self.find_all(m)).collect()
    }

    pub fn find_first(&self, marker: &Marker) -> Option<usize> {
        self.find_first_from(0, marker)
    }

    pub fn find_first_from(&self, start: usize, marker: &Marker) -> Option<usize> {
        self.lines
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, line)| marker.matches(line))
            .map(|(i, _)| i)
    }

    pub fn find_last(&self, marker: &Marker) -> Option<usize> {
        self.lines.iter().rposition(|line| marker.matches(line))
    }

    /// Split the file at every `boundary` line and locate the `data_start`
    /// line inside each section. When a section holds several data-start
    /// lines the last one wins.
    pub fn sections(&self, boundary: &Marker, data_start: &Marker) -> Vec<Section> {
        let starts = self.find_all(boundary);
        let mut sections = Vec::with_capacity(starts.len());

        for (n, &start) in starts.iter().enumerate() {
            let end = starts.get(n + 1).copied().unwrap_or(self.lines.len());
            let data_start = (start..end)
                .rev()
                .find(|&i| data_start.matches(self.lines[i]));

            tracing::debug!(
                "Section {}: lines {}..{}, data start {:?}",
                n,
                start,
                end,
                data_start
            );
            sections.push(Section {
                start,
                end,
                data_start,
            });
        }
        sections
    }

    /// First capture group of the first line the pattern matches
    pub fn first_capture(&self, pattern: &Regex) -> Option<&'a str> {
        let lines: &'a [&'a str] = self.lines;
        lines.iter().find_map(|&line| {
            pattern
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str())
        })
    }
}
