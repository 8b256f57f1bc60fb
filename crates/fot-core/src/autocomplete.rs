// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

//! Autocomplete state for one form field.
//!
//! The field owns its records, the visible text, the hidden "real value"
//! and the current suggestion list. Rendering is left to the caller: the
//! GUI draws [`Suggestion`]s as clickable rows and the CLI prints them.

use crate::options::OptionRecord;
use log::{debug, info, warn};
use regex::{Regex, RegexBuilder};

/// A piece of a suggestion label. Matched parts are flagged for bold rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Index into the field's records.
    pub index: usize,
    pub segments: Vec<Segment>,
}

impl Suggestion {
    pub fn label(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Case-insensitive literal matcher. `None` for an empty query.
fn build_matcher(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Could not build matcher for query {:?}: {}", query, e);
            None
        }
    }
}

fn record_matches(re: &Regex, record: &OptionRecord) -> bool {
    re.is_match(&record.label) || record.code.as_deref().is_some_and(|c| re.is_match(c))
}

/// Splits `label` around every non-overlapping match of `re`.
fn highlight(re: &Regex, label: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in re.find_iter(label) {
        if m.start() > last {
            segments.push(Segment {
                text: label[last..m.start()].to_string(),
                highlighted: false,
            });
        }
        segments.push(Segment {
            text: m.as_str().to_string(),
            highlighted: true,
        });
        last = m.end();
    }

    if last < label.len() {
        segments.push(Segment {
            text: label[last..].to_string(),
            highlighted: false,
        });
    }

    segments
}

/// Records whose label or code matches `re`, with their indices, in source order.
fn matching<'a>(
    re: &'a Regex,
    records: &'a [OptionRecord],
) -> impl Iterator<Item = (usize, &'a OptionRecord)> + 'a {
    records
        .iter()
        .enumerate()
        .filter(move |(_, record)| record_matches(re, record))
}

#[derive(Debug, Clone, Default)]
pub struct AutocompleteField {
    name: String,
    records: Vec<OptionRecord>,
    text: String,
    hidden_value: String,
    suggestions: Vec<Suggestion>,
}

impl AutocompleteField {
    pub fn new(name: &str, records: Vec<OptionRecord>) -> Self {
        Self {
            name: name.to_string(),
            records,
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[OptionRecord] {
        &self.records
    }

    /// Swaps in a freshly loaded record list. Any open suggestions refer to
    /// the old list, so they are dropped.
    pub fn set_records(&mut self, records: Vec<OptionRecord>) {
        debug!("{}: {} records installed", self.name, records.len());
        self.records = records;
        self.suggestions.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The value of the last selected record, or empty if nothing was picked.
    pub fn hidden_value(&self) -> &str {
        &self.hidden_value
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Keystroke handler. Typing never touches the hidden value.
    pub fn on_input(&mut self, text: &str) {
        self.text = text.to_string();
        self.suggestions.clear();

        let Some(re) = build_matcher(text) else {
            return;
        };

        self.suggestions = matching(&re, &self.records)
            .map(|(index, record)| Suggestion {
                index,
                segments: highlight(&re, &record.label),
            })
            .collect();
    }

    /// Picks the record behind `suggestion_index` (a position in
    /// [`Self::suggestions`]).
    pub fn select(&mut self, suggestion_index: usize) -> Option<&OptionRecord> {
        let index = self.suggestions.get(suggestion_index)?.index;
        self.choose(index)
    }

    fn choose(&mut self, index: usize) -> Option<&OptionRecord> {
        let record = self.records.get(index)?;

        self.text = record.label.clone();
        self.hidden_value = record.value.clone();
        self.suggestions.clear();
        info!("{}: selected {}", self.name, record.label);
        Some(record)
    }

    /// Click outside the input.
    pub fn dismiss(&mut self) {
        self.suggestions.clear();
    }

    fn resolve_index(&self, query: &str) -> Option<usize> {
        let exact = self.records.iter().position(|r| {
            r.value.eq_ignore_ascii_case(query) || r.label.eq_ignore_ascii_case(query)
        });
        if exact.is_some() {
            return exact;
        }

        let re = build_matcher(query)?;
        let mut hits = matching(&re, &self.records).map(|(i, _)| i);
        match (hits.next(), hits.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Resolves free text to a single record: an exact value or label
    /// (ignoring case) wins, otherwise the query must match exactly one record.
    pub fn resolve(&self, query: &str) -> Option<&OptionRecord> {
        self.records.get(self.resolve_index(query)?)
    }

    /// Non-interactive selection: resolves `query` and selects the result.
    pub fn pick(&mut self, query: &str) -> Option<&OptionRecord> {
        let index = self.resolve_index(query)?;
        self.choose(index)
    }
}
