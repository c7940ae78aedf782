//! Single owner of report state
//!
//! Section text and the running error log live in one `ReportAccumulator`
//! held by the aggregating task. Collection tasks never touch it directly;
//! their snapshots are folded in once they arrive over the results channel.

use std::collections::BTreeMap;

use super::placeholder::Placeholder;

/// `ERRORS` text for a run that logged nothing
pub const NO_ERRORS: &str = "No errors happened or were found while running OADP must-gather";

pub const WARNING_MARKER: &str = "⚠️";
pub const ERROR_MARKER: &str = "❌";

/// Rendered text per section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap(BTreeMap<Placeholder, String>);

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: Placeholder) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn set(&mut self, key: Placeholder, text: impl Into<String>) {
        self.0.insert(key, text.into());
    }

    /// Set to non-empty text
    pub fn is_set(&self, key: Placeholder) -> bool {
        self.get(key).is_some_and(|text| !text.is_empty())
    }

    /// First key, in template order, without a non-empty value
    pub fn first_missing(&self) -> Option<Placeholder> {
        Placeholder::ALL.into_iter().find(|key| !self.is_set(*key))
    }
}

/// Append-only warnings and errors, in the order they were recorded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLog(Vec<String>);

impl ErrorLog {
    pub fn push(&mut self, entry: String) {
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Text for the `ERRORS` section
    pub fn render(&self) -> String {
        if self.0.is_empty() {
            return NO_ERRORS.to_string();
        }
        self.0
            .iter()
            .map(|entry| format!("{}\n\n", entry))
            .collect::<String>()
            .trim_end()
            .to_string()
    }
}

/// Collects section text and log entries for one run
#[derive(Debug, Default)]
pub struct ReportAccumulator {
    sections: PlaceholderMap,
    log: ErrorLog,
}

impl ReportAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the text of one section; last write wins
    ///
    /// `ERRORS` is derived from the log in `finalize`, so setting it here has
    /// no effect on the rendered report.
    pub fn set_section(&mut self, key: Placeholder, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            tracing::debug!("Section {} set to empty text", key);
        }
        self.sections.set(key, text);
    }

    pub fn is_set(&self, key: Placeholder) -> bool {
        self.sections.is_set(key)
    }

    pub fn append_warning(&mut self, text: impl AsRef<str>) {
        self.log
            .push(format!("{} {}", WARNING_MARKER, text.as_ref()));
    }

    pub fn append_error(&mut self, text: impl AsRef<str>) {
        self.log.push(format!("{} {}", ERROR_MARKER, text.as_ref()));
    }

    pub fn log(&self) -> &ErrorLog {
        &self.log
    }

    /// Fill every unset section except `ERRORS` with `text`
    ///
    /// Returns the keys that were filled, in template order.
    pub fn fill_unset(&mut self, text: &str) -> Vec<Placeholder> {
        let missing: Vec<_> = Placeholder::ALL
            .into_iter()
            .filter(|key| *key != Placeholder::Errors && !self.sections.is_set(*key))
            .collect();
        for key in &missing {
            self.sections.set(*key, text);
        }
        missing
    }

    /// Fold the log into `ERRORS` and hand over the section map
    pub fn finalize(mut self) -> PlaceholderMap {
        self.sections.set(Placeholder::Errors, self.log.render());
        self.sections
    }
}
