//! Template substitution and summary output

use std::path::{Path, PathBuf};

use super::ReportError;
use super::accumulator::PlaceholderMap;
use super::placeholder::Placeholder;
use super::template::SUMMARY_TEMPLATE;
use crate::artifacts::layout::SUMMARY_FILE;
use crate::artifacts::write_atomic;

/// Renders a `PlaceholderMap` into the summary document
#[derive(Debug, Clone)]
pub struct ReportEmitter {
    template: String,
}

impl Default for ReportEmitter {
    fn default() -> Self {
        Self::new(SUMMARY_TEMPLATE)
    }
}

impl ReportEmitter {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Substitute every section into the template
    ///
    /// Fails if the template lacks a token or carries an unknown one, or a
    /// section has no text. Tokens are only read from the template, so
    /// section text is inserted verbatim even when it looks like a token.
    pub fn render(&self, sections: &PlaceholderMap) -> Result<String, ReportError> {
        if let Some(key) = Placeholder::ALL
            .into_iter()
            .find(|key| !self.template.contains(&key.token()))
        {
            return Err(ReportError::TemplateMissing(key));
        }
        if let Some(key) = sections.first_missing() {
            return Err(ReportError::MissingSection(key));
        }

        substitute(&self.template, sections)
    }

    /// Render and write the summary at `root`, replacing any previous one
    pub fn emit(&self, sections: &PlaceholderMap, root: &Path) -> Result<PathBuf, ReportError> {
        let rendered = self.render(sections)?;
        let path = root.join(SUMMARY_FILE);
        write_atomic(&path, rendered.as_bytes()).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Summary written to {}", path.display());
        Ok(path)
    }
}

/// Replace each `<<KEY>>` token of `template` in a single left-to-right pass
fn substitute(template: &str, sections: &PlaceholderMap) -> Result<String, ReportError> {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("<<") {
        rendered.push_str(&rest[..start]);
        let body = &rest[start + 2..];
        match token_key(body) {
            Some(key) => {
                let placeholder: Placeholder = key
                    .parse()
                    .map_err(|_| ReportError::UnknownToken(format!("<<{}>>", key)))?;
                rendered.push_str(sections.get(placeholder).unwrap_or_default());
                rest = &body[key.len() + 2..];
            }
            None => {
                rendered.push_str("<<");
                rest = body;
            }
        }
    }
    rendered.push_str(rest);
    Ok(rendered)
}

/// Key of a token whose opening `<<` directly precedes `body`
fn token_key(body: &str) -> Option<&str> {
    let end = body.find(">>")?;
    let key = &body[..end];
    (!key.is_empty() && key.chars().all(|c| c.is_ascii_uppercase() || c == '_')).then_some(key)
}
