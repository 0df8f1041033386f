//! Prompt rendering: parses a template into literal segments and placeholder
//! slots, then substitutes caller text in a single pass.
//!
//! Caller values are written straight into the output buffer and never
//! rescanned, so text that looks like a placeholder (`{CV_TEXT}` inside an
//! award description, stray braces in a CV) comes through unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named insertion point in a prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    AwardText,
    CvText,
}

impl Placeholder {
    pub const ALL: [Placeholder; 2] = [Placeholder::AwardText, Placeholder::CvText];

    /// The literal token as it appears in template source.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::AwardText => "{AWARD_TEXT}",
            Placeholder::CvText => "{CV_TEXT}",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("template does not contain the {0} placeholder")]
    MissingPlaceholder(Placeholder),

    #[error("no value supplied for the {0} placeholder")]
    MissingValue(Placeholder),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Placeholder),
}

/// A validated prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parses template source. Surrounding whitespace is trimmed; both
    /// placeholders must occur at least once.
    pub fn parse(source: &str) -> Result<Self, PromptError> {
        let source = source.trim().to_string();
        let segments = split_segments(&source);

        for placeholder in Placeholder::ALL {
            if !segments.contains(&Segment::Slot(placeholder)) {
                return Err(PromptError::MissingPlaceholder(placeholder));
            }
        }

        Ok(Self { source, segments })
    }

    /// The template text exactly as it will be rendered around the slots.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn render(&self, award_text: &str, cv_text: &str) -> String {
        let extra = award_text.len() + cv_text.len();
        let mut out = String::with_capacity(self.source.len() + extra);

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(Placeholder::AwardText) => out.push_str(award_text),
                Segment::Slot(Placeholder::CvText) => out.push_str(cv_text),
            }
        }

        out
    }

    /// Like [`render`](Self::render) but for values that may be absent,
    /// e.g. optional request fields.
    pub fn try_render(
        &self,
        award_text: Option<&str>,
        cv_text: Option<&str>,
    ) -> Result<String, PromptError> {
        let award_text = award_text.ok_or(PromptError::MissingValue(Placeholder::AwardText))?;
        let cv_text = cv_text.ok_or(PromptError::MissingValue(Placeholder::CvText))?;
        Ok(self.render(award_text, cv_text))
    }
}

/// Splits source into literals and slots. Braces that do not form one of the
/// known tokens stay part of the surrounding literal.
fn split_segments(source: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = source[cursor..].find('{') {
        let brace = cursor + offset;
        let rest = &source[brace..];

        match Placeholder::ALL
            .into_iter()
            .find(|p| rest.starts_with(p.token()))
        {
            Some(placeholder) => {
                if brace > literal_start {
                    segments.push(Segment::Literal(source[literal_start..brace].to_string()));
                }
                segments.push(Segment::Slot(placeholder));
                cursor = brace + placeholder.token().len();
                literal_start = cursor;
            }
            None => cursor = brace + 1,
        }
    }

    if literal_start < source.len() {
        segments.push(Segment::Literal(source[literal_start..].to_string()));
    }

    segments
}
