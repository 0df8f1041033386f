// Award evaluation prompt templates.
// Built-in text is embedded at compile time; a PROMPTS_DIR override is loaded
// once at startup using the same file names.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::prompts::render::PromptTemplate;

/// Line prefix the evaluator uses for its explanation.
pub const REASONING_LABEL: &str = "REASONING:";

/// Line prefix the evaluator uses for its 0-5 score.
pub const SCORE_LABEL: &str = "SCORE:";

/// Output-format footer closing both templates. The task text asks for an
/// integer while this label says "float"; both are kept as written.
pub const OUTPUT_FORMAT_FOOTER: &str =
    "REASONING: [Your reasoning here]\nSCORE: [Your float score here]";

pub const SINGLE_PROFESSOR_FILE: &str = "award_to_cv_prompt.md";
pub const MULTIPLE_PROFESSORS_FILE: &str = "award_to_cvs_prompt.md";

/// Scores one professor's CV. Placeholders: {AWARD_TEXT}, {CV_TEXT}
pub const SINGLE_PROFESSOR_TEMPLATE: &str = include_str!("../../prompts/award_to_cv_prompt.md");

/// Scores every professor listed in {CV_TEXT} against {AWARD_TEXT}.
pub const MULTIPLE_PROFESSORS_TEMPLATE: &str =
    include_str!("../../prompts/award_to_cvs_prompt.md");

/// Selects the instructional wrapper; the placeholder contract is the same.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfessorMode {
    #[default]
    Single,
    Multiple,
}

impl ProfessorMode {
    pub fn file_name(self) -> &'static str {
        match self {
            ProfessorMode::Single => SINGLE_PROFESSOR_FILE,
            ProfessorMode::Multiple => MULTIPLE_PROFESSORS_FILE,
        }
    }
}

impl fmt::Display for ProfessorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfessorMode::Single => f.write_str("single"),
            ProfessorMode::Multiple => f.write_str("multiple"),
        }
    }
}

/// Both evaluation templates, parsed and ready to render.
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    single: PromptTemplate,
    multiple: PromptTemplate,
}

impl PromptLibrary {
    /// The embedded templates. These are checked by tests, so parsing cannot
    /// fail in a released build.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            single: PromptTemplate::parse(SINGLE_PROFESSOR_TEMPLATE)
                .context("built-in single-professor template is invalid")?,
            multiple: PromptTemplate::parse(MULTIPLE_PROFESSORS_TEMPLATE)
                .context("built-in multiple-professor template is invalid")?,
        })
    }

    /// Loads `award_to_cv_prompt.md` and `award_to_cvs_prompt.md` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let load = |mode: ProfessorMode| -> Result<PromptTemplate> {
            let path = dir.join(mode.file_name());
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read prompt template {}", path.display()))?;
            let template = PromptTemplate::parse(&source)
                .with_context(|| format!("Invalid prompt template {}", path.display()))?;
            if !template.source().ends_with(OUTPUT_FORMAT_FOOTER) {
                warn!(
                    "Prompt template {} does not end with the standard output footer",
                    path.display()
                );
            }
            info!("Loaded {mode} prompt template from {}", path.display());
            Ok(template)
        };

        Ok(Self {
            single: load(ProfessorMode::Single)?,
            multiple: load(ProfessorMode::Multiple)?,
        })
    }

    /// Uses `dir` when configured, the embedded templates otherwise.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::builtin(),
        }
    }

    pub fn template(&self, mode: ProfessorMode) -> &PromptTemplate {
        match mode {
            ProfessorMode::Single => &self.single,
            ProfessorMode::Multiple => &self.multiple,
        }
    }

    pub fn render(&self, mode: ProfessorMode, award_text: &str, cv_text: &str) -> String {
        self.template(mode).render(award_text, cv_text)
    }
}
