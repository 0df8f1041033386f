// Award evaluation prompts.
// Implements: template parsing, literal placeholder substitution, the
// single/multiple professor wrappers and the REASONING/SCORE output contract.

pub mod handlers;
pub mod render;
pub mod templates;

pub use templates::{PromptLibrary, ProfessorMode};
