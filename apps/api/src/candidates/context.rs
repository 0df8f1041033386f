// Builds the {CV_TEXT} value for the multiple-professor template: one
// "### CANDIDATE:" block per professor.

use serde::{Deserialize, Serialize};

use crate::candidates::retrieval::ExcerptHit;

/// A complete CV supplied directly by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub text: String,
}

/// Groups retrieved excerpts by professor, in order of first appearance.
/// Returns the formatted context and the professors it mentions.
pub fn format_candidate_context(hits: &[ExcerptHit]) -> (String, Vec<String>) {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();

    for hit in hits {
        match groups.iter_mut().find(|(name, _)| *name == hit.faculty_name) {
            Some((_, excerpts)) => excerpts.push(hit.text.as_str()),
            None => groups.push((hit.faculty_name.as_str(), vec![hit.text.as_str()])),
        }
    }

    let mut context = String::new();
    for (name, excerpts) in &groups {
        context.push_str(&format!("### CANDIDATE: {name}\n"));
        context.push_str("RELEVANT EXCERPTS:\n");
        for excerpt in excerpts {
            context.push_str(&format!("...{excerpt}...\n"));
        }
        context.push('\n');
    }

    let names = groups.into_iter().map(|(name, _)| name.to_string()).collect();
    (context, names)
}

/// Lists whole CVs, one block per professor, in the given order.
pub fn format_candidate_profiles(profiles: &[CandidateProfile]) -> String {
    let mut context = String::new();
    for profile in profiles {
        context.push_str(&format!("### CANDIDATE: {}\n", profile.name));
        context.push_str("PROFILE:\n");
        context.push_str(&profile.text);
        context.push_str("\n\n");
    }
    context
}
