// Award database extraction.
// Turns rows of the awards spreadsheet into named award-criteria documents
// that feed the {AWARD_TEXT} placeholder.

pub mod handlers;
pub mod sheet;
