use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Column used as the first half of an award file name (spreadsheet column B).
pub const NAME_PREFIX_COLUMN: usize = 1;
/// Column used as the second half of an award file name (spreadsheet column G).
pub const NAME_SUFFIX_COLUMN: usize = 6;

const INVALID_FILE_NAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AwardError {
    #[error("row {row} has no value in column {column} needed for its file name")]
    MissingNamingColumn { row: usize, column: usize },

    #[error("award sheet has no columns")]
    NoColumns,
}

/// Tabular award database: a header row plus data rows. Cells may be any
/// JSON scalar, as exported from a spreadsheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardSheet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AwardDocument {
    pub file_name: String,
    pub award_text: String,
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if INVALID_FILE_NAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// `"{B}_{G}.txt"` with characters invalid in file names replaced by `_`.
pub fn award_file_name(row_number: usize, row: &[Value]) -> Result<String, AwardError> {
    let column = |index: usize| {
        row.get(index)
            .map(|cell| cell_text(cell).trim().to_string())
            .ok_or(AwardError::MissingNamingColumn {
                row: row_number,
                column: index,
            })
    };

    let prefix = column(NAME_PREFIX_COLUMN)?;
    let suffix = column(NAME_SUFFIX_COLUMN)?;
    Ok(format!("{}.txt", sanitize_file_name(&format!("{prefix}_{suffix}"))))
}

/// One `"{column}:"` line followed by its value line, for every column.
/// Rows shorter than the header get empty values.
pub fn award_text(columns: &[String], row: &[Value]) -> String {
    columns
        .iter()
        .enumerate()
        .flat_map(|(i, name)| {
            let value = row.get(i).map(cell_text).unwrap_or_default();
            [format!("{name}:"), value]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl AwardSheet {
    pub fn documents(&self) -> Result<Vec<AwardDocument>, AwardError> {
        if self.columns.is_empty() {
            return Err(AwardError::NoColumns);
        }

        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Ok(AwardDocument {
                    file_name: award_file_name(i, row)?,
                    award_text: award_text(&self.columns, row),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<String> {
        ["Category", "Number", "Sponsor", "Deadline", "Amount", "Eligibility", "Award"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn row() -> Vec<Value> {
        vec![
            json!("Faculty"),
            json!(" 5.02 "),
            json!("College of Engineering"),
            json!("March 1"),
            json!(5000),
            Value::Null,
            json!("Research Excellence"),
        ]
    }

    #[test]
    fn test_file_name_from_columns_b_and_g() {
        assert_eq!(
            award_file_name(0, &row()).unwrap(),
            "5.02_Research Excellence.txt"
        );
    }

    #[test]
    fn test_file_name_is_sanitized() {
        let mut r = row();
        r[6] = json!("Teaching: Mentor/Advisor?");
        assert_eq!(
            award_file_name(0, &r).unwrap(),
            "5.02_Teaching_ Mentor_Advisor_.txt"
        );
    }

    #[test]
    fn test_short_row_cannot_be_named() {
        let r = vec![json!("Faculty"), json!("5.02")];
        assert_eq!(
            award_file_name(3, &r),
            Err(AwardError::MissingNamingColumn { row: 3, column: 6 })
        );
    }

    #[test]
    fn test_award_text_lists_every_column() {
        let text = award_text(&columns(), &row());
        assert_eq!(
            text,
            "Category:\nFaculty\nNumber:\n 5.02 \nSponsor:\nCollege of Engineering\n\
             Deadline:\nMarch 1\nAmount:\n5000\nEligibility:\n\nAward:\nResearch Excellence"
        );
    }

    #[test]
    fn test_award_text_pads_short_rows() {
        let cols = vec!["A".to_string(), "B".to_string()];
        assert_eq!(award_text(&cols, &[json!("x")]), "A:\nx\nB:\n");
    }

    #[test]
    fn test_sheet_documents() {
        let sheet = AwardSheet {
            columns: columns(),
            rows: vec![row(), row()],
        };
        let docs = sheet.documents().unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].award_text.contains("Research Excellence"));
    }

    #[test]
    fn test_sheet_without_columns_is_rejected() {
        let sheet = AwardSheet {
            columns: vec![],
            rows: vec![],
        };
        assert_eq!(sheet.documents(), Err(AwardError::NoColumns));
    }
}
