use serde::{Deserialize, Serialize};

/// Administrative override of every score counter.
///
/// Edits are trusted manual corrections: any non-negative values are
/// accepted, whether or not tennis could actually produce them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreEdit {
    pub sets_a: u32,
    pub sets_b: u32,
    pub games_a: u32,
    pub games_b: u32,
    pub points_a: u32,
    pub points_b: u32,
    pub is_tiebreak: bool,
}

/// Field names in the order `ScoreEdit::parse` expects them.
pub const EDIT_FIELDS: [&str; 7] = [
    "sets_a",
    "sets_b",
    "games_a",
    "games_b",
    "points_a",
    "points_b",
    "is_tiebreak",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("invalid value '{value}' for {field}")]
    InvalidEdit { field: &'static str, value: String },
}

impl ScoreEdit {
    /// Parse seven textual values. The first bad value rejects the whole edit.
    pub fn parse(values: &[&str; 7]) -> Result<ScoreEdit, EditError> {
        let count = |i: usize| -> Result<u32, EditError> {
            values[i]
                .trim()
                .parse::<u32>()
                .map_err(|_| EditError::InvalidEdit {
                    field: EDIT_FIELDS[i],
                    value: values[i].to_string(),
                })
        };
        Ok(ScoreEdit {
            sets_a: count(0)?,
            sets_b: count(1)?,
            games_a: count(2)?,
            games_b: count(3)?,
            points_a: count(4)?,
            points_b: count(5)?,
            is_tiebreak: parse_flag(values[6]).ok_or_else(|| EditError::InvalidEdit {
                field: EDIT_FIELDS[6],
                value: values[6].to_string(),
            })?,
        })
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}
