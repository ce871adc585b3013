//! Delimited text format for the record store.
//!
//! ```text
//! ID,Name,Scores
//! s1,Ana Silva,12;17.5;20
//! s2,"Costa, Bruno",
//! ```
//!
//! Fields are separated by `,`, the score list by `;`. A field containing a
//! comma, a double quote or a line break is wrapped in double quotes with
//! inner quotes doubled.

use std::borrow::Cow;
use std::fmt;

use crate::error::GradebookError;
use crate::model::{Score, Student};
use crate::store::RecordStore;

/// First line of every data file.
pub const HEADER: &str = "ID,Name,Scores";
pub const FIELD_DELIMITER: char = ',';
pub const SCORE_DELIMITER: char = ';';

const FIELD_COUNT: usize = 3;

/// A persisted row that was left out of a decoded store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line on which the row starts.
    pub line: usize,
    pub reason: String,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

impl From<SkippedRow> for GradebookError {
    fn from(row: SkippedRow) -> Self {
        GradebookError::MalformedRecord {
            line: row.line,
            reason: row.reason,
        }
    }
}

/// Result of decoding a data file.
#[derive(Debug, Default)]
pub struct Decoded {
    pub store: RecordStore,
    pub skipped: Vec<SkippedRow>,
}

/// Serialize the store: header, then one row per student in iteration order.
pub fn encode(store: &RecordStore) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + store.len() * 32);
    out.push_str(HEADER);
    out.push('\n');
    for student in store.iter() {
        out.push_str(&encode_row(student));
        out.push('\n');
    }
    out
}

/// Serialize a single student as one row, without the line terminator.
pub fn encode_row(student: &Student) -> String {
    let mut scores = String::new();
    for (i, score) in student.scores().iter().enumerate() {
        if i > 0 {
            scores.push(SCORE_DELIMITER);
        }
        scores.push_str(&score.to_string());
    }

    format!(
        "{}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{}",
        quote_field(student.id()),
        quote_field(&student.name),
        scores
    )
}

/// Parse a data file.
///
/// The first record is the header and is discarded unread. Blank lines are
/// ignored. Rows that cannot be turned into a student are skipped, logged,
/// and listed in [`Decoded::skipped`]; the remaining rows still load.
pub fn decode(text: &str) -> Decoded {
    let mut decoded = Decoded::default();

    for record in split_records(text).into_iter().skip(1) {
        let parsed = record.and_then(|raw| {
            if raw.is_blank() {
                return Ok(None);
            }
            parse_row(&raw).map(Some)
        });

        match parsed {
            Ok(Some(student)) => {
                if let Some(previous) = decoded.store.insert(student) {
                    tracing::debug!("duplicate ID '{}' in data file, last row wins", previous.id());
                }
            }
            Ok(None) => {}
            Err(row) => {
                tracing::warn!("skipping malformed record: {}", GradebookError::from(row.clone()));
                decoded.skipped.push(row);
            }
        }
    }

    decoded
}

fn parse_row(raw: &RawRecord) -> Result<Student, SkippedRow> {
    let malformed = |reason: String| SkippedRow {
        line: raw.line,
        reason,
    };

    if raw.fields.len() != FIELD_COUNT {
        return Err(malformed(format!(
            "expected {FIELD_COUNT} fields, found {}",
            raw.fields.len()
        )));
    }
    if raw.fields[0].trim().is_empty() {
        return Err(malformed("empty identifier".to_string()));
    }

    let scores = parse_scores(&raw.fields[2]).map_err(|e| malformed(e.to_string()))?;
    Ok(Student::with_scores(
        raw.fields[0].as_str(),
        raw.fields[1].as_str(),
        scores,
    ))
}

/// Parse a `;`-separated score list. An empty field is an empty list.
pub fn parse_scores(field: &str) -> Result<Vec<Score>, GradebookError> {
    if field.trim().is_empty() {
        return Ok(Vec::new());
    }
    field.split(SCORE_DELIMITER).map(Score::parse).collect()
}

fn quote_field(value: &str) -> Cow<'_, str> {
    if value.contains([FIELD_DELIMITER, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// One record as split from the text, before interpretation.
#[derive(Debug)]
struct RawRecord {
    line: usize,
    fields: Vec<String>,
}

impl RawRecord {
    fn is_blank(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].trim().is_empty()
    }
}

/// Split text into records, honouring quoted fields that span lines.
fn split_records(text: &str) -> Vec<Result<RawRecord, SkippedRow>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            '\n' if in_quotes => {
                line += 1;
                current.push('\n');
            }
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut current));
                records.push(Ok(RawRecord {
                    line: record_line,
                    fields: std::mem::take(&mut fields),
                }));
                line += 1;
                record_line = line;
            }
            FIELD_DELIMITER if !in_quotes => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }

    if in_quotes {
        records.push(Err(SkippedRow {
            line: record_line,
            reason: "unterminated quoted field".into(),
        }));
    } else if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
        records.push(Ok(RawRecord {
            line: record_line,
            fields,
        }));
    }

    records
}
