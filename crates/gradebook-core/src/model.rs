//! Core data model types for gradebook.
//!
//! A [`Score`] can only be built through validation, so a [`Student`]'s score
//! sequence holds values in [`MIN_SCORE`, `MAX_SCORE`] and nothing else.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GradebookError, Result};
use crate::statistics;

/// Lowest accepted score.
pub const MIN_SCORE: f64 = 0.0;
/// Highest accepted score.
pub const MAX_SCORE: f64 = 20.0;

/// One graded assessment, a finite value in [0, 20].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    /// Validate a numeric score.
    pub fn new(value: f64) -> Result<Self> {
        if (MIN_SCORE..=MAX_SCORE).contains(&value) {
            // -0.0 is in range but would print as "-0".
            Ok(Score(if value == 0.0 { 0.0 } else { value }))
        } else {
            Err(GradebookError::InvalidScore {
                input: value.to_string(),
            })
        }
    }

    /// Validate a score typed by a user or read from a file.
    ///
    /// Surrounding whitespace is ignored. Text that is not a decimal number
    /// and numbers outside the range are both `InvalidScore`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let value: f64 = trimmed.parse().map_err(|_| GradebookError::InvalidScore {
            input: trimmed.to_string(),
        })?;
        Score::new(value).map_err(|_| GradebookError::InvalidScore {
            input: trimmed.to_string(),
        })
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Renders the shortest literal that parses back to the same `f64`.
impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Score {
    type Err = GradebookError;

    fn from_str(s: &str) -> Result<Self> {
        Score::parse(s)
    }
}

impl TryFrom<f64> for Score {
    type Error = GradebookError;

    fn try_from(value: f64) -> Result<Self> {
        Score::new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> f64 {
        score.0
    }
}

/// A registered student and the scores recorded so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    id: String,
    /// Display name.
    pub name: String,
    scores: Vec<Score>,
}

impl Student {
    /// A new student with no scores.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scores: Vec::new(),
        }
    }

    /// A student with an already-validated score sequence.
    pub fn with_scores(id: impl Into<String>, name: impl Into<String>, scores: Vec<Score>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scores,
        }
    }

    /// The identifier, fixed at construction.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Scores in the order they were recorded.
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    pub fn score_values(&self) -> Vec<f64> {
        self.scores.iter().map(|s| s.value()).collect()
    }

    /// Append `value` if it is a valid score.
    ///
    /// On `InvalidScore` the sequence is left exactly as it was.
    pub fn add_score(&mut self, value: f64) -> Result<Score> {
        let score = Score::new(value)?;
        self.scores.push(score);
        Ok(score)
    }

    pub fn push_score(&mut self, score: Score) {
        self.scores.push(score);
    }

    /// Mean of the scores, `0.0` when there are none.
    pub fn average_score(&self) -> f64 {
        statistics::mean(&self.score_values())
    }

    pub fn highest_score(&self) -> Option<f64> {
        statistics::max(&self.score_values())
    }

    pub fn lowest_score(&self) -> Option<f64> {
        statistics::min(&self.score_values())
    }

    pub fn median_score(&self) -> Option<f64> {
        statistics::median(&self.score_values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bounds_are_inclusive() {
        assert!(Score::new(0.0).is_ok());
        assert!(Score::new(20.0).is_ok());
        assert!(Score::new(-0.01).is_err());
        assert!(Score::new(20.01).is_err());
    }

    #[test]
    fn negative_zero_is_stored_as_zero() {
        let score = Score::new(-0.0).unwrap();
        assert!(score.value().is_sign_positive());
        assert_eq!(score.to_string(), "0");
        assert_eq!(Score::parse("-0").unwrap().to_string(), "0");
    }

    #[test]
    fn score_rejects_non_finite() {
        assert!(Score::new(f64::NAN).is_err());
        assert!(Score::new(f64::INFINITY).is_err());
        assert!(Score::parse("inf").is_err());
        assert!(Score::parse("NaN").is_err());
    }

    #[test]
    fn score_parse_trims_and_validates() {
        assert_eq!(Score::parse(" 12.5 ").unwrap().value(), 12.5);
        assert_eq!("7".parse::<Score>().unwrap().value(), 7.0);

        let err = Score::parse("twelve").unwrap_err();
        assert!(matches!(err, GradebookError::InvalidScore { ref input } if input == "twelve"));

        let err = Score::parse("21").unwrap_err();
        assert!(matches!(err, GradebookError::InvalidScore { ref input } if input == "21"));
    }

    #[test]
    fn score_display_round_trips_exactly() {
        for v in [0.0, 0.1, 1.0 / 3.0, 9.999_999_999_999_998, 15.0, 19.95, 20.0] {
            let score = Score::new(v).unwrap();
            let parsed = Score::parse(&score.to_string()).unwrap();
            assert_eq!(parsed.value().to_bits(), v.to_bits(), "value {v}");
        }
    }

    #[test]
    fn add_score_accepts_only_range() {
        let mut s = Student::new("s1", "Ana Silva");
        assert!(s.add_score(12.0).is_ok());
        assert!(s.add_score(25.0).is_err());
        assert!(s.add_score(-1.0).is_err());
        assert!(s.add_score(f64::NAN).is_err());
        assert_eq!(s.scores().len(), 1);
        assert_eq!(s.score_values(), vec![12.0]);
    }

    #[test]
    fn empty_student_statistics() {
        let s = Student::new("s1", "Ana");
        assert_eq!(s.average_score(), 0.0);
        assert!(s.highest_score().is_none());
        assert!(s.lowest_score().is_none());
        assert!(s.median_score().is_none());
    }

    #[test]
    fn student_statistics() {
        let mut s = Student::new("s1", "Ana");
        for v in [10.0, 20.0] {
            s.add_score(v).unwrap();
        }
        assert_eq!(s.average_score(), 15.0);
        assert_eq!(s.highest_score(), Some(20.0));
        assert_eq!(s.lowest_score(), Some(10.0));
        assert_eq!(s.median_score(), Some(15.0));
    }

    #[test]
    fn score_deserialize_validates() {
        let ok: Score = serde_json::from_str("18.5").unwrap();
        assert_eq!(ok.value(), 18.5);
        assert!(serde_json::from_str::<Score>("42").is_err());
    }
}
