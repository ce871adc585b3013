//! Descriptive statistics over score sequences.
//!
//! Every function is total: an empty input yields `0.0` for the mean and
//! `None` for the order statistics, never a division by zero or a panic.

use serde::{Deserialize, Serialize};

use crate::model::{Score, Student};

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Largest value, `None` for an empty slice.
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Smallest value, `None` for an empty slice.
pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

/// Statistical median, `None` for an empty slice.
///
/// An even-length input yields the mean of the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Every derived statistic for one student, ready for display or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: String,
    pub name: String,
    pub scores: Vec<Score>,
    pub count: usize,
    pub average: f64,
    pub highest: Option<f64>,
    pub lowest: Option<f64>,
    pub median: Option<f64>,
}

impl StudentSummary {
    pub fn of(student: &Student) -> Self {
        Self {
            id: student.id().to_string(),
            name: student.name.clone(),
            scores: student.scores().to_vec(),
            count: student.scores().len(),
            average: student.average_score(),
            highest: student.highest_score(),
            lowest: student.lowest_score(),
            median: student.median_score(),
        }
    }
}

/// One line of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStudent {
    /// 1-based position in the ranking.
    pub position: usize,
    pub id: String,
    pub name: String,
    pub average: f64,
}

/// Rank students by descending average.
///
/// The sort is stable: students with equal averages keep the order in which
/// `students` yields them.
pub fn rank<'a>(students: impl IntoIterator<Item = &'a Student>) -> Vec<RankedStudent> {
    let mut scored: Vec<(&Student, f64)> = students
        .into_iter()
        .map(|s| (s, s.average_score()))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (student, average))| RankedStudent {
            position: i + 1,
            id: student.id().to_string(),
            name: student.name.clone(),
            average,
        })
        .collect()
}
