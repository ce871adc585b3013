//! The in-memory record store.
//!
//! Students are kept in insertion order alongside an identifier index. The
//! index always maps a key to the position of the student whose `id()` equals
//! that key.

use std::collections::HashMap;

use crate::error::{GradebookError, Result};
use crate::model::{Score, Student};
use crate::statistics::{self, RankedStudent, StudentSummary};

/// Every student known to the application, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    students: Vec<Student>,
    index: HashMap<String, usize>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Students in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Student> {
        self.index.get(id).map(|&i| &self.students[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Student> {
        match self.index.get(id) {
            Some(&i) => Some(&mut self.students[i]),
            None => None,
        }
    }

    /// Register a student with no scores.
    ///
    /// An existing student with the same identifier is replaced in place and
    /// returned.
    pub fn add_student(&mut self, id: impl Into<String>, name: impl Into<String>) -> Option<Student> {
        self.insert(Student::new(id, name))
    }

    /// Insert a fully built student, replacing any student with the same
    /// identifier while keeping that student's position.
    pub fn insert(&mut self, student: Student) -> Option<Student> {
        match self.index.get(student.id()) {
            Some(&i) => Some(std::mem::replace(&mut self.students[i], student)),
            None => {
                self.index
                    .insert(student.id().to_string(), self.students.len());
                self.students.push(student);
                None
            }
        }
    }

    /// Append a score to the student with identifier `id`.
    pub fn add_score(&mut self, id: &str, value: f64) -> Result<Score> {
        let student = self
            .get_mut(id)
            .ok_or_else(|| GradebookError::NotFound { id: id.to_string() })?;
        student.add_score(value)
    }

    /// Remove and return the student with identifier `id`.
    pub fn delete_student(&mut self, id: &str) -> Result<Student> {
        let position = self
            .index
            .remove(id)
            .ok_or_else(|| GradebookError::NotFound { id: id.to_string() })?;
        let removed = self.students.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Ok(removed)
    }

    /// Students whose identifier contains `query` (case-sensitive) or whose
    /// name contains `query` ignoring case.
    pub fn find(&self, query: &str) -> Vec<&Student> {
        let needle = query.to_lowercase();
        self.students
            .iter()
            .filter(|s| s.id().contains(query) || s.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Mean over every score of every student, weighted by count.
    pub fn overall_average(&self) -> f64 {
        let all: Vec<f64> = self
            .students
            .iter()
            .flat_map(|s| s.scores().iter().map(|score| score.value()))
            .collect();
        statistics::mean(&all)
    }

    /// Students by descending average; equal averages keep insertion order.
    pub fn rank(&self) -> Vec<RankedStudent> {
        statistics::rank(&self.students)
    }

    pub fn summaries(&self) -> Vec<StudentSummary> {
        self.students.iter().map(StudentSummary::of).collect()
    }

    /// Replace the whole contents with `other`'s.
    pub fn replace_with(&mut self, other: RecordStore) {
        *self = other;
    }
}

impl FromIterator<Student> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Student>>(iter: I) -> Self {
        let mut store = RecordStore::new();
        for student in iter {
            store.insert(student);
        }
        store
    }
}
