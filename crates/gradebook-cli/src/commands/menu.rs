//! The interactive numbered menu, the default `gradebook` command.
//!
//! Every store or storage failure is printed and control returns to the menu.
//! Only a failure to talk to the terminal itself, or end of input while a
//! save on exit keeps failing, ends the session with an error.

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{bail, Result};

use gradebook_core::statistics::StudentSummary;
use gradebook_core::{FileStorage, GradebookError, RecordStore, Score, Student};

use crate::output::students_table;

const MENU: &str = "
------ Student Grade Management Menu ------
1. Add a new student
2. View list of students
3. Search for a student
4. Edit student scores
5. Delete student
6. Calculate average score for a student
7. Calculate average score for all students
8. Rank students by average score
9. Backup data
10. Restore data
11. Save data to file
12. Exit";

const NO_STUDENTS: &str = "No students are registered.";

pub fn execute(storage: FileStorage, save_on_exit: bool) -> Result<()> {
    let store = super::load_store(&storage)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    let mut menu = Menu::new(store, storage, save_on_exit, stdin.lock(), stdout.lock());
    menu.run()
}

/// A menu session over an owned store.
pub struct Menu<R, W> {
    store: RecordStore,
    storage: FileStorage,
    save_on_exit: bool,
    /// The store has changed since it was last loaded or saved.
    dirty: bool,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(
        store: RecordStore,
        storage: FileStorage,
        save_on_exit: bool,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            storage,
            save_on_exit,
            dirty: false,
            input,
            output,
        }
    }

    #[cfg(test)]
    fn into_store(self) -> RecordStore {
        self.store
    }

    /// Run until the user picks Exit or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Choose an option (1-12): ")? else {
                if self.exit()? {
                    return Ok(());
                }
                bail!(
                    "unsaved changes could not be written to {}",
                    self.storage.primary().display()
                );
            };
            tracing::debug!("menu choice: {choice}");

            match choice.as_str() {
                "1" => self.add_student()?,
                "2" => self.view_students()?,
                "3" => self.search_student()?,
                "4" => self.edit_score()?,
                "5" => self.delete_student()?,
                "6" => self.student_average()?,
                "7" => self.overall_average()?,
                "8" => self.rank_students()?,
                "9" => self.backup()?,
                "10" => self.restore()?,
                "11" => self.save()?,
                "12" => {
                    if self.exit()? {
                        return Ok(());
                    }
                    writeln!(self.output, "Changes were not saved; returning to the menu.")?;
                }
                _ => self.error("Invalid selection.")?,
            }
        }
    }

    /// Print `label` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ok(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "OK: {message}")?;
        Ok(())
    }

    fn error(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "ERROR: {message}")?;
        Ok(())
    }

    fn add_student(&mut self) -> Result<()> {
        let Some(id) = self.prompt("Enter student ID: ")? else {
            return Ok(());
        };
        if id.is_empty() {
            return self.error("Student ID must not be empty.");
        }
        let Some(name) = self.prompt("Enter student name: ")? else {
            return Ok(());
        };

        let mut student = Student::new(id, name);
        while let Some(input) =
            self.prompt("Enter a score for the student (press Enter without typing to stop): ")?
        {
            if input.is_empty() {
                break;
            }
            match Score::parse(&input) {
                Ok(score) => student.push_score(score),
                Err(e) => self.error(e)?,
            }
        }

        if let Some(previous) = self.store.insert(student) {
            writeln!(
                self.output,
                "Warning: replaced existing student '{}' ({}).",
                previous.id(),
                previous.name
            )?;
        }
        self.dirty = true;
        self.ok("Student added successfully.")
    }

    fn view_students(&mut self) -> Result<()> {
        if self.store.is_empty() {
            return self.error(NO_STUDENTS);
        }
        let table = students_table(&self.store.summaries());
        writeln!(self.output, "{table}")?;
        Ok(())
    }

    fn search_student(&mut self) -> Result<()> {
        let Some(query) = self.prompt("Enter student ID or name to search: ")? else {
            return Ok(());
        };

        let matches: Vec<StudentSummary> = self
            .store
            .find(&query)
            .into_iter()
            .map(StudentSummary::of)
            .collect();

        if matches.is_empty() {
            return self.error("No student found with the given ID or name.");
        }
        writeln!(self.output, "{}", students_table(&matches))?;
        Ok(())
    }

    fn edit_score(&mut self) -> Result<()> {
        let Some(id) = self.prompt("Enter the student ID whose scores you want to edit: ")? else {
            return Ok(());
        };
        if !self.store.contains(&id) {
            return self.error(GradebookError::NotFound { id });
        }
        let Some(input) = self.prompt("Enter the new score to add: ")? else {
            return Ok(());
        };

        let store = &mut self.store;
        match Score::parse(&input).and_then(|score| store.add_score(&id, score.value())) {
            Ok(_) => {
                self.dirty = true;
                self.ok("Score added successfully.")
            }
            Err(e) => self.error(e),
        }
    }

    fn delete_student(&mut self) -> Result<()> {
        let Some(id) = self.prompt("Enter the student ID you want to delete: ")? else {
            return Ok(());
        };

        match self.store.delete_student(&id) {
            Ok(_) => {
                self.dirty = true;
                self.ok("Student deleted successfully.")
            }
            Err(e) => self.error(e),
        }
    }

    fn student_average(&mut self) -> Result<()> {
        let Some(id) =
            self.prompt("Enter the student ID whose average you want to calculate: ")?
        else {
            return Ok(());
        };

        let line = self
            .store
            .get(&id)
            .map(|s| format!("Average score for {}: {:.2}", s.name, s.average_score()));
        match line {
            Some(line) => {
                writeln!(self.output, "{line}")?;
                Ok(())
            }
            None => self.error(GradebookError::NotFound { id }),
        }
    }

    fn overall_average(&mut self) -> Result<()> {
        if self.store.is_empty() {
            return self.error(NO_STUDENTS);
        }
        let average = self.store.overall_average();
        writeln!(self.output, "Average score of all students: {average:.2}")?;
        Ok(())
    }

    fn rank_students(&mut self) -> Result<()> {
        if self.store.is_empty() {
            return self.error(NO_STUDENTS);
        }
        writeln!(self.output, "Ranking of students based on average score:")?;
        for r in self.store.rank() {
            writeln!(
                self.output,
                "{}. {} - Average: {:.2}",
                r.position, r.name, r.average
            )?;
        }
        Ok(())
    }

    fn backup(&mut self) -> Result<()> {
        match self.storage.backup(&self.store) {
            Ok(()) => {
                let message = format!("Data backed up to {}.", self.storage.backup_path().display());
                self.ok(message)
            }
            Err(e) => self.error(e),
        }
    }

    fn restore(&mut self) -> Result<()> {
        let backup = self.storage.backup_path();
        if !backup.exists() {
            let message = format!(
                "backup file not found: {}; the student list was left unchanged.",
                backup.display()
            );
            return self.error(message);
        }

        let report = match self.storage.restore(&mut self.store) {
            Ok(report) => report,
            Err(e) => return self.error(e),
        };

        self.dirty = true;
        self.ok(format!(
            "Data restored from {} ({} student(s)).",
            report.path.display(),
            report.loaded
        ))
    }

    fn save(&mut self) -> Result<()> {
        match self.storage.save(&self.store) {
            Ok(()) => {
                self.dirty = false;
                let message = format!("Data saved to {}.", self.storage.primary().display());
                self.ok(message)
            }
            Err(e) => self.error(e),
        }
    }

    /// Finish the session; `false` when a save on exit failed and the
    /// changes are still only in memory.
    fn exit(&mut self) -> Result<bool> {
        if self.dirty {
            if self.save_on_exit {
                self.save()?;
                if self.dirty {
                    return Ok(false);
                }
            } else {
                writeln!(self.output, "Warning: unsaved changes were discarded.")?;
            }
        }
        writeln!(self.output, "Exiting the program...")?;
        Ok(true)
    }
}
