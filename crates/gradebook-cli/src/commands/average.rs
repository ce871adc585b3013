//! The `gradebook average` command.

use anyhow::Result;

use gradebook_core::{FileStorage, GradebookError};

pub fn execute(storage: &FileStorage, id: Option<String>) -> Result<()> {
    let store = super::load_store(storage)?;

    match id {
        Some(id) => {
            let student = store
                .get(&id)
                .ok_or_else(|| GradebookError::NotFound { id: id.clone() })?;
            println!(
                "Average score for {}: {:.2}",
                student.name,
                student.average_score()
            );
        }
        None if store.is_empty() => println!("No students are registered."),
        None => println!("Average score of all students: {:.2}", store.overall_average()),
    }

    Ok(())
}
