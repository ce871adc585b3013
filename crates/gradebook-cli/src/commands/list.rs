//! The `gradebook list` command.

use anyhow::Result;

use gradebook_core::FileStorage;

use crate::output::{students_table, OutputFormat};

pub fn execute(storage: &FileStorage, format: OutputFormat) -> Result<()> {
    let store = super::load_store(storage)?;
    let summaries = store.summaries();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Text if summaries.is_empty() => println!("No students are registered."),
        OutputFormat::Text => println!("{}", students_table(&summaries)),
    }

    Ok(())
}
