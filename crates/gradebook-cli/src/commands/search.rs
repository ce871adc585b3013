//! The `gradebook search` command.

use anyhow::Result;

use gradebook_core::statistics::StudentSummary;
use gradebook_core::FileStorage;

use crate::output::{students_table, OutputFormat};

pub fn execute(storage: &FileStorage, query: String, format: OutputFormat) -> Result<()> {
    let store = super::load_store(storage)?;
    let matches: Vec<StudentSummary> = store
        .find(&query)
        .into_iter()
        .map(StudentSummary::of)
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&matches)?),
        OutputFormat::Text if matches.is_empty() => {
            println!("No student found matching '{query}'.")
        }
        OutputFormat::Text => println!("{}", students_table(&matches)),
    }

    Ok(())
}
