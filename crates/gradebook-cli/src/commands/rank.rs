//! The `gradebook rank` command.

use anyhow::Result;

use gradebook_core::FileStorage;

use crate::output::{ranking_table, OutputFormat};

pub fn execute(storage: &FileStorage, format: OutputFormat) -> Result<()> {
    let store = super::load_store(storage)?;
    let ranking = store.rank();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ranking)?),
        OutputFormat::Text if ranking.is_empty() => println!("No students are registered."),
        OutputFormat::Text => {
            println!("Ranking of students based on average score:");
            println!("{}", ranking_table(&ranking));
        }
    }

    Ok(())
}
