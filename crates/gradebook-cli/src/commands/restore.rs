//! The `gradebook restore` command.
//!
//! Outside the interactive menu there is no session to hold the restored
//! records, so the backup's content is written straight to the primary file.

use anyhow::{Context, Result};

use gradebook_core::{FileStorage, RecordStore};

pub fn execute(storage: &FileStorage) -> Result<()> {
    anyhow::ensure!(
        storage.backup_path().exists(),
        "backup file not found: {}",
        storage.backup_path().display()
    );

    let mut store = RecordStore::new();
    storage
        .restore(&mut store)
        .context("failed to read backup")?;

    storage
        .save(&store)
        .context("restored records could not be saved")?;

    println!(
        "Restored {} student(s) from {} into {}",
        store.len(),
        storage.backup_path().display(),
        storage.primary().display()
    );
    Ok(())
}
