//! The `gradebook backup` command.

use anyhow::{Context, Result};

use gradebook_core::FileStorage;

pub fn execute(storage: &FileStorage) -> Result<()> {
    let store = super::load_store(storage)?;
    storage
        .backup(&store)
        .context("backup did not complete")?;

    println!(
        "Backed up {} student(s) to {}",
        store.len(),
        storage.backup_path().display()
    );
    Ok(())
}
