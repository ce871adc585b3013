pub mod average;
pub mod backup;
pub mod init;
pub mod list;
pub mod menu;
pub mod rank;
pub mod restore;
pub mod search;

use anyhow::{Context, Result};

use gradebook_core::{FileStorage, RecordStore};

/// Load the primary data file. Skipped rows are logged by the decoder.
pub fn load_store(storage: &FileStorage) -> Result<RecordStore> {
    let (store, _) = storage
        .load()
        .with_context(|| format!("failed to load {}", storage.primary().display()))?;
    Ok(store)
}
