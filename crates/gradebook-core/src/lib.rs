//! gradebook-core: student records, score statistics, and flat-file persistence.
//!
//! This crate defines the data model, the in-memory record store, and the
//! text format and file storage the `gradebook` CLI builds on.

pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod statistics;
pub mod storage;
pub mod store;

pub use error::{GradebookError, Result};
pub use model::{Score, Student};
pub use storage::FileStorage;
pub use store::RecordStore;
