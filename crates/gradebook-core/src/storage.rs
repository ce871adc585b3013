//! File-backed persistence for the record store.
//!
//! Writes go to a sibling temp file that is synced and then renamed over the
//! destination, so a reader sees either the old file or the complete new one.

use std::ffi::OsString;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::codec::{self, SkippedRow};
use crate::error::{GradebookError, Result};
use crate::store::RecordStore;

/// Default primary data file.
pub const DEFAULT_DATA_FILE: &str = "students.csv";
/// Default backup file.
pub const DEFAULT_BACKUP_FILE: &str = "students_backup.csv";

/// What happened while reading a data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub path: PathBuf,
    /// The file did not exist; the store was treated as empty.
    pub missing: bool,
    /// Number of students loaded.
    pub loaded: usize,
    /// Rows that could not be parsed and were left out.
    pub skipped: Vec<SkippedRow>,
}

/// A primary data file and its backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    primary: PathBuf,
    backup: PathBuf,
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE, DEFAULT_BACKUP_FILE)
    }
}

impl FileStorage {
    pub fn new(primary: impl Into<PathBuf>, backup: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            backup: backup.into(),
        }
    }

    pub fn primary(&self) -> &Path {
        &self.primary
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    /// Read the primary file. A missing file is an empty store.
    pub fn load(&self) -> Result<(RecordStore, LoadReport)> {
        load_from(&self.primary)
    }

    /// Replace the primary file with the store's contents.
    pub fn save(&self, store: &RecordStore) -> Result<()> {
        write_to(&self.primary, store)?;
        tracing::debug!("saved {} students to {}", store.len(), self.primary.display());
        Ok(())
    }

    /// Write the store to the backup file, regardless of the primary's state.
    pub fn backup(&self, store: &RecordStore) -> Result<()> {
        write_to(&self.backup, store)?;
        tracing::debug!("backed up {} students to {}", store.len(), self.backup.display());
        Ok(())
    }

    /// Replace the store's contents with the backup file's.
    ///
    /// Unsaved changes in `store` are discarded. The primary file is not
    /// touched. A missing backup leaves the store empty.
    pub fn restore(&self, store: &mut RecordStore) -> Result<LoadReport> {
        let (restored, report) = load_from(&self.backup)?;
        if report.missing {
            tracing::warn!("backup file {} not found, store is now empty", self.backup.display());
        }
        store.replace_with(restored);
        Ok(report)
    }
}

/// Read and decode a data file at `path`.
pub fn load_from(path: &Path) -> Result<(RecordStore, LoadReport)> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("{} not found, starting empty", path.display());
            let report = LoadReport {
                path: path.to_path_buf(),
                missing: true,
                loaded: 0,
                skipped: Vec::new(),
            };
            return Ok((RecordStore::new(), report));
        }
        Err(e) => return Err(GradebookError::io(path, e)),
    };

    let decoded = codec::decode(&text);
    tracing::debug!(
        "loaded {} students from {} ({} skipped)",
        decoded.store.len(),
        path.display(),
        decoded.skipped.len()
    );

    let report = LoadReport {
        path: path.to_path_buf(),
        missing: false,
        loaded: decoded.store.len(),
        skipped: decoded.skipped,
    };
    Ok((decoded.store, report))
}

/// Encode `store` and atomically replace the file at `path`.
pub fn write_to(path: &Path, store: &RecordStore) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| GradebookError::io(parent, e))?;
        }
    }

    let temp_path = temp_path_for(path);
    let cleanup_and_err = |e| {
        let _ = fs::remove_file(&temp_path);
        GradebookError::io(path, e)
    };

    let mut file = fs::File::create(&temp_path).map_err(|e| GradebookError::io(&temp_path, e))?;
    file.write_all(codec::encode(store).as_bytes())
        .map_err(cleanup_and_err)?;
    file.sync_all().map_err(cleanup_and_err)?;
    drop(file);

    fs::rename(&temp_path, path).map_err(cleanup_and_err)?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("gradebook"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_in(dir: &Path) -> FileStorage {
        FileStorage::new(dir.join("students.csv"), dir.join("students_backup.csv"))
    }

    fn sample_store() -> RecordStore {
        let mut store = RecordStore::new();
        store.add_student("s1", "Ana Silva");
        store.add_score("s1", 14.25).unwrap();
        store.add_score("s1", 0.1).unwrap();
        store.add_student("s2", "Bruno");
        store
    }

    #[test]
    fn load_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let (store, report) = storage_in(dir.path()).load().unwrap();
        assert!(store.is_empty());
        assert!(report.missing);
        assert_eq!(report.loaded, 0);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        let store = sample_store();

        storage.save(&store).unwrap();
        let (loaded, report) = storage.load().unwrap();

        assert!(!report.missing);
        assert_eq!(report.loaded, 2);
        let original: Vec<_> = store.iter().cloned().collect();
        let reloaded: Vec<_> = loaded.iter().cloned().collect();
        assert_eq!(original, reloaded);
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        storage.save(&sample_store()).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["students.csv".to_string()]);
    }

    #[test]
    fn save_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        storage.save(&sample_store()).unwrap();
        storage.save(&RecordStore::new()).unwrap();

        let text = fs::read_to_string(storage.primary()).unwrap();
        assert_eq!(text, "ID,Name,Scores\n");
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(
            dir.path().join("nested/deeper/students.csv"),
            dir.path().join("students_backup.csv"),
        );
        storage.save(&sample_store()).unwrap();
        assert!(storage.primary().exists());
    }

    #[test]
    fn write_failure_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "plain file").unwrap();

        let storage = FileStorage::new(blocker.join("students.csv"), blocker.join("backup.csv"));
        let store = sample_store();

        let err = storage.save(&store).unwrap_err();
        assert!(matches!(err, GradebookError::Io { .. }));
        let err = storage.backup(&store).unwrap_err();
        assert!(matches!(err, GradebookError::Io { .. }));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn backup_is_independent_of_save() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        storage.backup(&sample_store()).unwrap();

        assert!(storage.backup_path().exists());
        assert!(!storage.primary().exists());
    }

    #[test]
    fn restore_reads_backup_not_primary() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());

        let mut backed_up = RecordStore::new();
        backed_up.add_student("b1", "From Backup");
        storage.backup(&backed_up).unwrap();

        let mut primary = RecordStore::new();
        primary.add_student("p1", "From Primary");
        storage.save(&primary).unwrap();

        let mut store = RecordStore::new();
        store.add_student("u1", "Unsaved");
        let report = storage.restore(&mut store).unwrap();

        assert!(!report.missing);
        assert_eq!(report.path, storage.backup_path());
        assert!(store.contains("b1"));
        assert!(!store.contains("p1"));
        assert!(!store.contains("u1"));

        let primary_text = fs::read_to_string(storage.primary()).unwrap();
        assert!(primary_text.contains("From Primary"));
    }

    #[test]
    fn restore_without_backup_empties_store() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        let mut store = sample_store();

        let report = storage.restore(&mut store).unwrap();
        assert!(report.missing);
        assert!(store.is_empty());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn restore_without_backup_logs_warning() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        let mut store = sample_store();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            storage.restore(&mut store).unwrap();
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("not found, store is now empty"), "{output}");
    }

    #[test]
    fn load_reports_skipped_rows() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        fs::write(
            storage.primary(),
            "ID,Name,Scores\ns1,Ana,10;x\ns2,Bruno,11\n",
        )
        .unwrap();

        let (store, report) = storage.load().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
    }

    #[test]
    fn temp_path_appends_suffix() {
        assert_eq!(
            temp_path_for(Path::new("data/students.csv")),
            PathBuf::from("data/students.csv.tmp")
        );
    }
}
