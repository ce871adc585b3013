//! The `gradebook init` command.

use std::path::Path;

use anyhow::Result;

use gradebook_core::config::CONFIG_FILE_NAME;

pub fn execute() -> Result<()> {
    if Path::new(CONFIG_FILE_NAME).exists() {
        println!("{CONFIG_FILE_NAME} already exists, skipping.");
    } else {
        std::fs::write(CONFIG_FILE_NAME, SAMPLE_CONFIG)?;
        println!("Created {CONFIG_FILE_NAME}");
    }

    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to point at your data and backup files");
    println!("  2. Run: gradebook");
    println!("  3. Run: gradebook rank");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebook configuration

data_file = "students.csv"
backup_file = "students_backup.csv"

# Save pending changes automatically when leaving the interactive menu.
save_on_exit = false

[logging]
# Overridden by RUST_LOG when set.
level = "warn"
"#;
