//! Text and JSON rendering shared by subcommands and the interactive menu.

use clap::ValueEnum;
use comfy_table::{Cell, Table};

use gradebook_core::model::Score;
use gradebook_core::statistics::{RankedStudent, StudentSummary};

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn format_scores(scores: &[Score]) -> String {
    if scores.is_empty() {
        return "-".to_string();
    }
    scores
        .iter()
        .map(Score::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

pub fn students_table(summaries: &[StudentSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Name", "Scores", "Average", "Highest", "Lowest", "Median",
    ]);

    for s in summaries {
        table.add_row(vec![
            Cell::new(&s.id),
            Cell::new(&s.name),
            Cell::new(format_scores(&s.scores)),
            Cell::new(format!("{:.2}", s.average)),
            Cell::new(format_optional(s.highest)),
            Cell::new(format_optional(s.lowest)),
            Cell::new(format_optional(s.median)),
        ]);
    }

    table
}

pub fn ranking_table(ranking: &[RankedStudent]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Rank", "ID", "Name", "Average"]);

    for r in ranking {
        table.add_row(vec![
            Cell::new(r.position),
            Cell::new(&r.id),
            Cell::new(&r.name),
            Cell::new(format!("{:.2}", r.average)),
        ]);
    }

    table
}
