//! jibon logs: newest assessments from the command line

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use jibon_core::{AssessmentRecord, CsvRecordStore, Ledger, RecentLimit};

use crate::config::ConfigLoader;

#[derive(Debug, Args)]
pub struct LogsArgs {
    /// Number of records to show, newest first
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,

    /// Assessment history file (defaults to the configured ledger)
    #[arg(long)]
    pub history: Option<PathBuf>,
}

pub async fn run(args: LogsArgs) -> Result<()> {
    let path = match args.history {
        Some(path) => path,
        None => ConfigLoader::load()?.ledger.path,
    };

    let ledger = Ledger::new(Arc::new(CsvRecordStore::new(path)));
    let records = ledger.recent(RecentLimit::new(args.limit)).await?;

    if records.is_empty() {
        println!("No assessments recorded.");
        return Ok(());
    }

    println!("{}", records_table(&records));
    Ok(())
}

fn records_table(records: &[AssessmentRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        ["ID", "Age", "Gender", "Hb", "MCV", "Mentzer", "Green-King", "Thalassemia", "Iron"]
            .into_iter()
            .map(|h| Cell::new(h).fg(Color::Cyan)),
    );

    for record in records {
        table.add_row(vec![
            Cell::new(record.id),
            Cell::new(record.input.age),
            Cell::new(record.input.gender.as_str()),
            Cell::new(record.input.hb),
            Cell::new(record.input.mcv),
            Cell::new(format!("{:.2}", record.mentzer_index)),
            Cell::new(format!("{:.2}", record.green_king_index)),
            Cell::new(&record.thalassemia_result),
            Cell::new(&record.iron_result),
        ]);
    }

    table
}
