//! jibon stats: dashboard counts from the command line

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use jibon_core::{CsvRecordStore, StatsAggregator, StatsSummary};

use crate::config::ConfigLoader;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Assessment history file (defaults to the configured ledger)
    #[arg(long)]
    pub history: Option<PathBuf>,
}

pub async fn run(args: StatsArgs) -> Result<()> {
    let path = match args.history {
        Some(path) => path,
        None => ConfigLoader::load()?.ledger.path,
    };

    let stats = StatsAggregator::new(Arc::new(CsvRecordStore::new(path)));
    let summary = stats.aggregate().await?;

    println!("{}", summary_table(&summary));
    Ok(())
}

fn summary_table(summary: &StatsSummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Count").fg(Color::Cyan),
    ]);

    for (label, count) in [
        ("Thalassemia: normal", summary.thal_normal),
        ("Thalassemia: likely / minor", summary.thal_likely),
        ("Thalassemia: positive", summary.thal_positive),
        ("Iron: healthy", summary.iron_normal),
        ("Iron: deficient", summary.iron_deficient),
        ("Total assessments", summary.total),
    ] {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }

    table
}
