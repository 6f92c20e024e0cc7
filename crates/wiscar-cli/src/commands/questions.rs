//! The `wiscar questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use wiscar_core::config::load_config;
use wiscar_core::parser::bank_to_toml;

pub fn execute(bank_path: Option<PathBuf>, format: String) -> Result<()> {
    let config = load_config()?;
    let bank = super::load_bank(bank_path, &config)?;

    match format.as_str() {
        "toml" => {
            print!("{}", bank_to_toml(&bank)?);
        }
        "text" => {
            println!("{} ({} questions)", bank.name, bank.len());

            let mut table = Table::new();
            table.set_header(vec!["#", "ID", "Type", "Section", "Aggregate", "Facet"]);
            for (i, q) in bank.questions().iter().enumerate() {
                table.add_row(vec![
                    Cell::new(i + 1),
                    Cell::new(&q.id),
                    Cell::new(q.kind),
                    Cell::new(&q.section),
                    Cell::new(
                        q.aggregate
                            .map(|a| a.to_string())
                            .unwrap_or_else(|| "-".into()),
                    ),
                    Cell::new(q.facet.map(|f| f.label()).unwrap_or("-")),
                ]);
            }
            println!("{table}");
        }
        other => anyhow::bail!("unknown format: {other} (expected text or toml)"),
    }

    Ok(())
}
