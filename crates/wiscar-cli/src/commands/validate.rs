//! The `wiscar validate` command.

use std::path::PathBuf;

use anyhow::Result;

use wiscar_core::bank::Severity;
use wiscar_core::parser::load_bank_drafts;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let drafts = load_bank_drafts(&bank_path)?;
    if drafts.is_empty() {
        anyhow::bail!("no question banks found in {}", bank_path.display());
    }

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for draft in &drafts {
        println!("Bank: {} ({} questions)", draft.name, draft.questions.len());

        for issue in draft.validate() {
            let label = match issue.severity {
                Severity::Error => {
                    total_errors += 1;
                    "ERROR"
                }
                Severity::Warning => {
                    total_warnings += 1;
                    "WARNING"
                }
            };
            let prefix = issue
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} {label}: {}", issue.message);
        }
    }

    if total_errors > 0 {
        anyhow::bail!("{total_errors} error(s), {total_warnings} warning(s) found");
    }
    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
