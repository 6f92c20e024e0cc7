//! The `wiscar score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use wiscar_core::config::load_config_from;
use wiscar_core::parser::load_responses;
use wiscar_core::report::AssessmentReport;
use wiscar_core::scoring::{CoveragePolicy, Scorer};

pub fn execute(
    responses_path: PathBuf,
    bank_path: Option<PathBuf>,
    strict: bool,
    format: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = super::load_bank(bank_path, &config)?;
    let policy = if strict {
        CoveragePolicy::Strict
    } else {
        config.coverage
    };

    let responses = load_responses(&responses_path)?;
    tracing::info!(
        bank = %bank.id,
        responses = responses.len(),
        %policy,
        "scoring responses"
    );

    let result = Scorer::with_policy(&bank, policy)
        .score(&responses)
        .with_context(|| format!("failed to score {}", responses_path.display()))?;

    let report = AssessmentReport::new(&bank, responses, result);
    let format = format.unwrap_or(config.default_format);
    super::emit_report(&report, &format, output)
}
