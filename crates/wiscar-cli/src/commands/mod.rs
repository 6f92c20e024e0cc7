pub mod init;
pub mod questions;
pub mod score;
pub mod take;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use wiscar_core::bank::QuestionBank;
use wiscar_core::config::WiscarConfig;
use wiscar_core::model::Facet;
use wiscar_core::parser;
use wiscar_core::report::AssessmentReport;

/// The bank named on the command line, else the configured one, else the
/// built-in bank.
pub fn load_bank(bank_path: Option<PathBuf>, config: &WiscarConfig) -> Result<QuestionBank> {
    match bank_path {
        Some(path) => parser::parse_bank(&path),
        None => config.load_bank(),
    }
}

/// Save the report if requested, then print it in the given format.
pub fn emit_report(report: &AssessmentReport, format: &str, output: Option<PathBuf>) -> Result<()> {
    if !matches!(format, "text" | "json" | "markdown" | "md") {
        anyhow::bail!("unknown format: {format} (expected text, json, or markdown)");
    }

    if let Some(path) = output {
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report.result)?),
        "markdown" | "md" => print!("{}", report.to_markdown()),
        _ => print_text(report),
    }
    Ok(())
}

fn print_text(report: &AssessmentReport) {
    let result = &report.result;
    let scores = &result.scores;

    println!("{}", report.bank.name);
    println!(
        "{} (overall {}/100, confidence {}%)",
        scores.recommendation.headline(),
        scores.overall_score,
        scores.confidence_score
    );

    let mut table = Table::new();
    table.set_header(vec!["Measure", "Score"]);
    table.add_row(vec![
        Cell::new("Psychometric Fit"),
        Cell::new(scores.psychometric_fit),
    ]);
    table.add_row(vec![
        Cell::new("Technical Readiness"),
        Cell::new(scores.technical_score),
    ]);
    for facet in Facet::ALL {
        table.add_row(vec![
            Cell::new(facet.label()),
            Cell::new(scores.wiscar.facet(facet)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Real-World Alignment"),
        Cell::new(scores.wiscar.real_world_alignment),
    ]);
    println!("\n{table}");
    println!("Learning readiness: {}", result.learning_readiness);

    print_section("Strengths", &result.strengths);
    print_section("Development areas", &result.gap_areas);
    print_section("Next steps", &result.next_steps);
    print_section("Career paths", &result.career_paths);

    let coverage = &result.coverage;
    for aggregate in &coverage.defaulted_aggregates {
        println!("Note: no {aggregate} responses, score assumed neutral");
    }
    for facet in &coverage.defaulted_facets {
        println!("Note: no {} responses, score assumed neutral", facet.label());
    }
    if !coverage.unscored.is_empty() {
        println!("Note: ignored responses: {}", coverage.unscored.join(", "));
    }
}

fn print_section(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{title}:");
    for item in items {
        println!("  - {item}");
    }
}
