//! Assessment report types with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bank::QuestionBank;
use crate::model::{Facet, Response};
use crate::results::AssessmentResult;
use crate::statistics::{timing_summary, TimingSummary};

/// A completed assessment with everything needed to review it later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// The bank the responses answer.
    pub bank: BankSummary,
    /// Responses as submitted to the scorer.
    pub responses: Vec<Response>,
    pub result: AssessmentResult,
    pub timing: TimingSummary,
}

/// Summary of a question bank (without the question definitions).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

impl AssessmentReport {
    pub fn new(bank: &QuestionBank, responses: Vec<Response>, result: AssessmentResult) -> Self {
        let timing = timing_summary(&responses);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank: BankSummary {
                id: bank.id.clone(),
                name: bank.name.clone(),
                question_count: bank.len(),
            },
            responses,
            result,
            timing,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AssessmentReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let scores = &self.result.scores;
        let mut md = String::new();

        md.push_str(&format!("# {}\n\n", self.bank.name));
        md.push_str(&format!(
            "**{}** (overall {}/100, confidence {}%)\n\n",
            scores.recommendation.headline(),
            scores.overall_score,
            scores.confidence_score
        ));
        md.push_str(&format!(
            "Answered {} of {} questions on {}.\n\n",
            self.responses.len(),
            self.bank.question_count,
            self.created_at.format("%Y-%m-%d %H:%M UTC")
        ));

        md.push_str("## Scores\n\n");
        md.push_str("| Measure | Score |\n");
        md.push_str("|---------|-------|\n");
        md.push_str(&format!("| Psychometric Fit | {} |\n", scores.psychometric_fit));
        md.push_str(&format!("| Technical Readiness | {} |\n", scores.technical_score));
        for facet in Facet::ALL {
            md.push_str(&format!("| {} | {} |\n", facet.label(), scores.wiscar.facet(facet)));
        }
        md.push_str(&format!(
            "| Real-World Alignment | {} |\n\n",
            scores.wiscar.real_world_alignment
        ));

        md.push_str(&format!(
            "Learning readiness: **{}**\n\n",
            self.result.learning_readiness
        ));

        push_list(&mut md, "Strengths", &self.result.strengths);
        push_list(&mut md, "Development Areas", &self.result.gap_areas);
        push_list(&mut md, "Next Steps", &self.result.next_steps);
        push_list(&mut md, "Career Paths", &self.result.career_paths);

        let coverage = &self.result.coverage;
        if !coverage.defaulted_aggregates.is_empty() || !coverage.defaulted_facets.is_empty() {
            md.push_str("## Coverage\n\n");
            for aggregate in &coverage.defaulted_aggregates {
                md.push_str(&format!("- {aggregate} score assumed neutral (no responses)\n"));
            }
            for facet in &coverage.defaulted_facets {
                md.push_str(&format!("- {} assumed neutral (no responses)\n", facet.label()));
            }
            md.push('\n');
        }
        if !coverage.unscored.is_empty() {
            md.push_str(&format!(
                "Ignored responses: {}\n\n",
                coverage.unscored.join(", ")
            ));
        }

        if let Some(slowest) = &self.timing.slowest {
            md.push_str(&format!(
                "Median time per question: {:.1}s (slowest: {} at {:.1}s)\n",
                self.timing.median_ms as f64 / 1000.0,
                slowest.question_id,
                slowest.elapsed_ms as f64 / 1000.0
            ));
        }

        md
    }
}

fn push_list(md: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    md.push_str(&format!("## {title}\n\n"));
    for item in items {
        md.push_str(&format!("- {item}\n"));
    }
    md.push('\n');
}
