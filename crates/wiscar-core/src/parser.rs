//! TOML question bank parser and JSON response loader.
//!
//! Loads question banks from TOML files and directories, renders banks back
//! to TOML, and reads response sets exported by a front end.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::bank::{validate_questions, QuestionBank, ValidationIssue};
use crate::error::BankError;
use crate::model::{Question, Response};

/// On-disk layout of a question bank file.
#[derive(Debug, Serialize, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<Question>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
}

/// A parsed but not yet validated question bank.
#[derive(Debug, Clone)]
pub struct BankDraft {
    pub id: String,
    pub name: String,
    pub description: String,
    pub questions: Vec<Question>,
}

impl BankDraft {
    /// Every structural issue in the draft, errors and warnings alike.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_questions(&self.questions)
    }

    /// Validate and turn the draft into a usable bank.
    pub fn build(self) -> Result<QuestionBank, BankError> {
        let bank = QuestionBank::new(self.id, self.name, self.questions)?;
        Ok(bank.with_description(self.description))
    }
}

/// Parse a TOML file without validating its questions.
pub fn parse_bank_draft(path: &Path) -> Result<BankDraft> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank file: {}", path.display()))?;

    parse_bank_draft_str(&content, path)
}

/// Parse a TOML string without validating its questions.
pub fn parse_bank_draft_str(content: &str, source_path: &Path) -> Result<BankDraft> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(BankDraft {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions: parsed.questions,
    })
}

/// Parse and validate a single TOML question bank file.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let draft = parse_bank_draft(path)?;
    draft
        .build()
        .with_context(|| format!("invalid question bank: {}", path.display()))
}

/// Parse and validate a TOML string (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let draft = parse_bank_draft_str(content, source_path)?;
    draft
        .build()
        .with_context(|| format!("invalid question bank: {}", source_path.display()))
}

/// Recursively load all `.toml` question bank drafts from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<BankDraft>> {
    let mut drafts = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            drafts.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank_draft(&path) {
                Ok(draft) => drafts.push(draft),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(drafts)
}

/// Load drafts from a file or a directory.
pub fn load_bank_drafts(path: &Path) -> Result<Vec<BankDraft>> {
    if path.is_dir() {
        load_bank_directory(path)
    } else {
        Ok(vec![parse_bank_draft(path)?])
    }
}

/// Render a bank in the TOML format read by [`parse_bank`].
pub fn bank_to_toml(bank: &QuestionBank) -> Result<String> {
    let file = TomlBankFile {
        bank: TomlBankHeader {
            id: bank.id.clone(),
            name: bank.name.clone(),
            description: bank.description.clone(),
        },
        questions: bank.questions().to_vec(),
    };
    toml::to_string_pretty(&file).context("failed to serialize question bank")
}

/// Accepted shapes of a responses file.
#[derive(Deserialize)]
#[serde(untagged)]
enum ResponsesFile {
    List(Vec<Response>),
    Wrapped { responses: Vec<Response> },
}

/// Parse a JSON response set: either a bare array or an object with a
/// `responses` array (such as a saved report).
pub fn parse_responses_str(content: &str) -> Result<Vec<Response>> {
    let parsed: ResponsesFile =
        serde_json::from_str(content).context("failed to parse responses JSON")?;
    Ok(match parsed {
        ResponsesFile::List(responses) => responses,
        ResponsesFile::Wrapped { responses } => responses,
    })
}

/// Read a JSON response set from a file.
pub fn load_responses(path: &Path) -> Result<Vec<Response>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read responses file: {}", path.display()))?;
    parse_responses_str(&content).with_context(|| format!("in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Severity;
    use crate::model::{Aggregate, Facet, QuestionType};
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[bank]
id = "mini"
name = "Mini Bank"
description = "Two questions"

[[questions]]
id = "psych_drive"
type = "likert"
category = "psychometric"
section = "Drive"
prompt = "I finish what I start"
aggregate = "psychometric"
facet = "will"

[questions.scale]
min = 1
max = 5
min_label = "Never"
max_label = "Always"

[[questions]]
id = "tech_estimate"
type = "multiple_choice"
category = "technical"
section = "Estimation"
prompt = "How many sprints?"
aggregate = "technical"

[[questions.options]]
id = "a"
text = "4"
value = 3

[[questions.options]]
id = "b"
text = "5"
value = 5
"#;

    #[test]
    fn parse_valid_toml() {
        let bank = parse_bank_str(VALID_TOML, &PathBuf::from("mini.toml")).unwrap();
        assert_eq!(bank.id, "mini");
        assert_eq!(bank.description, "Two questions");
        assert_eq!(bank.len(), 2);

        let drive = &bank.questions()[0];
        assert_eq!(drive.kind, QuestionType::Likert);
        assert_eq!(drive.facet, Some(Facet::Will));
        assert_eq!(drive.scale.as_ref().unwrap().max, 5.0);

        let estimate = bank.get("tech_estimate").unwrap();
        assert_eq!(estimate.aggregate, Some(Aggregate::Technical));
        assert_eq!(estimate.option("b").unwrap().value, 5.0);
    }

    #[test]
    fn invalid_bank_is_rejected_but_draft_reports_issues() {
        let toml = r#"
[bank]
id = "broken"
name = "Broken"

[[questions]]
id = "fc"
type = "forced_choice"
category = "psychometric"
section = "Choice"
prompt = "Pick"
aggregate = "psychometric"

[[questions.options]]
id = "a"
text = "Only one"
value = 5
"#;
        let err = parse_bank_str(toml, &PathBuf::from("broken.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("exactly 2 options"));

        let draft = parse_bank_draft_str(toml, &PathBuf::from("broken.toml")).unwrap();
        let issues = draft.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_bank_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn builtin_bank_survives_toml() {
        let builtin = QuestionBank::builtin();
        let rendered = bank_to_toml(&builtin).unwrap();
        let parsed = parse_bank_str(&rendered, &PathBuf::from("builtin.toml")).unwrap();
        assert_eq!(parsed.id, builtin.id);
        assert_eq!(parsed.questions(), builtin.questions());
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mini.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not toml {").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let drafts = load_bank_directory(dir.path()).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].id, "mini");
    }

    #[test]
    fn responses_as_array_or_wrapped() {
        let list = r#"[{"questionId":"a","value":4,"timeSpent":900}]"#;
        assert_eq!(parse_responses_str(list).unwrap()[0].elapsed_ms, 900);

        let wrapped = r#"{"id":"x","responses":[{"questionId":"b","value":2}]}"#;
        assert_eq!(parse_responses_str(wrapped).unwrap()[0].question_id, "b");

        assert!(parse_responses_str(r#"{"answers":[]}"#).is_err());
    }

    #[test]
    fn load_responses_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.json");
        let json = r#"[{"questionId":"tech_aptitude_1","value":5,"selectedOption":"b"}]"#;
        std::fs::write(&path, json).unwrap();
        let responses = load_responses(&path).unwrap();
        assert_eq!(responses[0].option_id.as_deref(), Some("b"));
        assert!(load_responses(&dir.path().join("missing.json")).is_err());
    }
}
