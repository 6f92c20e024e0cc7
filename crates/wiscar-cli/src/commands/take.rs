//! The `wiscar take` command.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Result;

use wiscar_core::bank::QuestionBank;
use wiscar_core::collector::{Advance, Session};
use wiscar_core::config::load_config_from;
use wiscar_core::model::{Question, Response};
use wiscar_core::report::AssessmentReport;
use wiscar_core::scoring::Scorer;

pub fn execute(
    bank_path: Option<PathBuf>,
    format: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = super::load_bank(bank_path, &config)?;
    if bank.is_empty() {
        anyhow::bail!("question bank {} has no questions", bank.id);
    }

    eprintln!("{} ({} questions)", bank.name, bank.len());
    eprintln!("Answer with the option number or a scale value. Enter: next, b: back, q: quit.");

    let stdin = io::stdin();
    let Some(responses) = run_session(&bank, stdin.lock())? else {
        eprintln!("Assessment abandoned.");
        return Ok(());
    };

    let result = Scorer::with_policy(&bank, config.coverage).score(&responses)?;
    let report = AssessmentReport::new(&bank, responses, result);
    let format = format.unwrap_or(config.default_format);
    super::emit_report(&report, &format, output)
}

/// Drive a session from line-based input. Returns `None` if the user quits.
fn run_session<R: BufRead>(bank: &QuestionBank, mut input: R) -> Result<Option<Vec<Response>>> {
    let mut session = Session::new(bank);
    let mut line = String::new();

    while let Some(question) = session.current() {
        show_question(&session, question);

        line.clear();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!(
                "input ended at question {} of {}",
                session.index() + 1,
                session.len()
            );
        }

        match line.trim() {
            "q" => return Ok(None),
            "b" => {
                session.retreat();
                continue;
            }
            "" => {}
            answer => {
                if let Err(message) = answer_question(&mut session, question, answer) {
                    eprintln!("  {message}");
                    continue;
                }
            }
        }

        match session.advance() {
            Advance::Moved(_) => {}
            Advance::Unanswered => eprintln!("  Please answer this question before continuing."),
            Advance::Complete => break,
        }
    }

    Ok(Some(session.finish()))
}

fn answer_question(
    session: &mut Session<'_>,
    question: &Question,
    answer: &str,
) -> Result<(), String> {
    if question.kind.uses_options() {
        let option = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| question.options.get(i))
            .ok_or_else(|| format!("Enter a number from 1 to {}.", question.options.len()))?;
        session.choose(&option.id).map_err(|e| e.to_string())?;
    } else {
        let value: f64 = answer
            .parse()
            .map_err(|_| format!("'{answer}' is not a number."))?;
        session.answer_scale(value).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn show_question(session: &Session<'_>, question: &Question) {
    eprintln!();
    eprintln!(
        "[{}/{}] {} ({:.0}%)",
        session.index() + 1,
        session.len(),
        question.section,
        session.progress_percent()
    );
    if let Some(scenario) = &question.scenario {
        eprintln!("  {scenario}");
    }
    eprintln!("  {}", question.prompt);

    let previous = session.response(&question.id);
    if let Some(scale) = &question.scale {
        eprintln!(
            "  {} ({}) .. {} ({})",
            scale.min, scale.min_label, scale.max, scale.max_label
        );
    } else {
        for (i, option) in question.options.iter().enumerate() {
            let marker = match previous.and_then(|r| r.option_id.as_deref()) {
                Some(id) if id == option.id => "*",
                _ => " ",
            };
            eprintln!("  {marker}{}) {}", i + 1, option.text);
        }
    }
    if let Some(response) = previous {
        eprintln!("  (current answer: {}; press Enter to keep it)", response.value);
    }
    eprint!("> ");
}
