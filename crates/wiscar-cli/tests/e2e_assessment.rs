//! End-to-end assessment tests: collect answers in a session, score them,
//! and persist the report.
//!
//! A scripted clock stands in for wall time so per-question timings are
//! exact.

use std::sync::Arc;

use wiscar_core::bank::QuestionBank;
use wiscar_core::collector::{Advance, Session};
use wiscar_core::error::ScoringError;
use wiscar_core::model::{Aggregate, Facet};
use wiscar_core::report::AssessmentReport;
use wiscar_core::results::{LearningReadiness, Recommendation};
use wiscar_core::scoring::{CoveragePolicy, Scorer};
use wiscar_core::traits::ManualClock;

/// One answer per built-in question: a scale value or an option id.
enum Answer {
    Scale(f64),
    Pick(&'static str),
}

use Answer::{Pick, Scale};

const MIXED_RUN: [Answer; 14] = [
    Scale(4.0),
    Scale(5.0),
    Pick("b"),
    Scale(3.0),
    Scale(4.0),
    Scale(5.0),
    Pick("b"),
    Pick("a"),
    Pick("a"),
    Pick("b"),
    Scale(4.0),
    Pick("c"),
    Pick("b"),
    Scale(3.0),
];

fn run_session(bank: &QuestionBank, answers: &[Answer]) -> Vec<wiscar_core::model::Response> {
    let clock = Arc::new(ManualClock::new());
    let mut session = Session::with_clock(bank, clock.clone());

    for (i, answer) in answers.iter().enumerate() {
        clock.advance(1000 * (i as u64 + 1));
        match answer {
            Scale(value) => session.answer_scale(*value).unwrap(),
            Pick(option) => session.choose(option).unwrap(),
        };
        let step = session.advance();
        if i + 1 == bank.len() {
            assert_eq!(step, Advance::Complete);
        } else {
            assert_eq!(step, Advance::Moved(i + 1));
        }
    }

    session.finish()
}

#[test]
fn e2e_mixed_run() {
    let bank = QuestionBank::builtin();
    let responses = run_session(&bank, &MIXED_RUN);
    assert_eq!(responses.len(), 14);

    let result = Scorer::new(&bank).score(&responses).unwrap();
    let scores = &result.scores;

    assert_eq!(scores.psychometric_fit, 74);
    assert_eq!(scores.technical_score, 85);
    assert_eq!(scores.wiscar.will, 80);
    assert_eq!(scores.wiscar.interest, 73);
    assert_eq!(scores.wiscar.skill, 73);
    assert_eq!(scores.wiscar.cognitive, 100);
    assert_eq!(scores.wiscar.ability_to_learn, 60);
    assert_eq!(scores.wiscar.real_world_alignment, 80);
    assert_eq!(scores.overall_score, 79);
    assert_eq!(scores.confidence_score, 89);
    assert_eq!(scores.recommendation, Recommendation::Yes);
    assert_eq!(result.learning_readiness, LearningReadiness::Yellow);
    assert!(result.coverage.defaulted_facets.is_empty());
    assert_eq!(result.coverage.facets[&Facet::Skill], 3);
}

#[test]
fn e2e_report_roundtrip() {
    let bank = QuestionBank::builtin();
    let responses = run_session(&bank, &MIXED_RUN);
    let result = Scorer::new(&bank).score(&responses).unwrap();
    let report = AssessmentReport::new(&bank, responses, result);

    assert_eq!(report.timing.total_ms, 105_000);
    assert_eq!(report.timing.median_ms, 7_500);
    let slowest = report.timing.slowest.as_ref().unwrap();
    assert_eq!(slowest.question_id, "wiscar_learn_1");
    assert_eq!(slowest.elapsed_ms, 14_000);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    report.save_json(&path).unwrap();
    let loaded = AssessmentReport::load_json(&path).unwrap();

    assert_eq!(loaded.id, report.id);
    assert_eq!(loaded.result, report.result);

    // Rescoring the saved responses reproduces the saved result.
    let rescored = Scorer::new(&bank).score(&loaded.responses).unwrap();
    assert_eq!(rescored, loaded.result);
}

#[test]
fn e2e_abandoned_run_under_both_policies() {
    let bank = QuestionBank::builtin();
    // Only the interest section answered.
    let responses = run_session(&bank, &MIXED_RUN[..3]);

    let lenient = Scorer::new(&bank).score(&responses).unwrap();
    assert_eq!(lenient.scores.technical_score, 60);
    assert_eq!(lenient.coverage.defaulted_aggregates, vec![Aggregate::Technical]);
    assert_eq!(lenient.coverage.psychometric, 3);

    let err = Scorer::with_policy(&bank, CoveragePolicy::Strict)
        .score(&responses)
        .unwrap_err();
    assert_eq!(
        err,
        ScoringError::InsufficientResponses {
            aggregate: Aggregate::Technical
        }
    );
    assert!(err.is_coverage_gap());
}
