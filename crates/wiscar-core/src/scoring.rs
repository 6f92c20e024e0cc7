//! The scoring engine: maps a completed response set to a fit profile.
//!
//! Scoring is a single pure pass. Each response is routed by the explicit
//! `aggregate` and `facet` tags of its question in the bank:
//!
//! - psychometric fit = mean(psychometric values) × 20
//! - technical score = sum(technical values) / (count × 5) × 100
//! - each facet = mean(values tagged with that facet) × 20, or the scale
//!   midpoint when nothing measured it
//! - real-world alignment = mean(psychometric fit, technical score)
//! - overall = 0.3 × psychometric + 0.4 × technical + 0.3 × mean(five facets)
//!
//! All scores are rounded half-up to whole numbers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bank::QuestionBank;
use crate::error::ScoringError;
use crate::insights;
use crate::model::{Aggregate, Facet, Response, MAX_VALUE, MIDPOINT_VALUE};
use crate::results::{
    AssessmentResult, AssessmentScore, Coverage, LearningReadiness, Recommendation, WiscarScores,
};

/// Weight of psychometric fit in the overall score.
pub const PSYCHOMETRIC_WEIGHT: f64 = 0.3;
/// Weight of the technical score in the overall score.
pub const TECHNICAL_WEIGHT: f64 = 0.4;
/// Weight of the mean of the five measured facets in the overall score.
pub const FACET_WEIGHT: f64 = 0.3;
/// Margin added to the overall score to form the confidence score.
pub const CONFIDENCE_MARGIN: u32 = 10;

/// What to do when responses do not cover every scored dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoveragePolicy {
    /// Fill empty aggregates with the scale midpoint and skip responses to
    /// unknown questions. Always produces a result.
    #[default]
    Lenient,
    /// Fail on an empty aggregate or a response to an unknown question.
    Strict,
}

impl fmt::Display for CoveragePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoveragePolicy::Lenient => write!(f, "lenient"),
            CoveragePolicy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for CoveragePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(CoveragePolicy::Lenient),
            "strict" => Ok(CoveragePolicy::Strict),
            other => Err(format!("unknown coverage policy: {other}")),
        }
    }
}

/// Scores response sets against one question bank.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    bank: &'a QuestionBank,
    policy: CoveragePolicy,
}

impl<'a> Scorer<'a> {
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self::with_policy(bank, CoveragePolicy::default())
    }

    pub fn with_policy(bank: &'a QuestionBank, policy: CoveragePolicy) -> Self {
        Self { bank, policy }
    }

    pub fn policy(&self) -> CoveragePolicy {
        self.policy
    }

    /// Score a completed response set.
    ///
    /// If a question was answered more than once, the last response wins.
    pub fn score(&self, responses: &[Response]) -> Result<AssessmentResult, ScoringError> {
        let strict = self.policy == CoveragePolicy::Strict;
        let mut coverage = Coverage::default();
        let mut psychometric = Vec::new();
        let mut technical = Vec::new();
        let mut facets: BTreeMap<Facet, Vec<f64>> = BTreeMap::new();

        for response in latest_per_question(responses) {
            let Some(question) = self.bank.get(&response.question_id) else {
                if strict {
                    return Err(ScoringError::UnknownQuestion(response.question_id.clone()));
                }
                tracing::warn!(
                    question = %response.question_id,
                    "response to unknown question excluded from scoring"
                );
                coverage.unscored.push(response.question_id.clone());
                continue;
            };

            match question.aggregate {
                Some(Aggregate::Psychometric) => psychometric.push(response.value),
                Some(Aggregate::Technical) => technical.push(response.value),
                None => {}
            }
            if let Some(facet) = question.facet {
                facets.entry(facet).or_default().push(response.value);
            }
            if !question.is_scored() {
                coverage.unscored.push(response.question_id.clone());
            }
        }

        coverage.psychometric = psychometric.len();
        coverage.technical = technical.len();

        let psychometric_fit = match mean(&psychometric) {
            Some(m) => to_score(m * 20.0),
            None => self.default_aggregate(Aggregate::Psychometric, &mut coverage)?,
        };
        let technical_score = if technical.is_empty() {
            self.default_aggregate(Aggregate::Technical, &mut coverage)?
        } else {
            let sum: f64 = technical.iter().sum();
            to_score(sum / (technical.len() as f64 * MAX_VALUE) * 100.0)
        };

        let mut facet_score = |facet: Facet| -> u32 {
            let values = facets.get(&facet).map(Vec::as_slice).unwrap_or_default();
            coverage.facets.insert(facet, values.len());
            let average = mean(values).unwrap_or_else(|| {
                coverage.defaulted_facets.push(facet);
                MIDPOINT_VALUE
            });
            to_score(average * 20.0)
        };

        let will = facet_score(Facet::Will);
        let interest = facet_score(Facet::Interest);
        let skill = facet_score(Facet::Skill);
        let cognitive = facet_score(Facet::Cognitive);
        let ability_to_learn = facet_score(Facet::AbilityToLearn);

        let wiscar = WiscarScores {
            will,
            interest,
            skill,
            cognitive,
            ability_to_learn,
            real_world_alignment: to_score(
                (f64::from(psychometric_fit) + f64::from(technical_score)) / 2.0,
            ),
        };

        let overall_score = to_score(
            psychometric_fit as f64 * PSYCHOMETRIC_WEIGHT
                + technical_score as f64 * TECHNICAL_WEIGHT
                + wiscar.measured_total() as f64 / Facet::ALL.len() as f64 * FACET_WEIGHT,
        );
        let recommendation = Recommendation::from_overall(overall_score);

        let scores = AssessmentScore {
            psychometric_fit,
            technical_score,
            wiscar,
            overall_score,
            recommendation,
            confidence_score: overall_score.saturating_add(CONFIDENCE_MARGIN).min(100),
        };

        tracing::debug!(
            psychometric_fit,
            technical_score,
            overall_score,
            %recommendation,
            "assessment scored"
        );

        Ok(AssessmentResult {
            strengths: insights::strengths(&scores),
            gap_areas: insights::gap_areas(&scores),
            next_steps: insights::next_steps(recommendation),
            career_paths: insights::career_paths(recommendation),
            learning_readiness: LearningReadiness::classify(
                scores.wiscar.ability_to_learn,
                scores.psychometric_fit,
            ),
            scores,
            coverage,
        })
    }

    fn default_aggregate(
        &self,
        aggregate: Aggregate,
        coverage: &mut Coverage,
    ) -> Result<u32, ScoringError> {
        if self.policy == CoveragePolicy::Strict {
            return Err(ScoringError::InsufficientResponses { aggregate });
        }
        tracing::warn!(%aggregate, "no responses for aggregate, using scale midpoint");
        coverage.defaulted_aggregates.push(aggregate);
        Ok(to_score(MIDPOINT_VALUE * 20.0))
    }
}

/// Score a response set against a bank with the lenient policy.
pub fn score(
    bank: &QuestionBank,
    responses: &[Response],
) -> Result<AssessmentResult, ScoringError> {
    Scorer::new(bank).score(responses)
}

/// Collapse repeated answers to one per question: the last value wins but
/// keeps the position of the first answer.
fn latest_per_question(responses: &[Response]) -> Vec<&Response> {
    let mut out: Vec<&Response> = Vec::with_capacity(responses.len());
    for response in responses {
        match out.iter().position(|r| r.question_id == response.question_id) {
            Some(existing) => {
                tracing::debug!(
                    question = %response.question_id,
                    "duplicate response, keeping the latest"
                );
                out[existing] = response;
            }
            None => out.push(response),
        }
    }
    out
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Round half-up to a whole, non-negative score.
fn to_score(value: f64) -> u32 {
    (value + 0.5).floor().max(0.0) as u32
}
