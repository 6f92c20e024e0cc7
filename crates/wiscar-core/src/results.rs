//! Result types produced by the scorer.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Aggregate, Facet};

/// Overall verdict on career fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Yes,
    Maybe,
    No,
}

impl Recommendation {
    /// Overall score needed for a "yes".
    pub const YES_THRESHOLD: u32 = 70;
    /// Overall score needed for a "maybe".
    pub const MAYBE_THRESHOLD: u32 = 50;

    pub fn from_overall(overall: u32) -> Self {
        if overall >= Self::YES_THRESHOLD {
            Recommendation::Yes
        } else if overall >= Self::MAYBE_THRESHOLD {
            Recommendation::Maybe
        } else {
            Recommendation::No
        }
    }

    /// One-line verdict for display.
    pub fn headline(self) -> &'static str {
        match self {
            Recommendation::Yes => "Strong Fit - Pursue This Career Path",
            Recommendation::Maybe => "Potential Fit - Address Development Areas",
            Recommendation::No => "Low Fit - Explore Alternative Paths",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Yes => write!(f, "yes"),
            Recommendation::Maybe => write!(f, "maybe"),
            Recommendation::No => write!(f, "no"),
        }
    }
}

/// Three-tier readiness to start learning for the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningReadiness {
    Green,
    Yellow,
    Red,
}

impl LearningReadiness {
    pub fn classify(ability_to_learn: u32, psychometric_fit: u32) -> Self {
        if ability_to_learn >= 70 && psychometric_fit >= 60 {
            LearningReadiness::Green
        } else if ability_to_learn >= 50 {
            LearningReadiness::Yellow
        } else {
            LearningReadiness::Red
        }
    }
}

impl fmt::Display for LearningReadiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearningReadiness::Green => write!(f, "green"),
            LearningReadiness::Yellow => write!(f, "yellow"),
            LearningReadiness::Red => write!(f, "red"),
        }
    }
}

/// The six WISCAR facet scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WiscarScores {
    pub will: u32,
    pub interest: u32,
    pub skill: u32,
    pub cognitive: u32,
    pub ability_to_learn: u32,
    /// Derived from psychometric fit and technical score, not measured.
    pub real_world_alignment: u32,
}

impl WiscarScores {
    /// Score of one measured facet.
    pub fn facet(&self, facet: Facet) -> u32 {
        match facet {
            Facet::Will => self.will,
            Facet::Interest => self.interest,
            Facet::Skill => self.skill,
            Facet::Cognitive => self.cognitive,
            Facet::AbilityToLearn => self.ability_to_learn,
        }
    }

    /// Sum of the five measured facets (real-world alignment excluded).
    pub fn measured_total(&self) -> u64 {
        Facet::ALL.iter().map(|&f| u64::from(self.facet(f))).sum()
    }
}

/// Numeric part of an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentScore {
    pub psychometric_fit: u32,
    pub technical_score: u32,
    pub wiscar: WiscarScores,
    pub overall_score: u32,
    pub recommendation: Recommendation,
    /// Overall score plus a fixed margin, capped at 100. Not a statistical
    /// confidence.
    pub confidence_score: u32,
}

/// What the responses did and did not cover.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    /// Responses counted towards psychometric fit.
    pub psychometric: usize,
    /// Responses counted towards the technical score.
    pub technical: usize,
    /// Responses counted per facet.
    pub facets: BTreeMap<Facet, usize>,
    /// Aggregates that fell back to the scale midpoint.
    pub defaulted_aggregates: Vec<Aggregate>,
    /// Facets that fell back to the scale midpoint.
    pub defaulted_facets: Vec<Facet>,
    /// Responses that contributed to no score.
    pub unscored: Vec<String>,
}

/// The full outcome of one completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub scores: AssessmentScore,
    pub strengths: Vec<String>,
    pub gap_areas: Vec<String>,
    pub next_steps: Vec<String>,
    pub career_paths: Vec<String>,
    pub learning_readiness: LearningReadiness,
    #[serde(default)]
    pub coverage: Coverage,
}
