//! Core data model types for wiscar.
//!
//! These are the fundamental types the whole system uses to represent
//! questions, their answer options, and the responses collected for them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest value any answer can carry. Scores are normalized against it.
pub const MAX_VALUE: f64 = 5.0;

/// Midpoint of the 1–5 answer scale, used when nothing was measured.
pub const MIDPOINT_VALUE: f64 = 3.0;

/// How a question is presented and answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Likert,
    MultipleChoice,
    Scenario,
    ForcedChoice,
}

impl QuestionType {
    /// Whether questions of this type are answered by picking an option.
    pub fn uses_options(self) -> bool {
        !matches!(self, QuestionType::Likert)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Likert => write!(f, "likert"),
            QuestionType::MultipleChoice => write!(f, "multiple_choice"),
            QuestionType::Scenario => write!(f, "scenario"),
            QuestionType::ForcedChoice => write!(f, "forced_choice"),
        }
    }
}

/// Content category a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Psychometric,
    Technical,
    Aptitude,
    Domain,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Psychometric => write!(f, "psychometric"),
            Category::Technical => write!(f, "technical"),
            Category::Aptitude => write!(f, "aptitude"),
            Category::Domain => write!(f, "domain"),
        }
    }
}

/// The top-level aggregate a question's value feeds into.
///
/// This is independent of [`Category`]: a WISCAR systems-thinking question is
/// categorised as aptitude but still counts towards psychometric fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    Psychometric,
    Technical,
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregate::Psychometric => write!(f, "psychometric"),
            Aggregate::Technical => write!(f, "technical"),
        }
    }
}

/// The five WISCAR facets measured directly by questions.
///
/// Real-world alignment is the sixth facet but is derived from the two
/// aggregates, so no question can carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Will,
    Interest,
    Skill,
    Cognitive,
    AbilityToLearn,
}

impl Facet {
    /// All measured facets, in reporting order.
    pub const ALL: [Facet; 5] = [
        Facet::Will,
        Facet::Interest,
        Facet::Skill,
        Facet::Cognitive,
        Facet::AbilityToLearn,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Facet::Will => "Will",
            Facet::Interest => "Interest",
            Facet::Skill => "Skill",
            Facet::Cognitive => "Cognitive Ability",
            Facet::AbilityToLearn => "Ability to Learn",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::Will => write!(f, "will"),
            Facet::Interest => write!(f, "interest"),
            Facet::Skill => write!(f, "skill"),
            Facet::Cognitive => write!(f, "cognitive"),
            Facet::AbilityToLearn => write!(f, "ability_to_learn"),
        }
    }
}

impl FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "will" => Ok(Facet::Will),
            "interest" => Ok(Facet::Interest),
            "skill" | "skills" => Ok(Facet::Skill),
            "cognitive" => Ok(Facet::Cognitive),
            "ability_to_learn" | "learn" | "learning" => Ok(Facet::AbilityToLearn),
            other => Err(format!("unknown facet: {other}")),
        }
    }
}

/// One selectable answer of an option-based question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Option identifier, unique within its question (e.g. "a").
    pub id: String,
    /// Text shown to the respondent.
    pub text: String,
    /// Numeric value recorded when this option is chosen.
    pub value: f64,
}

/// Numeric scale of a likert question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
    pub min_label: String,
    pub max_label: String,
}

impl Scale {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A single question definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub category: Category,
    /// Display grouping (e.g. "Interest Assessment").
    pub section: String,
    /// The question text.
    pub prompt: String,
    /// Situation described before the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    /// Aggregate this question's value contributes to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<Aggregate>,
    /// WISCAR facet this question measures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facet: Option<Facet>,
    /// Answer scale. Present only on likert questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
    /// Ordered answer options. Empty for likert questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// Look up an option by id.
    pub fn option(&self, option_id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Whether the question feeds into any score at all.
    pub fn is_scored(&self) -> bool {
        self.aggregate.is_some() || self.facet.is_some()
    }
}

/// A recorded answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The question this answers.
    pub question_id: String,
    /// Numeric value of the answer.
    pub value: f64,
    /// Chosen option, for option-based questions.
    #[serde(default, rename = "selectedOption", skip_serializing_if = "Option::is_none")]
    pub option_id: Option<String>,
    /// Time from the question being shown to it being answered.
    #[serde(default, rename = "timeSpent")]
    pub elapsed_ms: u64,
}

impl Response {
    pub fn new(question_id: impl Into<String>, value: f64) -> Self {
        Self {
            question_id: question_id.into(),
            value,
            option_id: None,
            elapsed_ms: 0,
        }
    }
}
