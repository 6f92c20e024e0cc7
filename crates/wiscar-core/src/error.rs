//! Error types for the question bank, the response collector, and scoring.

use thiserror::Error;

use crate::model::Aggregate;

/// Errors raised when building a question bank.
#[derive(Debug, Error)]
pub enum BankError {
    /// One or more error-level validation issues were found.
    #[error("invalid question bank: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Errors raised while recording answers in a session.
#[derive(Debug, Error, PartialEq)]
pub enum CollectorError {
    /// The response references a question that is not in the bank.
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    /// The chosen option does not exist on the displayed question.
    #[error("question {question_id} has no option '{option_id}'")]
    UnknownOption {
        question_id: String,
        option_id: String,
    },

    /// A scale answer was given to a question without a scale.
    #[error("question {0} is not answered on a scale")]
    NotAScale(String),

    /// A scale answer fell outside the question's scale.
    #[error("value {value} is outside the scale {min}..={max} of question {question_id}")]
    OutOfScale {
        question_id: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Errors raised by the scorer under the strict coverage policy.
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    /// No response contributes to the given aggregate.
    #[error("no responses contribute to the {aggregate} score")]
    InsufficientResponses { aggregate: Aggregate },

    /// A response references a question that is not in the bank.
    #[error("response for unknown question: {0}")]
    UnknownQuestion(String),
}

impl ScoringError {
    /// Returns `true` if answering more questions would resolve the error.
    pub fn is_coverage_gap(&self) -> bool {
        matches!(self, ScoringError::InsufficientResponses { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = CollectorError::UnknownOption {
            question_id: "tech_aptitude_1".into(),
            option_id: "z".into(),
        };
        assert_eq!(err.to_string(), "question tech_aptitude_1 has no option 'z'");

        let err = ScoringError::InsufficientResponses {
            aggregate: Aggregate::Technical,
        };
        assert_eq!(err.to_string(), "no responses contribute to the technical score");
        assert!(err.is_coverage_gap());
        assert!(!ScoringError::UnknownQuestion("x".into()).is_coverage_gap());
    }

    #[test]
    fn bank_error_lists_every_issue() {
        let err = BankError::Invalid(vec!["a: empty prompt".into(), "b: duplicate id".into()]);
        assert_eq!(
            err.to_string(),
            "invalid question bank: a: empty prompt; b: duplicate id"
        );
    }
}
