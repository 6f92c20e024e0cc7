//! Response collection for one pass through a question bank.
//!
//! A [`Session`] owns the cursor and the response set. It keeps at most one
//! response per question: answering again replaces the earlier response in
//! place, so the order of first answers is preserved.

use std::sync::Arc;

use crate::bank::QuestionBank;
use crate::error::CollectorError;
use crate::model::{Question, Response};
use crate::traits::{Clock, SystemClock};

/// Outcome of trying to move to the next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved to this index.
    Moved(usize),
    /// The displayed question has no answer yet; the cursor did not move.
    Unanswered,
    /// The last question was answered; the run is complete.
    Complete,
}

/// An in-progress questionnaire run.
pub struct Session<'a> {
    bank: &'a QuestionBank,
    clock: Arc<dyn Clock>,
    cursor: usize,
    shown_at_ms: u64,
    responses: Vec<Response>,
}

impl<'a> Session<'a> {
    /// Start a session on the first question, timed by wall clock.
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self::with_clock(bank, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(bank: &'a QuestionBank, clock: Arc<dyn Clock>) -> Self {
        let shown_at_ms = clock.now_ms();
        Self {
            bank,
            clock,
            cursor: 0,
            shown_at_ms,
            responses: Vec::new(),
        }
    }

    /// The question currently displayed, if the bank is not empty.
    pub fn current(&self) -> Option<&'a Question> {
        self.bank.questions().get(self.cursor)
    }

    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.bank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bank.is_empty()
    }

    /// Share of the bank reached so far, counting the displayed question.
    pub fn progress_percent(&self) -> f64 {
        if self.bank.is_empty() {
            return 0.0;
        }
        (self.cursor + 1) as f64 / self.bank.len() as f64 * 100.0
    }

    /// Record an answer, replacing any earlier answer to the same question.
    ///
    /// The elapsed time is measured from when the displayed question was
    /// shown, whichever question the answer is for.
    pub fn record(
        &mut self,
        question_id: &str,
        value: f64,
        option_id: Option<&str>,
    ) -> Result<&Response, CollectorError> {
        if self.bank.get(question_id).is_none() {
            return Err(CollectorError::UnknownQuestion(question_id.to_string()));
        }

        let response = Response {
            question_id: question_id.to_string(),
            value,
            option_id: option_id.map(ToString::to_string),
            elapsed_ms: self.clock.now_ms().saturating_sub(self.shown_at_ms),
        };
        tracing::debug!(
            question = question_id,
            value,
            elapsed_ms = response.elapsed_ms,
            "response recorded"
        );

        let slot = match self
            .responses
            .iter()
            .position(|r| r.question_id == question_id)
        {
            Some(existing) => {
                self.responses[existing] = response;
                existing
            }
            None => {
                self.responses.push(response);
                self.responses.len() - 1
            }
        };
        Ok(&self.responses[slot])
    }

    /// Answer the displayed likert question with a point on its scale.
    pub fn answer_scale(&mut self, value: f64) -> Result<&Response, CollectorError> {
        let question = self.displayed()?;
        let Some(scale) = &question.scale else {
            return Err(CollectorError::NotAScale(question.id.clone()));
        };
        if !scale.contains(value) {
            return Err(CollectorError::OutOfScale {
                question_id: question.id.clone(),
                value,
                min: scale.min,
                max: scale.max,
            });
        }
        self.record(&question.id, value, None)
    }

    /// Answer the displayed question by picking one of its options.
    pub fn choose(&mut self, option_id: &str) -> Result<&Response, CollectorError> {
        let question = self.displayed()?;
        let option = question
            .option(option_id)
            .ok_or_else(|| CollectorError::UnknownOption {
                question_id: question.id.clone(),
                option_id: option_id.to_string(),
            })?;
        self.record(&question.id, option.value, Some(&option.id))
    }

    /// Move to the next question once the displayed one is answered.
    pub fn advance(&mut self) -> Advance {
        let Some(question) = self.current() else {
            return Advance::Complete;
        };
        if !self.is_answered(&question.id) {
            return Advance::Unanswered;
        }
        if self.cursor + 1 >= self.bank.len() {
            return Advance::Complete;
        }
        self.move_to(self.cursor + 1);
        Advance::Moved(self.cursor)
    }

    /// Move to the previous question, staying put on the first one.
    pub fn retreat(&mut self) -> usize {
        if self.cursor > 0 {
            self.move_to(self.cursor - 1);
        }
        self.cursor
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.responses.iter().any(|r| r.question_id == question_id)
    }

    pub fn response(&self, question_id: &str) -> Option<&Response> {
        self.responses.iter().find(|r| r.question_id == question_id)
    }

    /// Responses in order of first answer.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn answered_count(&self) -> usize {
        self.responses.len()
    }

    /// End the session and hand over its responses.
    pub fn finish(self) -> Vec<Response> {
        tracing::info!(
            answered = self.responses.len(),
            total = self.bank.len(),
            "session finished"
        );
        self.responses
    }

    fn displayed(&self) -> Result<&'a Question, CollectorError> {
        self.current()
            .ok_or_else(|| CollectorError::UnknownQuestion(format!("#{}", self.cursor)))
    }

    fn move_to(&mut self, index: usize) {
        self.cursor = index;
        self.shown_at_ms = self.clock.now_ms();
    }
}
