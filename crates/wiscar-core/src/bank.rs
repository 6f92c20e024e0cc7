//! The ordered question bank and its validation rules.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::BankError;
use crate::model::{
    Aggregate, Category, Facet, Question, QuestionOption, QuestionType, Scale, MAX_VALUE,
};

/// An ordered, immutable catalog of questions.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    pub description: String,
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank, rejecting it if any error-level issue is found.
    ///
    /// Warnings are logged and otherwise ignored.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, BankError> {
        let bank = Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            questions,
        };

        let issues = validate_questions(&bank.questions);
        let errors: Vec<String> = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .map(ToString::to_string)
            .collect();
        if !errors.is_empty() {
            return Err(BankError::Invalid(errors));
        }
        for warning in &issues {
            tracing::warn!(bank = %bank.id, "{warning}");
        }

        Ok(bank)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The questions in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by id.
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Index of a question in presentation order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    /// Distinct section names in order of first appearance.
    pub fn sections(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.questions
            .iter()
            .map(|q| q.section.as_str())
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// The built-in product portfolio manager assessment.
    pub fn builtin() -> Self {
        Self {
            id: "portfolio-manager".into(),
            name: "Product Portfolio Manager Assessment".into(),
            description: "Psychometric, technical, and WISCAR fit for product portfolio management"
                .into(),
            questions: builtin_questions(),
        }
    }
}

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The bank cannot be used.
    Error,
    /// The bank works but probably not as intended.
    Warning,
}

/// A finding from question bank validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    pub severity: Severity,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.question_id {
            Some(id) => write!(f, "{id}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Check a list of questions against the structural rules of a bank.
pub fn validate_questions(questions: &[Question]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut push = |question: Option<&Question>, severity: Severity, message: String| {
        issues.push(ValidationIssue {
            question_id: question.map(|q| q.id.clone()),
            severity,
            message,
        });
    };

    if questions.is_empty() {
        push(None, Severity::Warning, "bank has no questions".into());
    }

    let mut seen_ids = HashSet::new();
    for q in questions {
        if q.id.trim().is_empty() {
            push(Some(q), Severity::Error, "question id is empty".into());
        }
        if !seen_ids.insert(q.id.as_str()) {
            push(
                Some(q),
                Severity::Error,
                format!("duplicate question id: {}", q.id),
            );
        }
        if q.prompt.trim().is_empty() {
            push(Some(q), Severity::Error, "prompt is empty".into());
        }

        match q.kind {
            QuestionType::Likert => {
                if !q.options.is_empty() {
                    push(
                        Some(q),
                        Severity::Error,
                        "likert question must not have options".into(),
                    );
                }
                match &q.scale {
                    None => push(
                        Some(q),
                        Severity::Error,
                        "likert question has no scale".into(),
                    ),
                    Some(scale) => {
                        if scale.min >= scale.max {
                            push(
                                Some(q),
                                Severity::Error,
                                format!("scale min {} is not below max {}", scale.min, scale.max),
                            );
                        }
                        if scale.min < 0.0 {
                            push(
                                Some(q),
                                Severity::Error,
                                format!("scale min {} is negative", scale.min),
                            );
                        }
                        if scale.max != MAX_VALUE {
                            push(
                                Some(q),
                                Severity::Error,
                                format!("scale max must be {MAX_VALUE}, got {}", scale.max),
                            );
                        }
                    }
                }
            }
            kind => {
                if q.scale.is_some() {
                    push(
                        Some(q),
                        Severity::Error,
                        format!("{kind} question must not have a scale"),
                    );
                }
                if q.options.is_empty() {
                    push(
                        Some(q),
                        Severity::Error,
                        format!("{kind} question has no options"),
                    );
                }
                if kind == QuestionType::ForcedChoice && q.options.len() != 2 {
                    push(
                        Some(q),
                        Severity::Error,
                        format!("forced choice needs exactly 2 options, got {}", q.options.len()),
                    );
                }
                if kind == QuestionType::Scenario
                    && q.scenario.as_deref().map_or(true, |s| s.trim().is_empty())
                {
                    push(
                        Some(q),
                        Severity::Warning,
                        "scenario question has no scenario text".into(),
                    );
                }
            }
        }

        let mut option_ids = HashSet::new();
        for option in &q.options {
            if !option_ids.insert(option.id.as_str()) {
                push(
                    Some(q),
                    Severity::Error,
                    format!("duplicate option id: {}", option.id),
                );
            }
            if !(0.0..=MAX_VALUE).contains(&option.value) {
                push(
                    Some(q),
                    Severity::Error,
                    format!(
                        "option {} value {} is outside 0..={MAX_VALUE}",
                        option.id, option.value
                    ),
                );
            }
        }

        if !q.is_scored() {
            push(
                Some(q),
                Severity::Warning,
                "question has neither an aggregate nor a facet and never affects a score".into(),
            );
        }
    }

    issues
}

// ---------------------------------------------------------------------------
// Built-in question data
// ---------------------------------------------------------------------------

fn likert(
    id: &str,
    section: &str,
    prompt: &str,
    labels: (&str, &str),
    facet: Option<Facet>,
) -> Question {
    Question {
        id: id.into(),
        kind: QuestionType::Likert,
        category: Category::Psychometric,
        section: section.into(),
        prompt: prompt.into(),
        options: Vec::new(),
        scale: Some(Scale {
            min: 1.0,
            max: MAX_VALUE,
            min_label: labels.0.into(),
            max_label: labels.1.into(),
        }),
        scenario: None,
        aggregate: Some(Aggregate::Psychometric),
        facet,
    }
}

#[allow(clippy::too_many_arguments)]
fn choice(
    id: &str,
    kind: QuestionType,
    category: Category,
    section: &str,
    scenario: Option<&str>,
    prompt: &str,
    options: &[(&str, &str, f64)],
    aggregate: Aggregate,
    facet: Option<Facet>,
) -> Question {
    Question {
        id: id.into(),
        kind,
        category,
        section: section.into(),
        prompt: prompt.into(),
        options: options
            .iter()
            .map(|&(id, text, value)| QuestionOption {
                id: id.into(),
                text: text.into(),
                value,
            })
            .collect(),
        scale: None,
        scenario: scenario.map(Into::into),
        aggregate: Some(aggregate),
        facet,
    }
}

const AGREEMENT: (&str, &str) = ("Strongly Disagree", "Strongly Agree");
const LIKENESS: (&str, &str) = ("Not at all like me", "Very much like me");

fn builtin_questions() -> Vec<Question> {
    use Aggregate::{Psychometric, Technical};
    use QuestionType::{ForcedChoice, MultipleChoice, Scenario};

    vec![
        // Interest (Holland RIASEC)
        likert(
            "psych_interest_1",
            "Interest Assessment",
            "I enjoy organizing complex workflows into actionable plans",
            AGREEMENT,
            Some(Facet::Interest),
        ),
        likert(
            "psych_interest_2",
            "Interest Assessment",
            "I find satisfaction in aligning multiple projects with business objectives",
            AGREEMENT,
            Some(Facet::Interest),
        ),
        choice(
            "psych_interest_3",
            ForcedChoice,
            Category::Psychometric,
            "Interest Assessment",
            None,
            "Which would you prefer?",
            &[
                ("a", "Define strategy and roadmaps", 5.0),
                ("b", "Execute and build products", 2.0),
            ],
            Psychometric,
            Some(Facet::Interest),
        ),
        // Personality (Big Five)
        likert(
            "psych_personality_1",
            "Personality Assessment",
            "I am systematic and organized in my approach to work",
            LIKENESS,
            None,
        ),
        likert(
            "psych_personality_2",
            "Personality Assessment",
            "I enjoy exploring new ideas and innovative approaches",
            LIKENESS,
            None,
        ),
        likert(
            "psych_personality_3",
            "Personality Assessment",
            "I remain calm and composed when dealing with competing priorities",
            LIKENESS,
            None,
        ),
        // Technical & aptitude
        choice(
            "tech_aptitude_1",
            MultipleChoice,
            Category::Technical,
            "Logical Reasoning",
            None,
            "A product roadmap shows 3 features planned for Q1, but the team can only deliver 2. \
             Which prioritization approach is most appropriate?",
            &[
                ("a", "First-in-first-out (FIFO)", 1.0),
                ("b", "RICE framework (Reach, Impact, Confidence, Effort)", 5.0),
                ("c", "Random selection", 0.0),
                ("d", "Stakeholder preference only", 2.0),
            ],
            Technical,
            None,
        ),
        choice(
            "tech_aptitude_2",
            MultipleChoice,
            Category::Technical,
            "Data Interpretation",
            None,
            "If a team's velocity is 20 story points per sprint, and they have 100 story points \
             remaining, how many sprints are needed?",
            &[
                ("a", "4 sprints", 3.0),
                ("b", "5 sprints", 5.0),
                ("c", "6 sprints", 2.0),
                ("d", "Cannot determine without more information", 1.0),
            ],
            Technical,
            None,
        ),
        // Domain skills
        choice(
            "domain_skills_1",
            MultipleChoice,
            Category::Domain,
            "Prioritization Frameworks",
            None,
            "In a resource-constrained environment, which prioritization model would be most \
             effective?",
            &[
                ("a", "MoSCoW (Must have, Should have, Could have, Won't have)", 4.0),
                ("b", "WSJF (Weighted Shortest Job First)", 5.0),
                ("c", "Alphabetical order", 0.0),
                ("d", "Loudest stakeholder wins", 1.0),
            ],
            Technical,
            Some(Facet::Skill),
        ),
        choice(
            "domain_skills_2",
            Scenario,
            Category::Domain,
            "Strategic Alignment",
            Some(
                "You're managing a portfolio of 5 products. The CEO wants to add a new \
                 high-priority initiative, but your teams are already at 100% capacity.",
            ),
            "What's your recommended approach?",
            &[
                ("a", "Add the new initiative and let teams figure it out", 1.0),
                ("b", "Conduct a capacity vs demand analysis and present trade-off options", 5.0),
                ("c", "Refuse the request outright", 0.0),
                ("d", "Hire more people immediately", 2.0),
            ],
            Technical,
            Some(Facet::Skill),
        ),
        // WISCAR
        likert(
            "wiscar_will_1",
            "Drive & Motivation",
            "I consistently follow through on long-term strategic initiatives, even when \
             they're complex",
            ("Never", "Always"),
            Some(Facet::Will),
        ),
        choice(
            "wiscar_skill_1",
            MultipleChoice,
            Category::Domain,
            "Tool Familiarity",
            None,
            "Which tools have you used for roadmapping or portfolio management?",
            &[
                ("a", "Aha!, Productboard, or similar dedicated tools", 5.0),
                ("b", "Jira, Azure DevOps, or development-focused tools", 4.0),
                ("c", "Excel, Google Sheets, or basic tools", 2.0),
                ("d", "None of the above", 0.0),
            ],
            Psychometric,
            Some(Facet::Skill),
        ),
        choice(
            "wiscar_cognitive_1",
            Scenario,
            Category::Aptitude,
            "Systems Thinking",
            Some(
                "A delay in Product A's feature will impact the timeline for Product B, which \
                 affects the marketing campaign for Product C.",
            ),
            "What's the most important first step?",
            &[
                ("a", "Fix Product A immediately", 2.0),
                ("b", "Map out all dependencies and impact scenarios", 5.0),
                ("c", "Inform stakeholders about the delay", 3.0),
                ("d", "Reallocate resources from other projects", 1.0),
            ],
            Psychometric,
            Some(Facet::Cognitive),
        ),
        likert(
            "wiscar_learn_1",
            "Learning Orientation",
            "I actively seek feedback and adjust my approach based on new information",
            ("Rarely", "Very Often"),
            Some(Facet::AbilityToLearn),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option_question(id: &str, kind: QuestionType, values: &[f64]) -> Question {
        Question {
            id: id.into(),
            kind,
            category: Category::Technical,
            section: "Test".into(),
            prompt: "Pick one".into(),
            options: values
                .iter()
                .enumerate()
                .map(|(i, &value)| QuestionOption {
                    id: format!("o{i}"),
                    text: format!("Option {i}"),
                    value,
                })
                .collect(),
            scale: None,
            scenario: None,
            aggregate: Some(Aggregate::Technical),
            facet: None,
        }
    }

    #[test]
    fn builtin_bank_is_clean() {
        let bank = QuestionBank::builtin();
        let issues = validate_questions(bank.questions());
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
        assert_eq!(bank.len(), 14);
    }

    #[test]
    fn builtin_tags_follow_id_conventions() {
        let bank = QuestionBank::builtin();
        for q in bank.questions() {
            let expected_aggregate = if q.id.starts_with("psych_") || q.id.starts_with("wiscar_") {
                Aggregate::Psychometric
            } else {
                Aggregate::Technical
            };
            assert_eq!(q.aggregate, Some(expected_aggregate), "{}", q.id);

            let expected_facet = [
                ("will", Facet::Will),
                ("interest", Facet::Interest),
                ("skill", Facet::Skill),
                ("cognitive", Facet::Cognitive),
                ("learn", Facet::AbilityToLearn),
            ]
            .into_iter()
            .find(|(keyword, _)| q.id.contains(keyword))
            .map(|(_, facet)| facet);
            assert_eq!(q.facet, expected_facet, "{}", q.id);
        }
    }

    #[test]
    fn sections_keep_first_appearance_order() {
        let bank = QuestionBank::builtin();
        let sections = bank.sections();
        assert_eq!(sections[0], "Interest Assessment");
        assert_eq!(sections[1], "Personality Assessment");
        assert_eq!(sections.len(), 10);
    }

    #[test]
    fn lookup_by_id() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.position("psych_interest_3"), Some(2));
        assert_eq!(bank.get("wiscar_learn_1").unwrap().facet, Some(Facet::AbilityToLearn));
        assert!(bank.get("missing").is_none());
    }

    #[test]
    fn forced_choice_needs_two_options() {
        let q = option_question("fc", QuestionType::ForcedChoice, &[5.0, 2.0, 1.0]);
        let issues = validate_questions(&[q]);
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.message.contains("exactly 2")));
    }

    #[test]
    fn option_values_must_fit_the_scale() {
        let q = option_question("mc", QuestionType::MultipleChoice, &[5.0, 7.0]);
        let issues = validate_questions(&[q]);
        assert!(issues.iter().any(|i| i.message.contains("value 7")));
    }

    #[test]
    fn likert_needs_scale_and_no_options() {
        let mut q = option_question("lk", QuestionType::Likert, &[1.0]);
        q.aggregate = Some(Aggregate::Psychometric);
        let messages: Vec<String> = validate_questions(&[q])
            .into_iter()
            .map(|i| i.message)
            .collect();
        assert!(messages.iter().any(|m| m.contains("must not have options")));
        assert!(messages.iter().any(|m| m.contains("has no scale")));
    }

    #[test]
    fn scale_max_must_be_five() {
        let mut q = likert("lk", "Test", "Rate", AGREEMENT, None);
        if let Some(scale) = q.scale.as_mut() {
            scale.max = 7.0;
        }
        let issues = validate_questions(&[q]);
        assert!(issues.iter().any(|i| i.message.contains("scale max must be 5")));
    }

    #[test]
    fn duplicate_ids_are_errors() {
        let a = option_question("same", QuestionType::MultipleChoice, &[1.0]);
        let b = a.clone();
        let err = QuestionBank::new("dupes", "Dupes", vec![a, b]).unwrap_err();
        assert!(err.to_string().contains("duplicate question id"));
    }

    #[test]
    fn untagged_question_is_only_a_warning() {
        let mut q = option_question("free", QuestionType::MultipleChoice, &[1.0, 2.0]);
        q.aggregate = None;
        let issues = validate_questions(std::slice::from_ref(&q));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(QuestionBank::new("ok", "Ok", vec![q]).is_ok());
    }

    #[test]
    fn scenario_without_text_warns() {
        let q = option_question("sc", QuestionType::Scenario, &[1.0, 5.0]);
        let issues = validate_questions(&[q]);
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Warning && i.message.contains("scenario text")));
    }
}
