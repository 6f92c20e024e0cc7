//! Qualitative feedback derived from the numeric scores.
//!
//! All texts are fixed. Strengths and gaps are checked in a fixed order, so
//! the same scores always yield the same lists in the same order.

use crate::results::{AssessmentScore, Recommendation};

/// Score at or above which a dimension counts as a strength.
pub const STRENGTH_THRESHOLD: u32 = 80;
/// Score below which a dimension counts as a gap.
pub const GAP_THRESHOLD: u32 = 60;

const FALLBACK_STRENGTH: &str = "Shows potential with focused development";

/// Strength statements, falling back to a single encouragement when
/// nothing qualifies.
pub fn strengths(scores: &AssessmentScore) -> Vec<String> {
    let w = &scores.wiscar;
    let checks = [
        (w.will, "Strong drive for strategic initiatives"),
        (w.interest, "Natural interest in portfolio management"),
        (w.skill, "Solid technical foundation"),
        (w.cognitive, "Excellent systems thinking ability"),
        (w.ability_to_learn, "High learning agility"),
        (scores.psychometric_fit, "Strong personality fit for the role"),
        (scores.technical_score, "Advanced technical competency"),
    ];

    let mut out: Vec<String> = checks
        .iter()
        .filter(|(score, _)| *score >= STRENGTH_THRESHOLD)
        .map(|(_, text)| text.to_string())
        .collect();
    if out.is_empty() {
        out.push(FALLBACK_STRENGTH.to_string());
    }
    out
}

/// Development areas. Interest and ability to learn are never reported as
/// gaps, and an empty list means no major gaps.
pub fn gap_areas(scores: &AssessmentScore) -> Vec<String> {
    let w = &scores.wiscar;
    let checks = [
        (w.skill, "Portfolio management frameworks and tools"),
        (scores.technical_score, "Technical knowledge and domain expertise"),
        (w.cognitive, "Systems thinking and strategic analysis"),
        (w.will, "Sustained motivation for complex initiatives"),
        (scores.psychometric_fit, "Personality alignment with role requirements"),
    ];

    checks
        .iter()
        .filter(|(score, _)| *score < GAP_THRESHOLD)
        .map(|(_, text)| text.to_string())
        .collect()
}

pub fn next_steps(recommendation: Recommendation) -> Vec<String> {
    let steps: &[&str] = match recommendation {
        Recommendation::Yes => &[
            "Enroll in Portfolio Management Foundations course",
            "Join PMO community forums and networking groups",
            "Start managing small internal strategic initiatives",
            "Get certified in prioritization frameworks (RICE, WSJF)",
        ],
        Recommendation::Maybe => &[
            "Address identified gap areas through targeted learning",
            "Gain experience with roadmapping tools (Aha!, Productboard)",
            "Shadow experienced portfolio managers",
            "Complete strategic thinking assessment",
        ],
        Recommendation::No => &[
            "Explore Business Analyst or Product Owner roles first",
            "Develop foundational product management skills",
            "Consider project coordinator or program assistant positions",
            "Build experience in cross-functional collaboration",
        ],
    };
    steps.iter().map(|s| s.to_string()).collect()
}

pub fn career_paths(recommendation: Recommendation) -> Vec<String> {
    let paths: &[&str] = match recommendation {
        Recommendation::Yes => &[
            "Product Portfolio Manager",
            "Roadmap Manager",
            "Strategic PMO Lead",
            "Program Strategy Lead",
            "Capacity Planning Manager",
        ],
        Recommendation::Maybe => &[
            "Business Operations Manager",
            "Product Strategy Analyst",
            "Program Coordinator",
            "Project Manager",
        ],
        Recommendation::No => &[
            "Business Analyst",
            "Customer Insights Manager",
            "Agile Coach",
            "Product Owner",
        ],
    };
    paths.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::WiscarScores;

    fn scores(all: u32) -> AssessmentScore {
        AssessmentScore {
            psychometric_fit: all,
            technical_score: all,
            wiscar: WiscarScores {
                will: all,
                interest: all,
                skill: all,
                cognitive: all,
                ability_to_learn: all,
                real_world_alignment: all,
            },
            overall_score: all,
            recommendation: Recommendation::from_overall(all),
            confidence_score: (all + 10).min(100),
        }
    }

    #[test]
    fn all_seven_strengths_in_check_order() {
        let out = strengths(&scores(80));
        assert_eq!(out.len(), 7);
        assert_eq!(out[0], "Strong drive for strategic initiatives");
        assert_eq!(out[6], "Advanced technical competency");
    }

    #[test]
    fn fallback_strength_when_nothing_qualifies() {
        assert_eq!(strengths(&scores(79)), vec![FALLBACK_STRENGTH.to_string()]);
    }

    #[test]
    fn no_synthetic_gap_filler() {
        assert!(gap_areas(&scores(60)).is_empty());
    }

    #[test]
    fn interest_and_learning_are_not_gaps() {
        let mut s = scores(90);
        s.wiscar.interest = 10;
        s.wiscar.ability_to_learn = 10;
        assert!(gap_areas(&s).is_empty());

        s.wiscar.will = 59;
        s.wiscar.skill = 20;
        assert_eq!(
            gap_areas(&s),
            vec![
                "Portfolio management frameworks and tools".to_string(),
                "Sustained motivation for complex initiatives".to_string(),
            ]
        );
    }

    #[test]
    fn guidance_lists_follow_the_recommendation() {
        assert_eq!(next_steps(Recommendation::Yes).len(), 4);
        assert_eq!(career_paths(Recommendation::Yes).len(), 5);
        assert_eq!(career_paths(Recommendation::Maybe)[0], "Business Operations Manager");
        assert_eq!(career_paths(Recommendation::No).last().unwrap(), "Product Owner");
        assert_eq!(
            next_steps(Recommendation::No)[0],
            "Explore Business Analyst or Product Owner roles first"
        );
    }
}
