//! Response timing statistics.

use serde::{Deserialize, Serialize};

use crate::model::Response;

/// How long the respondent spent on the questions they answered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    /// Number of responses summarized.
    pub answered: usize,
    /// Sum of all recorded times in milliseconds.
    pub total_ms: u64,
    /// Mean time per response in milliseconds.
    pub mean_ms: u64,
    /// Median time per response in milliseconds.
    pub median_ms: u64,
    /// The question that took longest, with its time.
    pub slowest: Option<SlowestResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlowestResponse {
    pub question_id: String,
    pub elapsed_ms: u64,
}

/// Summarize the recorded elapsed times of a response set.
pub fn timing_summary(responses: &[Response]) -> TimingSummary {
    if responses.is_empty() {
        return TimingSummary::default();
    }

    let mut times: Vec<u64> = responses.iter().map(|r| r.elapsed_ms).collect();
    times.sort_unstable();

    let total_ms = times.iter().fold(0u64, |acc, &t| acc.saturating_add(t));
    let n = times.len();
    let median_ms = if n % 2 == 0 {
        let (a, b) = (times[n / 2 - 1], times[n / 2]);
        a / 2 + b / 2 + (a % 2 + b % 2) / 2
    } else {
        times[n / 2]
    };

    // First of equally slow responses wins.
    let slowest = responses
        .iter()
        .fold(None::<&Response>, |best, r| match best {
            Some(b) if b.elapsed_ms >= r.elapsed_ms => Some(b),
            _ => Some(r),
        })
        .map(|r| SlowestResponse {
            question_id: r.question_id.clone(),
            elapsed_ms: r.elapsed_ms,
        });

    TimingSummary {
        answered: n,
        total_ms,
        mean_ms: total_ms / n as u64,
        median_ms,
        slowest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(id: &str, ms: u64) -> Response {
        Response {
            elapsed_ms: ms,
            ..Response::new(id, 3.0)
        }
    }

    #[test]
    fn empty_set_has_zero_summary() {
        assert_eq!(timing_summary(&[]), TimingSummary::default());
    }

    #[test]
    fn odd_count() {
        let summary = timing_summary(&[timed("a", 300), timed("b", 100), timed("c", 2000)]);
        assert_eq!(summary.answered, 3);
        assert_eq!(summary.total_ms, 2400);
        assert_eq!(summary.mean_ms, 800);
        assert_eq!(summary.median_ms, 300);
        assert_eq!(summary.slowest.unwrap().question_id, "c");
    }

    #[test]
    fn even_count_and_ties() {
        let summary = timing_summary(&[
            timed("a", 500),
            timed("b", 500),
            timed("c", 100),
            timed("d", 200),
        ]);
        assert_eq!(summary.median_ms, 350);
        assert_eq!(summary.slowest.unwrap().question_id, "a");
    }

    #[test]
    fn huge_times_saturate() {
        let summary = timing_summary(&[timed("a", u64::MAX), timed("b", 1)]);
        assert_eq!(summary.total_ms, u64::MAX);
        assert_eq!(summary.mean_ms, u64::MAX / 2);
        assert_eq!(summary.median_ms, u64::MAX / 2 + 1);
        assert_eq!(summary.slowest.unwrap().question_id, "a");

        let summary = timing_summary(&[timed("a", u64::MAX), timed("b", u64::MAX)]);
        assert_eq!(summary.median_ms, u64::MAX);
    }
}
