//! Resolving an answer into an outcome

use serde::{Deserialize, Serialize};

use super::problem::Problem;

/// What the player did before the encounter closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    /// Player picked a candidate
    Selected(u32),
    /// Countdown reached zero first
    Timeout,
}

/// Result of one encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub correct: bool,
    /// Streak-scaled bonus; 0 when incorrect. Excludes the foe's own points.
    pub reward_points: u32,
    pub streak_after: u32,
}

impl Outcome {
    /// Reward plus a caller-supplied base (e.g. the foe's point value)
    pub fn total_reward(&self, base_points: u32) -> u32 {
        if self.correct {
            base_points.saturating_add(self.reward_points)
        } else {
            0
        }
    }
}

/// Resolve an answer against a problem.
///
/// Correct answers extend the streak and earn `bonus × max(1, streak)`.
/// Anything else, timeouts included, resets the streak and earns nothing.
pub fn resolve(problem: &Problem, answer: Answer, streak_before: u32) -> Outcome {
    let correct = match answer {
        Answer::Selected(value) => problem.is_correct(value),
        Answer::Timeout => false,
    };

    if correct {
        let streak_after = streak_before.saturating_add(1);
        Outcome {
            correct,
            reward_points: problem.bonus_points.saturating_mul(streak_after.max(1)),
            streak_after,
        }
    } else {
        Outcome {
            correct,
            reward_points: 0,
            streak_after: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::Operation;

    fn problem() -> Problem {
        Problem {
            question_text: "12 + 30 = ?".to_string(),
            a: 12,
            b: 30,
            operation: Operation::Add,
            correct_answer: 42,
            candidate_answers: [41, 42, 24, 52],
            bonus_points: 100,
        }
    }

    #[test]
    fn test_correct_extends_streak() {
        let outcome = resolve(&problem(), Answer::Selected(42), 7);
        assert!(outcome.correct);
        assert_eq!(outcome.streak_after, 8);
        assert_eq!(outcome.reward_points, 800);
    }

    #[test]
    fn test_reward_scales_with_streak() {
        let outcome = resolve(&problem(), Answer::Selected(42), 2);
        assert_eq!(outcome.streak_after, 3);
        assert_eq!(outcome.reward_points, 300);

        let first = resolve(&problem(), Answer::Selected(42), 0);
        assert_eq!(first.reward_points, 100);
    }

    #[test]
    fn test_wrong_answer_resets_streak() {
        let outcome = resolve(&problem(), Answer::Selected(41), 7);
        assert_eq!(
            outcome,
            Outcome {
                correct: false,
                reward_points: 0,
                streak_after: 0
            }
        );
    }

    #[test]
    fn test_timeout_is_never_correct() {
        let outcome = resolve(&problem(), Answer::Timeout, 3);
        assert!(!outcome.correct);
        assert_eq!(outcome.streak_after, 0);
        assert_eq!(outcome.total_reward(25), 0);
    }

    #[test]
    fn test_total_reward_adds_base() {
        let outcome = resolve(&problem(), Answer::Selected(42), 0);
        assert_eq!(outcome.total_reward(25), 125);
    }

    #[test]
    fn test_deterministic() {
        let p = problem();
        assert_eq!(
            resolve(&p, Answer::Selected(24), 5),
            resolve(&p, Answer::Selected(24), 5)
        );
    }
}
