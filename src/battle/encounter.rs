//! One battle encounter
//!
//! `Idle → QuestionPresented → Resolved → Idle`. While a question is up the
//! first of "player selects" and "countdown hits zero" resolves it; the other
//! is ignored from then on.

use serde::{Deserialize, Serialize};

use super::outcome::{Answer, Outcome, resolve};
use super::problem::Problem;

/// Countdown thresholds for display colouring (seconds)
pub const WARNING_SECONDS: u32 = 10;
pub const CRITICAL_SECONDS: u32 = 5;

/// Current phase of an encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncounterPhase {
    /// No question on screen
    Idle,
    /// Question shown, countdown running
    QuestionPresented { problem: Problem, remaining: f32 },
    /// Closed by the first answer or timeout
    Resolved { problem: Problem, answer: Answer, outcome: Outcome },
}

/// How close the countdown is to running out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Calm,
    Warning,
    Critical,
}

/// Drives a single question from presentation to resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    pub phase: EncounterPhase,
    /// Streak carried in from previous encounters
    streak_before: u32,
    time_limit: f32,
}

impl Default for Encounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Encounter {
    pub fn new() -> Self {
        Self {
            phase: EncounterPhase::Idle,
            streak_before: 0,
            time_limit: 0.0,
        }
    }

    /// Show a question and arm the countdown.
    ///
    /// Replaces whatever the encounter held before.
    pub fn present(&mut self, problem: Problem, time_limit_seconds: u32, streak_before: u32) {
        log::info!(
            "Encounter started: {:?} ({}s, streak {})",
            problem.question_text,
            time_limit_seconds,
            streak_before
        );
        self.time_limit = time_limit_seconds as f32;
        self.streak_before = streak_before;
        self.phase = EncounterPhase::QuestionPresented {
            problem,
            remaining: self.time_limit,
        };
    }

    /// The problem currently on screen, if any
    pub fn problem(&self) -> Option<&Problem> {
        match &self.phase {
            EncounterPhase::QuestionPresented { problem, .. } => Some(problem),
            EncounterPhase::Resolved { problem, .. } => Some(problem),
            EncounterPhase::Idle => None,
        }
    }

    pub fn is_presented(&self) -> bool {
        matches!(self.phase, EncounterPhase::QuestionPresented { .. })
    }

    /// Player picked an answer. Ignored unless the question is still open.
    pub fn select(&mut self, answer: u32) -> Option<Outcome> {
        self.close(Answer::Selected(answer))
    }

    /// Advance the countdown by `dt` seconds; resolves as a timeout at zero
    pub fn tick(&mut self, dt: f32) -> Option<Outcome> {
        let expired = match &mut self.phase {
            EncounterPhase::QuestionPresented { remaining, .. } => {
                *remaining = (*remaining - dt).max(0.0);
                *remaining <= 0.0
            }
            _ => false,
        };

        if expired {
            log::info!("Encounter timed out");
            self.close(Answer::Timeout)
        } else {
            None
        }
    }

    /// Answer arriving `elapsed` seconds after presentation.
    ///
    /// For front ends that measure time themselves instead of ticking.
    pub fn submit_after(&mut self, answer: u32, elapsed: f32) -> Option<Outcome> {
        if !self.is_presented() {
            return None;
        }
        if elapsed >= self.time_limit {
            return self.tick(f32::INFINITY);
        }
        self.select(answer)
    }

    /// Whole seconds left for display (rounded up)
    pub fn seconds_left(&self) -> u32 {
        match &self.phase {
            EncounterPhase::QuestionPresented { remaining, .. } => remaining.ceil() as u32,
            _ => 0,
        }
    }

    pub fn urgency(&self) -> Urgency {
        let left = self.seconds_left();
        if left <= CRITICAL_SECONDS {
            Urgency::Critical
        } else if left <= WARNING_SECONDS {
            Urgency::Warning
        } else {
            Urgency::Calm
        }
    }

    /// Outcome of the last resolution, if the encounter has closed
    pub fn outcome(&self) -> Option<Outcome> {
        match &self.phase {
            EncounterPhase::Resolved { outcome, .. } => Some(*outcome),
            _ => None,
        }
    }

    /// Return to idle after the result has been shown
    pub fn dismiss(&mut self) {
        self.phase = EncounterPhase::Idle;
    }

    fn close(&mut self, answer: Answer) -> Option<Outcome> {
        let phase = std::mem::replace(&mut self.phase, EncounterPhase::Idle);
        match phase {
            EncounterPhase::QuestionPresented { problem, .. } => {
                let outcome = resolve(&problem, answer, self.streak_before);
                log::info!(
                    "Encounter resolved: {:?} -> correct={} reward={} streak={}",
                    answer,
                    outcome.correct,
                    outcome.reward_points,
                    outcome.streak_after
                );
                self.phase = EncounterPhase::Resolved {
                    problem,
                    answer,
                    outcome,
                };
                Some(outcome)
            }
            other => {
                log::debug!("Ignoring {:?}, encounter already closed", answer);
                self.phase = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::Operation;

    fn problem() -> Problem {
        Problem {
            question_text: "7 × 6 = ?".to_string(),
            a: 7,
            b: 6,
            operation: Operation::Multiply,
            correct_answer: 42,
            candidate_answers: [14, 42, 43, 84],
            bonus_points: 50,
        }
    }

    #[test]
    fn test_select_then_timeout_ignored() {
        let mut enc = Encounter::new();
        enc.present(problem(), 10, 2);
        let outcome = enc.select(42).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.streak_after, 3);
        assert_eq!(outcome.reward_points, 150);

        // Countdown is disarmed once resolved
        assert_eq!(enc.tick(100.0), None);
        assert_eq!(enc.outcome(), Some(outcome));
    }

    #[test]
    fn test_timeout_then_select_ignored() {
        let mut enc = Encounter::new();
        enc.present(problem(), 3, 5);
        assert_eq!(enc.tick(1.0), None);
        assert_eq!(enc.tick(1.0), None);
        let outcome = enc.tick(1.0).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.streak_after, 0);

        // Late click does nothing
        assert_eq!(enc.select(42), None);
        assert!(matches!(
            enc.phase,
            EncounterPhase::Resolved { answer: Answer::Timeout, .. }
        ));
    }

    #[test]
    fn test_idle_ignores_input() {
        let mut enc = Encounter::new();
        assert_eq!(enc.select(1), None);
        assert_eq!(enc.tick(1.0), None);
        assert!(enc.problem().is_none());
    }

    #[test]
    fn test_countdown_display() {
        let mut enc = Encounter::new();
        enc.present(problem(), 20, 0);
        assert_eq!(enc.seconds_left(), 20);
        assert_eq!(enc.urgency(), Urgency::Calm);
        enc.tick(10.5);
        assert_eq!(enc.seconds_left(), 10);
        assert_eq!(enc.urgency(), Urgency::Warning);
        enc.tick(5.0);
        assert_eq!(enc.seconds_left(), 5);
        assert_eq!(enc.urgency(), Urgency::Critical);
    }

    #[test]
    fn test_submit_after_limit_is_timeout() {
        let mut enc = Encounter::new();
        enc.present(problem(), 10, 4);
        let outcome = enc.submit_after(42, 12.0).unwrap();
        assert!(!outcome.correct);

        let mut enc = Encounter::new();
        enc.present(problem(), 10, 4);
        let outcome = enc.submit_after(42, 3.0).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.streak_after, 5);
    }

    #[test]
    fn test_dismiss_returns_to_idle() {
        let mut enc = Encounter::new();
        enc.present(problem(), 10, 0);
        enc.select(14);
        enc.dismiss();
        assert_eq!(enc.phase, EncounterPhase::Idle);
    }
}
