//! Problem generation
//!
//! Turns a difficulty profile into one arithmetic question with four
//! candidate answers. Pure apart from the injected RNG.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::distractors::select_distractors;
use super::operation::{Operation, pick_operation};
use super::wording;
use crate::config::DifficultyProfile;

/// Number of answers offered to the player
pub const CANDIDATE_COUNT: usize = 4;

/// Quotients for division questions are drawn from this range
const QUOTIENT_RANGE: std::ops::RangeInclusive<u32> = 2..=16;
/// Divisors for division questions are drawn from this range
const DIVISOR_RANGE: std::ops::RangeInclusive<u32> = 2..=11;
/// Multiplication operands are divided by this to keep products small
const MULTIPLY_REDUCTION: u32 = 3;

/// Knobs that shape generation beyond the profile itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationTuning {
    /// Operand span multiplier for elite encounters
    pub elite_multiplier: f32,
    /// Probability of word-problem phrasing
    pub word_problem_chance: f64,
}

impl Default for GenerationTuning {
    fn default() -> Self {
        Self {
            elite_multiplier: 1.5,
            word_problem_chance: 0.3,
        }
    }
}

/// One generated challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Plain equation or multi-line word problem
    pub question_text: String,
    /// Left operand as shown to the player
    pub a: u32,
    /// Right operand as shown to the player
    pub b: u32,
    pub operation: Operation,
    pub correct_answer: u32,
    /// Presentation order, already shuffled
    pub candidate_answers: [u32; CANDIDATE_COUNT],
    /// Copied from the profile at generation time
    pub bonus_points: u32,
}

impl Problem {
    /// Whether `answer` is the correct one
    pub fn is_correct(&self, answer: u32) -> bool {
        answer == self.correct_answer
    }

    /// Slot of the correct answer in `candidate_answers`
    pub fn correct_index(&self) -> usize {
        self.candidate_answers
            .iter()
            .position(|&c| c == self.correct_answer)
            .unwrap_or(0)
    }
}

/// Largest answer `op` can produce when operands are drawn up to `hi`
pub(crate) fn largest_answer(op: Operation, hi: u32) -> u64 {
    let hi = u64::from(hi);
    match op {
        Operation::Add => hi * 2,
        Operation::Subtract => hi,
        Operation::Multiply => (hi / u64::from(MULTIPLY_REDUCTION)).pow(2),
        Operation::Divide => u64::from(*QUOTIENT_RANGE.end()),
    }
}

/// Draw operands and compute the answer for `op`.
///
/// Returns `(a, b, answer)` with subtraction ordered to stay non-negative
/// and division built backwards from the quotient so it is always exact.
fn draw_operands<R: Rng + ?Sized>(op: Operation, lo: u32, hi: u32, rng: &mut R) -> (u32, u32, u32) {
    let mut a = rng.random_range(lo..=hi);
    let mut b = rng.random_range(lo..=hi);

    match op {
        Operation::Add => {
            // Only reachable with an unvalidated profile
            if a.checked_add(b).is_none() {
                b = u32::MAX - a;
            }
            (a, b, a + b)
        }
        Operation::Subtract => {
            if b > a {
                std::mem::swap(&mut a, &mut b);
            }
            (a, b, a - b)
        }
        Operation::Multiply => {
            a /= MULTIPLY_REDUCTION;
            b /= MULTIPLY_REDUCTION;
            if a.checked_mul(b).is_none() {
                b = u32::MAX / a;
            }
            (a, b, a * b)
        }
        Operation::Divide => {
            let answer = rng.random_range(QUOTIENT_RANGE);
            let b = rng.random_range(DIVISOR_RANGE);
            (answer * b, b, answer)
        }
    }
}

/// Generate a problem for `profile`.
///
/// Elite encounters widen the operand span by `tuning.elite_multiplier`.
/// Never fails: every draw is bounded and distractor selection terminates.
pub fn generate<R: Rng + ?Sized>(
    profile: &DifficultyProfile,
    is_elite: bool,
    tuning: GenerationTuning,
    rng: &mut R,
) -> Problem {
    let operation = pick_operation(&profile.allowed_operations, rng);

    let multiplier = if is_elite { tuning.elite_multiplier } else { 1.0 };
    let (lo, hi) = profile.operand_range(multiplier);
    let (a, b, correct_answer) = draw_operands(operation, lo, hi, rng);

    let question_text = if rng.random_bool(tuning.word_problem_chance.clamp(0.0, 1.0)) {
        wording::word_problem(a, b, operation, rng)
    } else {
        wording::equation(a, b, operation)
    };

    let [d1, d2, d3] = select_distractors(correct_answer, a, b, rng);
    let mut candidate_answers = [correct_answer, d1, d2, d3];
    candidate_answers.shuffle(rng);

    log::debug!(
        "Generated {} problem {} {} {} = {} (elite: {}, candidates: {:?})",
        operation.as_str(),
        a,
        operation.symbol(),
        b,
        correct_answer,
        is_elite,
        candidate_answers
    );

    Problem {
        question_text,
        a,
        b,
        operation,
        correct_answer,
        candidate_answers,
        bonus_points: profile.bonus_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::OperationChoice;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn profile(ops: Vec<OperationChoice>) -> DifficultyProfile {
        DifficultyProfile {
            min_operand: 1,
            max_operand: 20,
            allowed_operations: ops,
            time_limit_seconds: 30,
            bonus_points: 100,
        }
    }

    fn plain() -> GenerationTuning {
        GenerationTuning {
            word_problem_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_addition_example() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let p = profile(vec![OperationChoice::Add]);
        for _ in 0..500 {
            let problem = generate(&p, false, plain(), &mut rng);
            assert_eq!(problem.operation, Operation::Add);
            assert!((1..=20).contains(&problem.a));
            assert!((1..=20).contains(&problem.b));
            assert_eq!(problem.correct_answer, problem.a + problem.b);
            assert_eq!(problem.bonus_points, 100);
            assert_eq!(problem.question_text, format!("{} + {} = ?", problem.a, problem.b));
        }
    }

    #[test]
    fn test_elite_widens_range() {
        let mut rng = Pcg32::seed_from_u64(4242);
        let p = profile(vec![OperationChoice::Add]);
        let mut max_seen = 0;
        for _ in 0..2000 {
            let problem = generate(&p, true, plain(), &mut rng);
            assert!((1..=30).contains(&problem.a));
            assert!((1..=30).contains(&problem.b));
            max_seen = max_seen.max(problem.a).max(problem.b);
        }
        assert!(max_seen > 20, "elite draws never left the base range");
    }

    #[test]
    fn test_subtraction_never_negative() {
        let mut rng = Pcg32::seed_from_u64(8);
        let p = profile(vec![OperationChoice::Subtract]);
        for _ in 0..1000 {
            let problem = generate(&p, false, plain(), &mut rng);
            assert!(problem.a >= problem.b);
            assert_eq!(problem.correct_answer, problem.a - problem.b);
        }
    }

    #[test]
    fn test_division_is_exact() {
        let mut rng = Pcg32::seed_from_u64(1000);
        let p = profile(vec![OperationChoice::Divide]);
        for _ in 0..1000 {
            let problem = generate(&p, false, plain(), &mut rng);
            assert_eq!(problem.a, problem.correct_answer * problem.b);
            assert_eq!(problem.a % problem.b, 0);
            assert!((2..=16).contains(&problem.correct_answer));
            assert!((2..=11).contains(&problem.b));
        }
    }

    #[test]
    fn test_multiplication_uses_reduced_operands() {
        let mut rng = Pcg32::seed_from_u64(31);
        let p = profile(vec![OperationChoice::Multiply]);
        for _ in 0..500 {
            let problem = generate(&p, false, plain(), &mut rng);
            assert!(problem.a <= 20 / 3 && problem.b <= 20 / 3);
            assert_eq!(problem.correct_answer, problem.a * problem.b);
        }
    }

    #[test]
    fn test_candidates_hold_answer_once() {
        let mut rng = Pcg32::seed_from_u64(777);
        let p = profile(vec![OperationChoice::Any]);
        for _ in 0..1000 {
            let problem = generate(&p, false, GenerationTuning::default(), &mut rng);
            let hits = problem
                .candidate_answers
                .iter()
                .filter(|&&c| c == problem.correct_answer)
                .count();
            assert_eq!(hits, 1, "{:?}", problem);
            let mut sorted = problem.candidate_answers;
            sorted.sort_unstable();
            assert!(sorted.windows(2).all(|w| w[0] != w[1]), "{:?}", problem);
            assert_eq!(problem.candidate_answers[problem.correct_index()], problem.correct_answer);
        }
    }

    #[test]
    fn test_word_problems_appear() {
        let mut rng = Pcg32::seed_from_u64(5);
        let p = profile(vec![OperationChoice::Add]);
        let tuning = GenerationTuning {
            word_problem_chance: 1.0,
            ..Default::default()
        };
        let problem = generate(&p, false, tuning, &mut rng);
        assert!(problem.question_text.contains('\n'));
        assert!(!problem.question_text.ends_with("= ?"));
    }

    #[test]
    fn test_huge_operands_stay_in_u32() {
        let mut rng = Pcg32::seed_from_u64(64);
        let p = DifficultyProfile {
            min_operand: u32::MAX - 1000,
            max_operand: u32::MAX,
            allowed_operations: vec![OperationChoice::Add, OperationChoice::Multiply],
            time_limit_seconds: 30,
            bonus_points: 100,
        };
        for _ in 0..200 {
            let problem = generate(&p, true, plain(), &mut rng);
            match problem.operation {
                Operation::Add => {
                    assert_eq!(u64::from(problem.correct_answer), u64::from(problem.a) + u64::from(problem.b))
                }
                _ => assert_eq!(
                    u64::from(problem.correct_answer),
                    u64::from(problem.a) * u64::from(problem.b)
                ),
            }
        }
    }

    #[test]
    fn test_largest_answer_bounds() {
        assert_eq!(largest_answer(Operation::Add, u32::MAX), 2 * u64::from(u32::MAX));
        assert_eq!(largest_answer(Operation::Subtract, 150), 150);
        assert_eq!(largest_answer(Operation::Multiply, 211), 70 * 70);
        assert_eq!(largest_answer(Operation::Divide, 5), 16);
    }

    #[test]
    fn test_determinism() {
        let p = profile(vec![OperationChoice::Any]);
        let mut r1 = Pcg32::seed_from_u64(99999);
        let mut r2 = Pcg32::seed_from_u64(99999);
        for _ in 0..50 {
            assert_eq!(
                generate(&p, true, GenerationTuning::default(), &mut r1),
                generate(&p, true, GenerationTuning::default(), &mut r2)
            );
        }
    }
}
