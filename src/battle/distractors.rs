//! Wrong-but-believable answer selection

use rand::Rng;

/// Number of distractors shown next to the correct answer
pub const DISTRACTOR_COUNT: usize = 3;

/// Candidate pool: arithmetic neighbours of the answer plus common slips
/// (doubling an operand, subtracting in the wrong order).
fn candidate_pool(correct: u32, a: u32, b: u32) -> [i64; 12] {
    let answer = i64::from(correct);
    let (a, b) = (i64::from(a), i64::from(b));
    [
        answer + 1,
        answer - 1,
        answer + 2,
        answer - 2,
        answer + 10,
        answer - 10,
        answer * 2,
        answer / 2,
        a + a,
        b + b,
        a - b,
        b - a,
    ]
}

/// Top `chosen` up with the nearest free neighbours of `correct`.
///
/// Tries `correct + k` before `correct - k`, skipping anything outside
/// `u32`. Six neighbours on either side cover any three slots.
fn fill_shortfall(correct: u32, chosen: &mut Vec<u32>) {
    let fillers = (1..=DISTRACTOR_COUNT as u32 * 2)
        .flat_map(|k| [correct.checked_add(k), correct.checked_sub(k)])
        .flatten();
    for filler in fillers {
        if chosen.len() >= DISTRACTOR_COUNT {
            break;
        }
        if !chosen.contains(&filler) {
            chosen.push(filler);
        }
    }
}

/// Choose three distinct non-negative distractors, none equal to `correct`.
///
/// Draws uniformly from the pool with rejection. The loop only runs while the
/// pool still holds an unused viable value, so it always terminates. Any
/// shortfall is filled with the nearest unused `correct + k`, then
/// `correct - k`, skipping values outside `u32`.
pub fn select_distractors<R: Rng + ?Sized>(
    correct: u32,
    a: u32,
    b: u32,
    rng: &mut R,
) -> [u32; DISTRACTOR_COUNT] {
    let pool = candidate_pool(correct, a, b);
    let usable = |v: i64| v >= 0 && v <= i64::from(u32::MAX) && v != i64::from(correct);

    let mut viable: Vec<u32> = pool
        .iter()
        .copied()
        .filter(|&v| usable(v))
        .map(|v| v as u32)
        .collect();
    viable.sort_unstable();
    viable.dedup();

    let target = viable.len().min(DISTRACTOR_COUNT);
    let mut chosen: Vec<u32> = Vec::with_capacity(DISTRACTOR_COUNT);

    while chosen.len() < target {
        let pick = pool[rng.random_range(0..pool.len())];
        if !usable(pick) {
            continue;
        }
        let pick = pick as u32;
        if !chosen.contains(&pick) {
            chosen.push(pick);
        }
    }

    if chosen.len() < DISTRACTOR_COUNT {
        log::debug!(
            "Distractor pool for {} ran dry ({} viable), synthesizing",
            correct,
            viable.len()
        );
        fill_shortfall(correct, &mut chosen);
    }

    [chosen[0], chosen[1], chosen[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn assert_valid(correct: u32, picks: &[u32; DISTRACTOR_COUNT]) {
        for (i, &p) in picks.iter().enumerate() {
            assert_ne!(p, correct, "distractor equals answer: {:?}", picks);
            assert!(!picks[i + 1..].contains(&p), "duplicate distractor: {:?}", picks);
        }
    }

    #[test]
    fn test_zero_answer_terminates() {
        let mut rng = Pcg32::seed_from_u64(3);
        for a in 0..4 {
            for b in 0..4 {
                let picks = select_distractors(0, a, b, &mut rng);
                assert_valid(0, &picks);
            }
        }
    }

    #[test]
    fn test_small_answers_stay_valid() {
        let mut rng = Pcg32::seed_from_u64(5);
        for correct in 0..5 {
            for _ in 0..50 {
                let picks = select_distractors(correct, correct, 0, &mut rng);
                assert_valid(correct, &picks);
            }
        }
    }

    #[test]
    fn test_picks_come_from_pool_when_possible() {
        let mut rng = Pcg32::seed_from_u64(9);
        let pool = candidate_pool(42, 30, 12);
        for _ in 0..100 {
            let picks = select_distractors(42, 30, 12, &mut rng);
            assert_valid(42, &picks);
            for p in picks {
                assert!(pool.contains(&i64::from(p)), "{} not in pool", p);
            }
        }
    }

    #[test]
    fn test_answer_at_u32_max() {
        let mut rng = Pcg32::seed_from_u64(11);
        for (a, b) in [(u32::MAX, 0), (0, u32::MAX), (u32::MAX, u32::MAX)] {
            let picks = select_distractors(u32::MAX, a, b, &mut rng);
            assert_valid(u32::MAX, &picks);
        }

        let mut chosen = vec![u32::MAX - 1];
        fill_shortfall(u32::MAX, &mut chosen);
        assert_eq!(chosen, vec![u32::MAX - 1, u32::MAX - 2, u32::MAX - 3]);

        let mut chosen = Vec::new();
        fill_shortfall(0, &mut chosen);
        assert_eq!(chosen, vec![1, 2, 3]);
    }

    #[test]
    fn test_same_seed_same_picks() {
        let mut r1 = Pcg32::seed_from_u64(77);
        let mut r2 = Pcg32::seed_from_u64(77);
        assert_eq!(
            select_distractors(18, 9, 9, &mut r1),
            select_distractors(18, 9, 9, &mut r2)
        );
    }
}
