//! Flavour text shown around a question

use rand::Rng;
use rand::seq::IndexedRandom;

const NEAR_MISS: &str = "🔥 So close!";
const NEUTRAL_HINTS: [&str; 4] = ["🤔 Think it through!", "💭 Is it this one?", "✨ Perhaps?", "🎯 Could be!"];
const VICTORY_BANNERS: [&str; 5] = ["SPELLBOUND! 🎉", "BRILLIANT! ⭐", "MAGNIFICENT! 🌟", "SUPERB! 💫", "ENCHANTING! 🎊"];
const DEFEAT_BANNERS: [&str; 4] = ["Try again! 💪", "Keep casting! 🎯", "Nearly there! 🌟", "Don't give up! 💖"];

/// Small label under a candidate button.
///
/// Candidates within one of the answer read "so close", which includes the
/// answer itself, so the label never singles out the right button.
pub fn candidate_hint<R: Rng + ?Sized>(candidate: u32, correct: u32, rng: &mut R) -> &'static str {
    if candidate.abs_diff(correct) <= 1 {
        return NEAR_MISS;
    }
    NEUTRAL_HINTS.choose(rng).copied().unwrap_or(NEUTRAL_HINTS[0])
}

/// Banner for the end of an encounter
pub fn banner<R: Rng + ?Sized>(correct: bool, rng: &mut R) -> &'static str {
    let bank: &[&'static str] = if correct { &VICTORY_BANNERS } else { &DEFEAT_BANNERS };
    bank.choose(rng).copied().unwrap_or("")
}

/// Streak line shown while a streak is alive
pub fn streak_line(streak: u32) -> Option<String> {
    (streak > 0).then(|| format!("🔥 Streak: {} 🔥", streak))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_correct_and_neighbours_look_alike() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(candidate_hint(42, 42, &mut rng), NEAR_MISS);
        assert_eq!(candidate_hint(41, 42, &mut rng), NEAR_MISS);
        assert_eq!(candidate_hint(43, 42, &mut rng), NEAR_MISS);
        assert!(NEUTRAL_HINTS.contains(&candidate_hint(84, 42, &mut rng)));
    }

    #[test]
    fn test_banner_matches_result() {
        let mut rng = Pcg32::seed_from_u64(2);
        assert!(VICTORY_BANNERS.contains(&banner(true, &mut rng)));
        assert!(DEFEAT_BANNERS.contains(&banner(false, &mut rng)));
    }

    #[test]
    fn test_streak_line_only_when_alive() {
        assert_eq!(streak_line(0), None);
        assert_eq!(streak_line(3).as_deref(), Some("🔥 Streak: 3 🔥"));
    }
}
