//! Spellduel terminal runner
//!
//! Plays the battle loop on stdin/stdout. The browser build uses the
//! `platform::web` binding instead.
//!
//! Usage: `spellduel [seed] [config.json]`
//!
//! At the prompt, `1`-`4` picks an answer button and `#<value>` answers
//! with a value directly. `q` quits.

#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use std::io::{self, BufRead, Write};
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use spellduel::battle::hints;
    use spellduel::consts::MANA_REGEN_SECONDS;
    use spellduel::{BattleConfig, Session, SessionPhase};

    /// One line typed at the answer prompt
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) enum Input {
        Answer(u32),
        Quit,
        Invalid,
    }

    /// Bare numbers are button positions; `#` marks a literal value
    pub(crate) fn parse_input(line: &str, candidates: &[u32]) -> Input {
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Input::Quit;
        }
        if let Some(value) = line.strip_prefix('#') {
            return match value.trim().parse() {
                Ok(v) => Input::Answer(v),
                Err(_) => Input::Invalid,
            };
        }
        match line.parse::<usize>() {
            Ok(n) if (1..=candidates.len()).contains(&n) => Input::Answer(candidates[n - 1]),
            _ => Input::Invalid,
        }
    }

    fn read_answer(lines: &mut impl Iterator<Item = io::Result<String>>, candidates: &[u32]) -> Option<u32> {
        loop {
            print!("> ");
            let _ = io::stdout().flush();
            let line = lines.next()?.ok()?;
            match parse_input(&line, candidates) {
                Input::Answer(v) => return Some(v),
                Input::Quit => return None,
                Input::Invalid => println!("Pick 1-{}, type #<value>, or q to quit", candidates.len()),
            }
        }
    }

    pub fn run() -> spellduel::Result<()> {
        let mut args = std::env::args().skip(1);
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        let config = match args.next() {
            Some(path) => BattleConfig::load(path)?,
            None => BattleConfig::default(),
        };

        log::info!("Spellduel (native) starting with seed {}", seed);
        let mut session = Session::new(&config, seed);
        let mut flavour = Pcg32::seed_from_u64(seed.rotate_left(17));
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            match session.phase {
                SessionPhase::LevelCleared => {
                    println!("\n✨ Level {} cleared! The portal opens...", session.level);
                    session.advance_level(&config);
                    if let Some(plan) = config.level(session.level) {
                        println!("=== Level {}: {} ===", session.level, plan.name);
                    }
                    continue;
                }
                SessionPhase::Completed => {
                    println!("\n🏆 Every monster is defeated!");
                    break;
                }
                SessionPhase::GameOver => {
                    println!("\n💀 The wizard has fallen.");
                    break;
                }
                SessionPhase::Exploring => {
                    let Some(foe) = session.current_foe().cloned() else {
                        break;
                    };
                    match session.cast_spell() {
                        Some(cast) if cast.stunned => {
                            println!("✨ The {} is stunned!", foe.kind.name());
                        }
                        Some(cast) => println!(
                            "✨ Your spell hits the {} ({}♥ left, ★ {})",
                            foe.kind.name(),
                            cast.foe_health,
                            cast.mana_left
                        ),
                        None => {
                            println!("🧘 Out of mana, gathering power...");
                            session.channel(MANA_REGEN_SECONDS);
                        }
                    }
                    continue;
                }
                SessionPhase::FoeStunned | SessionPhase::Battling => {}
            }

            let Some(foe) = session.current_foe().cloned() else {
                break;
            };
            let time_limit = config.profile(session.level).time_limit_seconds;
            let Some(problem) = session.begin_battle(&config).cloned() else {
                break;
            };

            println!(
                "\n⚔️  The {}{} must answer to you!",
                foe.kind.name(),
                if foe.kind.is_boss() { " BOSS" } else { "" }
            );
            if let Some(line) = hints::streak_line(session.streak) {
                println!("{}", line);
            }
            println!("⏱️  {} seconds\n", time_limit);
            for line in problem.question_text.lines() {
                println!("    {}", line);
            }
            println!();
            for (i, &candidate) in problem.candidate_answers.iter().enumerate() {
                let hint = hints::candidate_hint(candidate, problem.correct_answer, &mut flavour);
                println!("  [{}] {:>5}   {}", i + 1, candidate, hint);
            }

            let started = Instant::now();
            let Some(answer) = read_answer(&mut lines, &problem.candidate_answers) else {
                println!("Farewell!");
                break;
            };
            let elapsed = started.elapsed().as_secs_f32();

            let Some(aftermath) = session.submit_after(answer, elapsed, &config) else {
                continue;
            };
            println!("\n{}", hints::banner(aftermath.outcome.correct, &mut flavour));
            if aftermath.outcome.correct {
                println!(
                    "+{} points{}",
                    aftermath.points_gained,
                    if aftermath.healed > 0 { ", +1♥" } else { "" }
                );
            } else if elapsed >= time_limit as f32 {
                println!("😈 Too slow! The answer was {}.", problem.correct_answer);
            } else {
                println!("😈 The answer was {}.", problem.correct_answer);
            }
            println!(
                "Score {} | ♥ {}/{} | ★ {}/{}",
                session.score,
                session.player.health,
                session.player.max_health,
                session.player.mana,
                session.player.max_mana
            );
        }

        println!(
            "\nFinal score: {} (level {}, best streak {})",
            session.score, session.level, session.best_streak
        );
        Ok(())
    }
}


#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = terminal::run() {
        log::error!("{}", e);
        eprintln!("spellduel: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::WebBattle, this is just to satisfy the compiler
}
