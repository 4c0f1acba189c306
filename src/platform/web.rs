//! wasm-bindgen surface for the browser game
//!
//! The JS scene owns rendering, the countdown display and the answer
//! buttons; it forwards clicks and frame deltas here and reads back plain
//! values.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;

use crate::battle::hints;
use crate::config::BattleConfig;
use crate::persistence::{self, SaveSlot};
use crate::session::{Session, SessionPhase};

/// LocalStorage key for the in-progress session
const STORAGE_KEY: &str = "spellduel_session";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

impl SaveSlot for web_sys::Storage {
    fn write(&self, key: &str, json: &str) -> Result<(), String> {
        self.set_item(key, json).map_err(|e| format!("{:?}", e))
    }
}

/// Session handle exported to JS
#[wasm_bindgen]
pub struct WebBattle {
    config: BattleConfig,
    session: Session,
    /// Banner and hint flavour only; gameplay randomness lives in the session
    flavour: Pcg32,
}

impl WebBattle {
    fn load_saved() -> Option<Session> {
        let json = storage()?.get_item(STORAGE_KEY).ok()??;
        match persistence::decode(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!("Discarding saved session: {}", e);
                None
            }
        }
    }

    fn after_battle(&mut self) {
        if matches!(
            self.session.phase,
            SessionPhase::LevelCleared | SessionPhase::Completed
        ) {
            self.save();
        }
    }
}

#[wasm_bindgen]
impl WebBattle {
    /// Create a battle handle, resuming a saved session when one exists.
    ///
    /// `config_json` may be empty to use the built-in tables.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WebBattle, JsValue> {
        console_error_panic_hook::set_once();
        // Ignore the error if a logger is already installed
        let _ = console_log::init_with_level(log::Level::Info);

        let config = if config_json.trim().is_empty() {
            BattleConfig::default()
        } else {
            BattleConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        let seed = js_sys::Date::now() as u64;
        let session = Self::load_saved().unwrap_or_else(|| Session::new(&config, seed));
        let flavour = Pcg32::seed_from_u64(seed ^ 0xA5A5_A5A5);

        log::info!("WebBattle ready (level {}, seed {})", session.level, session.seed);
        Ok(WebBattle {
            config,
            session,
            flavour,
        })
    }

    /// Persist the session to LocalStorage
    pub fn save(&self) {
        let Some(storage) = storage() else {
            return;
        };
        if let Err(e) = persistence::store(&storage, STORAGE_KEY, &self.session) {
            log::warn!("Failed to save session: {}", e);
        }
    }

    /// Forget the saved session and start over
    pub fn reset(&mut self) {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(STORAGE_KEY);
        }
        self.session = Session::new(&self.config, js_sys::Date::now() as u64);
    }

    /// Fire a spell at the next foe; returns true once it is stunned.
    ///
    /// Returns None when the spell fizzles (no mana, no foe, wrong phase).
    pub fn cast_spell(&mut self) -> Option<bool> {
        self.session.cast_spell().map(|cast| cast.stunned)
    }

    /// Regain mana while exploring; returns the mana gained
    pub fn channel(&mut self, dt: f32) -> u32 {
        self.session.channel(dt)
    }

    /// Start a battle with the stunned foe; returns the question text
    pub fn begin_battle(&mut self) -> Option<String> {
        self.session
            .begin_battle(&self.config)
            .map(|p| p.question_text.clone())
    }

    /// Candidate answers in button order
    pub fn candidates(&self) -> Vec<u32> {
        self.session
            .encounter
            .problem()
            .map(|p| p.candidate_answers.to_vec())
            .unwrap_or_default()
    }

    /// Hint label for a candidate button
    pub fn hint(&mut self, candidate: u32) -> String {
        let correct = self.session.encounter.problem().map(|p| p.correct_answer);
        correct
            .map(|c| hints::candidate_hint(candidate, c, &mut self.flavour).to_string())
            .unwrap_or_default()
    }

    /// Player clicked an answer; returns Some(correct) if it resolved the battle
    pub fn select(&mut self, answer: u32) -> Option<bool> {
        let aftermath = self.session.select(answer, &self.config)?;
        self.after_battle();
        Some(aftermath.outcome.correct)
    }

    /// Advance the countdown; returns Some(false) when time runs out
    pub fn tick(&mut self, dt: f32) -> Option<bool> {
        let aftermath = self.session.tick(dt, &self.config)?;
        self.after_battle();
        Some(aftermath.outcome.correct)
    }

    /// End-of-battle banner for the last resolution
    pub fn banner(&mut self) -> String {
        self.session
            .encounter
            .outcome()
            .map(|o| hints::banner(o.correct, &mut self.flavour).to_string())
            .unwrap_or_default()
    }

    pub fn streak_line(&self) -> Option<String> {
        hints::streak_line(self.session.streak)
    }

    /// Enter the next level after the portal opens
    pub fn advance_level(&mut self) -> bool {
        let advanced = self.session.advance_level(&self.config);
        if advanced {
            self.save();
        }
        advanced
    }

    pub fn seconds_left(&self) -> u32 {
        self.session.encounter.seconds_left()
    }

    /// 0 = calm, 1 = warning, 2 = critical
    pub fn urgency(&self) -> u8 {
        self.session.encounter.urgency() as u8
    }

    pub fn score(&self) -> f64 {
        self.session.score as f64
    }

    pub fn level(&self) -> u32 {
        self.session.level
    }

    pub fn streak(&self) -> u32 {
        self.session.streak
    }

    pub fn health(&self) -> u32 {
        self.session.player.health
    }

    pub fn mana(&self) -> u32 {
        self.session.player.mana
    }

    pub fn foes_left(&self) -> u32 {
        self.session.foes.len() as u32
    }

    /// Health of the next foe, 0 when none remain
    pub fn foe_health(&self) -> u32 {
        self.session.current_foe().map(|f| f.health).unwrap_or(0)
    }

    pub fn is_foe_stunned(&self) -> bool {
        self.session.phase == SessionPhase::FoeStunned
    }

    pub fn is_game_over(&self) -> bool {
        self.session.phase == SessionPhase::GameOver
    }

    pub fn is_level_cleared(&self) -> bool {
        matches!(
            self.session.phase,
            SessionPhase::LevelCleared | SessionPhase::Completed
        )
    }
}
