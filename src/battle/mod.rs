//! Deterministic battle core
//!
//! Question generation and answer resolution. Everything here is pure:
//! - Randomness comes in as an injected `Rng`
//! - No I/O, no clocks (callers feed elapsed time)
//! - No rendering or platform dependencies

pub mod distractors;
pub mod encounter;
pub mod hints;
pub mod operation;
pub mod outcome;
pub mod problem;
pub mod wording;

pub use distractors::{DISTRACTOR_COUNT, select_distractors};
pub use encounter::{Encounter, EncounterPhase, Urgency};
pub use operation::{Operation, OperationChoice, pick_operation};
pub use outcome::{Answer, Outcome, resolve};
pub use problem::{CANDIDATE_COUNT, GenerationTuning, Problem, generate};
