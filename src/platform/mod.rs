//! Platform abstraction layer
//!
//! Browser side of the battle core:
//! - `WebBattle` binding driven from the game's JS scenes
//! - Session storage in LocalStorage

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebBattle;
