//! Save/load for play sessions
//!
//! Sessions are wrapped in a versioned JSON envelope. A save written by a
//! different schema version is rejected rather than half-loaded.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::session::Session;

/// Current save schema version
pub const SAVE_VERSION: u32 = 1;

/// Versioned wrapper around a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    pub session: Session,
}

/// Only the version, so mismatched saves fail with a clear error
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Serialize a session
pub fn encode(session: &Session) -> Result<String> {
    let envelope = SaveEnvelope {
        version: SAVE_VERSION,
        session: session.clone(),
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Key-value storage a save can be written to
pub trait SaveSlot {
    fn write(&self, key: &str, json: &str) -> std::result::Result<(), String>;
}

/// Encode `session` and write it under `key`
pub fn store(slot: &impl SaveSlot, key: &str, session: &Session) -> Result<()> {
    let json = encode(session)?;
    slot.write(key, &json).map_err(Error::Storage)?;
    log::info!("Session saved ({} bytes)", json.len());
    Ok(())
}

/// Deserialize a session, checking the schema version first
pub fn decode(json: &str) -> Result<Session> {
    let probe: VersionProbe = serde_json::from_str(json)?;
    if probe.version != SAVE_VERSION {
        return Err(Error::UnsupportedSave {
            found: probe.version,
            expected: SAVE_VERSION,
        });
    }
    let envelope: SaveEnvelope = serde_json::from_str(json)?;
    log::info!(
        "Loaded save: level {}, score {}, streak {}",
        envelope.session.level,
        envelope.session.score,
        envelope.session.streak
    );
    Ok(envelope.session)
}
