//! Player persistence seam.
//!
//! The engine only needs load/save by player id. [`MemoryStore`] keeps
//! SCALE-encoded snapshots, the same bytes a remote store would hold.

use std::collections::BTreeMap;

use parity_scale_codec::{Decode, Encode};

use crate::error::{GameError, GameResult};
use crate::state::PlayerState;
use crate::types::PlayerId;

pub trait PlayerStore {
    fn load(&self, id: PlayerId) -> GameResult<PlayerState>;
    fn save(&mut self, state: &PlayerState) -> GameResult<()>;
}

/// In-memory store of encoded player snapshots
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshots: BTreeMap<PlayerId, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.snapshots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Raw encoded snapshot for a player
    pub fn snapshot(&self, id: PlayerId) -> Option<&[u8]> {
        self.snapshots.get(&id).map(|b| b.as_slice())
    }

    /// Overwrite a snapshot with arbitrary bytes
    pub fn put_raw(&mut self, id: PlayerId, bytes: Vec<u8>) {
        self.snapshots.insert(id, bytes);
    }
}

impl PlayerStore for MemoryStore {
    fn load(&self, id: PlayerId) -> GameResult<PlayerState> {
        let bytes = self
            .snapshots
            .get(&id)
            .ok_or(GameError::PlayerNotFound { id })?;
        PlayerState::decode(&mut bytes.as_slice()).map_err(|_| GameError::CorruptState { id })
    }

    fn save(&mut self, state: &PlayerState) -> GameResult<()> {
        self.snapshots.insert(state.id, state.encode());
        Ok(())
    }
}
