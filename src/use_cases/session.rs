// Explicit per-session context shared by the transport task and the frame loop.

use super::store::GameStateStore;
use crate::domain::{BoardGeometry, PlayerId};
use std::sync::OnceLock;
use tracing::{info, warn};

#[derive(Debug)]
pub struct SessionContext {
    geometry: BoardGeometry,
    // Write-once: the local player's identity never changes within a session.
    identity: OnceLock<PlayerId>,
    store: GameStateStore,
}

impl SessionContext {
    pub fn new(geometry: BoardGeometry) -> Self {
        Self {
            store: GameStateStore::new(geometry.board_width, geometry.board_height),
            geometry,
            identity: OnceLock::new(),
        }
    }

    pub fn with_identity(geometry: BoardGeometry, player_id: PlayerId) -> Self {
        let session = Self::new(geometry);
        let _ = session.identity.set(player_id);
        session
    }

    /// Records the local identity. Returns false if a different identity was
    /// already assigned; re-assigning the same id is accepted.
    pub fn assign_identity(&self, player_id: PlayerId) -> bool {
        match self.identity.set(player_id.clone()) {
            Ok(()) => {
                info!(player_id = %player_id, "identity assigned");
                true
            }
            Err(_) => {
                let current = self.identity.get();
                if current == Some(&player_id) {
                    return true;
                }
                warn!(
                    current = ?current.map(PlayerId::as_str),
                    offered = %player_id,
                    "identity already assigned; ignoring"
                );
                false
            }
        }
    }

    pub fn my_player_id(&self) -> Option<&PlayerId> {
        self.identity.get()
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn store(&self) -> &GameStateStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> BoardGeometry {
        BoardGeometry::new(20, 20, 400, 400).expect("valid geometry")
    }

    #[test]
    fn when_session_starts_then_identity_is_unknown_and_store_matches_board() {
        let session = SessionContext::new(geometry());

        assert!(session.my_player_id().is_none());
        assert_eq!(session.store().snapshot().board.height(), 20);
    }

    #[test]
    fn when_identity_is_assigned_twice_with_a_new_id_then_first_one_sticks() {
        let session = SessionContext::new(geometry());

        assert!(session.assign_identity("p1".into()));
        assert!(!session.assign_identity("p2".into()));

        assert_eq!(session.my_player_id(), Some(&PlayerId::from("p1")));
    }

    #[test]
    fn when_same_identity_is_reassigned_then_it_is_accepted() {
        let session = SessionContext::with_identity(geometry(), "7".into());

        assert!(session.assign_identity("7".into()));
        assert_eq!(session.my_player_id(), Some(&PlayerId::from("7")));
    }
}
