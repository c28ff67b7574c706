// Single live game state for the session, updated atomically from inbound messages.

use crate::domain::{GameState, InboundUpdate, Piece, PlayerId, UpdateError};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Holds the client's view of players, pieces, and board occupancy.
///
/// Writers go through [`GameStateStore::apply_inbound_update`], which swaps the
/// new values in under one watch lock. Readers take a [`snapshot`] and keep
/// working from it, so a reader never sees half of an update.
///
/// [`snapshot`]: GameStateStore::snapshot
#[derive(Debug)]
pub struct GameStateStore {
    board_size: (u32, u32),
    state_tx: watch::Sender<Arc<GameState>>,
    applied: AtomicU64,
}

impl GameStateStore {
    /// Creates an empty store for a `width` x `height` board.
    pub fn new(width: u32, height: u32) -> Self {
        let (state_tx, _state_rx) = watch::channel(Arc::new(GameState::empty(width, height)));
        Self {
            board_size: (width, height),
            state_tx,
            applied: AtomicU64::new(0),
        }
    }

    /// Current state. Cheap: clones an `Arc`, not the state.
    pub fn snapshot(&self) -> Arc<GameState> {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<GameState>> {
        self.state_tx.subscribe()
    }

    /// Number of updates applied since the session started.
    pub fn version(&self) -> u64 {
        self.applied.load(Ordering::Acquire)
    }

    pub fn resolve_controlled_piece(&self, player_id: &PlayerId) -> Option<Piece> {
        self.state_tx
            .borrow()
            .resolve_controlled_piece(player_id)
            .cloned()
    }

    /// Adopts the server's values. Collections present in `update` replace the
    /// local ones; absent collections are left as they are. The update is
    /// validated in full before anything is written.
    pub fn apply_inbound_update(&self, update: InboundUpdate) -> Result<(), UpdateError> {
        if let Some(board) = &update.board {
            let actual = (board.width(), board.height());
            if actual != self.board_size {
                return Err(UpdateError::BoardSizeMismatch {
                    expected: self.board_size,
                    actual,
                });
            }
        }

        if update.is_empty() {
            return Ok(());
        }

        self.state_tx.send_modify(|current| {
            // Copy-on-write: ticks still holding the old snapshot keep it intact.
            let state = Arc::make_mut(current);
            if let Some(players) = update.players {
                state.players = players;
            }
            if let Some(pieces) = update.pieces {
                state.pieces = pieces;
            }
            if let Some(board) = update.board {
                state.board = board;
            }
            self.applied.fetch_add(1, Ordering::Release);
        });

        Ok(())
    }
}
