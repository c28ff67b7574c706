// Domain-level game state as seen by the client: players, pieces, board occupancy.

use super::board::Board;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier the server assigns to a participant.
///
/// Ids compare by their text, so `7` and `"7"` name the same player. The
/// server's numeric form is kept so the id goes back out exactly as issued.
#[derive(Debug, Clone)]
pub struct PlayerId {
    text: String,
    number: Option<u64>,
}

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            text: id.into(),
            number: None,
        }
    }

    pub fn numeric(id: u64) -> Self {
        Self {
            text: id.to_string(),
            number: Some(id),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The number the server issued, if it issued one.
    pub fn issued_number(&self) -> Option<u64> {
        self.number
    }
}

impl PartialEq for PlayerId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for PlayerId {}

impl Hash for PlayerId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for PlayerId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PlayerId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A player-controlled grid entity. Shape and rotation are opaque to the
/// client beyond drawing; legality of moves is decided by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub owner_id: PlayerId,
    pub position: GridPos,
    pub rotation: u8,
    pub shape: u8,
}

/// The client's working snapshot of the shared game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub players: Vec<Player>,
    pub pieces: Vec<Piece>,
    pub board: Board,
}

impl GameState {
    /// Empty state for a session whose board is `width` x `height` cells.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            players: Vec::new(),
            pieces: Vec::new(),
            board: Board::new(width, height),
        }
    }

    /// Returns the piece owned by `player_id`.
    ///
    /// The server is expected to send at most one piece per owner. If it sends
    /// more, the first one in the order the server listed them wins, so the
    /// result never depends on anything but the inbound message.
    pub fn resolve_controlled_piece(&self, player_id: &PlayerId) -> Option<&Piece> {
        self.pieces.iter().find(|p| &p.owner_id == player_id)
    }

    pub fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == player_id)
    }
}

/// A server message translated into domain terms. `None` means "unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboundUpdate {
    pub players: Option<Vec<Player>>,
    pub pieces: Option<Vec<Piece>>,
    pub board: Option<Board>,
}

impl InboundUpdate {
    pub fn is_empty(&self) -> bool {
        self.players.is_none() && self.pieces.is_none() && self.board.is_none()
    }
}
