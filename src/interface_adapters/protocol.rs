// Wire protocol DTOs and conversions for the game server WebSocket.
// Messages are JSON text frames tagged by a "type" field.

use crate::domain::{Board, GridPos, InboundUpdate, InputFrame, Piece, Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Messages the server sends to the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    // Identity for this connection, sent once after the socket opens.
    #[serde(rename = "init")]
    Init(InitPayload),
    // Authoritative snapshot (or partial snapshot) of the shared game.
    #[serde(rename = "gameState")]
    GameState(GameStatePayload),
}

/// Player ids arrive as numbers from some servers and strings from others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(u64),
    Text(String),
}

impl From<WireId> for PlayerId {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Number(n) => PlayerId::numeric(n),
            WireId::Text(s) => PlayerId::new(s),
        }
    }
}

impl From<&PlayerId> for WireId {
    fn from(id: &PlayerId) -> Self {
        match id.issued_number() {
            Some(n) => WireId::Number(n),
            None => WireId::Text(id.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitPayload {
    pub player_id: WireId,
    #[serde(default)]
    pub piece_type: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameStatePayload {
    #[serde(default)]
    pub piece_states: Option<Vec<PieceStateDto>>,
    #[serde(default)]
    pub players: Option<Vec<PlayerDto>>,
    #[serde(default)]
    pub board: Option<BoardDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PivotDto {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PieceStateDto {
    pub player_id: WireId,
    pub pivot: PivotDto,
    #[serde(default)]
    pub rotation: u8,
    pub shape: u8,
}

impl From<PieceStateDto> for Piece {
    fn from(dto: PieceStateDto) -> Self {
        Self {
            owner_id: dto.player_id.into(),
            position: GridPos::new(dto.pivot.x, dto.pivot.y),
            rotation: dto.rotation,
            shape: dto.shape,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerDto {
    pub id: WireId,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl From<PlayerDto> for Player {
    fn from(dto: PlayerDto) -> Self {
        Self {
            id: dto.id.into(),
            metadata: dto.metadata,
        }
    }
}

/// Row-major board occupancy; `null` for an empty cell, a shape id otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardDto {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<Option<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    BoardCells { expected: usize, actual: usize },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::BoardCells { expected, actual } => {
                write!(f, "board has {actual} cells, expected {expected}")
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

impl TryFrom<BoardDto> for Board {
    type Error = ProtocolError;

    fn try_from(dto: BoardDto) -> Result<Self, Self::Error> {
        Board::from_cells(dto.width, dto.height, dto.cells).map_err(|e| ProtocolError::BoardCells {
            expected: e.expected,
            actual: e.actual,
        })
    }
}

impl TryFrom<GameStatePayload> for InboundUpdate {
    type Error = ProtocolError;

    fn try_from(payload: GameStatePayload) -> Result<Self, Self::Error> {
        // Convert the board first so a malformed one rejects the whole message.
        let board = payload.board.map(Board::try_from).transpose()?;
        Ok(Self {
            players: payload
                .players
                .map(|players| players.into_iter().map(Player::from).collect()),
            pieces: payload
                .piece_states
                .map(|pieces| pieces.into_iter().map(Piece::from).collect()),
            board,
        })
    }
}

/// Per-tick input sent by the client while it controls a piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputMessageDto {
    pub player_id: WireId,
    pub keys: Vec<String>,
}

impl InputMessageDto {
    pub fn new(player_id: &PlayerId, frame: &InputFrame) -> Self {
        Self {
            player_id: player_id.into(),
            keys: frame.keys().map(|k| k.as_str().to_string()).collect(),
        }
    }
}
