// Domain-level errors for session setup, state updates, and collaborator calls.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    ZeroDimension,
    NotDivisible {
        canvas: (u32, u32),
        board: (u32, u32),
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::ZeroDimension => write!(f, "board and canvas dimensions must be non-zero"),
            GeometryError::NotDivisible { canvas, board } => write!(
                f,
                "canvas {}x{} is not a whole multiple of board {}x{}",
                canvas.0, canvas.1, board.0, board.1
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Reasons an inbound update is refused before touching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    BoardSizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateError::BoardSizeMismatch { expected, actual } => write!(
                f,
                "board is fixed at {}x{} but update carried {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
        }
    }
}

impl std::error::Error for UpdateError {}

/// Outbound input could not be queued. Sends are best-effort, so callers log and move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    Full,
    Closed,
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Full => write!(f, "outbound queue full"),
            SendError::Closed => write!(f, "transport closed"),
        }
    }
}

impl std::error::Error for SendError {}

#[derive(Debug)]
pub enum RenderError {
    Io(std::io::Error),
    Other(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io(err) => write!(f, "render io error: {err}"),
            RenderError::Other(message) => write!(f, "render error: {message}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io(err)
    }
}
