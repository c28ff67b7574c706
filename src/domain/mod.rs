// Domain layer: client-side game state, input capture, and collaborator ports.

pub mod board;
pub mod errors;
pub mod geometry;
pub mod input;
pub mod ports;
pub mod state;

pub use board::{Board, Cell};
pub use errors::{GeometryError, RenderError, SendError, UpdateError};
pub use geometry::BoardGeometry;
pub use input::{InputCapture, InputFrame, KeyDisposition, KeyId};
pub use ports::{InputSink, Renderer};
pub use state::{GameState, GridPos, InboundUpdate, Piece, Player, PlayerId};
