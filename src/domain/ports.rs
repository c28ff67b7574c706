use super::errors::{RenderError, SendError};
use super::geometry::BoardGeometry;
use super::input::InputFrame;
use super::state::{GameState, PlayerId};

// Port for the outbound half of the transport. Must never block the tick.
pub trait InputSink: Send {
    fn send_input(&mut self, player_id: &PlayerId, frame: &InputFrame) -> Result<(), SendError>;
}

// Port for drawing the board and pieces from a state snapshot.
pub trait Renderer: Send {
    fn init_grid(&mut self, geometry: &BoardGeometry) -> Result<(), RenderError>;
    fn clear_board(&mut self) -> Result<(), RenderError>;
    fn draw_pieces(&mut self, state: &GameState) -> Result<(), RenderError>;
}
