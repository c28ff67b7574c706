use crate::domain::{BoardGeometry, GameState, RenderError, Renderer};
use tracing::{debug, trace};

/// Renderer for runs without a display. Draws nothing, counts frames.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u64,
}

impl HeadlessRenderer {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for HeadlessRenderer {
    fn init_grid(&mut self, geometry: &BoardGeometry) -> Result<(), RenderError> {
        debug!(
            board_width = geometry.board_width,
            board_height = geometry.board_height,
            block_width = geometry.block_width,
            block_height = geometry.block_height,
            "headless grid"
        );
        Ok(())
    }

    fn clear_board(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    fn draw_pieces(&mut self, state: &GameState) -> Result<(), RenderError> {
        self.frames += 1;
        trace!(frame = self.frames, pieces = state.pieces.len(), "headless frame");
        Ok(())
    }
}
