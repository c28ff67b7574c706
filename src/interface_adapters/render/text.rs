use super::shapes::{glyph, piece_cells};
use crate::domain::{BoardGeometry, GameState, RenderError, Renderer};
use std::io::Write;

const EMPTY: char = '.';
// Cursor home + clear screen.
const ANSI_REDRAW: &str = "\x1b[H\x1b[2J";

/// Draws the board as one character per cell.
pub struct TextRenderer<W> {
    out: W,
    ansi: bool,
    width: usize,
    height: usize,
    // One independent slot per cell, row-major.
    cells: Vec<char>,
}

impl<W: Write> TextRenderer<W> {
    /// Redraws in place on a terminal.
    pub fn terminal(out: W) -> Self {
        Self::with_mode(out, true)
    }

    /// Appends frames without escape codes.
    pub fn plain(out: W) -> Self {
        Self::with_mode(out, false)
    }

    fn with_mode(out: W, ansi: bool) -> Self {
        Self {
            out,
            ansi,
            width: 0,
            height: 0,
            cells: Vec::new(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn paint(&mut self, x: i32, y: i32, ch: char) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.cells[y as usize * self.width + x as usize] = ch;
    }

    fn flush_frame(&mut self) -> Result<(), RenderError> {
        let mut frame = String::with_capacity((self.width + 1) * self.height + ANSI_REDRAW.len());
        if self.ansi {
            frame.push_str(ANSI_REDRAW);
        }
        for row in self.cells.chunks(self.width) {
            frame.extend(row.iter());
            frame.push('\n');
        }
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> Renderer for TextRenderer<W> {
    fn init_grid(&mut self, geometry: &BoardGeometry) -> Result<(), RenderError> {
        self.width = geometry.board_width as usize;
        self.height = geometry.board_height as usize;
        self.cells = vec![EMPTY; self.width * self.height];
        Ok(())
    }

    fn clear_board(&mut self) -> Result<(), RenderError> {
        if self.cells.is_empty() {
            return Err(RenderError::Other("grid not initialized".to_string()));
        }
        self.cells.fill(EMPTY);
        Ok(())
    }

    fn draw_pieces(&mut self, state: &GameState) -> Result<(), RenderError> {
        if self.cells.is_empty() {
            return Err(RenderError::Other("grid not initialized".to_string()));
        }

        for (y, row) in state.board.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(shape) = cell {
                    self.paint(x as i32, y as i32, glyph(*shape));
                }
            }
        }

        for piece in &state.pieces {
            let ch = glyph(piece.shape);
            for pos in piece_cells(piece) {
                self.paint(pos.x, pos.y, ch);
            }
        }

        self.flush_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GridPos, Piece};

    fn renderer(width: u32, height: u32) -> TextRenderer<Vec<u8>> {
        let mut renderer = TextRenderer::plain(Vec::new());
        let geometry =
            BoardGeometry::new(width, height, width * 10, height * 10).expect("valid geometry");
        renderer.init_grid(&geometry).expect("init grid");
        renderer
    }

    fn output(renderer: &TextRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.get_ref().clone()).expect("utf8 output")
    }

    #[test]
    fn when_state_is_empty_then_frame_is_all_empty_cells() {
        let mut renderer = renderer(3, 2);

        renderer.clear_board().expect("clear");
        renderer
            .draw_pieces(&GameState::empty(3, 2))
            .expect("draw");

        assert_eq!(output(&renderer), "...\n...\n");
    }

    #[test]
    fn when_piece_is_near_the_edge_then_offboard_cells_are_clipped() {
        let mut renderer = renderer(4, 3);
        let mut state = GameState::empty(4, 3);
        state.pieces.push(Piece {
            owner_id: "p1".into(),
            position: GridPos::new(0, 0),
            rotation: 0,
            shape: 0,
        });

        renderer.clear_board().expect("clear");
        renderer.draw_pieces(&state).expect("draw");

        assert_eq!(output(&renderer), "III.\n....\n....\n");
    }

    #[test]
    fn when_board_has_locked_cells_then_they_are_drawn() {
        let mut renderer = renderer(3, 2);
        let mut state = GameState::empty(3, 2);
        state.board.set(2, 1, Some(6));

        renderer.clear_board().expect("clear");
        renderer.draw_pieces(&state).expect("draw");

        assert_eq!(output(&renderer), "...\n..L\n");
    }

    #[test]
    fn when_grid_was_never_initialized_then_drawing_fails() {
        let mut renderer = TextRenderer::plain(Vec::new());

        let result = renderer.draw_pieces(&GameState::empty(1, 1));

        assert!(matches!(result, Err(RenderError::Other(_))));
    }

    #[test]
    fn when_renderer_targets_a_terminal_then_frames_start_with_a_redraw_sequence() {
        let mut renderer = TextRenderer::terminal(Vec::new());
        let geometry = BoardGeometry::new(1, 1, 10, 10).expect("valid geometry");
        renderer.init_grid(&geometry).expect("init grid");

        renderer.clear_board().expect("clear");
        renderer.draw_pieces(&GameState::empty(1, 1)).expect("draw");

        let text = String::from_utf8(renderer.get_ref().clone()).expect("utf8 output");
        assert!(text.starts_with(ANSI_REDRAW));
        assert!(text.ends_with(".\n"));
    }
}
