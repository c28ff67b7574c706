// Fixed board/canvas sizing for a session.

use super::errors::GeometryError;

/// Grid dimensions plus the pixel size of one block on the canvas.
///
/// Built once at session start. The canvas must be an exact multiple of the
/// grid so that `block * cells == canvas` holds in both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub board_width: u32,
    pub board_height: u32,
    pub block_width: u32,
    pub block_height: u32,
}

impl BoardGeometry {
    pub fn new(
        board_width: u32,
        board_height: u32,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Result<Self, GeometryError> {
        if board_width == 0 || board_height == 0 || canvas_width == 0 || canvas_height == 0 {
            return Err(GeometryError::ZeroDimension);
        }
        if canvas_width % board_width != 0 || canvas_height % board_height != 0 {
            return Err(GeometryError::NotDivisible {
                canvas: (canvas_width, canvas_height),
                board: (board_width, board_height),
            });
        }

        Ok(Self {
            board_width,
            board_height,
            block_width: canvas_width / board_width,
            block_height: canvas_height / board_height,
        })
    }

    pub fn canvas_width(&self) -> u32 {
        self.block_width * self.board_width
    }

    pub fn canvas_height(&self) -> u32 {
        self.block_height * self.board_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_canvas_is_400_and_board_is_20_then_blocks_are_20px() {
        let geometry = BoardGeometry::new(20, 20, 400, 400).expect("valid geometry");

        assert_eq!(geometry.block_width, 20);
        assert_eq!(geometry.block_height, 20);
        assert_eq!(geometry.block_width * geometry.board_width, 400);
        assert_eq!(geometry.block_height * geometry.board_height, 400);
    }

    #[test]
    fn when_board_is_not_square_then_axes_are_sized_independently() {
        let geometry = BoardGeometry::new(10, 20, 300, 600).expect("valid geometry");

        assert_eq!(geometry.block_width, 30);
        assert_eq!(geometry.block_height, 30);
        assert_eq!(geometry.canvas_width(), 300);
        assert_eq!(geometry.canvas_height(), 600);
    }

    #[test]
    fn when_canvas_does_not_divide_evenly_then_geometry_is_rejected() {
        let result = BoardGeometry::new(20, 20, 410, 400);

        assert!(matches!(result, Err(GeometryError::NotDivisible { .. })));
    }

    #[test]
    fn when_a_dimension_is_zero_then_geometry_is_rejected() {
        assert_eq!(
            BoardGeometry::new(0, 20, 400, 400),
            Err(GeometryError::ZeroDimension)
        );
        assert_eq!(
            BoardGeometry::new(20, 20, 400, 0),
            Err(GeometryError::ZeroDimension)
        );
    }
}
