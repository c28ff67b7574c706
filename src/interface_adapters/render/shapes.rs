// Cell offsets for drawing tetromino pieces around their pivot.

use crate::domain::{GridPos, Piece};

// Shape ids as issued by the server: I, O, T, S, Z, J, L. Offsets use x to the
// right and y downward, rotation 0.
const SHAPES: [[(i32, i32); 4]; 7] = [
    [(-1, 0), (0, 0), (1, 0), (2, 0)],
    [(0, 0), (1, 0), (0, 1), (1, 1)],
    [(-1, 0), (0, 0), (1, 0), (0, -1)],
    [(-1, 0), (0, 0), (0, -1), (1, -1)],
    [(-1, -1), (0, -1), (0, 0), (1, 0)],
    [(-1, -1), (-1, 0), (0, 0), (1, 0)],
    [(1, -1), (-1, 0), (0, 0), (1, 0)],
];

const GLYPHS: [char; 7] = ['I', 'O', 'T', 'S', 'Z', 'J', 'L'];

pub fn glyph(shape: u8) -> char {
    GLYPHS.get(shape as usize).copied().unwrap_or('#')
}

/// Grid cells covered by `piece`. Unknown shapes cover just the pivot.
/// Cells whose coordinates would overflow `i32` are left out; they lie far
/// off any board.
pub fn piece_cells(piece: &Piece) -> Vec<GridPos> {
    let Some(offsets) = SHAPES.get(piece.shape as usize) else {
        return vec![piece.position];
    };

    offsets
        .iter()
        .filter_map(|&(dx, dy)| {
            let (dx, dy) = rotate(dx, dy, piece.rotation);
            let x = piece.position.x.checked_add(dx)?;
            let y = piece.position.y.checked_add(dy)?;
            Some(GridPos::new(x, y))
        })
        .collect()
}

// Quarter turns clockwise on a y-down grid.
fn rotate(dx: i32, dy: i32, rotation: u8) -> (i32, i32) {
    match rotation % 4 {
        0 => (dx, dy),
        1 => (-dy, dx),
        2 => (-dx, -dy),
        _ => (dy, -dx),
    }
}
