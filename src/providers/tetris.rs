use std::rc::Rc;

use super::VisibilityProvider;
use crate::geometry::GridGeometry;
use crate::mask::TextMask;

pub const TETRIS_COLUMNS: usize = 10;
pub const TETRIS_ROWS: usize = 20;

const EMPTY: u8 = 0;
const OCCUPIED: u8 = 1;

/// Fixed 10x20 board anchored at the top-left tile, independent of the
/// canvas grid size. The board does not play by itself; hosts place blocks
/// with [`TetrisProvider::set_cell`].
#[derive(Clone, Debug)]
pub struct TetrisProvider {
    board: [[u8; TETRIS_COLUMNS]; TETRIS_ROWS],
}

impl Default for TetrisProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TetrisProvider {
    pub fn new() -> Self {
        Self {
            board: [[EMPTY; TETRIS_COLUMNS]; TETRIS_ROWS],
        }
    }

    /// Marks a board cell occupied or empty. Returns `false` outside the
    /// board.
    pub fn set_cell(&mut self, x: usize, y: usize, occupied: bool) -> bool {
        match self.board.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(cell) => {
                *cell = if occupied { OCCUPIED } else { EMPTY };
                true
            }
            None => false,
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> bool {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .is_some_and(|&cell| cell == OCCUPIED)
    }

    pub fn clear(&mut self) {
        self.board = [[EMPTY; TETRIS_COLUMNS]; TETRIS_ROWS];
    }
}

impl VisibilityProvider for TetrisProvider {
    fn initialize(&mut self, _geometry: &GridGeometry, _mask: Option<Rc<TextMask>>) {
        self.clear();
    }

    fn advance(&mut self, _elapsed: f64) {}

    fn is_visible(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.cell(x as usize, y as usize)
    }

    fn set_block(&mut self, x: i32, y: i32, occupied: bool) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.set_cell(x as usize, y as usize, occupied)
    }
}
