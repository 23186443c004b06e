//! Per-mode tile visibility.
//!
//! Exactly one provider is active per animation session. Each one owns its
//! own state, so independent grids never share snake bodies or boards.

use std::rc::Rc;

use crate::config::{AnimationType, GridOptions};
use crate::geometry::GridGeometry;
use crate::mask::TextMask;

mod flicker;
mod snake;
mod tetris;

pub use flicker::FlickerProvider;
pub use snake::SnakeProvider;
pub use tetris::{TetrisProvider, TETRIS_COLUMNS, TETRIS_ROWS};

pub trait VisibilityProvider {
    /// Resets the provider for a fresh session on `geometry`.
    fn initialize(&mut self, geometry: &GridGeometry, mask: Option<Rc<TextMask>>);

    /// Adopts a new geometry mid-session. Providers whose state does not
    /// depend on the grid keep it.
    fn reshape(&mut self, _geometry: &GridGeometry, _mask: Option<Rc<TextMask>>) {}

    /// Moves the animation forward by `elapsed` seconds.
    fn advance(&mut self, elapsed: f64);

    fn is_visible(&self, x: i32, y: i32) -> bool;

    /// Places or clears a block. Modes without a board return `false`.
    fn set_block(&mut self, _x: i32, _y: i32, _occupied: bool) -> bool {
        false
    }

    /// Changes the direction of travel. Modes without a mover return `false`.
    fn steer(&mut self, _direction: (i32, i32)) -> bool {
        false
    }

    /// Draw opacity of tile `(x, y)`; zero means the tile is skipped.
    fn opacity(&self, x: i32, y: i32) -> f64 {
        if self.is_visible(x, y) {
            1.0
        } else {
            0.0
        }
    }
}

/// Mode without motion: the text mask drawn at a fixed opacity.
#[derive(Debug)]
pub struct StaticProvider {
    tile_opacity: f64,
    mask: Option<Rc<TextMask>>,
}

impl StaticProvider {
    pub fn new(tile_opacity: f64) -> Self {
        Self {
            tile_opacity,
            mask: None,
        }
    }
}

impl VisibilityProvider for StaticProvider {
    fn initialize(&mut self, _geometry: &GridGeometry, mask: Option<Rc<TextMask>>) {
        self.mask = mask;
    }

    fn reshape(&mut self, _geometry: &GridGeometry, mask: Option<Rc<TextMask>>) {
        self.mask = mask;
    }

    fn advance(&mut self, _elapsed: f64) {}

    fn is_visible(&self, x: i32, y: i32) -> bool {
        self.mask.as_ref().is_some_and(|mask| mask.is_on(x, y))
    }

    fn opacity(&self, x: i32, y: i32) -> f64 {
        if self.is_visible(x, y) {
            self.tile_opacity
        } else {
            0.0
        }
    }
}

/// Builds the uninitialized provider for `mode`.
pub fn for_mode(mode: AnimationType, options: &GridOptions, seed: u64) -> Box<dyn VisibilityProvider> {
    match mode {
        AnimationType::None => Box::new(StaticProvider::new(options.tile_opacity)),
        AnimationType::Flicker => Box::new(FlickerProvider::new(
            options.flicker_chance,
            options.tile_opacity as f32,
            seed,
        )),
        AnimationType::Snake => Box::new(SnakeProvider::default()),
        AnimationType::Tetris => Box::new(TetrisProvider::new()),
    }
}
