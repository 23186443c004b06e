use std::collections::VecDeque;
use std::rc::Rc;

use super::VisibilityProvider;
use crate::geometry::GridGeometry;
use crate::mask::TextMask;

const START: (i32, i32) = (5, 5);
const DIRECTION: (i32, i32) = (1, 0);

/// A snake gliding across the grid at constant length.
///
/// Movement only: no food, growth or collisions.
#[derive(Clone, Debug)]
pub struct SnakeProvider {
    start: (i32, i32),
    initial_direction: (i32, i32),
    direction: (i32, i32),
    // head first
    segments: VecDeque<(i32, i32)>,
}

impl Default for SnakeProvider {
    fn default() -> Self {
        Self::new(START, DIRECTION)
    }
}

impl SnakeProvider {
    pub fn new(start: (i32, i32), direction: (i32, i32)) -> Self {
        Self {
            start,
            initial_direction: direction,
            direction,
            segments: VecDeque::from([start]),
        }
    }

    pub fn head(&self) -> (i32, i32) {
        self.segments.front().copied().unwrap_or(self.start)
    }

    pub fn segments(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.segments.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn direction(&self) -> (i32, i32) {
        self.direction
    }

    pub fn set_direction(&mut self, direction: (i32, i32)) {
        self.direction = direction;
    }
}

impl VisibilityProvider for SnakeProvider {
    fn initialize(&mut self, _geometry: &GridGeometry, _mask: Option<Rc<TextMask>>) {
        self.direction = self.initial_direction;
        self.segments = VecDeque::from([self.start]);
    }

    fn advance(&mut self, _elapsed: f64) {
        let (hx, hy) = self.head();
        let (dx, dy) = self.direction;
        self.segments
            .push_front((hx.saturating_add(dx), hy.saturating_add(dy)));
        self.segments.pop_back();
    }

    fn is_visible(&self, x: i32, y: i32) -> bool {
        self.segments.contains(&(x, y))
    }

    fn steer(&mut self, direction: (i32, i32)) -> bool {
        self.set_direction(direction);
        true
    }
}
