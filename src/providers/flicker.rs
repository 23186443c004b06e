use std::rc::Rc;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::VisibilityProvider;
use crate::field::TileField;
use crate::geometry::GridGeometry;
use crate::mask::TextMask;

/// Randomly twinkling tiles, confined to the text mask when there is one.
pub struct FlickerProvider {
    flicker_chance: f64,
    max_opacity: f32,
    rng: StdRng,
    field: Option<TileField>,
    mask: Option<Rc<TextMask>>,
}

impl FlickerProvider {
    pub fn new(flicker_chance: f64, max_opacity: f32, seed: u64) -> Self {
        Self {
            flicker_chance,
            max_opacity,
            rng: StdRng::seed_from_u64(seed),
            field: None,
            mask: None,
        }
    }

    pub fn field(&self) -> Option<&TileField> {
        self.field.as_ref()
    }

    fn rebuild(&mut self, geometry: &GridGeometry, mask: Option<Rc<TextMask>>) {
        debug!("flicker field rebuilt for {}x{} tiles", geometry.columns, geometry.rows);
        self.field = Some(TileField::seeded(geometry, self.max_opacity, &mut self.rng));
        self.mask = mask;
    }
}

impl VisibilityProvider for FlickerProvider {
    fn initialize(&mut self, geometry: &GridGeometry, mask: Option<Rc<TextMask>>) {
        self.rebuild(geometry, mask);
    }

    fn reshape(&mut self, geometry: &GridGeometry, mask: Option<Rc<TextMask>>) {
        self.rebuild(geometry, mask);
    }

    fn advance(&mut self, elapsed: f64) {
        if let Some(field) = self.field.as_mut() {
            field.advance(elapsed, self.flicker_chance, self.max_opacity, &mut self.rng);
        }
    }

    fn is_visible(&self, x: i32, y: i32) -> bool {
        match &self.mask {
            Some(mask) => mask.is_on(x, y),
            None => self.field.as_ref().is_some_and(|f| f.get(x, y).is_some()),
        }
    }

    fn opacity(&self, x: i32, y: i32) -> f64 {
        if !self.is_visible(x, y) {
            return 0.0;
        }
        self.field
            .as_ref()
            .and_then(|f| f.get(x, y))
            .map_or(0.0, f64::from)
    }
}
