use rand::Rng;

use crate::geometry::GridGeometry;

/// Per-tile opacity state of the flicker animation, row-major.
#[derive(Clone, Debug)]
pub struct TileField {
    columns: u32,
    rows: u32,
    values: Vec<f32>,
}

impl TileField {
    /// Fills a field for `geometry` with opacities drawn uniformly from
    /// `[0, max_opacity)`.
    pub fn seeded<R: Rng + ?Sized>(geometry: &GridGeometry, max_opacity: f32, rng: &mut R) -> Self {
        let values = (0..geometry.tile_count())
            .map(|_| rng.gen::<f32>() * max_opacity)
            .collect();
        Self {
            columns: geometry.columns,
            rows: geometry.rows,
            values,
        }
    }

    /// Resamples each tile with probability `flicker_chance * elapsed`.
    ///
    /// The product is not clamped: once it exceeds 1 every tile is
    /// resampled on every call.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        elapsed: f64,
        flicker_chance: f64,
        max_opacity: f32,
        rng: &mut R,
    ) {
        let probability = flicker_chance * elapsed;
        for value in self.values.iter_mut() {
            if rng.gen::<f64>() < probability {
                *value = rng.gen::<f32>() * max_opacity;
            }
        }
    }

    pub fn matches(&self, geometry: &GridGeometry) -> bool {
        self.columns == geometry.columns && self.rows == geometry.rows
    }

    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        if x < 0 || y < 0 || x as u32 >= self.columns || y as u32 >= self.rows {
            return None;
        }
        self.values
            .get(y as usize * self.columns as usize + x as usize)
            .copied()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
