/// Tile layout derived from the canvas size.
///
/// Tiles sit on a square lattice with spacing `pitch = tile_size + gap`;
/// the grid covers the canvas fully, so the last column and row may be
/// clipped at the right and bottom edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    pub tile_size: f64,
    pub gap: f64,
    pub columns: u32,
    pub rows: u32,
}

impl GridGeometry {
    pub fn new(width: u32, height: u32, tile_size: f64, gap: f64) -> Self {
        let pitch = tile_size + gap;
        let (columns, rows) = if pitch > 0.0 {
            (
                (f64::from(width) / pitch).ceil() as u32,
                (f64::from(height) / pitch).ceil() as u32,
            )
        } else {
            (0, 0)
        };
        Self {
            tile_size,
            gap,
            columns,
            rows,
        }
    }

    pub fn pitch(&self) -> f64 {
        self.tile_size + self.gap
    }

    pub fn tile_count(&self) -> usize {
        (self.columns as usize).saturating_mul(self.rows as usize)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.columns && (y as u32) < self.rows
    }

    /// Row-major index of tile `(x, y)`, or `None` outside the grid.
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| y as usize * self.columns as usize + x as usize)
    }

    /// Pixel center of tile `(x, y)`.
    pub fn center(&self, x: u32, y: u32) -> (f64, f64) {
        let pitch = self.pitch();
        let half = self.tile_size / 2.0;
        (f64::from(x) * pitch + half, f64::from(y) * pitch + half)
    }
}
