//! Text-to-tile rasterizer.
//!
//! The text is rendered once on an offscreen surface whose size is a whole
//! number of tiles, then nearest-sampled into one boolean per tile.

use log::{debug, warn};

use crate::config::TextPosition;

/// Font size the fitting loop starts from, in CSS pixels.
const INITIAL_FONT_SIZE: f64 = 240.0;
const MAX_FIT_ITERATIONS: usize = 10;
/// Extra shrink applied on every refit so the loop converges.
const FIT_MARGIN: f64 = 0.9;
/// Alpha above which a sampled pixel counts as glyph.
const ALPHA_THRESHOLD: u8 = 128;

/// Offscreen text rendering facility of the host.
pub trait GlyphSurface {
    /// Sets the CSS font used by the next measure or render call.
    fn set_font(&mut self, font: &str);

    /// Advance width of `text` in pixels under the current font.
    fn measure_text(&mut self, text: &str) -> f64;

    /// Resizes the surface to `width x height`, clears it, draws `text` in
    /// white centered on both axes and returns the RGBA pixels.
    fn render_centered(&mut self, text: &str, width: u32, height: u32) -> Vec<u8>;
}

/// Everything the rasterizer needs besides the glyph surface.
#[derive(Clone, Copy, Debug)]
pub struct MaskRequest<'a> {
    pub text: &'a str,
    pub pitch: f64,
    pub font_weight: &'a str,
    pub font_family: &'a str,
    pub position: Option<TextPosition>,
    pub columns: u32,
    pub rows: u32,
    pub text_scale: f64,
}

impl MaskRequest<'_> {
    fn css_font(&self, size: f64) -> String {
        format!("{} {}px {}", self.font_weight, size, self.font_family)
    }
}

/// Glyph occupancy placed on the tile grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
    origin_x: i32,
    origin_y: i32,
}

impl TextMask {
    /// Builds a mask from row-major `cells`. Returns `None` unless there is
    /// exactly one cell per `width x height` position.
    pub fn new(width: u32, height: u32, cells: Vec<bool>, origin_x: i32, origin_y: i32) -> Option<Self> {
        if (width as usize).checked_mul(height as usize) != Some(cells.len()) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells,
            origin_x,
            origin_y,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    /// Mask cell in mask-local coordinates.
    pub fn cell(&self, mx: u32, my: u32) -> bool {
        mx < self.width && my < self.height && self.cells[(my * self.width + mx) as usize]
    }

    /// Whether grid tile `(x, y)` falls on a glyph.
    pub fn is_on(&self, x: i32, y: i32) -> bool {
        let mx = i64::from(x) - i64::from(self.origin_x);
        let my = i64::from(y) - i64::from(self.origin_y);
        if mx < 0 || my < 0 || mx >= i64::from(self.width) || my >= i64::from(self.height) {
            return false;
        }
        self.cells[(my as usize) * self.width as usize + mx as usize]
    }

    pub fn count_on(&self) -> usize {
        self.cells.iter().filter(|&&on| on).count()
    }
}

/// Rasterizes `request.text` into a mask that fits the grid.
///
/// Returns `None` for empty text, or when the grid leaves no room for even a
/// single row or column of text.
pub fn rasterize<G: GlyphSurface + ?Sized>(glyphs: &mut G, request: &MaskRequest<'_>) -> Option<TextMask> {
    if request.text.is_empty() {
        return None;
    }

    let max_height = (f64::from(request.rows) * request.text_scale).floor();
    let max_width = f64::from(request.columns);

    let mut font_size = INITIAL_FONT_SIZE;
    for _ in 0..MAX_FIT_ITERATIONS {
        let (width, height) = measure_tiles(glyphs, request, font_size);
        if height <= max_height && width <= max_width {
            break;
        }
        let ratio = (max_height / height).min(max_width / width);
        font_size = (font_size * ratio * FIT_MARGIN).floor();
    }

    let (width, height) = measure_tiles(glyphs, request, font_size);
    if height > max_height || width > max_width {
        warn!(
            "text {:?} still exceeds {}x{} tiles at {}px after {} fits",
            request.text, max_width, max_height, font_size, MAX_FIT_ITERATIONS
        );
    }
    let (width, height) = (width as u32, height as u32);
    if width == 0 || height == 0 {
        debug!("no room for text {:?} on {}x{} grid", request.text, request.columns, request.rows);
        return None;
    }

    let pixel_width = (f64::from(width) * request.pitch) as u32;
    let pixel_height = (f64::from(height) * request.pitch) as u32;
    if pixel_width == 0 || pixel_height == 0 {
        return None;
    }
    let pixels = glyphs.render_centered(request.text, pixel_width, pixel_height);

    let mut cells = Vec::with_capacity(width as usize * height as usize);
    for ty in 0..height {
        let py = (u64::from(ty) * u64::from(pixel_height) / u64::from(height)) as usize;
        for tx in 0..width {
            let px = (u64::from(tx) * u64::from(pixel_width) / u64::from(width)) as usize;
            let alpha = pixels
                .get((py * pixel_width as usize + px) * 4 + 3)
                .copied()
                .unwrap_or(0);
            cells.push(alpha > ALPHA_THRESHOLD);
        }
    }

    let position = request.position.unwrap_or_default();
    let origin_x = position
        .x
        .unwrap_or_else(|| centered_origin(request.columns, width));
    let origin_y = position
        .y
        .unwrap_or_else(|| centered_origin(request.rows, height));

    debug!(
        "text mask {:?}: {}x{} tiles at ({}, {}), font {}px",
        request.text, width, height, origin_x, origin_y, font_size
    );
    TextMask::new(width, height, cells, origin_x, origin_y)
}

/// Text extent in whole tiles at `font_size`; the font size stands in for
/// the rendered height.
fn measure_tiles<G: GlyphSurface + ?Sized>(
    glyphs: &mut G,
    request: &MaskRequest<'_>,
    font_size: f64,
) -> (f64, f64) {
    glyphs.set_font(&request.css_font(font_size));
    let width = glyphs.measure_text(request.text);
    (
        (width / request.pitch).ceil().max(0.0),
        (font_size / request.pitch).ceil().max(0.0),
    )
}

fn centered_origin(extent: u32, size: u32) -> i32 {
    (i64::from(extent) - i64::from(size)).div_euclid(2) as i32
}
