//! Grid options as handed over by the host page.
//!
//! Every key is optional; missing keys fall back to the defaults below. The
//! browser bootstrap reads the JSON from the canvas's `data-grid-options`
//! attribute.

use serde::Deserialize;

use crate::error::{GridError, GridResult};

/// Smallest accepted tile pitch in pixels; keeps the tile count of any
/// browser canvas within `usize` on wasm32.
const MIN_PITCH: f64 = 1.0;

/// Which provider decides tile visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationType {
    /// Static text mask drawn at `tile_opacity`.
    None,
    #[default]
    Flicker,
    Snake,
    Tetris,
}

/// Explicit mask origin in tile coordinates. Each axis overrides centering
/// on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TextPosition {
    pub x: Option<i32>,
    pub y: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptions {
    pub tile_size: f64,
    pub gap: f64,
    pub tile_color: String,
    pub tile_opacity: f64,
    pub animation_type: AnimationType,
    /// Target frames per second for the redraw gate.
    pub animation_speed: f64,
    /// Per-second resample probability of a flicker tile.
    pub flicker_chance: f64,
    pub text: String,
    /// Fraction of the grid height reserved for the text mask.
    pub text_scale: f64,
    pub text_position: Option<TextPosition>,
    pub font_family: String,
    pub font_weight: String,
    /// Seed for the flicker random source; the host picks one when absent.
    pub seed: Option<u64>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            tile_size: 4.0,
            gap: 6.0,
            tile_color: "#3498db".to_string(),
            tile_opacity: 1.0,
            animation_type: AnimationType::Flicker,
            animation_speed: 60.0,
            flicker_chance: 0.3,
            text: "kitharvey".to_string(),
            text_scale: 1.0,
            text_position: None,
            font_family: "Arial Black".to_string(),
            font_weight: "bold".to_string(),
            seed: None,
        }
    }
}

impl GridOptions {
    /// Parses and validates options from a JSON object.
    pub fn from_json(json: &str) -> GridResult<Self> {
        let options: GridOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn pitch(&self) -> f64 {
        self.tile_size + self.gap
    }

    /// Minimum seconds between two drawn frames.
    pub fn frame_interval(&self) -> f64 {
        1.0 / self.animation_speed
    }

    pub fn validate(&self) -> GridResult<()> {
        let pitch = self.pitch();
        if !pitch.is_finite() || pitch <= 0.0 {
            return Err(GridError::InvalidOption("tileSize + gap must be positive"));
        }
        if !(self.tile_size >= 0.0) {
            return Err(GridError::InvalidOption("tileSize must not be negative"));
        }
        if self.animation_speed.is_nan() || self.animation_speed <= 0.0 {
            return Err(GridError::InvalidOption("animationSpeed must be positive"));
        }
        if pitch < MIN_PITCH {
            return Err(GridError::InvalidOption("tileSize + gap must be at least 1px"));
        }
        if !(self.tile_opacity >= 0.0) {
            return Err(GridError::InvalidOption("tileOpacity must not be negative"));
        }
        if !(self.flicker_chance >= 0.0) {
            return Err(GridError::InvalidOption("flickerChance must not be negative"));
        }
        if !(self.text_scale >= 0.0) {
            return Err(GridError::InvalidOption("textScale must not be negative"));
        }
        Ok(())
    }
}
