//! Animated tile grid for a 2D canvas.
//!
//! The core (geometry, text mask, providers, animator) is host independent
//! and drives any [`DrawSurface`] through a [`FrameScheduler`]. The browser
//! host lives in the `wasm` module and is only compiled for wasm32.

pub mod animator;
pub mod config;
pub mod error;
pub mod field;
pub mod geometry;
pub mod mask;
pub mod providers;
pub mod scheduler;
pub mod surface;

pub use animator::{AnimatorState, GridAnimator};
pub use config::{AnimationType, GridOptions, TextPosition};
pub use error::{GridError, GridResult};
pub use field::TileField;
pub use geometry::GridGeometry;
pub use mask::{rasterize, GlyphSurface, MaskRequest, TextMask};
pub use providers::VisibilityProvider;
pub use scheduler::{FrameHandle, FrameScheduler};
pub use surface::DrawSurface;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{CanvasSurface, OffscreenGlyphs, RafScheduler, TileGrid};
