//! The grid animator: geometry, session lifecycle and the gated draw loop.
//!
//! The animator never drives time itself. The host calls [`GridAnimator::frame`]
//! whenever a frame requested through the [`FrameScheduler`] fires, and the
//! animator requests the next one before returning. At most one request is
//! outstanding at any time.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};

use crate::config::{AnimationType, GridOptions};
use crate::error::GridResult;
use crate::geometry::GridGeometry;
use crate::mask::{self, GlyphSurface, MaskRequest, TextMask};
use crate::providers::{self, VisibilityProvider};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::DrawSurface;

static SEEDS_ISSUED: AtomicU64 = AtomicU64::new(0);

/// Fresh seed for animators configured without one. Distinct per call
/// within a process even when the clock does not move.
fn host_seed() -> u64 {
    let salt = SEEDS_ISSUED
        .fetch_add(1, Ordering::Relaxed)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15);
    #[cfg(target_arch = "wasm32")]
    let entropy = (js_sys::Math::random() * 2f64.powi(53)) as u64;
    #[cfg(not(target_arch = "wasm32"))]
    let entropy = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0);
    entropy ^ salt
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    Uninitialized,
    /// Session built, no frame requested yet.
    Ready,
    Running,
    Stopped,
}

/// Live state of one run; replaced wholesale on restart or mode switch.
struct AnimationSession {
    geometry: GridGeometry,
    mask: Option<Rc<TextMask>>,
    provider: Box<dyn VisibilityProvider>,
    /// Host timestamp of the last drawn frame, in milliseconds.
    last_timestamp: f64,
}

pub struct GridAnimator<S, F, G> {
    options: GridOptions,
    surface: S,
    scheduler: F,
    glyphs: G,
    mode: AnimationType,
    seed: u64,
    session: Option<AnimationSession>,
    pending: Option<FrameHandle>,
    state: AnimatorState,
    sessions_built: u64,
}

impl<S, F, G> GridAnimator<S, F, G>
where
    S: DrawSurface,
    F: FrameScheduler,
    G: GlyphSurface,
{
    pub fn new(surface: S, scheduler: F, glyphs: G, options: GridOptions) -> GridResult<Self> {
        options.validate()?;
        Ok(Self {
            mode: options.animation_type,
            seed: options.seed.unwrap_or_else(host_seed),
            options,
            surface,
            scheduler,
            glyphs,
            session: None,
            pending: None,
            state: AnimatorState::Uninitialized,
            sessions_built: 0,
        })
    }

    /// Builds a fresh session from the surface's current size, replacing any
    /// previous one. A pending frame of the old session is cancelled first.
    pub fn initialize(&mut self) {
        self.cancel_pending();

        let (width, height) = self.surface.display_size();
        let geometry = GridGeometry::new(width, height, self.options.tile_size, self.options.gap);
        let mask = self.build_mask(&geometry);

        let seed = self.seed.wrapping_add(self.sessions_built);
        self.sessions_built += 1;
        let mut provider = providers::for_mode(self.mode, &self.options, seed);
        provider.initialize(&geometry, mask.clone());

        debug!(
            "session {:?} on {}x{} px: {}x{} tiles, mask {}",
            self.mode,
            width,
            height,
            geometry.columns,
            geometry.rows,
            mask.is_some()
        );
        self.session = Some(AnimationSession {
            geometry,
            mask,
            provider,
            last_timestamp: 0.0,
        });
        self.state = AnimatorState::Ready;
    }

    /// Starts the loop, building a session first if there is none.
    pub fn start(&mut self) {
        match self.state {
            AnimatorState::Running => return,
            AnimatorState::Uninitialized | AnimatorState::Stopped => self.initialize(),
            AnimatorState::Ready => {}
        }
        info!("grid animation started ({:?})", self.mode);
        self.state = AnimatorState::Running;
        self.schedule_frame();
    }

    /// Frame entry point, called by the host with its frame timestamp in
    /// milliseconds.
    ///
    /// Frames arriving sooner than `1 / animation_speed` seconds after the
    /// last drawn one only request the next frame.
    pub fn frame(&mut self, timestamp: f64) {
        if self.state != AnimatorState::Running {
            return;
        }
        self.pending = None;

        let interval = self.options.frame_interval();
        if let Some(session) = self.session.as_mut() {
            let elapsed = (timestamp - session.last_timestamp) / 1000.0;
            if elapsed >= interval {
                session.last_timestamp = timestamp;
                session.provider.advance(elapsed);
                self.draw();
            }
        }

        self.schedule_frame();
    }

    /// Re-reads the surface size. A changed geometry gets a new mask and new
    /// provider state; the frame clock carries on.
    pub fn resize(&mut self) {
        let (width, height) = self.surface.display_size();
        let geometry = GridGeometry::new(width, height, self.options.tile_size, self.options.gap);
        match self.session.as_ref() {
            Some(session) if session.geometry != geometry => {}
            Some(_) => {
                debug!("resize to {}x{} px keeps the grid", width, height);
                return;
            }
            None => return,
        }

        self.cancel_pending();
        let mask = self.build_mask(&geometry);
        if let Some(session) = self.session.as_mut() {
            debug!(
                "grid resized to {}x{} tiles ({}x{} px)",
                geometry.columns, geometry.rows, width, height
            );
            session.provider.reshape(&geometry, mask.clone());
            session.geometry = geometry;
            session.mask = mask;
        }
        if self.state == AnimatorState::Running {
            self.schedule_frame();
        }
    }

    /// Cancels the pending frame and tears the session down. Safe to call
    /// repeatedly.
    pub fn stop(&mut self) {
        self.cancel_pending();
        if self.session.take().is_some() {
            info!("grid animation stopped");
        }
        if self.state != AnimatorState::Uninitialized {
            self.state = AnimatorState::Stopped;
        }
    }

    /// Replaces the session with one running `mode`.
    pub fn switch_mode(&mut self, mode: AnimationType) {
        let was_running = self.state == AnimatorState::Running;
        self.cancel_pending();
        self.mode = mode;
        info!("switching grid animation to {:?}", mode);
        self.initialize();
        if was_running {
            self.state = AnimatorState::Running;
            self.schedule_frame();
        }
    }

    /// Sets or clears a block on the tetris board. Returns `false` when no
    /// tetris session is live or the cell is off the board.
    pub fn set_tetris_cell(&mut self, x: i32, y: i32, occupied: bool) -> bool {
        self.session
            .as_mut()
            .is_some_and(|s| s.provider.set_block(x, y, occupied))
    }

    /// Turns the snake. Returns `false` when no snake session is live.
    pub fn set_snake_direction(&mut self, dx: i32, dy: i32) -> bool {
        self.session
            .as_mut()
            .is_some_and(|s| s.provider.steer((dx, dy)))
    }

    /// Seed the flicker random source is derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn mode(&self) -> AnimationType {
        self.mode
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn geometry(&self) -> Option<GridGeometry> {
        self.session.as_ref().map(|s| s.geometry)
    }

    pub fn mask(&self) -> Option<&TextMask> {
        self.session.as_ref().and_then(|s| s.mask.as_deref())
    }

    /// Draw opacity of tile `(x, y)` in the current session.
    pub fn tile_opacity(&self, x: i32, y: i32) -> f64 {
        self.session
            .as_ref()
            .map_or(0.0, |s| s.provider.opacity(x, y))
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    fn build_mask(&mut self, geometry: &GridGeometry) -> Option<Rc<TextMask>> {
        let request = MaskRequest {
            text: &self.options.text,
            pitch: geometry.pitch(),
            font_weight: &self.options.font_weight,
            font_family: &self.options.font_family,
            position: self.options.text_position,
            columns: geometry.columns,
            rows: geometry.rows,
            text_scale: self.options.text_scale,
        };
        mask::rasterize(&mut self.glyphs, &request).map(Rc::new)
    }

    fn draw(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let geometry = session.geometry;
        let radius = geometry.tile_size / 2.0;

        self.surface.clear();
        self.surface.begin_pass();
        for y in 0..geometry.rows {
            for x in 0..geometry.columns {
                let opacity = session.provider.opacity(x as i32, y as i32);
                if opacity > 0.0 {
                    let (cx, cy) = geometry.center(x, y);
                    self.surface
                        .fill_circle(cx, cy, radius, &self.options.tile_color, opacity);
                }
            }
        }
        self.surface.end_pass();
    }

    fn schedule_frame(&mut self) {
        self.cancel_pending();
        self.pending = Some(self.scheduler.schedule());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}
