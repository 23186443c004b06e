#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use tilegrid_wasm::{
    FrameHandle, FrameScheduler, DrawSurface, GlyphSurface, GridAnimator, GridOptions,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub color: String,
    pub alpha: f64,
}

/// Draw surface that records every call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: (u32, u32),
    pub clears: usize,
    pub passes: usize,
    pub open_pass: bool,
    pub circles: Vec<Circle>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Self::default()
        }
    }
}

impl DrawSurface for RecordingSurface {
    fn display_size(&mut self) -> (u32, u32) {
        self.size
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.circles.clear();
    }

    fn begin_pass(&mut self) {
        assert!(!self.open_pass, "nested draw pass");
        self.open_pass = true;
    }

    fn end_pass(&mut self) {
        assert!(self.open_pass, "end_pass without begin_pass");
        self.open_pass = false;
        self.passes += 1;
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str, alpha: f64) {
        assert!(self.open_pass, "circle drawn outside a pass");
        self.circles.push(Circle {
            cx,
            cy,
            radius,
            color: color.to_string(),
            alpha,
        });
    }
}

#[derive(Debug, Default)]
pub struct SchedulerLog {
    next_id: i32,
    pub pending: Vec<FrameHandle>,
    pub scheduled: usize,
    pub cancelled: Vec<FrameHandle>,
}

/// Frame scheduler stepped by hand from the test.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    pub log: Rc<RefCell<SchedulerLog>>,
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self) -> FrameHandle {
        let mut log = self.log.borrow_mut();
        log.next_id += 1;
        let handle = FrameHandle(log.next_id);
        log.pending.push(handle);
        log.scheduled += 1;
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        let mut log = self.log.borrow_mut();
        log.pending.retain(|&h| h != handle);
        log.cancelled.push(handle);
    }
}

/// Glyph surface with block letters: each character is `0.6 * size` wide and
/// fills the middle of its cell, `0.7 * size` tall.
#[derive(Debug, Default)]
pub struct BlockGlyphs {
    pub font: String,
    pub measure_calls: usize,
    pub renders: usize,
}

impl BlockGlyphs {
    pub fn font_size(&self) -> f64 {
        self.font
            .split_whitespace()
            .find_map(|token| token.strip_suffix("px"))
            .and_then(|size| size.parse().ok())
            .unwrap_or(0.0)
    }
}

impl GlyphSurface for BlockGlyphs {
    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        self.measure_calls += 1;
        text.chars().count() as f64 * self.font_size() * 0.6
    }

    fn render_centered(&mut self, text: &str, width: u32, height: u32) -> Vec<u8> {
        self.renders += 1;
        let size = self.font_size();
        let advance = size * 0.6;
        let text_width = text.chars().count() as f64 * advance;
        let left = f64::from(width) / 2.0 - text_width / 2.0;
        let top = f64::from(height) / 2.0 - size * 0.35;
        let bottom = f64::from(height) / 2.0 + size * 0.35;

        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        for py in 0..height {
            let y = f64::from(py);
            if y < top || y >= bottom {
                continue;
            }
            for px in 0..width {
                let offset = f64::from(px) - left;
                if offset < 0.0 || offset >= text_width {
                    continue;
                }
                let within = (offset % advance) / advance;
                if (0.1..0.9).contains(&within) {
                    let i = (py as usize * width as usize + px as usize) * 4;
                    pixels[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
                }
            }
        }
        pixels
    }
}

pub type TestAnimator = GridAnimator<RecordingSurface, ManualScheduler, BlockGlyphs>;

pub fn animator(width: u32, height: u32, options: GridOptions) -> (TestAnimator, Rc<RefCell<SchedulerLog>>) {
    let scheduler = ManualScheduler::default();
    let log = scheduler.log.clone();
    let animator = GridAnimator::new(
        RecordingSurface::new(width, height),
        scheduler,
        BlockGlyphs::default(),
        options,
    )
    .expect("valid options");
    (animator, log)
}

/// Fires the single outstanding frame request at `timestamp` ms.
pub fn fire(animator: &mut TestAnimator, log: &Rc<RefCell<SchedulerLog>>, timestamp: f64) {
    {
        let mut log = log.borrow_mut();
        assert_eq!(log.pending.len(), 1, "expected exactly one pending frame");
        log.pending.clear();
    }
    animator.frame(timestamp);
}
