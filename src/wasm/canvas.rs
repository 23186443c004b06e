use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::error::{GridError, GridResult};
use crate::mask::GlyphSurface;
use crate::surface::DrawSurface;

fn context_2d(canvas: &HtmlCanvasElement) -> GridResult<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")?
        .ok_or(GridError::ContextUnavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| GridError::ContextUnavailable)
}

/// On-page canvas the tiles are drawn on.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> GridResult<Self> {
        let ctx = context_2d(&canvas)?;
        Ok(Self { canvas, ctx })
    }

    /// Layout size of the canvas, or the viewport when the canvas has not
    /// been laid out yet.
    fn layout_size(&self) -> (u32, u32) {
        let (w, h) = (self.canvas.client_width(), self.canvas.client_height());
        if w > 0 && h > 0 {
            return (w as u32, h as u32);
        }
        let Some(win) = window() else {
            return (self.canvas.width(), self.canvas.height());
        };
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
        (dim(win.inner_width()), dim(win.inner_height()))
    }
}

impl DrawSurface for CanvasSurface {
    fn display_size(&mut self) -> (u32, u32) {
        let (w, h) = self.layout_size();
        if self.canvas.width() != w {
            self.canvas.set_width(w);
        }
        if self.canvas.height() != h {
            self.canvas.set_height(h);
        }
        (w, h)
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    fn begin_pass(&mut self) {
        self.ctx.save();
    }

    fn end_pass(&mut self) {
        self.ctx.restore();
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        if self.ctx.arc(cx, cy, radius, 0.0, std::f64::consts::TAU).is_ok() {
            self.ctx.fill();
        }
    }
}

/// Detached canvas used to render text for the mask.
pub struct OffscreenGlyphs {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    font: String,
}

impl OffscreenGlyphs {
    pub fn new(document: &Document) -> GridResult<Self> {
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| GridError::ContextUnavailable)?;
        let ctx = context_2d(&canvas)?;
        Ok(Self {
            canvas,
            ctx,
            font: String::new(),
        })
    }
}

impl GlyphSurface for OffscreenGlyphs {
    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
        self.ctx.set_font(font);
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(err) => {
                warn!("measureText failed: {:?}", err);
                0.0
            }
        }
    }

    fn render_centered(&mut self, text: &str, width: u32, height: u32) -> Vec<u8> {
        // resizing resets the context state
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.ctx.set_font(&self.font);
        self.ctx.set_fill_style_str("white");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_text_align("center");

        let (w, h) = (f64::from(width), f64::from(height));
        self.ctx.clear_rect(0.0, 0.0, w, h);
        if let Err(err) = self.ctx.fill_text(text, w / 2.0, h / 2.0) {
            warn!("fillText failed: {:?}", err);
        }
        match self.ctx.get_image_data(0.0, 0.0, w, h) {
            Ok(image) => image.data().0,
            Err(err) => {
                warn!("getImageData failed: {:?}", err);
                vec![0; width as usize * height as usize * 4]
            }
        }
    }
}
