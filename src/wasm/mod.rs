//! Browser host: canvas lookup, frame scheduling and window event wiring.

use std::cell::RefCell;
use std::rc::Rc;

use log::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, HtmlCanvasElement};

use crate::animator::GridAnimator;
use crate::config::{AnimationType, GridOptions};
use crate::error::{GridError, GridResult};

mod canvas;
mod logger;
mod scheduler;

pub use canvas::{CanvasSurface, OffscreenGlyphs};
pub use scheduler::RafScheduler;
use scheduler::FrameSlot;

/// Canvas picked up automatically when the module loads.
const CANVAS_ID: &str = "tilesCanvas";
/// Attribute carrying the JSON grid options.
const OPTIONS_ATTR: &str = "data-grid-options";

type CanvasAnimator = GridAnimator<CanvasSurface, RafScheduler, OffscreenGlyphs>;

fn build(canvas: HtmlCanvasElement, options_json: Option<&str>) -> GridResult<Rc<RefCell<CanvasAnimator>>> {
    let window = window().ok_or(GridError::Js("no window".into()))?;
    let document = window.document().ok_or(GridError::Js("no document".into()))?;

    let options = match options_json {
        Some(json) => GridOptions::from_json(json)?,
        None => GridOptions::default(),
    };

    let surface = CanvasSurface::new(canvas)?;
    let glyphs = OffscreenGlyphs::new(&document)?;
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let scheduler = RafScheduler::new(window, slot.clone());

    let animator = Rc::new(RefCell::new(GridAnimator::new(surface, scheduler, glyphs, options)?));

    // The closure only holds a weak reference; the animator owns the slot
    // through its scheduler.
    let weak = Rc::downgrade(&animator);
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        if let Some(animator) = weak.upgrade() {
            if let Ok(mut animator) = animator.try_borrow_mut() {
                animator.frame(timestamp);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    Ok(animator)
}

/// A tile grid bound to one canvas, for pages that manage grids from JS.
#[wasm_bindgen]
pub struct TileGrid {
    animator: Rc<RefCell<CanvasAnimator>>,
}

#[wasm_bindgen]
impl TileGrid {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, options: Option<String>) -> Result<TileGrid, JsValue> {
        let animator = build(canvas, options.as_deref()).map_err(|err| {
            error!("{err}");
            JsValue::from(err)
        })?;
        Ok(TileGrid { animator })
    }

    pub fn start(&self) {
        self.animator.borrow_mut().start();
    }

    pub fn stop(&self) {
        self.animator.borrow_mut().stop();
    }

    pub fn resize(&self) {
        self.animator.borrow_mut().resize();
    }

    /// Switches to `"none"`, `"flicker"`, `"snake"` or `"tetris"`.
    #[wasm_bindgen(js_name = switchMode)]
    pub fn switch_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode: AnimationType = serde_json::from_value(serde_json::Value::String(mode.to_string()))
            .map_err(|err| JsValue::from(GridError::from(err)))?;
        self.animator.borrow_mut().switch_mode(mode);
        Ok(())
    }

    /// Places (`occupied = true`) or clears a tetris block. Returns `false`
    /// outside tetris mode or off the 10x20 board.
    #[wasm_bindgen(js_name = setTetrisCell)]
    pub fn set_tetris_cell(&self, x: i32, y: i32, occupied: bool) -> bool {
        self.animator.borrow_mut().set_tetris_cell(x, y, occupied)
    }

    /// Turns the snake; `false` outside snake mode.
    #[wasm_bindgen(js_name = setSnakeDirection)]
    pub fn set_snake_direction(&self, dx: i32, dy: i32) -> bool {
        self.animator.borrow_mut().set_snake_direction(dx, dy)
    }
}

impl Drop for TileGrid {
    fn drop(&mut self) {
        if let Ok(mut animator) = self.animator.try_borrow_mut() {
            animator.stop();
        }
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    logger::init();

    let window = window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let Some(element) = document.get_element_by_id(CANVAS_ID) else {
        error!("{}", GridError::CanvasNotFound(CANVAS_ID.to_string()));
        return Ok(());
    };
    let canvas = element.dyn_into::<HtmlCanvasElement>()?;
    let options = canvas.get_attribute(OPTIONS_ATTR);

    let animator = match build(canvas, options.as_deref()) {
        Ok(animator) => animator,
        Err(err) => {
            error!("{err}");
            return Ok(());
        }
    };
    animator.borrow_mut().start();

    let resize_closure = {
        let animator = animator.clone();
        Closure::wrap(Box::new(move || {
            animator.borrow_mut().resize();
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    let resize_fn: js_sys::Function = resize_closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
    resize_closure.forget();

    let unload_closure = {
        let window = window.clone();
        Closure::wrap(Box::new(move || {
            animator.borrow_mut().stop();
            if let Err(err) = window.remove_event_listener_with_callback("resize", &resize_fn) {
                warn!("removing the resize listener failed: {:?}", err);
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("beforeunload", unload_closure.as_ref().unchecked_ref())?;
    unload_closure.forget();

    Ok(())
}
