use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::Window;

use crate::scheduler::{FrameHandle, FrameScheduler};

/// Holds the frame closure so that `request_animation_frame` can be called
/// with it again from inside itself. It is filled in once the animator it
/// drives exists.
pub type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame`-backed scheduler.
pub struct RafScheduler {
    window: Window,
    slot: FrameSlot,
}

impl RafScheduler {
    pub fn new(window: Window, slot: FrameSlot) -> Self {
        Self { window, slot }
    }
}

impl FrameScheduler for RafScheduler {
    fn schedule(&mut self) -> FrameHandle {
        let slot = self.slot.borrow();
        let Some(callback) = slot.as_ref() else {
            warn!("frame requested before the frame callback was installed");
            return FrameHandle(0);
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => FrameHandle(id),
            Err(err) => {
                warn!("requestAnimationFrame failed: {:?}", err);
                FrameHandle(0)
            }
        }
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if let Err(err) = self.window.cancel_animation_frame(handle.0) {
            warn!("cancelAnimationFrame failed: {:?}", err);
        }
    }
}
