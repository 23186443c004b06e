/// Token for one requested frame, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Per-frame callback registration of the host.
///
/// Each `schedule` asks the host to call the animator's frame entry point
/// once, on its next display refresh. The target is wired when the scheduler
/// is created.
pub trait FrameScheduler {
    fn schedule(&mut self) -> FrameHandle;

    /// Drops a request that has not fired yet. Unknown handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);
}
