/// The 2D drawing target the animator paints tiles on.
pub trait DrawSurface {
    /// Syncs the backing store to the size the host displays the surface at
    /// and returns that size in pixels.
    fn display_size(&mut self) -> (u32, u32);

    fn clear(&mut self);

    /// Saves drawing state before a pass of `fill_circle` calls.
    fn begin_pass(&mut self) {}

    /// Restores the state saved by `begin_pass`.
    fn end_pass(&mut self) {}

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str, alpha: f64);
}
