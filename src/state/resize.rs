// Coalesces container resize notifications into one geometry update per frame.
use super::geometry::ContainerSize;

#[derive(Debug, Default)]
pub struct ResizeCoalescer {
    latest: Option<ContainerSize>,
    frame_pending: bool,
}

impl ResizeCoalescer {
    /// Records a new size. Returns true when the caller must request a frame;
    /// false while one is already pending.
    pub fn notify(&mut self, size: ContainerSize) -> bool {
        self.latest = Some(size);
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Called from the frame callback; yields the most recent size only.
    pub fn settle(&mut self) -> Option<ContainerSize> {
        self.frame_pending = false;
        self.latest.take()
    }
}
