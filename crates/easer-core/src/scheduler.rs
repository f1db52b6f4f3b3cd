//! Frame scheduling
//!
//! A controller never runs its own loop. It asks the host for one frame at a
//! time through [`FrameScheduler`] and the host calls back into
//! `AnimationController::tick` when that frame fires.

/// Host capability: run one controller tick before the next repaint
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Pull-style scheduler: records requests until the host takes them
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    pending: bool,
    requested: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame has been requested and not yet taken
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending frame, returning whether there was one
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Total number of frames requested so far
    pub fn requested(&self) -> u64 {
        self.requested
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requested += 1;
    }
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn request_frame(&mut self) {
        (**self).request_frame();
    }
}
