use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::animation::{AnimationController, Control, PlaybackState, TickOutcome};
use crate::scheduler::FrameQueue;
use crate::timing::Clock;

const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// Drives a controller on a fixed frame interval
///
/// Fires the requested frame on every interval tick and applies control
/// messages between frames.
pub struct FrameLoop {
    frame_interval: Duration,
    controls: Option<mpsc::UnboundedReceiver<Control>>,
}

impl FrameLoop {
    /// Create a frame loop without a control channel
    ///
    /// Intervals shorter than 1ms are raised to 1ms.
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval: frame_interval.max(MIN_FRAME_INTERVAL),
            controls: None,
        }
    }

    /// Accept control messages while running
    pub fn with_controls(mut self, rx: mpsc::UnboundedReceiver<Control>) -> Self {
        self.controls = Some(rx);
        self
    }

    /// Run until the animation finishes, or until it is idle or paused with
    /// no control channel left to wake it. Returns the number of frames run.
    pub async fn run<C: Clock>(mut self, controller: &mut AnimationController<C, FrameQueue>) -> u64 {
        debug!("Frame loop started: interval={:?}", self.frame_interval);

        let mut interval = tokio::time::interval(self.frame_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut frames = 0u64;

        loop {
            let wants_frame = controller.scheduler().is_pending();
            if !wants_frame
                && (self.controls.is_none() || controller.state() == PlaybackState::Finished)
            {
                break;
            }

            let mut controls_closed = false;

            tokio::select! {
                _ = interval.tick(), if wants_frame => {
                    if let Some(outcome) = controller.pump() {
                        frames += 1;
                        if outcome == TickOutcome::Looped {
                            debug!("Animation looped after {} frames", frames);
                        }
                    }
                }

                control = next_control(&mut self.controls), if self.controls.is_some() => {
                    match control {
                        Some(control) => {
                            debug!("Applying control: {:?}", control);
                            controller.apply(control);
                        }
                        None => controls_closed = true,
                    }
                }

                else => break,
            }

            if controls_closed {
                debug!("Control channel closed");
                self.controls = None;
            }
        }

        info!("Frame loop finished after {} frames ({:?})", frames, controller.state());
        frames
    }
}

async fn next_control(controls: &mut Option<mpsc::UnboundedReceiver<Control>>) -> Option<Control> {
    match controls {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
