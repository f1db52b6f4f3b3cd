use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{info, warn};

use easer_core::{
    config::FrameConfig, AnimationConfig, AnimationController, AnimationStatus, Control, FrameLoop, FrameQueue,
    MonotonicClock,
};

use super::status_line;

/// Timed controls sent to the animation while it plays
#[derive(Debug, Default, Clone, Copy)]
pub struct ControlSchedule {
    pub pause_at: Option<u64>,
    pub resume_after: Option<u64>,
    pub reverse_at: Option<u64>,
    pub stop_after: Option<u64>,
}

impl ControlSchedule {
    /// Controls with their offsets from the start, in firing order
    fn timeline(&self) -> Vec<(u64, Control)> {
        let mut events = Vec::new();
        if let Some(at) = self.pause_at {
            events.push((at, Control::Pause));
            if let Some(after) = self.resume_after {
                events.push((at + after, Control::Resume));
            }
        }
        if let Some(at) = self.reverse_at {
            events.push((at, Control::Reverse));
        }
        if let Some(at) = self.stop_after {
            events.push((at, Control::Stop));
        }
        events.sort_by_key(|(at, _)| *at);
        events
    }
}

pub async fn run(animation: AnimationConfig, frame: &FrameConfig, schedule: ControlSchedule, json: bool) -> Result<()> {
    let options = animation
        .to_options()
        .on_step(move |status| print_status(status, json))
        .on_end(|| info!("Pass complete"));

    let mut controller = AnimationController::new(
        animation.easing.as_str(),
        options,
        MonotonicClock::new(),
        FrameQueue::new(),
    )?;
    let mut completion = controller.completion();

    info!(
        "Playing {} from {} to {} over {}ms{}{}",
        animation.easing,
        animation.from,
        animation.to,
        animation.duration_ms,
        if animation.looping { ", looping" } else { "" },
        if animation.reverse { ", reversed" } else { "" }
    );

    let (control_tx, control_rx) = mpsc::unbounded_channel();

    let timed_tx = control_tx.clone();
    let events = schedule.timeline();
    tokio::spawn(async move {
        let started = tokio::time::Instant::now();
        for (at, control) in events {
            tokio::time::sleep_until(started + Duration::from_millis(at)).await;
            if timed_tx.send(control).is_err() {
                break;
            }
        }
    });

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, stopping animation");
            let _ = control_tx.send(Control::Stop);
        }
    });

    let frames = FrameLoop::new(frame.frame_interval())
        .with_controls(control_rx)
        .run(&mut controller)
        .await;

    if controller.completion().is_settled() {
        completion.wait().await;
        info!("Animation finished after {} frames", frames);
    } else {
        warn!("Animation left {:?} with no pending controls", controller.state());
    }

    Ok(())
}

fn print_status(status: &AnimationStatus, json: bool) {
    if json {
        match serde_json::to_string(status) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!("Failed to encode status: {}", e),
        }
    } else {
        println!("{}", status_line(status));
    }
}
