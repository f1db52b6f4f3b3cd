use anyhow::Result;
use serde::Serialize;

use easer_core::{AnimationConfig, AnimationController, AnimationStatus, FrameQueue, ManualClock};

use super::status_line;

#[derive(Debug, Serialize)]
struct Sample {
    elapsed_ms: f64,
    #[serde(flatten)]
    status: AnimationStatus,
}

/// Evaluate one pass at `steps + 1` evenly spaced instants on a manual clock
fn collect(animation: &AnimationConfig, steps: u32) -> Result<Vec<Sample>> {
    let clock = ManualClock::new();
    let options = animation.to_options().immediate(true).looping(false);
    let mut controller = AnimationController::new(animation.easing.as_str(), options, clock.clone(), FrameQueue::new())?;

    let steps = steps.max(1);
    let duration = animation.duration_ms.max(0.0);
    let mut samples = Vec::with_capacity(steps as usize + 1);

    for i in 0..=steps {
        let elapsed_ms = duration * i as f64 / steps as f64;
        clock.set(elapsed_ms);
        if controller.pump().is_none() {
            break;
        }
        samples.push(Sample {
            elapsed_ms,
            status: controller.status(),
        });
    }

    Ok(samples)
}

pub fn run(animation: AnimationConfig, steps: u32, json: bool) -> Result<()> {
    let samples = collect(&animation, steps)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
        return Ok(());
    }

    println!(
        "{} from {} to {} over {}ms{}:\n",
        animation.easing,
        animation.from,
        animation.to,
        animation.duration_ms,
        if animation.reverse { " (reversed)" } else { "" }
    );
    for sample in &samples {
        println!("  {:>9.1}ms  {}", sample.elapsed_ms, status_line(&sample.status));
    }

    Ok(())
}
