use easer_core::AnimationStatus;

pub mod config;
pub mod list;
pub mod run;
pub mod sample;

/// Fixed-width text rendering of a status
pub fn status_line(status: &AnimationStatus) -> String {
    format!(
        "progress={:.4}  y={:.4}  value={:.4}",
        status.progress, status.y, status.value
    )
}
