//! Animation controller
//!
//! Combines an easing curve, a clock and a frame scheduler into a single
//! animation with start/pause/resume/reverse/stop controls.
//!
//! The controller never sleeps or loops on its own. Every control operation
//! that needs a frame asks the [`FrameScheduler`] for one, and the host calls
//! [`AnimationController::tick`] when that frame fires. Each tick maps elapsed
//! time to progress, progress to the eased `y`, and `y` to a value between
//! `from` and `to`.

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::completion::{Completion, CompletionSignal};
use crate::easing::{BoxedEasing, Easing};
use crate::error::Result;
use crate::scheduler::{FrameQueue, FrameScheduler};
use crate::timing::{directed, lerp, progress, Clock, MonotonicClock};

/// Values delivered to step callbacks, all computed in the same tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnimationStatus {
    /// Current value, between `from` and `to` for curves within [0, 1]
    pub value: f64,
    /// Output of the easing curve
    pub y: f64,
    /// Input of the easing curve, from 0 to 1 (1 to 0 when reversed)
    pub progress: f64,
}

pub type StepCallback = Box<dyn FnMut(&AnimationStatus)>;
pub type EndCallback = Box<dyn FnMut()>;

/// Animation parameters and callbacks
///
/// Defaults: `from = 0`, `to = 1`, `duration_ms = 300`, `immediate = true`,
/// `looping = false`, `reverse = false`, no callbacks.
pub struct AnimationOptions {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
    pub immediate: bool,
    pub looping: bool,
    pub reverse: bool,
    callback: Option<StepCallback>,
    on_step: Option<StepCallback>,
    on_end: Option<EndCallback>,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            duration_ms: 300.0,
            immediate: true,
            looping: false,
            reverse: false,
            callback: None,
            on_step: None,
            on_end: None,
        }
    }
}

impl AnimationOptions {
    pub fn range(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Called with the status of every tick
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&AnimationStatus) + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Alias of [`callback`](Self::callback). When both are set both run,
    /// `callback` first.
    pub fn on_step<F>(mut self, on_step: F) -> Self
    where
        F: FnMut(&AnimationStatus) + 'static,
    {
        self.on_step = Some(Box::new(on_step));
        self
    }

    /// Called each time a pass reaches its end, including passes that loop.
    /// Not called by `stop()`.
    pub fn on_end<F>(mut self, on_end: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_end = Some(Box::new(on_end));
        self
    }
}

impl fmt::Debug for AnimationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationOptions")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration_ms", &self.duration_ms)
            .field("immediate", &self.immediate)
            .field("looping", &self.looping)
            .field("reverse", &self.reverse)
            .field("callback", &self.callback.is_some())
            .field("on_step", &self.on_step.is_some())
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}

/// Control messages, for hosts that forward controls from elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Reverse,
    Pause,
    Resume,
    Stop,
}

/// Where the controller is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Created with `immediate = false` and not started yet
    Idle,
    /// A frame is requested and will advance the timeline
    Running,
    /// Suspended until `resume()`
    Paused,
    /// Stopped, or completed without looping
    Finished,
}

/// Result of a single [`AnimationController::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No frame was requested, nothing ran
    Idle,
    /// The frame found the animation paused and dropped the chain
    Paused,
    /// Advanced and requested the next frame
    Running,
    /// Reached the end of a pass and restarted
    Looped,
    /// Reached the end and settled completion
    Completed,
}

/// Timeline bookkeeping, in clock milliseconds
#[derive(Debug, Clone, Copy)]
struct Timeline {
    start_time: f64,
    current_time: f64,
    elapsed_time: f64,
    progress: f64,
    value: f64,
    y: f64,
}

impl Timeline {
    fn reset(now: f64, options: &AnimationOptions) -> Self {
        Self {
            start_time: now,
            current_time: now,
            elapsed_time: 0.0,
            progress: 0.0,
            value: if options.reverse { options.to } else { options.from },
            y: 0.0,
        }
    }
}

/// Single eased animation driven one frame at a time
pub struct AnimationController<C: Clock = MonotonicClock, S: FrameScheduler = FrameQueue> {
    easing: BoxedEasing,
    options: AnimationOptions,
    clock: C,
    scheduler: S,
    timeline: Timeline,
    paused: bool,
    started: bool,
    /// A frame is requested and has not fired yet
    frame_requested: bool,
    completion: CompletionSignal,
}

impl AnimationController {
    /// Create with the monotonic clock and a [`FrameQueue`]
    pub fn create(easing: impl Into<Easing>, options: AnimationOptions) -> Result<Self> {
        Self::new(easing, options, MonotonicClock::new(), FrameQueue::new())
    }
}

impl<C: Clock, S: FrameScheduler> AnimationController<C, S> {
    /// Create a controller, starting it right away when `options.immediate`
    ///
    /// # Errors
    /// Fails only when `easing` names a curve that is not in the table.
    pub fn new(easing: impl Into<Easing>, options: AnimationOptions, clock: C, scheduler: S) -> Result<Self> {
        let easing = easing.into().resolve()?;
        let timeline = Timeline::reset(clock.now_ms(), &options);

        let mut controller = Self {
            easing,
            options,
            clock,
            scheduler,
            timeline,
            paused: false,
            started: false,
            frame_requested: false,
            completion: CompletionSignal::new(),
        };

        if controller.options.immediate {
            controller.start();
        }

        Ok(controller)
    }

    /// Restart the timeline from zero and request the first frame
    ///
    /// Always a hard restart, also while running or paused.
    pub fn start(&mut self) {
        self.timeline = Timeline::reset(self.clock.now_ms(), &self.options);
        self.paused = false;
        self.started = true;

        debug!(
            "Animation started: {} -> {} over {}ms{}",
            self.options.from,
            self.options.to,
            self.options.duration_ms,
            if self.options.reverse { " (reversed)" } else { "" }
        );

        self.request_frame();
    }

    /// Flip the direction of travel without touching timing
    ///
    /// The next tick maps the already-elapsed time under the new direction,
    /// so progress jumps to its mirror image.
    pub fn reverse(&mut self) {
        self.options.reverse = !self.options.reverse;
        debug!("Animation direction flipped, reverse={}", self.options.reverse);
    }

    /// Suspend the animation; the pending frame will do nothing
    pub fn pause(&mut self) {
        self.paused = true;
        debug!("Animation paused at progress {:.3}", self.timeline.progress);
    }

    /// Continue a paused animation, excluding the paused interval from elapsed time
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }

        self.paused = false;
        let gap = self.clock.now_ms() - self.timeline.current_time;
        self.timeline.start_time += gap;
        debug!("Animation resumed after {:.1}ms", gap);

        self.request_frame();
    }

    /// Halt the animation and settle completion. `on_end` is not called.
    pub fn stop(&mut self) {
        self.paused = true;
        self.timeline.start_time = self.clock.now_ms();

        if self.completion.settle() {
            debug!("Animation stopped");
        }
    }

    /// Dispatch a control message to the matching operation
    pub fn apply(&mut self, control: Control) {
        match control {
            Control::Start => self.start(),
            Control::Reverse => self.reverse(),
            Control::Pause => self.pause(),
            Control::Resume => self.resume(),
            Control::Stop => self.stop(),
        }
    }

    /// Run the requested frame
    ///
    /// Hosts call this when the frame asked for through the scheduler fires.
    /// Calling it with no frame requested does nothing.
    pub fn tick(&mut self) -> TickOutcome {
        if !std::mem::take(&mut self.frame_requested) {
            return TickOutcome::Idle;
        }

        if self.paused {
            trace!("Frame skipped: animation paused");
            return TickOutcome::Paused;
        }

        let now = self.clock.now_ms();
        let reverse = self.options.reverse;
        let timeline = &mut self.timeline;

        timeline.current_time = now;
        timeline.elapsed_time = now - timeline.start_time;
        timeline.progress = directed(progress(timeline.elapsed_time, self.options.duration_ms), reverse);
        timeline.y = (self.easing)(timeline.progress);
        timeline.value = lerp(self.options.from, self.options.to, timeline.y);
        let elapsed = timeline.elapsed_time;

        let status = self.status();
        trace!(
            "Frame at {:.1}ms: progress={:.4} y={:.4} value={:.4}",
            elapsed,
            status.progress,
            status.y,
            status.value
        );

        if let Some(callback) = self.options.callback.as_mut() {
            callback(&status);
        }
        if let Some(on_step) = self.options.on_step.as_mut() {
            on_step(&status);
        }

        if !self.check_ended() {
            self.request_frame();
            return TickOutcome::Running;
        }

        if self.options.looping {
            trace!("Pass ended, looping");
            self.start();
            TickOutcome::Looped
        } else {
            if self.completion.settle() {
                debug!("Animation completed");
            }
            TickOutcome::Completed
        }
    }

    /// Whether the pass has reached its end; fires `on_end` when it has
    fn check_ended(&mut self) -> bool {
        let progress = self.timeline.progress;
        let ended = if self.options.reverse {
            progress <= 0.0
        } else {
            progress >= 1.0
        };

        if ended {
            if let Some(on_end) = self.options.on_end.as_mut() {
                on_end();
            }
        }

        ended
    }

    fn request_frame(&mut self) {
        if !self.frame_requested {
            self.frame_requested = true;
            self.scheduler.request_frame();
        }
    }

    /// Status as of the last tick (or the last reset)
    pub fn status(&self) -> AnimationStatus {
        AnimationStatus {
            value: self.timeline.value,
            y: self.timeline.y,
            progress: self.timeline.progress,
        }
    }

    pub fn state(&self) -> PlaybackState {
        if self.completion.is_settled() && (self.paused || !self.frame_requested) {
            PlaybackState::Finished
        } else if self.paused {
            PlaybackState::Paused
        } else if self.started {
            PlaybackState::Running
        } else {
            PlaybackState::Idle
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.options.reverse
    }

    /// Whether a frame is requested and has not fired yet
    #[inline]
    pub fn has_pending_frame(&self) -> bool {
        self.frame_requested
    }

    /// Elapsed time as of the last tick
    pub fn elapsed_ms(&self) -> f64 {
        self.timeline.elapsed_time
    }

    pub fn options(&self) -> &AnimationOptions {
        &self.options
    }

    /// Handle that resolves on stop or non-looping completion
    pub fn completion(&self) -> Completion {
        self.completion.subscribe()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<C: Clock> AnimationController<C, FrameQueue> {
    /// Run the queued frame, if any
    pub fn pump(&mut self) -> Option<TickOutcome> {
        if self.scheduler.take() {
            Some(self.tick())
        } else {
            None
        }
    }
}

impl<C: Clock, S: FrameScheduler> fmt::Debug for AnimationController<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationController")
            .field("options", &self.options)
            .field("timeline", &self.timeline)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::easing;
    use crate::timing::ManualClock;

    type TestController = AnimationController<ManualClock, FrameQueue>;

    struct Harness {
        controller: TestController,
        clock: ManualClock,
        steps: Rc<RefCell<Vec<AnimationStatus>>>,
        ends: Rc<Cell<u32>>,
    }

    fn harness(easing: &str, options: AnimationOptions) -> Harness {
        let clock = ManualClock::new();
        let steps = Rc::new(RefCell::new(Vec::new()));
        let ends = Rc::new(Cell::new(0));

        let options = {
            let steps = steps.clone();
            let ends = ends.clone();
            options
                .on_step(move |status| steps.borrow_mut().push(*status))
                .on_end(move || ends.set(ends.get() + 1))
        };

        let controller = AnimationController::new(easing, options, clock.clone(), FrameQueue::new()).unwrap();
        Harness {
            controller,
            clock,
            steps,
            ends,
        }
    }

    fn assert_status(status: AnimationStatus, value: f64, y: f64, progress: f64) {
        assert!((status.value - value).abs() < 1e-9, "value {} != {}", status.value, value);
        assert!((status.y - y).abs() < 1e-9, "y {} != {}", status.y, y);
        assert!((status.progress - progress).abs() < 1e-9, "progress {} != {}", status.progress, progress);
    }

    #[test]
    fn test_unknown_easing_fails_at_construction() {
        let err = AnimationController::new("wobble", AnimationOptions::default(), ManualClock::new(), FrameQueue::new())
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("wobble"));
        for name in easing::names() {
            assert!(message.contains(name));
        }
    }

    #[test]
    fn test_every_named_curve_constructs() {
        for name in easing::names() {
            let result = AnimationController::new(name, AnimationOptions::default(), ManualClock::new(), FrameQueue::new());
            assert!(result.is_ok(), "{} should construct", name);
        }
    }

    #[test]
    fn test_create_with_defaults() {
        let controller = AnimationController::create("easeOutQuad", AnimationOptions::default()).unwrap();
        assert_eq!(controller.state(), PlaybackState::Running);
        assert!(controller.scheduler().is_pending());
        assert_eq!(controller.options().duration_ms, 300.0);
        assert!(!controller.completion().is_settled());
    }

    #[test]
    fn test_custom_curve() {
        let mut h = {
            let clock = ManualClock::new();
            let controller = AnimationController::new(
                Easing::custom(|t| t * t),
                AnimationOptions::default().duration_ms(100.0),
                clock.clone(),
                FrameQueue::new(),
            )
            .unwrap();
            (controller, clock)
        };
        h.1.advance(50.0);
        h.0.pump();
        assert_status(h.0.status(), 0.25, 0.25, 0.5);
    }

    #[test]
    fn test_immediate_start_requests_frame() {
        let h = harness("linear", AnimationOptions::default());
        assert_eq!(h.controller.state(), PlaybackState::Running);
        assert!(h.controller.scheduler().is_pending());
        assert_status(h.controller.status(), 0.0, 0.0, 0.0);
    }

    #[test]
    fn test_linear_progress_tracks_time() {
        let mut h = harness("linear", AnimationOptions::default().duration_ms(200.0));

        for t in [0.0, 50.0, 100.0, 150.0] {
            h.clock.set(t);
            assert_eq!(h.controller.pump(), Some(TickOutcome::Running));
            let expected = t / 200.0;
            assert_status(h.controller.status(), expected, expected, expected);
        }

        h.clock.set(200.0);
        assert_eq!(h.controller.pump(), Some(TickOutcome::Completed));
        assert_status(h.controller.status(), 1.0, 1.0, 1.0);
        assert_eq!(h.steps.borrow().len(), 5);
    }

    #[test]
    fn test_not_immediate_scenario() {
        let mut h = harness(
            "linear",
            AnimationOptions::default()
                .range(10.0, 20.0)
                .duration_ms(100.0)
                .immediate(false),
        );

        assert_eq!(h.controller.state(), PlaybackState::Idle);
        assert_eq!(h.controller.pump(), None);

        h.controller.start();
        h.clock.advance(50.0);
        assert_eq!(h.controller.pump(), Some(TickOutcome::Running));
        assert_status(h.controller.status(), 15.0, 0.5, 0.5);
        assert_eq!(h.ends.get(), 0);

        h.clock.advance(60.0);
        assert_eq!(h.controller.pump(), Some(TickOutcome::Completed));
        assert_status(h.controller.status(), 20.0, 1.0, 1.0);
        assert_eq!(h.ends.get(), 1);
        assert!(h.controller.completion().is_settled());
        assert_eq!(h.controller.state(), PlaybackState::Finished);

        // Nothing further is scheduled
        assert_eq!(h.controller.pump(), None);
        assert_eq!(h.ends.get(), 1);
    }

    #[test]
    fn test_reverse_runs_from_to_back_to_from() {
        let mut h = harness(
            "linear",
            AnimationOptions::default()
                .range(10.0, 20.0)
                .duration_ms(100.0)
                .reverse(true),
        );

        assert_eq!(h.controller.status().value, 20.0);

        h.controller.pump();
        assert_status(h.controller.status(), 20.0, 1.0, 1.0);

        h.clock.advance(25.0);
        h.controller.pump();
        assert_status(h.controller.status(), 17.5, 0.75, 0.75);
        assert_eq!(h.ends.get(), 0);

        h.clock.advance(75.0);
        assert_eq!(h.controller.pump(), Some(TickOutcome::Completed));
        assert_status(h.controller.status(), 10.0, 0.0, 0.0);
        assert_eq!(h.ends.get(), 1);
    }

    #[test]
    fn test_stop_settles_and_silences() {
        let mut h = harness("linear", AnimationOptions::default().duration_ms(100.0));
        let completion = h.controller.completion();

        h.clock.advance(30.0);
        h.controller.pump();
        assert_eq!(h.steps.borrow().len(), 1);

        h.controller.stop();
        assert!(completion.is_settled());
        assert_eq!(h.controller.state(), PlaybackState::Finished);

        h.clock.advance(30.0);
        assert_eq!(h.controller.pump(), Some(TickOutcome::Paused));
        assert_eq!(h.controller.pump(), None);
        assert_eq!(h.steps.borrow().len(), 1);
        assert_eq!(h.ends.get(), 0);
    }

    #[test]
    fn test_stop_twice_is_noop() {
        let mut h = harness("linear", AnimationOptions::default());
        h.controller.stop();
        h.controller.stop();
        assert!(h.controller.completion().is_settled());
        assert_eq!(h.ends.get(), 0);
    }

    #[test]
    fn test_stop_after_completion_keeps_single_end() {
        let mut h = harness("linear", AnimationOptions::default().duration_ms(10.0));
        h.clock.advance(10.0);
        assert_eq!(h.controller.pump(), Some(TickOutcome::Completed));
        h.controller.stop();
        assert_eq!(h.ends.get(), 1);
        assert_eq!(h.controller.state(), PlaybackState::Finished);
    }

    #[test]
    fn test_pause_resume_excludes_gap() {
        let mut h = harness("linear", AnimationOptions::default().duration_ms(100.0));

        h.clock.advance(40.0);
        h.controller.pump();
        assert_status(h.controller.status(), 0.4, 0.4, 0.4);

        h.controller.pause();
        assert_eq!(h.controller.state(), PlaybackState::Paused);

        h.clock.advance(500.0);
        assert_eq!(h.controller.pump(), Some(TickOutcome::Paused));
        assert_eq!(h.steps.borrow().len(), 1);

        h.controller.resume();
        assert_eq!(h.controller.state(), PlaybackState::Running);
        h.controller.pump();
        assert_status(h.controller.status(), 0.4, 0.4, 0.4);
        assert!((h.controller.elapsed_ms() - 40.0).abs() < 1e-9);

        h.clock.advance(10.0);
        h.controller.pump();
        assert_status(h.controller.status(), 0.5, 0.5, 0.5);
    }

    #[test]
    fn test_pause_and_resume_before_frame_fires() {
        let mut h = harness("linear", AnimationOptions::default().duration_ms(100.0));
        h.controller.pause();
        h.controller.resume();

        // Still one frame in flight
        assert_eq!(h.controller.scheduler().requested(), 1);
        h.clock.advance(20.0);
        assert_eq!(h.controller.pump(), Some(TickOutcome::Running));
    }

    #[test]
    fn test_resume_when_running_is_noop() {
        let mut h = harness("linear", AnimationOptions::default().duration_ms(100.0));
        h.clock.advance(20.0);
        h.controller.resume();
        assert_eq!(h.controller.scheduler().requested(), 1);
        h.controller.pump();
        assert_status(h.controller.status(), 0.2, 0.2, 0.2);
    }

    #[test]
    fn test_loop_restarts_until_stopped() {
        let mut h = harness("linear", AnimationOptions::default().duration_ms(100.0).looping(true));
        let completion = h.controller.completion();

        for cycle in 1..=3 {
            assert_eq!(h.controller.pump(), Some(TickOutcome::Running));
            assert_status(h.controller.status(), 0.0, 0.0, 0.0);

            h.clock.advance(100.0);
            assert_eq!(h.controller.pump(), Some(TickOutcome::Looped));
            assert_eq!(h.ends.get(), cycle);
            assert!(!completion.is_settled());
        }

        h.controller.stop();
        assert!(completion.is_settled());
        assert_eq!(h.controller.pump(), Some(TickOutcome::Paused));
        assert_eq!(h.ends.get(), 3);
    }

    #[test]
    fn test_reversed_loop_restarts_at_to() {
        let mut h = harness(
            "linear",
            AnimationOptions::default()
                .range(10.0, 20.0)
                .duration_ms(100.0)
                .reverse(true)
                .looping(true),
        );
        let completion = h.controller.completion();

        for cycle in 1..=2 {
            assert_eq!(h.controller.pump(), Some(TickOutcome::Running));
            assert_status(h.controller.status(), 20.0, 1.0, 1.0);

            h.clock.advance(50.0);
            assert_eq!(h.controller.pump(), Some(TickOutcome::Running));
            assert_status(h.controller.status(), 15.0, 0.5, 0.5);

            h.clock.advance(50.0);
            assert_eq!(h.controller.pump(), Some(TickOutcome::Looped));
            assert_eq!(h.ends.get(), cycle);

            // The restart resets the value to `to` before the next frame
            assert_status(h.controller.status(), 20.0, 0.0, 0.0);
            assert!(!completion.is_settled());
        }

        h.controller.stop();
        assert!(completion.is_settled());
        assert_eq!(h.ends.get(), 2);
    }

    #[test]
    fn test_reverse_mid_flight_flips_progress() {
        let mut h = harness("linear", AnimationOptions::default().duration_ms(100.0));

        h.clock.advance(25.0);
        h.controller.pump();
        assert_status(h.controller.status(), 0.25, 0.25, 0.25);

        h.controller.reverse();
        assert!(h.controller.is_reversed());
        h.controller.pump();
        assert_status(h.controller.status(), 0.75, 0.75, 0.75);

        h.clock.advance(75.0);
        assert_eq!(h.controller.pump(), Some(TickOutcome::Completed));
        assert_status(h.controller.status(), 0.0, 0.0, 0.0);
    }

    #[test]
    fn test_start_while_running_restarts() {
        let mut h = harness("linear", AnimationOptions::default().duration_ms(100.0));
        h.clock.advance(60.0);
        h.controller.pump();

        h.controller.start();
        assert_status(h.controller.status(), 0.0, 0.0, 0.0);
        assert_eq!(h.controller.pump(), Some(TickOutcome::Running));
        assert_status(h.controller.status(), 0.0, 0.0, 0.0);
    }

    #[test]
    fn test_start_after_completion_revives_timeline() {
        let mut h = harness("linear", AnimationOptions::default().duration_ms(10.0));
        h.controller.stop();
        assert_eq!(h.controller.state(), PlaybackState::Finished);

        h.controller.start();
        assert_eq!(h.controller.state(), PlaybackState::Running);
        h.clock.advance(10.0);
        assert_eq!(h.controller.pump(), Some(TickOutcome::Completed));
        assert_eq!(h.ends.get(), 1);
        assert!(h.controller.completion().is_settled());
    }

    #[test]
    fn test_zero_duration_completes_on_first_frame() {
        let mut h = harness("linear", AnimationOptions::default().duration_ms(0.0).range(3.0, 7.0));
        assert_eq!(h.controller.pump(), Some(TickOutcome::Completed));
        assert_status(h.controller.status(), 7.0, 1.0, 1.0);
        assert_eq!(h.ends.get(), 1);
    }

    #[test]
    fn test_negative_duration_completes_on_first_frame() {
        let mut h = harness("linear", AnimationOptions::default().duration_ms(-50.0));
        assert_eq!(h.controller.pump(), Some(TickOutcome::Completed));
    }

    #[test]
    fn test_equal_endpoints_hold_value() {
        let mut h = harness("easeOutBounce", AnimationOptions::default().range(5.0, 5.0).duration_ms(100.0));
        for _ in 0..4 {
            h.clock.advance(30.0);
            h.controller.pump();
            assert_eq!(h.controller.status().value, 5.0);
        }
    }

    #[test]
    fn test_callback_and_on_step_both_run_before_on_end() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let clock = ManualClock::new();
        let options = {
            let (a, b, c) = (log.clone(), log.clone(), log.clone());
            AnimationOptions::default()
                .duration_ms(0.0)
                .callback(move |status| a.borrow_mut().push(format!("callback {}", status.progress)))
                .on_step(move |status| b.borrow_mut().push(format!("on_step {}", status.progress)))
                .on_end(move || c.borrow_mut().push("on_end".to_string()))
        };
        let mut controller = AnimationController::new("linear", options, clock, FrameQueue::new()).unwrap();

        controller.pump();
        assert_eq!(*log.borrow(), vec!["callback 1", "on_step 1", "on_end"]);
    }

    #[test]
    fn test_tick_without_request_is_idle() {
        let mut h = harness("linear", AnimationOptions::default().immediate(false));
        assert_eq!(h.controller.tick(), TickOutcome::Idle);
        assert!(h.steps.borrow().is_empty());
    }

    #[test]
    fn test_apply_dispatches_controls() {
        let mut h = harness("linear", AnimationOptions::default().immediate(false));
        h.controller.apply(Control::Start);
        assert_eq!(h.controller.state(), PlaybackState::Running);
        h.controller.apply(Control::Pause);
        assert!(h.controller.is_paused());
        h.controller.apply(Control::Resume);
        assert!(!h.controller.is_paused());
        h.controller.apply(Control::Reverse);
        assert!(h.controller.is_reversed());
        h.controller.apply(Control::Stop);
        assert_eq!(h.controller.state(), PlaybackState::Finished);
    }
}
