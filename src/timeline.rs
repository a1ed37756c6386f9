//! Timeline scheduler: for any output frame, which two slides matter and how
//! far the blend between them has run. Every call is a pure function of
//! `(frame_index, config)`; nothing is persisted between frames, which is
//! what lets preview and export share one code path.
//!
//! Each slide's on-screen lifetime is one *cycle*: a hold phase followed by a
//! transition phase. When the configured transition time cannot fit the
//! requested total duration, the schedule is corrected rather than dropping
//! images: each image's slice of the duration is split evenly, half holding
//! and half transitioning, so the corrected schedule always consumes the full
//! requested duration.

use crate::{
    core::{FrameIndex, clamp01},
    model::RenderConfig,
};

/// Which slides are visible at one frame and the blend progress between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineState {
    pub current_index: usize,
    pub next_index: usize,
    /// Blend progress in `[0, 1]`; 0 while holding.
    pub progress: f64,
    pub is_transitioning: bool,
}

impl TimelineState {
    fn holding(index: usize, next_index: usize) -> Self {
        Self {
            current_index: index,
            next_index,
            progress: 0.0,
            is_transitioning: false,
        }
    }
}

/// Derived schedule quantities, exposed for display and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingInfo {
    /// Seconds each slide is shown statically before its transition.
    pub hold_per_image: f64,
    /// Effective per-transition seconds after overflow correction.
    pub transition_seconds: f64,
    /// One slide's full lifetime: hold + transition.
    pub time_per_cycle: f64,
    /// `duration / time_per_cycle`; equals the image count whenever the
    /// schedule is internally consistent.
    pub total_cycles: f64,
}

#[derive(Clone, Copy, Debug)]
struct Schedule {
    hold: f64,
    transition: f64,
    cycle: f64,
}

fn schedule(image_count: usize, duration_seconds: f64, transition_ms: f64) -> Schedule {
    let n = image_count as f64;
    let configured = transition_ms / 1000.0;

    // Overflow correction: when the configured transitions cannot fit the
    // requested duration, split each image's slice half hold, half
    // transition. Never drops images, never fails.
    let transition = if configured * n > duration_seconds {
        (duration_seconds / n) * 0.5
    } else {
        configured
    };

    let hold = (duration_seconds - transition * n) / n;
    Schedule {
        hold,
        transition,
        cycle: hold + transition,
    }
}

/// Compute the timeline state for one output frame.
pub fn compute_timeline_state(frame: FrameIndex, config: &RenderConfig) -> TimelineState {
    let image_count = config.images.len();
    if image_count == 0 {
        return TimelineState::holding(0, 0);
    }

    let last = image_count - 1;
    if frame.0 >= config.export.total_frames() {
        // Terminal hold: past the end the last slide stays up.
        return TimelineState::holding(last, last);
    }

    let s = schedule(
        image_count,
        config.export.duration_seconds,
        config.transition.duration_ms,
    );
    let current_time = frame.0 as f64 / f64::from(config.export.fps);
    let cycle_index = (current_time / s.cycle).floor() as u64;
    if cycle_index >= image_count as u64 {
        // Floating rounding at the very end can overshoot by one cycle.
        return TimelineState::holding(last, last);
    }

    let current_index = cycle_index as usize;
    let next_index = (current_index + 1) % image_count;
    let cycle_time = current_time % s.cycle;

    if cycle_time >= s.hold {
        TimelineState {
            current_index,
            next_index,
            progress: clamp01((cycle_time - s.hold) / s.transition),
            is_transitioning: true,
        }
    } else {
        TimelineState::holding(current_index, next_index)
    }
}

/// Expose the derived schedule for display/diagnostic purposes.
///
/// With an empty image list every field is zero.
pub fn timing_breakdown(config: &RenderConfig) -> TimingInfo {
    if config.images.is_empty() {
        return TimingInfo {
            hold_per_image: 0.0,
            transition_seconds: 0.0,
            time_per_cycle: 0.0,
            total_cycles: 0.0,
        };
    }

    let s = schedule(
        config.images.len(),
        config.export.duration_seconds,
        config.transition.duration_ms,
    );
    TimingInfo {
        hold_per_image: s.hold,
        transition_seconds: s.transition,
        time_per_cycle: s.cycle,
        total_cycles: config.export.duration_seconds / s.cycle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::Canvas,
        decode::PreparedImage,
        model::{ExportSpec, TransformSpec, TransitionSpec},
        transitions::{Direction, TransitionKind},
    };
    use std::sync::Arc;

    fn tiny_image() -> PreparedImage {
        PreparedImage {
            width: 1,
            height: 1,
            rgba8_premul: Arc::new(vec![255, 255, 255, 255]),
        }
    }

    fn config(image_count: usize, duration_seconds: f64, fps: u32, ms: f64) -> RenderConfig {
        RenderConfig {
            images: (0..image_count).map(|_| tiny_image()).collect(),
            overlay_inner: None,
            overlay_outer: None,
            inner_canvas: Canvas {
                width: 8,
                height: 8,
            },
            outer_canvas: Canvas {
                width: 8,
                height: 8,
            },
            transition: TransitionSpec {
                kind: TransitionKind::Wipe,
                direction: Direction::Right,
                duration_ms: ms,
            },
            transform: TransformSpec::default(),
            export: ExportSpec {
                duration_seconds,
                fps,
            },
        }
    }

    #[test]
    fn empty_image_list_shows_nothing() {
        let cfg = config(0, 10.0, 30, 500.0);
        assert_eq!(
            compute_timeline_state(FrameIndex(0), &cfg),
            TimelineState::holding(0, 0)
        );
    }

    #[test]
    fn unadjusted_schedule_walkthrough() {
        // 2 images, 4 s, 10 fps, 1 s transitions: hold 1 s then blend 1 s.
        let cfg = config(2, 4.0, 10, 1000.0);

        let f0 = compute_timeline_state(FrameIndex(0), &cfg);
        assert_eq!(f0.current_index, 0);
        assert!(!f0.is_transitioning);

        let f10 = compute_timeline_state(FrameIndex(10), &cfg);
        assert_eq!((f10.current_index, f10.next_index), (0, 1));
        assert!(f10.is_transitioning);
        assert_eq!(f10.progress, 0.0);

        let f15 = compute_timeline_state(FrameIndex(15), &cfg);
        assert!(f15.is_transitioning);
        assert_eq!(f15.progress, 0.5);

        let f20 = compute_timeline_state(FrameIndex(20), &cfg);
        assert_eq!(f20.current_index, 1);
        assert!(!f20.is_transitioning);
    }

    #[test]
    fn overflow_correction_consumes_full_duration() {
        // 20 images x 2 s transitions = 40 s of transition in a 30 s export:
        // corrected to 0.75 s hold + 0.75 s transition per image.
        let cfg = config(20, 30.0, 30, 2000.0);
        let info = timing_breakdown(&cfg);
        assert_eq!(info.transition_seconds, 0.75);
        assert_eq!(info.hold_per_image, 0.75);
        assert_eq!(info.time_per_cycle, 1.5);
        assert_eq!(info.total_cycles, 20.0);

        // Reconstructed total matches the requested duration exactly.
        let reconstructed = (info.hold_per_image + info.transition_seconds) * 20.0;
        assert!((reconstructed - 30.0).abs() < 1e-9);
    }

    #[test]
    fn unadjusted_breakdown_keeps_configured_transition() {
        let cfg = config(4, 20.0, 30, 1000.0);
        let info = timing_breakdown(&cfg);
        assert_eq!(info.transition_seconds, 1.0);
        assert_eq!(info.hold_per_image, 4.0);
        assert_eq!(info.time_per_cycle, 5.0);
        assert_eq!(info.total_cycles, 4.0);
    }

    #[test]
    fn terminal_clamp_holds_last_image() {
        let cfg = config(3, 3.0, 10, 500.0);
        for frame in [30, 31, 100, u64::MAX] {
            let s = compute_timeline_state(FrameIndex(frame), &cfg);
            assert_eq!(s, TimelineState::holding(2, 2));
        }
    }

    #[test]
    fn last_in_range_frame_stays_on_last_image() {
        let cfg = config(2, 4.0, 10, 1000.0);
        let s = compute_timeline_state(FrameIndex(39), &cfg);
        assert_eq!(s.current_index, 1);
    }

    #[test]
    fn states_are_deterministic() {
        let cfg = config(5, 12.0, 24, 700.0);
        for frame in 0..cfg.export.total_frames() {
            let a = compute_timeline_state(FrameIndex(frame), &cfg);
            let b = compute_timeline_state(FrameIndex(frame), &cfg);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn progress_is_always_in_unit_interval() {
        let cfg = config(7, 9.0, 30, 1300.0);
        for frame in 0..cfg.export.total_frames() {
            let s = compute_timeline_state(FrameIndex(frame), &cfg);
            assert!((0.0..=1.0).contains(&s.progress));
            if !s.is_transitioning {
                assert_eq!(s.progress, 0.0);
            }
        }
    }

    #[test]
    fn next_index_wraps_to_first_image() {
        let cfg = config(2, 4.0, 10, 1000.0);
        // Second image's transition phase points back at the first.
        let s = compute_timeline_state(FrameIndex(30), &cfg);
        assert_eq!((s.current_index, s.next_index), (1, 0));
        assert!(s.is_transitioning);
    }
}
