//! Transition engine: blends two canvas-sized composite slides into a
//! destination surface. All four families share one directional model; the
//! direction names where the incoming slide enters from.

use crate::{
    core::clamp01,
    error::{SlidecastError, SlidecastResult},
    raster::{self, ClipRect},
    surface::Surface,
};

/// Closed set of transition families. `Swipe` is a user-facing alias of
/// `Push` with an identical algorithm; the duplication is deliberate until
/// product decides whether the two options should diverge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    Wipe,
    Push,
    Pull,
    Swipe,
}

/// Travel direction of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit direction vector: left (-1,0), right (1,0), up (0,-1), down (0,1).
    pub fn vector(self) -> (f64, f64) {
        match self {
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
        }
    }
}

/// Blend `current` and `next` at `progress` into `dst`.
///
/// Both slides must already be destination-sized composite slides; there is
/// no further fitting here. At `progress` 0 only `current` is visible, at 1
/// only `next`.
pub fn apply_transition(
    kind: TransitionKind,
    current: &Surface,
    next: &Surface,
    progress: f64,
    direction: Direction,
    dst: &mut Surface,
) -> SlidecastResult<()> {
    for (label, slide) in [("current", current), ("next", next)] {
        if slide.width() != dst.width() || slide.height() != dst.height() {
            return Err(SlidecastError::render(format!(
                "{label} slide is {}x{}, destination is {}x{}",
                slide.width(),
                slide.height(),
                dst.width(),
                dst.height()
            )));
        }
    }

    let progress = clamp01(progress);
    match kind {
        TransitionKind::Wipe => wipe(current, next, progress, direction, dst),
        TransitionKind::Push | TransitionKind::Swipe => push(current, next, progress, direction, dst),
        TransitionKind::Pull => pull(current, next, progress, direction, dst),
    }
    Ok(())
}

/// Current stays put; next is revealed through a growing clip rectangle
/// anchored on the side it enters from.
fn wipe(current: &Surface, next: &Surface, progress: f64, direction: Direction, dst: &mut Surface) {
    raster::draw_at(dst, current, 0, 0);
    let clip = wipe_reveal_rect(direction, progress, dst.width(), dst.height());
    raster::draw_at_clipped(dst, next, 0, 0, clip);
}

fn wipe_reveal_rect(direction: Direction, progress: f64, canvas_w: u32, canvas_h: u32) -> ClipRect {
    let w = f64::from(canvas_w);
    let h = f64::from(canvas_h);
    let (x, y, rw, rh) = match direction {
        Direction::Right => (0.0, 0.0, w * progress, h),
        Direction::Left => (w * (1.0 - progress), 0.0, w * progress, h),
        Direction::Down => (0.0, 0.0, w, h * progress),
        Direction::Up => (0.0, h * (1.0 - progress), w, h * progress),
    };
    ClipRect {
        x: x.round() as i64,
        y: y.round() as i64,
        w: rw.round() as i64,
        h: rh.round() as i64,
    }
}

/// Both slides translate rigidly: current slides out while next pushes in
/// from one full canvas extent away, landing at the origin at progress 1.
fn push(current: &Surface, next: &Surface, progress: f64, direction: Direction, dst: &mut Surface) {
    let (dx, dy, ex, ey) = travel(direction, progress, dst);
    raster::draw_at(dst, current, -dx, -dy);
    raster::draw_at(dst, next, ex - dx, ey - dy);
}

/// Next sits stationary underneath while current departs on top.
fn pull(current: &Surface, next: &Surface, progress: f64, direction: Direction, dst: &mut Surface) {
    let (dx, dy, _, _) = travel(direction, progress, dst);
    raster::draw_at(dst, next, 0, 0);
    raster::draw_at(dst, current, -dx, -dy);
}

/// Integer travel offset at `progress` plus the full-extent vector, both in
/// destination pixels.
fn travel(direction: Direction, progress: f64, dst: &Surface) -> (i64, i64, i64, i64) {
    let (vx, vy) = direction.vector();
    let w = f64::from(dst.width());
    let h = f64::from(dst.height());
    let dx = (vx * w * progress).round() as i64;
    let dy = (vy * h * progress).round() as i64;
    let ex = (vx * w).round() as i64;
    let ey = (vy * h).round() as i64;
    (dx, dy, ex, ey)
}
