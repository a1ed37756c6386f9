//! Two-stage render pipeline and the export loop.
//!
//! Stage-1 renders the slideshow (with the inner overlay baked into each
//! slide) at the inner canvas size. Stage-2, which runs only when an outer
//! overlay is configured, places the Stage-1 surface inside the outer frame.
//! Every frame is computed independently from `(frame_index, config)`, so
//! live preview and file export share identical code paths.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::{
    compositor::build_composite_slide,
    core::FrameIndex,
    encode_ffmpeg::{EncodeConfig, FfmpegEncoder},
    error::{SlidecastError, SlidecastResult},
    fit::FitRect,
    model::RenderConfig,
    raster,
    surface::Surface,
    timeline::compute_timeline_state,
    transitions::apply_transition,
};

/// Render the Stage-1 slideshow surface for one frame, at the inner canvas
/// size. Holding frames are a single composite slide; transitioning frames
/// blend two composite slides with the configured transition.
pub fn render_stage1(frame: FrameIndex, config: &RenderConfig) -> SlidecastResult<Surface> {
    let canvas = config.inner_canvas;
    if config.images.is_empty() {
        return Ok(Surface::new(canvas.width, canvas.height));
    }

    let timeline = compute_timeline_state(frame, config);
    let overlay = config.overlay_inner.as_ref();
    let current = build_composite_slide(
        &config.images[timeline.current_index],
        overlay,
        canvas.width,
        canvas.height,
    );

    if !timeline.is_transitioning {
        return Ok(current);
    }

    let next = build_composite_slide(
        &config.images[timeline.next_index],
        overlay,
        canvas.width,
        canvas.height,
    );

    // Both slides are already exactly canvas-sized; no further fitting.
    let mut dst = Surface::new(canvas.width, canvas.height);
    apply_transition(
        config.transition.kind,
        &current,
        &next,
        timeline.progress,
        config.transition.direction,
        &mut dst,
    )?;
    Ok(dst)
}

/// Place a Stage-1 surface inside the outer frame: transform-positioned and
/// scaled, with the outer overlay stretched over the top.
pub fn render_stage2(stage1: &Surface, config: &RenderConfig) -> SlidecastResult<Surface> {
    let canvas = config.outer_canvas;
    let mut dst = Surface::new(canvas.width, canvas.height);

    let t = config.transform;
    raster::draw_scaled(
        &mut dst,
        stage1,
        FitRect {
            x: t.x,
            y: t.y,
            w: f64::from(config.inner_canvas.width) * t.scale,
            h: f64::from(config.inner_canvas.height) * t.scale,
        },
    );

    if let Some(overlay) = config.overlay_outer.as_ref() {
        raster::draw_scaled(
            &mut dst,
            overlay,
            FitRect::full(f64::from(canvas.width), f64::from(canvas.height)),
        );
    }

    Ok(dst)
}

/// Produce the final frame: Stage-1, then Stage-2 only when an outer overlay
/// is configured. Without one, the Stage-1 surface *is* the final frame;
/// Stage-2 is skipped entirely, not run with a null overlay.
pub fn render_frame(frame: FrameIndex, config: &RenderConfig) -> SlidecastResult<Surface> {
    let stage1 = render_stage1(frame, config)?;
    if config.overlay_outer.is_none() {
        return Ok(stage1);
    }
    render_stage2(&stage1, config)
}

/// Frame counters for a finished (or aborted) export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub frames_total: u64,
    pub frames_delivered: u64,
}

/// Options for [`export_to_mp4`].
#[derive(Clone, Debug)]
pub struct ExportOpts {
    /// Background color frames are flattened over for the encoder (RGBA8).
    pub bg_rgba: [u8; 4],
    /// Whether to overwrite the output file if it already exists.
    pub overwrite: bool,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            bg_rgba: [0, 0, 0, 255],
            overwrite: true,
        }
    }
}

/// Render every frame of the session in order and stream them to the system
/// `ffmpeg` binary as an MP4.
///
/// The encoder is owned by this call; independent exports can run
/// concurrently with no shared state. On encoder failure the loop stops
/// immediately and the error reports the last successfully delivered frame.
pub fn export_to_mp4(
    config: &RenderConfig,
    out_path: impl Into<PathBuf>,
    opts: ExportOpts,
) -> SlidecastResult<ExportStats> {
    config.validate()?;

    let canvas = config.output_canvas();
    let total = config.export.total_frames();
    let mut stats = ExportStats {
        frames_total: total,
        frames_delivered: 0,
    };

    let cfg = EncodeConfig {
        width: canvas.width,
        height: canvas.height,
        fps: config.export.fps,
        out_path: out_path.into(),
        overwrite: opts.overwrite,
    };
    let mut enc = FfmpegEncoder::new(cfg, opts.bg_rgba)?;
    info!(
        frames = total,
        width = canvas.width,
        height = canvas.height,
        fps = config.export.fps,
        "starting export"
    );

    for i in 0..total {
        let frame = render_frame(FrameIndex(i), config)?;
        if let Err(e) = enc.encode_frame(&frame) {
            return Err(abort_error(stats, total, e));
        }
        stats.frames_delivered += 1;
        debug!(frame = i, "frame delivered");
    }

    if let Err(e) = enc.finish() {
        return Err(abort_error(stats, total, e));
    }

    info!(frames = stats.frames_delivered, "export complete");
    Ok(stats)
}

fn abort_error(stats: ExportStats, total: u64, source: SlidecastError) -> SlidecastError {
    SlidecastError::encode(format!(
        "export aborted at frame {} of {}: {}",
        stats.frames_delivered, total, source
    ))
}
