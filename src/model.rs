//! Session configuration: the immutable aggregate the whole renderer reads
//! from, plus the serde-facing project file the CLI loads. Validation runs
//! once, before any frame loop starts; core computations assume it passed.

use crate::{
    core::Canvas,
    decode::PreparedImage,
    error::{SlidecastError, SlidecastResult},
    transitions::{Direction, TransitionKind},
};

/// How slides hand over to each other.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionSpec {
    pub kind: TransitionKind,
    pub direction: Direction,
    pub duration_ms: f64,
}

/// Stage-2 placement of the Stage-1 surface inside the outer frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransformSpec {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for TransformSpec {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

/// Output length and cadence.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExportSpec {
    pub duration_seconds: f64,
    pub fps: u32,
}

impl ExportSpec {
    /// Discrete output frame count; frame indices run `0..total_frames`.
    pub fn total_frames(self) -> u64 {
        (self.duration_seconds * f64::from(self.fps)).round() as u64
    }
}

/// Immutable per-session configuration. Images are in playback order;
/// `overlay_inner` is baked into every composite slide, `overlay_outer`
/// triggers the Stage-2 pass.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub images: Vec<PreparedImage>,
    pub overlay_inner: Option<PreparedImage>,
    pub overlay_outer: Option<PreparedImage>,
    pub inner_canvas: Canvas,
    pub outer_canvas: Canvas,
    pub transition: TransitionSpec,
    pub transform: TransformSpec,
    pub export: ExportSpec,
}

impl RenderConfig {
    /// Canvas of the final exported frame: the outer frame when Stage-2
    /// runs, otherwise the Stage-1 canvas.
    pub fn output_canvas(&self) -> Canvas {
        if self.overlay_outer.is_some() {
            self.outer_canvas
        } else {
            self.inner_canvas
        }
    }

    pub fn validate(&self) -> SlidecastResult<()> {
        if self.export.fps == 0 {
            return Err(SlidecastError::validation("export fps must be > 0"));
        }
        if !(self.export.duration_seconds > 0.0) || !self.export.duration_seconds.is_finite() {
            return Err(SlidecastError::validation(
                "export duration_seconds must be positive and finite",
            ));
        }
        if self.inner_canvas.width == 0
            || self.inner_canvas.height == 0
            || self.outer_canvas.width == 0
            || self.outer_canvas.height == 0
        {
            return Err(SlidecastError::validation("canvas width/height must be > 0"));
        }
        if !(self.transform.scale > 0.0) || !self.transform.scale.is_finite() {
            return Err(SlidecastError::validation(
                "transform scale must be positive and finite",
            ));
        }
        if !self.images.is_empty()
            && (!(self.transition.duration_ms > 0.0) || !self.transition.duration_ms.is_finite())
        {
            return Err(SlidecastError::validation(
                "transition duration_ms must be positive and finite when images are present",
            ));
        }

        for (idx, img) in self.images.iter().enumerate() {
            if img.width == 0 || img.height == 0 {
                return Err(SlidecastError::validation(format!(
                    "image {idx} has zero dimension"
                )));
            }
        }
        for (label, overlay) in [
            ("inner overlay", &self.overlay_inner),
            ("outer overlay", &self.overlay_outer),
        ] {
            if let Some(img) = overlay
                && (img.width == 0 || img.height == 0)
            {
                return Err(SlidecastError::validation(format!(
                    "{label} has zero dimension"
                )));
            }
        }

        Ok(())
    }
}

/// On-disk project file the CLI loads. Image fields are paths resolved
/// against the project file's directory; [`crate::decode::prepare_config`]
/// turns this into a [`RenderConfig`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ProjectSpec {
    /// Playback images, in order.
    pub images: Vec<String>,
    /// Overlay baked into every slide (the "Frame 1" decoration).
    #[serde(default)]
    pub overlay_inner: Option<String>,
    /// Outer frame the slideshow is placed into; enables Stage-2.
    #[serde(default)]
    pub overlay_outer: Option<String>,
    pub inner_canvas: Canvas,
    pub outer_canvas: Canvas,
    pub transition: TransitionSpec,
    #[serde(default)]
    pub transform: TransformSpec,
    pub export: ExportSpec,
}
