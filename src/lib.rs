//! Slidecast turns an ordered list of still images into video frames.
//!
//! The renderer is session-oriented and fully deterministic:
//!
//! - Load a [`ProjectSpec`] and prepare it into a [`RenderConfig`]
//! - Ask [`render_frame`] for any frame, in any order
//! - Or stream every frame into an MP4 with [`export_to_mp4`]
//!
//! Every frame is a pure function of `(frame_index, config)`, so previewing
//! frame 500 and exporting frame 500 produce identical pixels.
#![forbid(unsafe_code)]

pub mod compositor;
pub mod core;
pub mod decode;
pub mod encode_ffmpeg;
pub mod error;
pub mod fit;
pub mod model;
pub mod pipeline;
pub mod raster;
pub mod surface;
pub mod timeline;
pub mod transitions;

pub use crate::compositor::build_composite_slide;
pub use crate::core::{Canvas, FrameIndex};
pub use crate::decode::{PreparedImage, decode_image, load_image, prepare_config};
pub use crate::encode_ffmpeg::{EncodeConfig, FfmpegEncoder, is_ffmpeg_on_path};
pub use crate::error::{SlidecastError, SlidecastResult};
pub use crate::fit::{FitRect, contain_fit, cover_fit};
pub use crate::model::{ExportSpec, ProjectSpec, RenderConfig, TransformSpec, TransitionSpec};
pub use crate::pipeline::{
    ExportOpts, ExportStats, export_to_mp4, render_frame, render_stage1, render_stage2,
};
pub use crate::surface::{PixelSource, Surface};
pub use crate::timeline::{TimelineState, TimingInfo, compute_timeline_state, timing_breakdown};
pub use crate::transitions::{Direction, TransitionKind, apply_transition};
