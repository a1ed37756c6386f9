//! Image-provider collaborator: decodes encoded image bytes into the
//! premultiplied RGBA8 form the core renders from, and assembles a
//! [`RenderConfig`] from an on-disk project. This is the only module besides
//! the encoder that touches IO; the core itself never does.

use std::{path::Path, sync::Arc};

use tracing::debug;

use crate::{
    error::{SlidecastError, SlidecastResult},
    model::{ProjectSpec, RenderConfig},
    surface::PixelSource,
};

/// Decoded, premultiplied RGBA8 image pixels.
///
/// Playback images and overlay frames both arrive as this type. The pixel
/// buffer is shared, so cloning a prepared image is cheap.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PixelSource for PreparedImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels(&self) -> &[u8] {
        &self.rgba8_premul
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> SlidecastResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| SlidecastError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(SlidecastError::decode("decoded image has zero dimension"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Read and decode one image file.
pub fn load_image(path: &Path) -> SlidecastResult<PreparedImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| SlidecastError::decode(format!("read image '{}': {e}", path.display())))?;
    let img = decode_image(&bytes)
        .map_err(|e| SlidecastError::decode(format!("image '{}': {e}", path.display())))?;
    debug!(path = %path.display(), width = img.width, height = img.height, "decoded image");
    Ok(img)
}

/// Decode every image a project references (paths resolved against `root`,
/// in playback order) and build the validated per-session [`RenderConfig`].
pub fn prepare_config(spec: &ProjectSpec, root: &Path) -> SlidecastResult<RenderConfig> {
    let mut images = Vec::with_capacity(spec.images.len());
    for rel in &spec.images {
        images.push(load_image(&root.join(rel))?);
    }

    let overlay_inner = spec
        .overlay_inner
        .as_ref()
        .map(|rel| load_image(&root.join(rel)))
        .transpose()?;
    let overlay_outer = spec
        .overlay_outer
        .as_ref()
        .map(|rel| load_image(&root.join(rel)))
        .transpose()?;

    let config = RenderConfig {
        images,
        overlay_inner,
        overlay_outer,
        inner_canvas: spec.inner_canvas,
        outer_canvas: spec.outer_canvas,
        transition: spec.transition,
        transform: spec.transform,
        export: spec.export,
    };
    config.validate()?;
    Ok(config)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
