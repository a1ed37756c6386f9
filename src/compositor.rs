//! Slide compositor: bakes one playback image plus the optional inner
//! overlay into a single canvas-sized surface.

use crate::{
    fit::{FitRect, cover_fit},
    raster,
    surface::{PixelSource, Surface},
};

/// Build one composite slide: the image cover-fit onto the canvas (cropped,
/// never letterboxed), then the overlay stretched to exactly fill it.
///
/// The overlay is baked here, before any transition runs, so that while
/// slides blend the overlay travels with the image underneath instead of
/// staying fixed. Drawing the overlay after blending is non-conformant.
pub fn build_composite_slide<I, O>(
    image: &I,
    overlay: Option<&O>,
    canvas_w: u32,
    canvas_h: u32,
) -> Surface
where
    I: PixelSource + ?Sized,
    O: PixelSource + ?Sized,
{
    let mut slide = Surface::new(canvas_w, canvas_h);

    let fit = cover_fit(
        f64::from(image.width()),
        f64::from(image.height()),
        f64::from(canvas_w),
        f64::from(canvas_h),
    );
    raster::draw_scaled(&mut slide, image, fit);

    if let Some(overlay) = overlay {
        raster::draw_scaled(
            &mut slide,
            overlay,
            FitRect::full(f64::from(canvas_w), f64::from(canvas_h)),
        );
    }

    slide
}
