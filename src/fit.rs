//! Pure scale/center math mapping a source image rectangle onto a destination
//! rectangle. `cover_fit` is the default slideshow policy: it fills the
//! destination completely and lets the consumer clip the overflow, so moving
//! slides never show letterbox bars mid-transition.

/// Placement rectangle in destination coordinates. May extend outside the
/// destination; the drawing side clips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl FitRect {
    /// Rectangle exactly covering a `w`x`h` destination.
    pub fn full(w: f64, h: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w,
            h,
        }
    }
}

/// Scale the source so it fully covers the destination, centered.
/// One axis matches exactly, the other overflows and gets cropped.
///
/// Caller guards against zero source dimensions; they are a configuration
/// error upstream.
pub fn cover_fit(src_w: f64, src_h: f64, dst_w: f64, dst_h: f64) -> FitRect {
    let scale = (dst_w / src_w).max(dst_h / src_h);
    scaled_centered(src_w, src_h, dst_w, dst_h, scale)
}

/// Scale the source so it fits entirely inside the destination, centered.
/// Alternate policy; not used on the default slideshow path.
pub fn contain_fit(src_w: f64, src_h: f64, dst_w: f64, dst_h: f64) -> FitRect {
    let scale = (dst_w / src_w).min(dst_h / src_h);
    scaled_centered(src_w, src_h, dst_w, dst_h, scale)
}

fn scaled_centered(src_w: f64, src_h: f64, dst_w: f64, dst_h: f64, scale: f64) -> FitRect {
    let w = src_w * scale;
    let h = src_h * scale;
    FitRect {
        x: (dst_w - w) / 2.0,
        y: (dst_h - h) / 2.0,
        w,
        h,
    }
}
