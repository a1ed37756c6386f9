//! Per-pixel raster primitives over premultiplied RGBA8 buffers: source-over
//! blending, whole-surface fills and the scaled/shifted blits the compositor
//! and transition engine are built from. Everything here is plain CPU pixel
//! loops with explicit clipping.

use crate::{
    fit::FitRect,
    surface::{PixelSource, Surface},
};

pub type PremulRgba8 = [u8; 4];

/// Source-over blend of one premultiplied pixel onto another.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Fill the whole surface with one premultiplied pixel value.
pub fn fill(dst: &mut Surface, rgba: PremulRgba8) {
    for px in dst.data_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

/// Axis-aligned integer clip rectangle in destination coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipRect {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl ClipRect {
    /// Whole destination surface.
    pub fn full(dst: &Surface) -> Self {
        Self {
            x: 0,
            y: 0,
            w: i64::from(dst.width()),
            h: i64::from(dst.height()),
        }
    }

    fn intersect(self, other: Self) -> Self {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.w).min(other.x + other.w);
        let y1 = (self.y + self.h).min(other.y + other.h);
        Self {
            x: x0,
            y: y0,
            w: (x1 - x0).max(0),
            h: (y1 - y0).max(0),
        }
    }
}

/// Draw `src` scaled into `rect` of `dst`, nearest-neighbor sampled and
/// over-blended. `rect` may extend outside the destination; the overflow is
/// clipped, which is how cover-fit cropping happens.
pub fn draw_scaled<S: PixelSource + ?Sized>(dst: &mut Surface, src: &S, rect: FitRect) {
    if src.width() == 0 || src.height() == 0 || rect.w < 0.5 || rect.h < 0.5 {
        return;
    }

    let rx0 = rect.x.round() as i64;
    let ry0 = rect.y.round() as i64;
    let rx1 = (rect.x + rect.w).round() as i64;
    let ry1 = (rect.y + rect.h).round() as i64;
    if rx1 <= rx0 || ry1 <= ry0 {
        return;
    }

    let span_x = (rx1 - rx0) as f64;
    let span_y = (ry1 - ry0) as f64;
    let src_w = src.width() as usize;
    let src_h = src.height() as usize;
    let dst_w = i64::from(dst.width());
    let dst_h = i64::from(dst.height());
    let src_px = src.pixels();
    let dst_px = dst.data_mut();

    for dy in ry0.max(0)..ry1.min(dst_h) {
        let v = (((dy - ry0) as f64 + 0.5) / span_y * src_h as f64) as usize;
        let v = v.min(src_h - 1);
        for dx in rx0.max(0)..rx1.min(dst_w) {
            let u = (((dx - rx0) as f64 + 0.5) / span_x * src_w as f64) as usize;
            let u = u.min(src_w - 1);

            let si = (v * src_w + u) * 4;
            let di = (dy as usize * dst_w as usize + dx as usize) * 4;
            let s = [src_px[si], src_px[si + 1], src_px[si + 2], src_px[si + 3]];
            let d = [dst_px[di], dst_px[di + 1], dst_px[di + 2], dst_px[di + 3]];
            dst_px[di..di + 4].copy_from_slice(&over(d, s));
        }
    }
}

/// Draw `src` unscaled with its origin at `(ox, oy)`, over-blended, clipped
/// to the destination bounds.
pub fn draw_at<S: PixelSource + ?Sized>(dst: &mut Surface, src: &S, ox: i64, oy: i64) {
    let clip = ClipRect::full(dst);
    draw_at_clipped(dst, src, ox, oy, clip);
}

/// Like [`draw_at`], but only destination pixels inside `clip` are written.
/// Transitions use this for reveal rectangles.
pub fn draw_at_clipped<S: PixelSource + ?Sized>(
    dst: &mut Surface,
    src: &S,
    ox: i64,
    oy: i64,
    clip: ClipRect,
) {
    let src_w = i64::from(src.width());
    let src_h = i64::from(src.height());
    let placed = ClipRect {
        x: ox,
        y: oy,
        w: src_w,
        h: src_h,
    };
    let area = placed.intersect(clip).intersect(ClipRect::full(dst));
    if area.w == 0 || area.h == 0 {
        return;
    }

    let dst_w = dst.width() as usize;
    let src_px = src.pixels();
    let dst_px = dst.data_mut();

    for dy in area.y..area.y + area.h {
        let sy = (dy - oy) as usize;
        let row_src = sy * src_w as usize;
        let row_dst = dy as usize * dst_w;
        for dx in area.x..area.x + area.w {
            let si = (row_src + (dx - ox) as usize) * 4;
            let di = (row_dst + dx as usize) * 4;
            let s = [src_px[si], src_px[si + 1], src_px[si + 2], src_px[si + 3]];
            let d = [dst_px[di], dst_px[di + 1], dst_px[di + 2], dst_px[di + 3]];
            dst_px[di..di + 4].copy_from_slice(&over(d, s));
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, rgba: PremulRgba8) -> Surface {
        let mut s = Surface::new(w, h);
        fill(&mut s, rgba);
        s
    }

    fn px(s: &Surface, x: u32, y: u32) -> PremulRgba8 {
        let i = ((y * s.width() + x) * 4) as usize;
        let d = s.data();
        [d[i], d[i + 1], d[i + 2], d[i + 3]]
    }

    #[test]
    fn over_src_transparent_is_noop() {
        let dst = [10, 20, 30, 40];
        assert_eq!(over(dst, [255, 255, 255, 0]), dst);
    }

    #[test]
    fn over_src_opaque_replaces_dst() {
        assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
    }

    #[test]
    fn over_onto_transparent_keeps_src() {
        let src = [100, 110, 120, 200];
        assert_eq!(over([0, 0, 0, 0], src), src);
    }

    #[test]
    fn draw_at_offset_clips_and_places() {
        let mut dst = Surface::new(4, 4);
        let src = solid(2, 2, [255, 0, 0, 255]);
        draw_at(&mut dst, &src, 3, 3);
        assert_eq!(px(&dst, 3, 3), [255, 0, 0, 255]);
        assert_eq!(px(&dst, 2, 3), [0, 0, 0, 0]);
        assert_eq!(px(&dst, 3, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn draw_at_negative_offset_keeps_visible_corner() {
        let mut dst = Surface::new(4, 4);
        let src = solid(2, 2, [0, 255, 0, 255]);
        draw_at(&mut dst, &src, -1, -1);
        assert_eq!(px(&dst, 0, 0), [0, 255, 0, 255]);
        assert_eq!(px(&dst, 1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn draw_at_clipped_writes_only_inside_clip() {
        let mut dst = Surface::new(4, 1);
        let src = solid(4, 1, [0, 0, 255, 255]);
        draw_at_clipped(
            &mut dst,
            &src,
            0,
            0,
            ClipRect {
                x: 0,
                y: 0,
                w: 2,
                h: 1,
            },
        );
        assert_eq!(px(&dst, 1, 0), [0, 0, 255, 255]);
        assert_eq!(px(&dst, 2, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn draw_scaled_stretches_source_over_rect() {
        let mut dst = Surface::new(4, 4);
        let src = solid(1, 1, [255, 0, 0, 255]);
        draw_scaled(&mut dst, &src, FitRect::full(4.0, 4.0));
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(px(&dst, x, y), [255, 0, 0, 255]);
            }
        }
    }

    #[test]
    fn draw_scaled_identity_rect_copies_one_to_one() {
        let mut src = Surface::new(2, 1);
        src.data_mut()[0..4].copy_from_slice(&[255, 0, 0, 255]);
        src.data_mut()[4..8].copy_from_slice(&[0, 255, 0, 255]);

        let mut dst = Surface::new(2, 1);
        draw_scaled(&mut dst, &src, FitRect::full(2.0, 1.0));
        assert_eq!(px(&dst, 0, 0), [255, 0, 0, 255]);
        assert_eq!(px(&dst, 1, 0), [0, 255, 0, 255]);
    }

    #[test]
    fn draw_scaled_negative_origin_crops_left_edge() {
        // Left half of the rect hangs off the destination; the visible part
        // samples the right half of the source.
        let mut src = Surface::new(2, 1);
        src.data_mut()[0..4].copy_from_slice(&[255, 0, 0, 255]);
        src.data_mut()[4..8].copy_from_slice(&[0, 255, 0, 255]);

        let mut dst = Surface::new(2, 1);
        draw_scaled(
            &mut dst,
            &src,
            FitRect {
                x: -2.0,
                y: 0.0,
                w: 4.0,
                h: 1.0,
            },
        );
        assert_eq!(px(&dst, 0, 0), [0, 255, 0, 255]);
        assert_eq!(px(&dst, 1, 0), [0, 255, 0, 255]);
    }
}
