//! Rasterizer for the app icon: a white "R" lettermark on a dark,
//! full-bleed square. Launchers apply their own mask, so there is no
//! rounding or padding here.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

/// Background colour (`#18181B`).
pub const BACKGROUND: [u8; 3] = [0x18, 0x18, 0x1B];

/// Sizes written by the CLI, in pixels.
pub const ICON_SIZES: [u32; 2] = [192, 512];

/// Render the icon at `size` x `size` pixels.
///
/// Letter geometry is proportional to `size`: a stem, a top bar, a middle
/// bar, a right-hand bowl and a diagonal leg, each with a stroke of 10% of
/// the edge. Curved and diagonal edges are anti-aliased by coverage.
pub fn render_icon(size: u32) -> RgbaImage {
    let mut canvas = Canvas {
        img: RgbaImage::from_pixel(
            size,
            size,
            Rgba([BACKGROUND[0], BACKGROUND[1], BACKGROUND[2], 255]),
        ),
    };

    let s = size as f64;
    let stroke = (s * 0.10).round() as i64;
    let half = stroke / 2;

    let left = (s * 0.28).round() as i64;
    let top = (s * 0.22).round() as i64;
    let bottom = (s * 0.78).round() as i64;
    let mid = (s * 0.51).round() as i64;

    let bowl_x = (s * 0.64).round() as i64;
    let bowl_cy = ((top + mid) as f64 / 2.0).round();
    let outer_r = ((mid - top) as f64 / 2.0).round();
    let inner_r = outer_r - stroke as f64;

    // Stem, top bar, middle bar.
    canvas.fill_rect(left, top, left + stroke - 1, bottom);
    canvas.fill_rect(left, top, bowl_x, top + stroke - 1);
    canvas.fill_rect(left, mid - half, bowl_x, mid + half);

    // Bowl: right half of a ring closing the top and middle bars.
    for y in top..=mid {
        for x in bowl_x..=bowl_x + outer_r as i64 {
            let dist = ((x - bowl_x) as f64).hypot(y as f64 - bowl_cy);
            if dist <= outer_r + 0.5 && dist >= inner_r - 0.5 {
                let outer = (outer_r - dist + 0.5).clamp(0.0, 1.0);
                let inner = (dist - inner_r + 0.5).clamp(0.0, 1.0);
                canvas.blend(x, y, outer.min(inner));
            }
        }
    }

    // Leg: from just right of the stem at the middle bar down to the baseline.
    let start = (left as f64 + stroke as f64 * 1.3, (mid + half) as f64);
    let end = ((s * 0.72).round(), bottom as f64);
    canvas.stroke_line(start, end, stroke as f64);

    canvas.img
}

/// Render every size in [`ICON_SIZES`] and write `icon-<size>.png` files
/// into `out_dir`, creating it if needed. Returns the written paths.
pub fn write_icons(out_dir: &Path) -> image::ImageResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(ICON_SIZES.len());
    for size in ICON_SIZES {
        let path = out_dir.join(format!("icon-{size}.png"));
        render_icon(size).save(&path)?;
        tracing::info!(path = %path.display(), size, "Wrote icon");
        written.push(path);
    }
    Ok(written)
}

struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    /// Mix white into the pixel at (`x`, `y`) with coverage `alpha`.
    /// Out-of-bounds coordinates are ignored.
    fn blend(&mut self, x: i64, y: i64, alpha: f64) {
        let (w, h) = self.img.dimensions();
        if x < 0 || y < 0 || x >= i64::from(w) || y >= i64::from(h) {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let mix = |bg: u8| (f64::from(bg) * (1.0 - a) + 255.0 * a).round() as u8;
        self.img.put_pixel(
            x as u32,
            y as u32,
            Rgba([mix(BACKGROUND[0]), mix(BACKGROUND[1]), mix(BACKGROUND[2]), 255]),
        );
    }

    /// Fill the inclusive rectangle with solid white.
    fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.blend(x, y, 1.0);
            }
        }
    }

    /// Draw a straight stroke of `width` with flat, anti-aliased ends.
    fn stroke_line(&mut self, (sx, sy): (f64, f64), (ex, ey): (f64, f64), width: f64) {
        let (dx, dy) = (ex - sx, ey - sy);
        let len = dx.hypot(dy);
        if len == 0.0 {
            return;
        }
        let (tx, ty) = (dx / len, dy / len);
        let half = width / 2.0;

        let y_range = (sy - width).floor() as i64..=(ey + width).ceil() as i64;
        for y in y_range {
            for x in (sx - width).floor() as i64..=(ex + width).ceil() as i64 {
                let (px, py) = (x as f64 - sx, y as f64 - sy);
                let along = px * tx + py * ty;
                let across = (px * -ty + py * tx).abs();
                if along < -0.5 || along > len + 0.5 || across > half + 0.5 {
                    continue;
                }
                let edge = (half - across + 0.5).clamp(0.0, 1.0);
                let head = (along + 0.5).clamp(0.0, 1.0);
                let tail = (len - along + 0.5).clamp(0.0, 1.0);
                let a = edge.min(head).min(tail);
                if a > 0.0 {
                    self.blend(x, y, a);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn bg() -> Rgba<u8> {
        Rgba([BACKGROUND[0], BACKGROUND[1], BACKGROUND[2], 255])
    }

    fn at(img: &RgbaImage, fx: f64, fy: f64) -> Rgba<u8> {
        let size = img.width() as f64;
        *img.get_pixel((size * fx) as u32, (size * fy) as u32)
    }

    #[test]
    fn icon_has_requested_size_and_is_opaque() {
        for size in ICON_SIZES {
            let img = render_icon(size);
            assert_eq!(img.dimensions(), (size, size));
            assert!(img.pixels().all(|p| p.0[3] == 255));
        }
    }

    #[test]
    fn corners_are_background() {
        let img = render_icon(192);
        for (x, y) in [(0, 0), (191, 0), (0, 191), (191, 191)] {
            assert_eq!(*img.get_pixel(x, y), bg());
        }
    }

    #[test]
    fn letter_strokes_are_white() {
        let img = render_icon(512);
        // Stem, top bar and middle bar.
        assert_eq!(at(&img, 0.30, 0.65), WHITE);
        assert_eq!(at(&img, 0.45, 0.23), WHITE);
        assert_eq!(at(&img, 0.45, 0.51), WHITE);
        // Rightmost point of the bowl.
        assert_eq!(at(&img, 0.76, 0.365), WHITE);
        // Inside the bowl and right of the stem under the leg stay dark.
        assert_eq!(at(&img, 0.50, 0.365), bg());
        assert_eq!(at(&img, 0.45, 0.75), bg());
    }

    #[test]
    fn curved_edges_are_anti_aliased() {
        let img = render_icon(512);
        let partial = img
            .pixels()
            .filter(|p| p.0[0] > BACKGROUND[0] && p.0[0] < 255)
            .count();
        assert!(partial > 0, "expected blended edge pixels");
    }

    #[test]
    fn write_icons_creates_png_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("icons");

        let written = write_icons(&out).unwrap();

        assert_eq!(written.len(), 2);
        for (path, size) in written.iter().zip(ICON_SIZES) {
            assert!(path.ends_with(format!("icon-{size}.png")));
            let decoded = image::open(path).unwrap();
            assert_eq!(decoded.width(), size);
        }
    }
}
