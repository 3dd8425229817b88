/// "Cover" fitting: scale an image so it fills its cell completely while
/// keeping its aspect ratio, centered, with the overflow cropped.

/// Exact placement of a scaled image relative to its cell's top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverPlacement {
    pub draw_width: f64,
    pub draw_height: f64,
    /// (cell_width - draw_width) / 2, never positive
    pub offset_x: f64,
    /// (cell_height - draw_height) / 2, never positive
    pub offset_y: f64,
}

impl CoverPlacement {
    /// Returns `None` when either size is empty or not finite
    pub fn fit(image_width: f64, image_height: f64, cell_width: f64, cell_height: f64) -> Option<Self> {
        let sizes = [image_width, image_height, cell_width, cell_height];
        if sizes.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return None;
        }

        let image_ratio = image_width / image_height;
        let cell_ratio = cell_width / cell_height;

        let placement = if image_ratio > cell_ratio {
            // Relatively wider: match height, overflow left and right
            let draw_height = cell_height;
            let draw_width = draw_height * image_ratio;
            CoverPlacement {
                draw_width,
                draw_height,
                offset_x: (cell_width - draw_width) / 2.0,
                offset_y: 0.0,
            }
        } else {
            // Relatively taller (or equal): match width, overflow top and bottom
            let draw_width = cell_width;
            let draw_height = draw_width / image_ratio;
            CoverPlacement {
                draw_width,
                draw_height,
                offset_x: 0.0,
                offset_y: (cell_height - draw_height) / 2.0,
            }
        };

        Some(placement)
    }

    /// Scale factor applied to the source image
    pub fn scale(&self, image_width: f64) -> f64 {
        self.draw_width / image_width
    }
}

/// Whole-pixel version of `CoverPlacement` used when rasterizing.
///
/// Rather than the scaled image, this names the window of the *source*
/// image that stays visible in the cell. Only that window is resized, so
/// scratch memory stays at cell size whatever the image's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelCover {
    pub src_x: u32,
    pub src_y: u32,
    pub src_width: u32,
    pub src_height: u32,
}

impl PixelCover {
    pub fn fit(image_width: u32, image_height: u32, cell_width: u32, cell_height: u32) -> Option<Self> {
        let placement = CoverPlacement::fit(
            image_width as f64,
            image_height as f64,
            cell_width as f64,
            cell_height as f64,
        )?;
        let scale = placement.scale(image_width as f64);

        let (src_x, src_width) = window(-placement.offset_x / scale, cell_width as f64 / scale, image_width);
        let (src_y, src_height) = window(-placement.offset_y / scale, cell_height as f64 / scale, image_height);

        Some(PixelCover {
            src_x,
            src_y,
            src_width,
            src_height,
        })
    }
}

/// Snap a visible source span to whole pixels inside `0..limit`
fn window(start: f64, length: f64, limit: u32) -> (u32, u32) {
    let length = (length.round() as u32).clamp(1, limit);
    let start = ((start + 1e-6).floor().max(0.0) as u32).min(limit - length);
    (start, length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wider_image_matches_height() {
        let p = CoverPlacement::fit(200.0, 100.0, 50.0, 50.0).unwrap();
        assert_eq!(p.draw_height, 50.0);
        assert_eq!(p.draw_width, 100.0);
        assert_eq!(p.offset_x, -25.0);
        assert_eq!(p.offset_y, 0.0);

        // Overflow is split evenly on both sides
        assert_eq!(p.offset_x * 2.0 + p.draw_width, 50.0);
    }

    #[test]
    fn test_overflow_factor_equals_aspect_ratio_ratio() {
        let (iw, ih, cw, ch) = (640.0, 360.0, 300.0, 250.0);
        let p = CoverPlacement::fit(iw, ih, cw, ch).unwrap();

        let factor = (iw / ih) / (cw / ch);
        assert!((p.draw_width / cw - factor).abs() < 1e-9);
        assert_eq!(p.draw_height, ch);
        assert!(p.offset_x <= 0.0);
        assert!((p.scale(iw) - ch / ih).abs() < 1e-12);
    }

    #[test]
    fn test_taller_image_matches_width() {
        let p = CoverPlacement::fit(100.0, 400.0, 80.0, 60.0).unwrap();
        assert_eq!(p.draw_width, 80.0);
        assert_eq!(p.draw_height, 320.0);
        assert_eq!(p.offset_x, 0.0);
        assert_eq!(p.offset_y, -130.0);
    }

    #[test]
    fn test_same_aspect_fits_exactly() {
        let p = CoverPlacement::fit(10.0, 10.0, 50.0, 50.0).unwrap();
        assert_eq!((p.draw_width, p.draw_height), (50.0, 50.0));
        assert_eq!((p.offset_x, p.offset_y), (0.0, 0.0));
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(CoverPlacement::fit(0.0, 10.0, 10.0, 10.0).is_none());
        assert!(CoverPlacement::fit(10.0, 10.0, 10.0, -1.0).is_none());
        assert!(CoverPlacement::fit(f64::NAN, 10.0, 10.0, 10.0).is_none());
        assert!(PixelCover::fit(10, 10, 0, 10).is_none());
    }

    #[test]
    fn test_pixel_cover_crops_center() {
        let c = PixelCover::fit(3, 1, 10, 10).unwrap();
        assert_eq!(c, PixelCover { src_x: 1, src_y: 0, src_width: 1, src_height: 1 });

        let c = PixelCover::fit(1, 3, 10, 10).unwrap();
        assert_eq!(c, PixelCover { src_x: 0, src_y: 1, src_width: 1, src_height: 1 });

        let c = PixelCover::fit(200, 100, 50, 50).unwrap();
        assert_eq!(c, PixelCover { src_x: 50, src_y: 0, src_width: 100, src_height: 100 });
    }

    #[test]
    fn test_pixel_cover_odd_overflow_floors() {
        // 101 wide into 50: one extra pixel goes to the right side
        let c = PixelCover::fit(101, 50, 50, 50).unwrap();
        assert_eq!(c.src_width, 50);
        assert_eq!(c.src_x, 25);
    }

    #[test]
    fn test_pixel_cover_window_is_bounded_by_cell() {
        // Scaling the whole strip would need a 2_000_000 x 500 buffer
        let c = PixelCover::fit(4000, 1, 500, 500).unwrap();
        assert_eq!((c.src_width, c.src_height), (1, 1));
        assert_eq!(c.src_x, 1999);

        let c = PixelCover::fit(2, 5000, 5000, 5000).unwrap();
        assert_eq!((c.src_width, c.src_height), (2, 2));
        assert_eq!(c.src_y, 2499);
    }

    #[test]
    fn test_pixel_cover_same_aspect_uses_whole_image() {
        let c = PixelCover::fit(10, 10, 50, 50).unwrap();
        assert_eq!(c, PixelCover { src_x: 0, src_y: 0, src_width: 10, src_height: 10 });

        let c = PixelCover::fit(640, 480, 4, 3).unwrap();
        assert_eq!(c, PixelCover { src_x: 0, src_y: 0, src_width: 640, src_height: 480 });
    }
}
