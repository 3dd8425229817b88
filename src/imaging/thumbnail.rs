use image::{imageops, imageops::FilterType, RgbaImage};

/// Bounding box of generated thumbnails (square)
pub const THUMBNAIL_SIZE: u32 = 256;

/// Generate a file-list thumbnail that fits inside THUMBNAIL_SIZE, keeping aspect.
/// Images already small enough are returned unscaled
pub fn make_thumbnail(image: &RgbaImage) -> RgbaImage {
    if image.width() <= THUMBNAIL_SIZE && image.height() <= THUMBNAIL_SIZE {
        return image.clone();
    }

    let (width, height) = fit_within(image.width(), image.height(), THUMBNAIL_SIZE);
    imageops::resize(image, width, height, FilterType::Lanczos3)
}

/// Largest size with the same aspect ratio that fits in a `max`×`max` box
fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    let scale = (max as f64 / width as f64).min(max as f64 / height as f64);
    let scaled = |v: u32| ((v as f64 * scale).round() as u32).clamp(1, max);
    (scaled(width), scaled(height))
}
