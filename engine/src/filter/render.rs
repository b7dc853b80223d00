use darkroom_common::image::{Extent, Image};
use image::RgbaImage;
use tracing::warn;

/// Run a pixel operation on the blocking pool and wrap the result.
///
/// `op` borrows the input buffer and returns a new one; operations that work
/// in place clone the buffer themselves. The input handle is kept so that a
/// panicked or cancelled task returns the input unchanged.
pub(crate) async fn render_blocking<F>(filter: &'static str, image: Image, op: F) -> Image
where
    F: FnOnce(&RgbaImage) -> RgbaImage + Send + 'static,
{
    let input = image.clone();
    match tokio::task::spawn_blocking(move || op(input.pixels())).await {
        Ok(pixels) => Image::new(pixels),
        Err(e) => {
            warn!(filter, error = %e, "filter task failed, passing image through");
            image
        }
    }
}

/// Smallest blur sigma handed to `imageops::blur`.
pub(crate) const MIN_BLUR_SIGMA: f64 = 0.05;

/// Returns `true` if `imageops::blur` gives a usable result for this size.
///
/// Images narrower than 2 px on either side come back all-zero, as do
/// near-zero sigmas; callers pass the image through instead.
pub(crate) fn can_blur(extent: Extent, sigma: f64) -> bool {
    extent.width.min(extent.height) >= 2 && sigma >= MIN_BLUR_SIGMA
}

/// Clamp a channel value back into `u8` range.
pub(crate) fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
