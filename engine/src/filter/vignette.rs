use darkroom_common::image::Image;
use std::ops::RangeInclusive;
use tracing::debug;

use super::amount::Amount;
use super::render::{render_blocking, to_channel};
use super::traits::Filtering;

/// Radial darkening toward the corners.
///
/// At `value == 2` the corners go fully black; the falloff is quadratic in
/// the distance from the center, normalized by half the diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VignetteFilter {
    value: Amount,
}

impl VignetteFilter {
    pub const RANGE: RangeInclusive<f64> = 0.0..=2.0;

    pub fn new(value: f64) -> Self {
        Self {
            value: Amount::clamped(value, &Self::RANGE),
        }
    }

    pub fn value(&self) -> f64 {
        self.value.get()
    }
}

impl Filtering for VignetteFilter {
    async fn apply(&self, image: Image, _source: Image) -> Image {
        if self.value.is_zero() {
            return image;
        }
        let extent = image.extent();
        let strength = self.value.get() / *Self::RANGE.end();
        let (cx, cy) = extent.center();
        let half_diagonal = extent.diagonal() / 2.0;
        debug!(value = self.value.get(), "vignette");
        render_blocking(self.name(), image, move |pixels| {
            let mut pixels = pixels.clone();
            for (x, y, p) in pixels.enumerate_pixels_mut() {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt() / half_diagonal;
                let factor = (1.0 - strength * d * d).max(0.0);
                for c in &mut p.0[..3] {
                    *c = to_channel(*c as f64 * factor);
                }
            }
            pixels
        })
        .await
    }

    fn name(&self) -> &'static str {
        "vignette"
    }
}
