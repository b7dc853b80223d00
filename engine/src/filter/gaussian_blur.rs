use darkroom_common::image::Image;
use image::imageops;
use std::ops::RangeInclusive;
use tracing::debug;

use super::amount::Amount;
use super::radius::scaled_radius;
use super::render::{can_blur, render_blocking};
use super::traits::Filtering;

/// Gaussian blur whose strength scales with the image diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GaussianBlurFilter {
    value: Amount,
}

impl GaussianBlurFilter {
    pub const RANGE: RangeInclusive<f64> = 0.0..=100.0;

    pub fn new(value: f64) -> Self {
        Self {
            value: Amount::clamped(value, &Self::RANGE),
        }
    }

    pub fn value(&self) -> f64 {
        self.value.get()
    }
}

impl Filtering for GaussianBlurFilter {
    async fn apply(&self, image: Image, _source: Image) -> Image {
        if self.value.is_zero() {
            return image;
        }
        let sigma = scaled_radius(self.value.get(), *Self::RANGE.end(), image.extent());
        if !can_blur(image.extent(), sigma) {
            debug!(sigma, "image too small to blur, passing through");
            return image;
        }
        debug!(value = self.value.get(), sigma, "gaussian blur");
        render_blocking(self.name(), image, move |pixels| {
            imageops::blur(pixels, sigma as f32)
        })
        .await
    }

    fn name(&self) -> &'static str {
        "gaussian_blur"
    }
}
