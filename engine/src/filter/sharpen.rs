use darkroom_common::image::Image;
use image::imageops;
use std::ops::RangeInclusive;
use tracing::debug;

use super::amount::Amount;
use super::radius::scaled_radius;
use super::render::{can_blur, render_blocking, to_channel};
use super::traits::Filtering;

/// Unsharp mask: adds back `sharpness` times the detail lost to a blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SharpenFilter {
    sharpness: Amount,
    radius: Amount,
}

impl SharpenFilter {
    pub const SHARPNESS_RANGE: RangeInclusive<f64> = 0.0..=1.0;
    pub const RADIUS_RANGE: RangeInclusive<f64> = 0.0..=100.0;

    pub fn new(sharpness: f64, radius: f64) -> Self {
        Self {
            sharpness: Amount::clamped(sharpness, &Self::SHARPNESS_RANGE),
            radius: Amount::clamped(radius, &Self::RADIUS_RANGE),
        }
    }

    pub fn sharpness(&self) -> f64 {
        self.sharpness.get()
    }

    pub fn radius(&self) -> f64 {
        self.radius.get()
    }
}

impl Filtering for SharpenFilter {
    async fn apply(&self, image: Image, _source: Image) -> Image {
        if self.sharpness.is_zero() || self.radius.is_zero() {
            return image;
        }
        let amount = self.sharpness.get();
        let sigma = scaled_radius(self.radius.get(), *Self::RADIUS_RANGE.end(), image.extent());
        if !can_blur(image.extent(), sigma) {
            debug!(sigma, "image too small to sharpen, passing through");
            return image;
        }
        debug!(sharpness = amount, sigma, "sharpen");
        render_blocking(self.name(), image, move |pixels| {
            let blurred = imageops::blur(pixels, sigma as f32);
            let mut pixels = pixels.clone();
            for (p, b) in pixels.pixels_mut().zip(blurred.pixels()) {
                for i in 0..3 {
                    let c = p.0[i] as f64;
                    p.0[i] = to_channel(c + amount * (c - b.0[i] as f64));
                }
            }
            pixels
        })
        .await
    }

    fn name(&self) -> &'static str {
        "sharpen"
    }
}
