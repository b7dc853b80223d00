use darkroom_common::image::Image;
use image::imageops;
use std::ops::RangeInclusive;
use tracing::debug;

use super::amount::Amount;
use super::render::render_blocking;
use super::traits::Filtering;

/// Contrast adjustment around mid-gray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContrastFilter {
    value: Amount,
}

impl ContrastFilter {
    pub const RANGE: RangeInclusive<f64> = -0.18..=0.18;

    pub fn new(value: f64) -> Self {
        Self {
            value: Amount::clamped(value, &Self::RANGE),
        }
    }

    pub fn value(&self) -> f64 {
        self.value.get()
    }

    /// Percentage understood by `imageops::contrast`.
    fn percent(&self) -> f32 {
        (self.value.get() * 200.0) as f32
    }
}

impl Filtering for ContrastFilter {
    async fn apply(&self, image: Image, _source: Image) -> Image {
        if self.value.is_zero() {
            return image;
        }
        let percent = self.percent();
        debug!(value = self.value.get(), percent, "contrast");
        render_blocking(self.name(), image, move |pixels| {
            imageops::contrast(pixels, percent)
        })
        .await
    }

    fn name(&self) -> &'static str {
        "contrast"
    }
}
