use darkroom_common::image::Image;
use std::ops::RangeInclusive;
use tracing::debug;

use super::amount::Amount;
use super::render::{render_blocking, to_channel};
use super::traits::Filtering;

/// Saturation adjustment. `-1` produces grayscale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaturationFilter {
    value: Amount,
}

impl SaturationFilter {
    pub const RANGE: RangeInclusive<f64> = -1.0..=1.0;

    pub fn new(value: f64) -> Self {
        Self {
            value: Amount::clamped(value, &Self::RANGE),
        }
    }

    pub fn value(&self) -> f64 {
        self.value.get()
    }
}

impl Filtering for SaturationFilter {
    async fn apply(&self, image: Image, _source: Image) -> Image {
        if self.value.is_zero() {
            return image;
        }
        let factor = 1.0 + self.value.get();
        debug!(value = self.value.get(), "saturation");
        render_blocking(self.name(), image, move |pixels| {
            let mut pixels = pixels.clone();
            for p in pixels.pixels_mut() {
                let [r, g, b, _] = p.0.map(|c| c as f64);
                // Rec. 709 luma
                let luma = 0.2126 * r + 0.7152 * g + 0.0722 * b;
                for c in &mut p.0[..3] {
                    *c = to_channel(luma + (*c as f64 - luma) * factor);
                }
            }
            pixels
        })
        .await
    }

    fn name(&self) -> &'static str {
        "saturation"
    }
}
