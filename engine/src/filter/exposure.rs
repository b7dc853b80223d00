use darkroom_common::image::Image;
use std::ops::RangeInclusive;
use tracing::debug;

use super::amount::Amount;
use super::render::{render_blocking, to_channel};
use super::traits::Filtering;

/// Exposure adjustment in stops.
///
/// Works on linear light: each sRGB channel is decoded, scaled by
/// `2^value`, and re-encoded. Alpha is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExposureFilter {
    value: Amount,
}

impl ExposureFilter {
    pub const RANGE: RangeInclusive<f64> = -1.8..=1.8;

    pub fn new(value: f64) -> Self {
        Self {
            value: Amount::clamped(value, &Self::RANGE),
        }
    }

    pub fn value(&self) -> f64 {
        self.value.get()
    }

    /// Output channel for every input channel value.
    fn lookup_table(&self) -> [u8; 256] {
        let gain = 2f64.powf(self.value.get());
        let mut table = [0u8; 256];
        for (input, out) in table.iter_mut().enumerate() {
            let linear = srgb_to_linear(input as f64 / 255.0) * gain;
            *out = to_channel(linear_to_srgb(linear.min(1.0)) * 255.0);
        }
        table
    }
}

impl Filtering for ExposureFilter {
    async fn apply(&self, image: Image, _source: Image) -> Image {
        if self.value.is_zero() {
            return image;
        }
        debug!(value = self.value.get(), "exposure");
        let table = self.lookup_table();
        render_blocking(self.name(), image, move |pixels| {
            let mut pixels = pixels.clone();
            for p in pixels.pixels_mut() {
                for c in &mut p.0[..3] {
                    *c = table[*c as usize];
                }
            }
            pixels
        })
        .await
    }

    fn name(&self) -> &'static str {
        "exposure"
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}
