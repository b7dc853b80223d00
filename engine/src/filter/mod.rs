pub mod amount;
pub mod any;
pub mod contrast;
pub mod exposure;
pub mod gaussian_blur;
pub mod radius;
pub(crate) mod render;
pub mod saturation;
pub mod sharpen;
pub mod traits;
pub mod vignette;

use darkroom_common::config::FilterConfig;

pub use any::AnyFilter;
pub use contrast::ContrastFilter;
pub use exposure::ExposureFilter;
pub use gaussian_blur::GaussianBlurFilter;
pub use saturation::SaturationFilter;
pub use sharpen::SharpenFilter;
pub use traits::Filtering;
pub use vignette::VignetteFilter;

/// Build the erased filter described by one `[[filters]]` entry.
pub fn build(config: &FilterConfig) -> AnyFilter {
    match *config {
        FilterConfig::Exposure { value } => ExposureFilter::new(value).into_any(),
        FilterConfig::Contrast { value } => ContrastFilter::new(value).into_any(),
        FilterConfig::Saturation { value } => SaturationFilter::new(value).into_any(),
        FilterConfig::GaussianBlur { value } => GaussianBlurFilter::new(value).into_any(),
        FilterConfig::Sharpen { sharpness, radius } => {
            SharpenFilter::new(sharpness, radius).into_any()
        }
        FilterConfig::Vignette { value } => VignetteFilter::new(value).into_any(),
    }
}
