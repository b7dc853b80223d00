use darkroom_common::image::Extent;

/// Scale a slider value into a pixel radius proportional to the image size.
///
/// A `value` of `max` maps to one twentieth of the image diagonal, so an
/// effect keeps the same apparent strength on a preview and on the full
/// resolution render. `max == 0` is not guarded and yields a non-finite
/// result.
pub fn scaled_radius(value: f64, max: f64, extent: Extent) -> f64 {
    let base = extent.diagonal() / 20.0;
    base * value / max
}
