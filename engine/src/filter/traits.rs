use darkroom_common::image::Image;
use std::future::Future;
use std::hash::Hash;

use super::any::AnyFilter;

/// An image filter.
///
/// Implementations receive the working image (the output of the previous
/// filter in a stack) and the unedited source image, and produce a new image.
/// `apply` may suspend while pixel work runs elsewhere; it must not block
/// the calling executor thread.
///
/// Filters are plain values: two filters with equal parameters are equal
/// and hash identically, which is what lets [`AnyFilter`] compare and
/// deduplicate filters whose concrete type it no longer knows.
pub trait Filtering: Hash + Eq + Send + Sync + 'static {
    fn apply(&self, image: Image, source: Image) -> impl Future<Output = Image> + Send;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }

    /// Erase the concrete type.
    fn into_any(self) -> AnyFilter
    where
        Self: Sized,
    {
        AnyFilter::new(self)
    }
}
