use darkroom_common::config::FilterConfig;
use darkroom_common::image::Image;
use std::time::Instant;
use tracing::debug;

use crate::filter::{self, AnyFilter, Filtering};

/// An ordered set of erased filters, at most one per filter kind.
///
/// Each filter sees the output of the one before it plus the untouched
/// source image, so a filter can blend against or mask with the original.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterStack {
    filters: Vec<AnyFilter>,
}

impl FilterStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stack from config entries, in order. A later entry of the same
    /// kind replaces an earlier one in its original position.
    pub fn from_configs(configs: &[FilterConfig]) -> Self {
        let mut stack = Self::new();
        for config in configs {
            if let Some(replaced) = stack.set(filter::build(config)) {
                debug!(filter = replaced.name(), "duplicate filter in config, keeping the last one");
            }
        }
        stack
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnyFilter> {
        self.filters.iter()
    }

    pub fn contains(&self, filter: &AnyFilter) -> bool {
        self.filters.contains(filter)
    }

    /// The filter of kind `F`, if present.
    pub fn get<F: Filtering>(&self) -> Option<&F> {
        self.filters.iter().find_map(|f| f.downcast_ref::<F>())
    }

    /// Insert `filter`, replacing an existing filter of the same kind in place.
    /// Returns the replaced filter.
    pub fn set(&mut self, filter: AnyFilter) -> Option<AnyFilter> {
        match self.filters.iter_mut().find(|f| f.same_kind(&filter)) {
            Some(slot) => Some(std::mem::replace(slot, filter)),
            None => {
                self.filters.push(filter);
                None
            }
        }
    }

    /// Remove the filter of kind `F`.
    pub fn remove_kind<F: Filtering>(&mut self) -> Option<AnyFilter> {
        let index = self.filters.iter().position(|f| f.is::<F>())?;
        Some(self.filters.remove(index))
    }

    /// Run every filter in order over `source`.
    pub async fn apply(&self, source: &Image) -> Image {
        let started = Instant::now();
        let mut image = source.clone();
        for (step, filter) in self.filters.iter().enumerate() {
            image = filter.apply(image, source.clone()).await;
            debug!(step, filter = filter.name(), "applied filter");
        }
        debug!(
            filters = self.filters.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "filter stack applied"
        );
        image
    }
}

impl<'a> IntoIterator for &'a FilterStack {
    type Item = &'a AnyFilter;
    type IntoIter = std::slice::Iter<'a, AnyFilter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{ExposureFilter, GaussianBlurFilter, VignetteFilter};
    use image::{Rgba, RgbaImage};

    #[derive(Debug, PartialEq, Eq, Hash)]
    struct AddOne;

    impl Filtering for AddOne {
        async fn apply(&self, image: Image, _source: Image) -> Image {
            map_red(image, |c| c + 1)
        }
    }

    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Double;

    impl Filtering for Double {
        async fn apply(&self, image: Image, _source: Image) -> Image {
            map_red(image, |c| c * 2)
        }
    }

    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Revert;

    impl Filtering for Revert {
        async fn apply(&self, _image: Image, source: Image) -> Image {
            source
        }
    }

    fn map_red(image: Image, f: impl Fn(u8) -> u8) -> Image {
        let mut pixels = image.into_pixels();
        for p in pixels.pixels_mut() {
            p.0[0] = f(p.0[0]);
        }
        Image::new(pixels)
    }

    fn red(value: u8) -> Image {
        Image::new(RgbaImage::from_pixel(2, 2, Rgba([value, 0, 0, 255])))
    }

    fn red_of(image: &Image) -> u8 {
        image.pixels().get_pixel(0, 0).0[0]
    }

    #[tokio::test]
    async fn empty_stack_returns_source() {
        let source = red(5);
        let out = FilterStack::new().apply(&source).await;
        assert!(out.shares_buffer(&source));
    }

    #[tokio::test]
    async fn filters_run_in_insertion_order() {
        let mut stack = FilterStack::new();
        stack.set(AddOne.into_any());
        stack.set(Double.into_any());
        assert_eq!(red_of(&stack.apply(&red(5)).await), 12);

        let mut reversed = FilterStack::new();
        reversed.set(Double.into_any());
        reversed.set(AddOne.into_any());
        assert_eq!(red_of(&reversed.apply(&red(5)).await), 11);
    }

    #[tokio::test]
    async fn every_filter_sees_the_original_source() {
        let mut stack = FilterStack::new();
        stack.set(AddOne.into_any());
        stack.set(Revert.into_any());
        let source = red(5);
        let out = stack.apply(&source).await;
        assert_eq!(out, source);
        // The source buffer was never written.
        assert_eq!(red_of(&source), 5);
    }

    #[test]
    fn set_replaces_same_kind_in_place() {
        let mut stack = FilterStack::new();
        assert!(stack.set(ExposureFilter::new(0.5).into_any()).is_none());
        stack.set(GaussianBlurFilter::new(10.0).into_any());

        let replaced = stack.set(ExposureFilter::new(1.0).into_any());
        assert_eq!(replaced, Some(ExposureFilter::new(0.5).into_any()));
        assert_eq!(stack.len(), 2);

        let kinds: Vec<_> = stack.iter().map(|f| f.name()).collect();
        assert_eq!(kinds, ["exposure", "gaussian_blur"]);
        assert_eq!(stack.get::<ExposureFilter>(), Some(&ExposureFilter::new(1.0)));
    }

    #[test]
    fn remove_kind() {
        let mut stack = FilterStack::new();
        stack.set(ExposureFilter::new(0.5).into_any());
        stack.set(VignetteFilter::new(1.0).into_any());

        assert!(stack.remove_kind::<GaussianBlurFilter>().is_none());
        let removed = stack.remove_kind::<ExposureFilter>().unwrap();
        assert!(removed.is::<ExposureFilter>());
        assert_eq!(stack.len(), 1);
        assert!(stack.contains(&VignetteFilter::new(1.0).into_any()));
        assert!(!stack.contains(&ExposureFilter::new(0.5).into_any()));
    }

    #[test]
    fn stacks_compare_by_filters_and_order() {
        let a = FilterStack::from_configs(&[
            FilterConfig::Exposure { value: 0.5 },
            FilterConfig::Vignette { value: 1.0 },
        ]);
        let b = FilterStack::from_configs(&[
            FilterConfig::Exposure { value: 0.5 },
            FilterConfig::Vignette { value: 1.0 },
        ]);
        let c = FilterStack::from_configs(&[
            FilterConfig::Vignette { value: 1.0 },
            FilterConfig::Exposure { value: 0.5 },
        ]);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn from_configs_keeps_last_duplicate() {
        let stack = FilterStack::from_configs(&[
            FilterConfig::GaussianBlur { value: 5.0 },
            FilterConfig::Exposure { value: 0.5 },
            FilterConfig::GaussianBlur { value: 20.0 },
        ]);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.iter().next().map(|f| f.name()), Some("gaussian_blur"));
        assert_eq!(
            stack.get::<GaussianBlurFilter>(),
            Some(&GaussianBlurFilter::new(20.0))
        );
    }

    #[tokio::test]
    async fn stack_matches_manual_chain() {
        let source = Image::new(RgbaImage::from_fn(32, 24, |x, y| {
            Rgba([(x * 7) as u8, (y * 9) as u8, 128, 255])
        }));
        let stack = FilterStack::from_configs(&[
            FilterConfig::Exposure { value: 0.4 },
            FilterConfig::GaussianBlur { value: 10.0 },
            FilterConfig::Vignette { value: 1.0 },
        ]);

        let step = ExposureFilter::new(0.4).apply(source.clone(), source.clone()).await;
        let step = GaussianBlurFilter::new(10.0).apply(step, source.clone()).await;
        let expected = VignetteFilter::new(1.0).apply(step, source.clone()).await;

        assert_eq!(stack.apply(&source).await, expected);
    }
}
