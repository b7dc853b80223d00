use darkroom_common::image::Image;
use futures_util::future::BoxFuture;
use std::any::{Any, TypeId};
use std::fmt;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::traits::Filtering;

type Applier = dyn Fn(Image, Image) -> BoxFuture<'static, Image> + Send + Sync;

/// Object-safe view of a filter's value identity.
trait Token: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq_token(&self, other: &dyn Token) -> bool;
    fn hash_token(&self, state: &mut dyn Hasher);
}

impl<T: Hash + Eq + Send + Sync + 'static> Token for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_token(&self, other: &dyn Token) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn hash_token(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }
}

/// A filter with its concrete type erased.
///
/// Holds the original filter value for equality and hashing, and a captured
/// procedure that forwards [`Filtering::apply`] to it. Equality never crosses
/// concrete types: two erased filters are equal only when they wrap values of
/// the same type that compare equal. Hashing feeds the hasher exactly what the
/// wrapped value's own `Hash` impl would.
///
/// Cloning is cheap and shares the wrapped value.
#[derive(Clone)]
pub struct AnyFilter {
    base: Arc<dyn Token>,
    applier: Arc<Applier>,
    name: &'static str,
    type_id: TypeId,
    type_name: &'static str,
}

impl AnyFilter {
    /// Wrap a concrete filter. Wrapping an `AnyFilter` returns it unchanged.
    pub fn new<F: Filtering>(filter: F) -> Self {
        if let Some(erased) = (&filter as &dyn Any).downcast_ref::<AnyFilter>() {
            return erased.clone();
        }

        let name = filter.name();
        let filter = Arc::new(filter);
        let base: Arc<dyn Token> = filter.clone();
        let applier: Arc<Applier> =
            Arc::new(move |image: Image, source: Image| -> BoxFuture<'static, Image> {
                let filter = Arc::clone(&filter);
                Box::pin(async move { filter.apply(image, source).await })
            });

        Self {
            base,
            applier,
            name,
            type_id: TypeId::of::<F>(),
            type_name: std::any::type_name::<F>(),
        }
    }

    /// The wrapped filter, if it is an `F`.
    pub fn downcast_ref<F: Filtering>(&self) -> Option<&F> {
        (*self.base).as_any().downcast_ref::<F>()
    }

    pub fn is<F: Filtering>(&self) -> bool {
        self.type_id == TypeId::of::<F>()
    }

    /// Returns `true` if both wrap the same concrete filter type.
    pub fn same_kind(&self, other: &AnyFilter) -> bool {
        self.type_id == other.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl Filtering for AnyFilter {
    fn apply(&self, image: Image, source: Image) -> impl Future<Output = Image> + Send {
        (self.applier)(image, source)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for AnyFilter {
    fn eq(&self, other: &Self) -> bool {
        (*self.base).eq_token(&*other.base)
    }
}

impl Eq for AnyFilter {}

impl Hash for AnyFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (*self.base).hash_token(state);
    }
}

impl fmt::Debug for AnyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyFilter")
            .field("type", &self.type_name)
            .field("name", &self.name)
            .finish()
    }
}
