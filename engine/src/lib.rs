//! Image filters behind a single erased type, and the stack that runs them.

pub mod filter;
pub mod stack;

pub use filter::{AnyFilter, Filtering};
pub use stack::FilterStack;
