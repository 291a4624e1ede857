//! Slug engine: context, hooks, table resolution and the sanitize pipeline

pub mod context;
pub mod hooks;
pub mod resolver;
pub mod sanitizer;

pub use context::Context;
pub use hooks::{SanitizeHooks, SlugLookup};
pub use resolver::{MergeMode, TableResolver};
pub use sanitizer::{Sanitizer, SlugSource};
