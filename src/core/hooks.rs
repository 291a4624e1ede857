//! Caller-injected extension points of the sanitize pipeline

use crate::tables::ConversionTable;

/// Pre-sanitize hook: `(previous, title) -> Some(slug)` to bypass the engine
pub type PreSanitizeHook = Box<dyn Fn(Option<String>, &str) -> Option<String> + Send + Sync>;

/// Table hook: rewrites the effective table right before substitution
pub type TableHook = Box<dyn Fn(ConversionTable) -> ConversionTable + Send + Sync>;

/// Lookup of an already stored slug by its source name
pub trait SlugLookup {
    fn existing_slug(&self, name: &str) -> Option<String>;
}

impl<F> SlugLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn existing_slug(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Registered hooks; each kind runs in registration order, every hook
/// receiving the previous hook's result
#[derive(Default)]
pub struct SanitizeHooks {
    pre_sanitize: Vec<PreSanitizeHook>,
    table: Vec<TableHook>,
}

impl SanitizeHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pre_sanitize<F>(mut self, hook: F) -> Self
    where
        F: Fn(Option<String>, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.pre_sanitize.push(Box::new(hook));
        self
    }

    pub fn on_table<F>(mut self, hook: F) -> Self
    where
        F: Fn(ConversionTable) -> ConversionTable + Send + Sync + 'static,
    {
        self.table.push(Box::new(hook));
        self
    }

    /// Chain the pre-sanitize hooks starting from `None`
    pub fn pre_sanitize(&self, title: &str) -> Option<String> {
        self.pre_sanitize
            .iter()
            .fold(None, |acc, hook| hook(acc, title))
    }

    /// Chain the table hooks over `table`
    pub fn filter_table(&self, table: ConversionTable) -> ConversionTable {
        self.table.iter().fold(table, |acc, hook| hook(acc))
    }

    pub fn is_empty(&self) -> bool {
        self.pre_sanitize.is_empty() && self.table.is_empty()
    }
}

impl std::fmt::Debug for SanitizeHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanitizeHooks")
            .field("pre_sanitize", &self.pre_sanitize.len())
            .field("table", &self.table.len())
            .finish()
    }
}
