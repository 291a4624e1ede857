//! Effective table resolution: stored overrides over built-in defaults

use serde::{Deserialize, Serialize};

use crate::settings::{OptionStore, OptionValue};
use crate::tables::{registry, ConversionTable, ISO9};

/// How a stored override combines with the built-in table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// A non-empty override is used as the whole table
    #[default]
    Replace,
    /// The override is laid over the built-in table for the locale
    PerKey,
}

/// Picks the table used for one sanitize call
#[derive(Debug, Clone, Copy, Default)]
pub struct TableResolver {
    merge: MergeMode,
}

impl TableResolver {
    pub fn new(merge: MergeMode) -> Self {
        Self { merge }
    }

    pub fn merge_mode(&self) -> MergeMode {
        self.merge
    }

    /// Effective table for `locale`
    ///
    /// Precedence: stored override for `locale`, then stored override for
    /// `iso9`, then the built-in table for `locale`. Empty values are
    /// treated as absent, as is a missing store.
    pub fn resolve(&self, locale: &str, store: Option<&dyn OptionStore>) -> ConversionTable {
        let stored = store.and_then(|s| {
            stored_table(s, locale)
                .map(|t| (locale, t))
                .or_else(|| stored_table(s, ISO9).map(|t| (ISO9, t)))
        });

        match stored {
            Some((source, table)) => {
                log::debug!("locale {:?}: using stored {} table ({} entries)", locale, source, table.len());
                match self.merge {
                    MergeMode::Replace => table,
                    MergeMode::PerKey => registry::builtin(locale).overlaid_with(&table),
                }
            }
            None => {
                log::debug!("locale {:?}: using built-in table", locale);
                registry::get_table(locale)
            }
        }
    }
}

/// Non-empty stored table under `key`
fn stored_table(store: &dyn OptionStore, key: &str) -> Option<ConversionTable> {
    match store.get_option(key)? {
        OptionValue::Table(t) if !t.is_empty() => Some(t),
        _ => None,
    }
}
