pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod settings;
pub mod tables;

pub use self::core::{Context, MergeMode, SanitizeHooks, Sanitizer, SlugLookup, SlugSource, TableResolver};
pub use error::{Error, Result};
pub use host::{PostData, SlugService};
pub use settings::{JsonOptionStore, MemoryOptionStore, OptionStore, OptionValue, Settings};
pub use tables::{get_table, ConversionTable};
