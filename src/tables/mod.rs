//! Conversion tables: the table type and the built-in per-locale registry

pub mod conversion_table;
pub mod registry;

pub use conversion_table::ConversionTable;
pub use registry::{get_table, is_supported, ISO9, SUPPORTED_LOCALES};
