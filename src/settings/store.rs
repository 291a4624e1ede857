//! Option storage: one settings record keyed by field key

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::tables::ConversionTable;

/// A single stored setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// glyph -> replacement table
    Table(ConversionTable),
    /// Plain string (checkbox fields store "yes"/"no")
    Text(String),
}

impl OptionValue {
    /// Table payload, if this is a table
    pub fn as_table(&self) -> Option<&ConversionTable> {
        match self {
            OptionValue::Table(t) => Some(t),
            OptionValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            OptionValue::Table(_) => None,
        }
    }

    /// Empty string or empty table
    pub fn is_empty(&self) -> bool {
        match self {
            OptionValue::Table(t) => t.is_empty(),
            OptionValue::Text(s) => s.is_empty(),
        }
    }
}

impl From<ConversionTable> for OptionValue {
    fn from(t: ConversionTable) -> Self {
        OptionValue::Table(t)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

/// Whole persisted settings record
pub type SettingsRecord = BTreeMap<String, OptionValue>;

/// Read/write access to the settings record
///
/// Writes replace a whole value under a write lock.
pub trait OptionStore: Send + Sync {
    /// Stored value for `key`
    fn get_option(&self, key: &str) -> Option<OptionValue>;

    /// Store `value` under `key`
    fn set_option(&self, key: &str, value: OptionValue) -> Result<()>;

    /// Copy of the whole record
    fn snapshot(&self) -> SettingsRecord;

    /// Replace the whole record
    fn replace_all(&self, record: SettingsRecord) -> Result<()>;
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryOptionStore {
    record: RwLock<SettingsRecord>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: SettingsRecord) -> Self {
        Self {
            record: RwLock::new(record),
        }
    }
}

impl OptionStore for MemoryOptionStore {
    fn get_option(&self, key: &str) -> Option<OptionValue> {
        let guard = self.record.read().unwrap_or_else(|e| e.into_inner());
        guard.get(key).cloned()
    }

    fn set_option(&self, key: &str, value: OptionValue) -> Result<()> {
        let mut guard = self.record.write().unwrap_or_else(|e| e.into_inner());
        guard.insert(key.to_string(), value);
        Ok(())
    }

    fn snapshot(&self) -> SettingsRecord {
        self.record.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn replace_all(&self, record: SettingsRecord) -> Result<()> {
        *self.record.write().unwrap_or_else(|e| e.into_inner()) = record;
        Ok(())
    }
}

/// Store backed by a JSON file, read on open and rewritten via temp + rename
#[derive(Debug)]
pub struct JsonOptionStore {
    path: PathBuf,
    record: RwLock<SettingsRecord>,
}

impl JsonOptionStore {
    /// Open the store at `path`. A missing file yields an empty record.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let record = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => SettingsRecord::new(),
            Ok(content) => parse_record(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("settings file {} not found, starting empty", path.display());
                SettingsRecord::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            record: RwLock::new(record),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, record: &SettingsRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(record)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn parse_record(content: &str) -> Result<SettingsRecord> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if !value.is_object() {
        return Err(Error::Format("settings record must be a JSON object".into()));
    }
    Ok(serde_json::from_value(value)?)
}

impl OptionStore for JsonOptionStore {
    fn get_option(&self, key: &str) -> Option<OptionValue> {
        let guard = self.record.read().unwrap_or_else(|e| e.into_inner());
        guard.get(key).cloned()
    }

    fn set_option(&self, key: &str, value: OptionValue) -> Result<()> {
        let mut guard = self.record.write().unwrap_or_else(|e| e.into_inner());
        let mut next = guard.clone();
        next.insert(key.to_string(), value);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }

    fn snapshot(&self) -> SettingsRecord {
        self.record.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn replace_all(&self, record: SettingsRecord) -> Result<()> {
        let mut guard = self.record.write().unwrap_or_else(|e| e.into_inner());
        self.persist(&record)?;
        *guard = record;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_value_json() {
        let table: OptionValue = serde_json::from_str(r#"{"Щ": "Sht"}"#).unwrap();
        assert_eq!(table.as_table().and_then(|t| t.get("Щ")), Some("Sht"));

        let text: OptionValue = serde_json::from_str(r#""yes""#).unwrap();
        assert_eq!(text.as_text(), Some("yes"));
    }

    #[test]
    fn test_option_value_empty() {
        assert!(OptionValue::from("").is_empty());
        assert!(OptionValue::from(ConversionTable::new()).is_empty());
        assert!(!OptionValue::from("no").is_empty());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryOptionStore::new();
        assert!(store.get_option("iso9").is_none());
        store.set_option("iso9", OptionValue::from("x")).unwrap();
        assert_eq!(store.get_option("iso9"), Some(OptionValue::from("x")));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_json_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonOptionStore::open(dir.path().join("settings.json")).unwrap();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_json_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let store = JsonOptionStore::open(&path).unwrap();
        let table = ConversionTable::from_pairs([("Щ", "Sht")]);
        store.set_option("uk", table.clone().into()).unwrap();
        store.set_option("convert_existing_slugs", "yes".into()).unwrap();

        let reopened = JsonOptionStore::open(&path).unwrap();
        assert_eq!(reopened.get_option("uk"), Some(OptionValue::Table(table)));
        assert_eq!(reopened.get_option("convert_existing_slugs"), Some("yes".into()));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_json_store_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(JsonOptionStore::open(&path), Err(Error::Format(_))));

        std::fs::write(&path, "{ broken").unwrap();
        assert!(matches!(JsonOptionStore::open(&path), Err(Error::Parse(_))));
    }
}
