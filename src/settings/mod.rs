//! Plugin settings record: field defaults and write-time normalization
//! layered over an [`OptionStore`]

mod fields;
mod store;

pub use fields::{form_fields, FieldKind, FormField, CHECKED, CONVERT_EXISTING_SLUGS, UNCHECKED};
pub use store::{JsonOptionStore, MemoryOptionStore, OptionStore, OptionValue, SettingsRecord};

use crate::error::Result;

/// Settings record with form-field defaults; usable as an [`OptionStore`]
pub struct Settings<S: OptionStore> {
    store: S,
    fields: Vec<FormField>,
}

impl<S: OptionStore> Settings<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            fields: form_fields(),
        }
    }

    pub fn form_fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Underlying raw store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored value, else the field default, else empty text
    pub fn get_option(&self, key: &str) -> OptionValue {
        self.store.get_option(key).unwrap_or_else(|| {
            self.field(key)
                .map(FormField::default_value)
                .unwrap_or_else(|| OptionValue::Text(String::new()))
        })
    }

    /// Like [`get_option`](Self::get_option), with `empty_value` standing in
    /// for an empty string
    pub fn get_option_or(&self, key: &str, empty_value: OptionValue) -> OptionValue {
        match self.get_option(key) {
            OptionValue::Text(s) if s.is_empty() => empty_value,
            value => value,
        }
    }

    /// Whether a checkbox field is on
    pub fn is_checked(&self, key: &str) -> bool {
        self.get_option(key).as_text() == Some(CHECKED)
    }

    /// Normalize `value` by field kind and persist it
    pub fn set_option(&self, key: &str, value: OptionValue) -> Result<()> {
        let value = match self.field(key) {
            Some(field) => field.kind.normalize(Some(value.clone())).unwrap_or(value),
            None => value,
        };
        self.store.set_option(key, value)
    }

    /// Save a whole submitted record
    ///
    /// An unchanged record is stored as is. Otherwise every checkbox field
    /// is canonicalized to "yes"/"no", a missing checkbox counting as "no".
    pub fn update(&self, record: SettingsRecord) -> Result<()> {
        let record = self.normalize_record(record);
        self.store.replace_all(record)
    }

    /// Apply the write-time normalization without persisting
    pub fn normalize_record(&self, mut record: SettingsRecord) -> SettingsRecord {
        if record == self.store.snapshot() {
            return record;
        }
        for field in &self.fields {
            if field.kind != FieldKind::Checkbox {
                continue;
            }
            if let Some(value) = field.kind.normalize(record.remove(field.key)) {
                record.insert(field.key.to_string(), value);
            }
        }
        record
    }
}

impl<S: OptionStore> OptionStore for Settings<S> {
    fn get_option(&self, key: &str) -> Option<OptionValue> {
        Some(Settings::get_option(self, key))
    }

    fn set_option(&self, key: &str, value: OptionValue) -> Result<()> {
        Settings::set_option(self, key, value)
    }

    fn snapshot(&self) -> SettingsRecord {
        self.store.snapshot()
    }

    fn replace_all(&self, record: SettingsRecord) -> Result<()> {
        self.update(record)
    }
}
