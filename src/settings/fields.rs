//! Settings field definitions

use super::store::OptionValue;
use crate::tables::registry::{self, BG_BG, ISO9, KA_GE, UK};

/// Checkbox on-value
pub const CHECKED: &str = "yes";
/// Checkbox off-value
pub const UNCHECKED: &str = "no";

/// Field key of the "convert existing slugs" checkbox
pub const CONVERT_EXISTING_SLUGS: &str = "convert_existing_slugs";

/// Kind of a settings field; owns the write-time normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Two-valued flag stored as "yes"/"no"
    Checkbox,
    /// glyph -> replacement table
    Table,
    /// Free text
    Text,
}

impl FieldKind {
    /// Canonical form of `value` for this kind
    ///
    /// Checkboxes accept "1" and "yes" as checked; anything else,
    /// including a missing value, becomes "no".
    pub fn normalize(&self, value: Option<OptionValue>) -> Option<OptionValue> {
        match self {
            FieldKind::Checkbox => {
                let checked = matches!(
                    value.as_ref().and_then(OptionValue::as_text),
                    Some("1") | Some(CHECKED)
                );
                Some(OptionValue::Text(
                    if checked { CHECKED } else { UNCHECKED }.to_string(),
                ))
            }
            FieldKind::Table | FieldKind::Text => value,
        }
    }
}

/// One settings field
#[derive(Debug, Clone)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub section: &'static str,
    pub kind: FieldKind,
    /// Value used when nothing is stored
    pub default: Option<OptionValue>,
}

impl FormField {
    fn checkbox(key: &'static str, label: &'static str, section: &'static str) -> Self {
        Self {
            key,
            label,
            section,
            kind: FieldKind::Checkbox,
            default: None,
        }
    }

    fn table(locale: &'static str, label: &'static str, section: &'static str) -> Self {
        Self {
            key: locale,
            label,
            section,
            kind: FieldKind::Table,
            default: Some(OptionValue::Table(registry::get_table(locale))),
        }
    }

    /// Default value, or empty text when the field has none
    pub fn default_value(&self) -> OptionValue {
        self.default
            .clone()
            .unwrap_or_else(|| OptionValue::Text(String::new()))
    }
}

/// Fields of the settings record, in display order
pub fn form_fields() -> Vec<FormField> {
    vec![
        FormField::checkbox(CONVERT_EXISTING_SLUGS, "Convert Existing Slugs", "general_section"),
        FormField::table(ISO9, "ISO9 Table", "iso9_section"),
        FormField::table(BG_BG, "bg_BG Table", "bg_BG_section"),
        FormField::table(UK, "uk Table", "uk_section"),
        FormField::table(KA_GE, "ka_GE Table", "ka_GE_section"),
    ]
}
