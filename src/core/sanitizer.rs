//! Title/filename -> slug pipeline

use std::sync::Arc;

use super::context::Context;
use super::hooks::{SanitizeHooks, SlugLookup};
use super::resolver::{MergeMode, TableResolver};
use crate::settings::OptionStore;

/// Stage that produced a slug
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugSource {
    /// `Query` context, input returned as is
    Untouched,
    /// Pre-sanitize hook value
    Hook,
    /// Existing term slug
    Existing,
    /// Table substitution and cleanup
    Engine,
}

/// Slug sanitizer
///
/// Pipeline:
/// 1. `Query` context returns the input untouched
/// 2. percent-decode
/// 3. pre-sanitize hooks may return the final slug
/// 4. resolve the locale table, pass it through the table hooks
/// 5. `Term` context: an existing slug for the same name is returned as is
/// 6. table substitution (longest key first)
/// 7. residual Unicode -> ASCII transliteration
/// 8. chars outside `[A-Za-z0-9'_.-]` become `-`
/// 9. runs of `-` collapse
/// 10. leading/trailing `-` are trimmed
pub struct Sanitizer {
    store: Option<Arc<dyn OptionStore>>,
    hooks: SanitizeHooks,
    resolver: TableResolver,
    transliterate: bool,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    /// Sanitizer with built-in tables only
    pub fn new() -> Self {
        Self {
            store: None,
            hooks: SanitizeHooks::default(),
            resolver: TableResolver::default(),
            transliterate: true,
        }
    }

    /// Read table overrides from `store`
    pub fn with_store(mut self, store: Arc<dyn OptionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_hooks(mut self, hooks: SanitizeHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_merge_mode(mut self, merge: MergeMode) -> Self {
        self.resolver = TableResolver::new(merge);
        self
    }

    /// Enable/disable stage 7. Without the `translit` feature it is always off.
    pub fn with_transliteration(mut self, enabled: bool) -> Self {
        self.transliterate = enabled;
        self
    }

    pub fn store(&self) -> Option<&dyn OptionStore> {
        self.store.as_deref()
    }

    pub fn resolver(&self) -> &TableResolver {
        &self.resolver
    }

    /// Turn `raw` into a slug
    ///
    /// `lookup` is consulted only in the `Term` context.
    pub fn sanitize(
        &self,
        raw: &str,
        locale: &str,
        context: Context,
        lookup: Option<&dyn SlugLookup>,
    ) -> String {
        self.sanitize_traced(raw, locale, context, lookup).0
    }

    /// Like [`sanitize`](Self::sanitize), also reporting which stage
    /// produced the result
    pub fn sanitize_traced(
        &self,
        raw: &str,
        locale: &str,
        context: Context,
        lookup: Option<&dyn SlugLookup>,
    ) -> (String, SlugSource) {
        if context == Context::Query {
            return (raw.to_string(), SlugSource::Untouched);
        }

        let title = url_decode(raw);

        if let Some(pre) = self.hooks.pre_sanitize(&title) {
            log::debug!("pre-sanitize hook returned {:?} for {:?}", pre, title);
            return (pre, SlugSource::Hook);
        }

        let table = self
            .hooks
            .filter_table(self.resolver.resolve(locale, self.store()));

        if context == Context::Term {
            if let Some(slug) = lookup
                .and_then(|l| l.existing_slug(&title))
                .filter(|s| !s.is_empty())
            {
                log::debug!("term {:?} keeps existing slug {:?}", title, slug);
                return (slug, SlugSource::Existing);
            }
        }

        let substituted = table.apply(&title);
        let folded = if self.transliterate {
            transliterate_residual(&substituted)
        } else {
            substituted
        };
        let slug = clean_slug(&folded);
        log::trace!("{:?} [{}, {}] -> {:?}", raw, locale, context, slug);
        (slug, SlugSource::Engine)
    }

    /// Table for `locale` after hooks, as used by [`sanitize`](Self::sanitize)
    pub fn effective_table(&self, locale: &str) -> crate::tables::ConversionTable {
        self.hooks
            .filter_table(self.resolver.resolve(locale, self.store()))
    }
}

impl std::fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sanitizer")
            .field("has_store", &self.store.is_some())
            .field("hooks", &self.hooks)
            .field("resolver", &self.resolver)
            .field("transliterate", &self.transliterate)
            .finish()
    }
}

/// Percent-decode with `+` as space
///
/// Decoded bytes that do not form UTF-8 are put back as `%XX`; the valid
/// runs around them stay decoded.
pub fn url_decode(raw: &str) -> String {
    if !raw.contains(&['%', '+'][..]) {
        return raw.to_string();
    }
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());

    let mut output = String::with_capacity(bytes.len());
    let mut rest: &[u8] = &bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                output.push_str(valid);
                return output;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                output.push_str(std::str::from_utf8(valid).unwrap_or_default());
                // None: truncated sequence at the end
                let bad = e.error_len().unwrap_or(after.len());
                for byte in &after[..bad] {
                    output.push_str(&format!("%{:02X}", byte));
                }
                log::debug!("{:?}: {} undecodable byte(s) kept escaped", raw, bad);
                rest = &after[bad..];
            }
        }
    }
}

/// Fold non-ASCII chars left after table substitution into ASCII
///
/// Chars without a transliteration are dropped.
#[cfg(feature = "translit")]
pub fn transliterate_residual(input: &str) -> String {
    if input.is_ascii() {
        return input.to_string();
    }
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii() {
            output.push(c);
        } else if let Some(ascii) = deunicode::deunicode_char(c) {
            output.push_str(ascii);
        }
    }
    output
}

/// No transliteration backend: non-ASCII survives until stage 8
#[cfg(not(feature = "translit"))]
pub fn transliterate_residual(input: &str) -> String {
    input.to_string()
}

/// Allowed slug chars besides ASCII alphanumerics
const EXTRA_ALLOWED: [char; 4] = ['\'', '_', '.', '-'];

pub fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || EXTRA_ALLOWED.contains(&c)
}

/// Stages 8-10: disallowed -> `-`, collapse `-` runs, trim `-`
pub fn clean_slug(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        let c = if is_allowed(c) { c } else { '-' };
        if c == '-' && output.ends_with('-') {
            continue;
        }
        output.push(c);
    }
    output.trim_matches('-').to_string()
}
