//! Entry points called by host content events (title, file name, post save)

use crate::core::{Context, Sanitizer, SlugLookup, SlugSource};
use crate::tables::ISO9;

/// Post statuses that never get an automatic slug
const SKIPPED_STATUSES: [&str; 2] = ["auto-draft", "revision"];

/// Fields of a post being saved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostData {
    pub post_name: String,
    pub post_title: String,
    pub post_status: String,
}

/// Host-facing slug service: a sanitizer bound to one locale
pub struct SlugService {
    sanitizer: Sanitizer,
    locale: String,
    lowercase_titles: bool,
    term_lookup: Option<Box<dyn SlugLookup + Send + Sync>>,
}

impl SlugService {
    pub fn new(sanitizer: Sanitizer) -> Self {
        Self {
            sanitizer,
            locale: ISO9.to_string(),
            lowercase_titles: true,
            term_lookup: None,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Lowercase title slugs the way the host's dash sanitizer does
    pub fn with_lowercase_titles(mut self, enabled: bool) -> Self {
        self.lowercase_titles = enabled;
        self
    }

    /// Existing-slug lookup used when a term is created
    pub fn with_term_lookup<L>(mut self, lookup: L) -> Self
    where
        L: SlugLookup + Send + Sync + 'static,
    {
        self.term_lookup = Some(Box::new(lookup));
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    /// Title slug; `raw_title` is accepted for hook parity and not used
    ///
    /// Only engine output is lowercased. Hook values and existing term slugs
    /// come back as given.
    pub fn sanitize_title(&self, title: &str, _raw_title: &str, context: &str) -> String {
        let context = Context::parse(context);
        let lookup = self
            .term_lookup
            .as_deref()
            .map(|l| l as &dyn SlugLookup);
        let (slug, source) = self
            .sanitizer
            .sanitize_traced(title, &self.locale, context, lookup);

        if self.lowercase_titles && source == SlugSource::Engine {
            slug.to_lowercase()
        } else {
            slug
        }
    }

    /// File name slug: same pipeline, no term lookup, case kept
    pub fn sanitize_file_name(&self, filename: &str, _raw_filename: &str) -> String {
        self.sanitizer
            .sanitize(filename, &self.locale, Context::FileName, None)
    }

    /// Give a post without a slug one derived from its title
    ///
    /// Returns whether `post_name` was set.
    pub fn fill_post_name(&self, post: &mut PostData) -> bool {
        if !post.post_name.is_empty()
            || post.post_title.is_empty()
            || SKIPPED_STATUSES.contains(&post.post_status.as_str())
        {
            return false;
        }
        post.post_name = self.sanitize_title(&post.post_title, &post.post_title, "save");
        true
    }
}

impl std::fmt::Debug for SlugService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlugService")
            .field("sanitizer", &self.sanitizer)
            .field("locale", &self.locale)
            .field("lowercase_titles", &self.lowercase_titles)
            .field("has_term_lookup", &self.term_lookup.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SanitizeHooks;

    fn service() -> SlugService {
        SlugService::new(Sanitizer::new())
    }

    #[test]
    fn test_title_lowercased() {
        assert_eq!(service().sanitize_title("Привет Мир", "Привет Мир", "save"), "privet-mir");
    }

    #[test]
    fn test_title_keep_case() {
        let svc = service().with_lowercase_titles(false);
        assert_eq!(svc.sanitize_title("Привет Мир", "", ""), "Privet-Mir");
    }

    #[test]
    fn test_query_context_untouched() {
        assert_eq!(service().sanitize_title("Привет", "", "query"), "Привет");
    }

    #[test]
    fn test_file_name_keeps_case_and_dots() {
        assert_eq!(service().sanitize_file_name("Отчёт 2024.PDF", ""), "Otchyot-2024.PDF");
    }

    #[test]
    fn test_term_lookup_only_for_terms() {
        let svc = service().with_term_lookup(|name: &str| {
            (name == "Новости").then(|| "news".to_string())
        });
        assert_eq!(svc.sanitize_title("Новости", "", "term"), "news");
        assert_eq!(svc.sanitize_title("Новости", "", "save"), "novosti");
        assert_eq!(svc.sanitize_file_name("Новости", ""), "Novosti");
    }

    #[test]
    fn test_hook_value_keeps_case() {
        let hooks = SanitizeHooks::new().on_pre_sanitize(|_, _| Some("Fixed-Slug".into()));
        let svc = SlugService::new(Sanitizer::new().with_hooks(hooks));
        assert_eq!(svc.sanitize_title("Что угодно", "", "save"), "Fixed-Slug");
    }

    #[test]
    fn test_existing_term_slug_keeps_case() {
        let svc = service().with_term_lookup(|name: &str| {
            (name == "Москва").then(|| "Moscow-City".to_string())
        });
        assert_eq!(svc.sanitize_title("Москва", "", "term"), "Moscow-City");
        assert_eq!(svc.sanitize_title("Москва", "", "save"), "moskva");
    }

    #[test]
    fn test_locale_applied() {
        let svc = service().with_locale("uk");
        assert_eq!(svc.locale(), "uk");
        assert_eq!(svc.sanitize_title("Гора", "", ""), "hora");
    }

    #[test]
    fn test_fill_post_name() {
        let svc = service();
        let mut post = PostData {
            post_title: "Первый пост".into(),
            post_status: "publish".into(),
            ..Default::default()
        };
        assert!(svc.fill_post_name(&mut post));
        assert_eq!(post.post_name, "pervyj-post");
    }

    #[test]
    fn test_fill_post_name_skips() {
        let svc = service();

        let mut draft = PostData {
            post_title: "Черновик".into(),
            post_status: "auto-draft".into(),
            ..Default::default()
        };
        assert!(!svc.fill_post_name(&mut draft));
        assert!(draft.post_name.is_empty());

        let mut named = PostData {
            post_name: "keep".into(),
            post_title: "Другое".into(),
            post_status: "publish".into(),
        };
        assert!(!svc.fill_post_name(&mut named));
        assert_eq!(named.post_name, "keep");

        let mut untitled = PostData::default();
        assert!(!svc.fill_post_name(&mut untitled));
    }
}
