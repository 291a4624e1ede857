//! Why a slug is being requested

/// Sanitize context declared by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Context {
    /// New or updated title (also the host's "save"/"display" and unknown tags)
    #[default]
    Title,
    /// Lookup of an existing identifier; input is returned untouched
    Query,
    /// Taxonomy term creation; enables the existing-slug short-circuit
    Term,
    /// Uploaded file name
    FileName,
}

impl Context {
    /// Parse the host's context tag
    pub fn parse(tag: &str) -> Self {
        match tag {
            "query" => Context::Query,
            "term" => Context::Term,
            "file" | "filename" => Context::FileName,
            _ => Context::Title,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Context::Title => "title",
            Context::Query => "query",
            Context::Term => "term",
            Context::FileName => "file",
        }
    }
}

impl From<&str> for Context {
    fn from(tag: &str) -> Self {
        Context::parse(tag)
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
