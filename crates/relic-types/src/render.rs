use chrono::{DateTime, Utc};

// -- Messages --

/// One message ready for the page layer. Facets that have nothing to show
/// are `None` and are left out of the page entirely.
#[derive(Debug, Clone)]
pub struct RenderedMessage {
    pub author_name: String,
    pub posted_at: Option<DateTime<Utc>>,
    pub content_html: Option<String>,
    pub media_html: Option<String>,
    pub reaction_html: Option<String>,
}

// -- Reactions --

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionGroup {
    pub glyph: String,
    pub count: u32,
    /// Reactor display names, in the order the archive lists them.
    pub reactors: Vec<String>,
}
