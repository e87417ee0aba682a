/// Look-and-feel settings for one render pass.
///
/// Everything the page layer would otherwise hardcode lives here so the
/// server can fill it from its environment.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Shown in the page header.
    pub workspace_name: String,
    /// Channel shown when none (or an unknown one) is requested.
    pub default_channel: String,
    /// CSS class of the span that wraps a resolved mention.
    pub mention_class: String,
    /// URL prefix under which the server exposes archive media.
    pub public_prefix: String,
    pub stylesheet_href: String,
    /// chrono format string for message times.
    pub timestamp_format: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            workspace_name: "SLACK BACKUP".into(),
            default_channel: "general".into(),
            mention_class: "fw-bold".into(),
            public_prefix: "/public".into(),
            stylesheet_href: "/stylesheet.css".into(),
            timestamp_format: "%Y-%m-%d %H:%M".into(),
        }
    }
}
