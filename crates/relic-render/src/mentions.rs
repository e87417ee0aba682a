use std::collections::HashMap;

use regex::{Captures, Regex};
use tracing::warn;

use crate::directory::Directory;

/// Rewrites `@<user-id>` tokens into styled display-name spans.
///
/// Built once per render pass. All known ids go into one regex alternation
/// (longest first), so a message is scanned a single time and replaced text
/// is never scanned again. Tags are matched and copied through unchanged, so
/// an `@<id>` inside an attribute value (a link href) is left alone.
pub struct MentionResolver {
    pattern: Option<Regex>,
    spans: HashMap<String, String>,
}

impl MentionResolver {
    pub fn new(directory: &Directory, mention_class: &str) -> Self {
        let class = html_escape::encode_double_quoted_attribute(mention_class);

        let mut spans = HashMap::new();
        for user in directory.users() {
            if user.id.is_empty() {
                continue;
            }
            spans.entry(user.id.clone()).or_insert_with(|| {
                format!(
                    r#"<span class="{}">@{}</span>"#,
                    class,
                    html_escape::encode_text(&user.name)
                )
            });
        }

        let mut ids: Vec<&str> = spans.keys().map(String::as_str).collect();
        ids.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let pattern = if ids.is_empty() {
            None
        } else {
            let alternation: Vec<String> = ids.iter().map(|id| regex::escape(id)).collect();
            match Regex::new(&format!("<[^>]*>|@({})", alternation.join("|"))) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("Mention pattern for {} users rejected: {}", ids.len(), e);
                    None
                }
            }
        };

        Self { pattern, spans }
    }

    /// Replace every mention of a known user. Unknown ids stay as raw text.
    pub fn resolve(&self, html: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return html.to_string();
        };

        pattern
            .replace_all(html, |caps: &Captures<'_>| {
                caps.get(1)
                    .and_then(|id| self.spans.get(id.as_str()))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
