use relic_types::{ReactionGroup, ReactionRecord};
use tracing::warn;

use crate::directory::Directory;
use crate::emoji::EmojiTable;

/// Pair each reaction's glyph with the names of the people who left it.
///
/// `None` when the message has no reactions at all, which the page renders
/// as nothing. A reaction whose user list is empty still produces a group.
pub fn aggregate(
    records: Option<&[ReactionRecord]>,
    directory: &Directory,
    emoji: &EmojiTable,
) -> Option<Vec<ReactionGroup>> {
    let records = records.filter(|r| !r.is_empty())?;

    let groups = records
        .iter()
        .map(|record| {
            let glyph = emoji.resolve(&record.name).unwrap_or_else(|e| {
                warn!("Reaction :{}: shown as text: {}", record.name, e);
                record.name.clone()
            });
            ReactionGroup {
                glyph,
                count: record.count,
                reactors: record
                    .users
                    .iter()
                    .map(|id| directory.display_name(id).to_string())
                    .collect(),
            }
        })
        .collect();

    Some(groups)
}

pub fn to_html(groups: &[ReactionGroup]) -> String {
    let mut html = String::from(r#"<div class="message-reactions">"#);
    for group in groups {
        html.push_str(r#"<div class="message-reaction"><span class="message-reaction-emoji">"#);
        html.push_str(&html_escape::encode_text(&group.glyph));
        html.push_str(r#"</span><span class="message-reaction-count">"#);
        html.push_str(&group.count.to_string());
        html.push_str(r#"</span><ul class="message-reaction-list">"#);
        for name in &group.reactors {
            html.push_str("<li>");
            html.push_str(&html_escape::encode_text(name));
            html.push_str("</li>");
        }
        html.push_str("</ul></div>");
    }
    html.push_str("</div>");
    html
}
