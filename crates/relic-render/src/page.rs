use std::fmt::Write;

use relic_types::{Channel, RenderedMessage};

use crate::config::RenderConfig;
use crate::href::encode_query_value;

/// The requested channel if the archive has it, otherwise the default.
pub fn select_channel<'a>(channels: &[Channel], requested: Option<&'a str>, config: &'a RenderConfig) -> &'a str {
    match requested {
        Some(name) if !name.is_empty() && channels.iter().any(|c| c.name == name) => name,
        _ => &config.default_channel,
    }
}

/// Sidebar entries. Archived public channels are greyed out.
pub fn channel_listing(channels: &[Channel], active: &str) -> String {
    let mut html = String::new();
    for channel in channels {
        let mut classes = Vec::new();
        if channel.name == active {
            classes.push("active");
        }
        if channel.is_archived && !channel.is_private {
            classes.push("inactive");
        }
        let _ = write!(
            html,
            r#"<li class="{}"><a href="?channel={}">{}</a></li>"#,
            classes.join(" "),
            encode_query_value(&channel.name),
            html_escape::encode_text(&channel.name)
        );
    }
    html
}

pub fn message_html(message: &RenderedMessage, config: &RenderConfig) -> String {
    let mut html = String::from(r#"<div class="message">"#);
    let _ = write!(
        html,
        r#"<span class="message_username">{}</span>"#,
        html_escape::encode_text(&message.author_name)
    );
    if let Some(at) = message.posted_at {
        let _ = write!(
            html,
            r#"<span class="message_time">{}</span>"#,
            at.format(&config.timestamp_format)
        );
    }
    if let Some(content) = &message.content_html {
        let _ = write!(html, r#"<div class="message_content">{}</div>"#, content);
    }
    if let Some(media) = &message.media_html {
        html.push_str(media);
    }
    if let Some(reactions) = &message.reaction_html {
        html.push_str(reactions);
    }
    html.push_str("</div>");
    html
}

/// Assemble the complete document for one channel view.
pub fn render_page(config: &RenderConfig, active: &str, listing: &str, messages: &[RenderedMessage]) -> String {
    let history: String = messages.iter().map(|m| message_html(m, config)).collect();

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link rel="stylesheet" href="{stylesheet}">
    <title>{workspace} · #{active}</title>
  </head>
  <body>
    <header class="header">
      <div class="team-menu"><a href="/">{workspace}</a></div>
      <div class="channel-menu">
        <span class="channel-menu_name"><span class="channel-menu_prefix">#</span> {active}</span>
      </div>
    </header>
    <main class="main">
      <div class="listings">
        <div class="listings_channels">
          <h2 class="listings_header">Channels</h2>
          <ul class="channel_list">{listing}</ul>
        </div>
      </div>
      <div class="message-history">{history}</div>
    </main>
  </body>
</html>
"#,
        stylesheet = html_escape::encode_double_quoted_attribute(&config.stylesheet_href),
        workspace = html_escape::encode_text(&config.workspace_name),
        active = html_escape::encode_text(active),
        listing = listing,
        history = history,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(name: &str, is_archived: bool, is_private: bool) -> Channel {
        Channel {
            name: name.into(),
            is_archived,
            is_private,
        }
    }

    #[test]
    fn unknown_or_missing_channel_falls_back_to_default() {
        let config = RenderConfig::default();
        let channels = vec![channel("general", false, false), channel("random", false, false)];

        assert_eq!(select_channel(&channels, Some("random"), &config), "random");
        assert_eq!(select_channel(&channels, Some("nope"), &config), "general");
        assert_eq!(select_channel(&channels, Some(""), &config), "general");
        assert_eq!(select_channel(&channels, None, &config), "general");
    }

    #[test]
    fn listing_marks_active_and_archived_channels() {
        let channels = vec![
            channel("general", false, false),
            channel("old", true, false),
            channel("secret", true, true),
        ];
        assert_eq!(
            channel_listing(&channels, "old"),
            concat!(
                r#"<li class=""><a href="?channel=general">general</a></li>"#,
                r#"<li class="active inactive"><a href="?channel=old">old</a></li>"#,
                r#"<li class=""><a href="?channel=secret">secret</a></li>"#
            )
        );
    }

    #[test]
    fn listing_links_are_percent_encoded() {
        let channels = vec![channel("q&a #2", false, false)];
        assert_eq!(
            channel_listing(&channels, "general"),
            r#"<li class=""><a href="?channel=q%26a%20%232">q&amp;a #2</a></li>"#
        );
    }

    #[test]
    fn message_omits_absent_facets() {
        let config = RenderConfig::default();
        let message = RenderedMessage {
            author_name: "alice".into(),
            posted_at: None,
            content_html: Some("hi".into()),
            media_html: None,
            reaction_html: None,
        };
        assert_eq!(
            message_html(&message, &config),
            r#"<div class="message"><span class="message_username">alice</span><div class="message_content">hi</div></div>"#
        );
    }

    #[test]
    fn page_includes_header_listing_and_history() {
        let config = RenderConfig {
            workspace_name: "Acme & Co".into(),
            ..RenderConfig::default()
        };
        let message = RenderedMessage {
            author_name: "bob".into(),
            posted_at: chrono::DateTime::from_timestamp(0, 0),
            content_html: None,
            media_html: None,
            reaction_html: None,
        };
        let page = render_page(&config, "general", "<li>x</li>", &[message]);

        assert!(page.starts_with("<!doctype html>"));
        assert!(page.contains(r#"<a href="/">Acme &amp; Co</a>"#));
        assert!(page.contains(r#"<ul class="channel_list"><li>x</li></ul>"#));
        assert!(page.contains(r#"<span class="message_time">1970-01-01 00:00</span>"#));
        assert!(page.contains(r#"<link rel="stylesheet" href="/stylesheet.css">"#));
    }
}
