use relic_types::{Message, RenderedMessage};
use tracing::{debug, trace};

use crate::config::RenderConfig;
use crate::directory::Directory;
use crate::emoji::EmojiTable;
use crate::markup;
use crate::media;
use crate::mentions::MentionResolver;
use crate::reactions;

/// Renders the history of one channel. Build one per request.
pub struct ChannelRenderer<'a> {
    config: &'a RenderConfig,
    directory: &'a Directory,
    emoji: &'a EmojiTable,
    mentions: MentionResolver,
    channel: &'a str,
}

impl<'a> ChannelRenderer<'a> {
    pub fn new(
        config: &'a RenderConfig,
        directory: &'a Directory,
        emoji: &'a EmojiTable,
        channel: &'a str,
    ) -> Self {
        Self {
            config,
            directory,
            emoji,
            mentions: MentionResolver::new(directory, &config.mention_class),
            channel,
        }
    }

    /// Render every message, keeping archive order.
    pub fn render_history(&self, history: &[Message]) -> Vec<RenderedMessage> {
        let rendered: Vec<RenderedMessage> = history.iter().map(|m| self.render_message(m)).collect();
        debug!("Rendered {} messages for #{}", rendered.len(), self.channel);
        rendered
    }

    pub fn render_message(&self, message: &Message) -> RenderedMessage {
        let author_name = self
            .directory
            .display_name(message.user.as_deref().unwrap_or_default())
            .to_string();

        let content_html = message
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(|text| self.mentions.resolve(&markup::to_html(Some(text))));

        let media_html = self.render_files(message);

        let reaction_html = reactions::aggregate(message.reactions.as_deref(), self.directory, self.emoji)
            .map(|groups| reactions::to_html(&groups));

        // Unfurls and bot cards are not rendered.
        if let Some(attachments) = &message.attachments {
            trace!("Skipping {} attachments on message {}", attachments.len(), message.ts);
        }

        RenderedMessage {
            author_name,
            posted_at: message.posted_at(),
            content_html,
            media_html,
            reaction_html,
        }
    }

    fn render_files(&self, message: &Message) -> Option<String> {
        let files = message.files.as_deref()?;
        let subfolder = message.subfolder();

        let html: String = files
            .iter()
            .filter_map(|file| media::classify(file, self.channel, subfolder, &self.config.public_prefix))
            .map(|item| item.to_html())
            .collect();

        (!html.is_empty()).then_some(html)
    }
}
