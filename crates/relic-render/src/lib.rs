/// Relic render pipeline
///
/// Turns archived message records into display-ready HTML:
/// - `markup`: message markup to HTML, mention tokens left intact
/// - `mentions`: `@<id>` tokens to display-name spans
/// - `emoji`: short-codes to glyphs through alias chains
/// - `media`: attached files to thumbnails or download links
/// - `reactions`: reaction records to glyph + reactor groups
/// - `message`: the per-message orchestration
/// - `page`: channel selection, sidebar and the full document
/// - `href`: percent-encoding for generated links

pub mod config;
pub mod directory;
pub mod emoji;
pub mod error;
pub mod href;
pub mod markup;
pub mod media;
pub mod mentions;
pub mod message;
pub mod page;
pub mod reactions;

pub use config::RenderConfig;
pub use directory::Directory;
pub use emoji::EmojiTable;
pub use error::EmojiError;
pub use media::MediaItem;
pub use mentions::MentionResolver;
pub use message::ChannelRenderer;
