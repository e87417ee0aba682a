/// Relic shared types
///
/// `models` holds the records read from an exported workspace archive,
/// `render` the values handed from the message pipeline to the page layer.

pub mod models;
pub mod render;

pub use models::{Channel, EmojiAlias, FileRef, Message, ReactionRecord, User};
pub use render::{ReactionGroup, RenderedMessage};
