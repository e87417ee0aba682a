use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use relic_archive::{ArchiveError, load_emoji_table};
use relic_render::RenderConfig;
use relic_types::EmojiAlias;

/// Workspace-specific rows (skin tones, aliases, hyphenated names) compiled
/// into the binary. They take precedence over the `emojis` short-codes.
const BUNDLED_OVERLAY: &str = include_str!("../assets/emoji.json");

/// Where the emoji table is read from on every request.
#[derive(Debug, Clone)]
pub enum EmojiSource {
    /// The overlay followed by every short-code the `emojis` crate knows.
    Bundled,
    /// A complete table in the archive's `[{name, char}]` format.
    File(PathBuf),
}

impl EmojiSource {
    pub fn load(&self) -> Result<Vec<EmojiAlias>, ArchiveError> {
        match self {
            Self::Bundled => bundled_table(),
            Self::File(path) => load_emoji_table(path),
        }
    }
}

/// Later duplicates are ignored by the renderer, so overlay rows win.
fn bundled_table() -> Result<Vec<EmojiAlias>, ArchiveError> {
    let mut table: Vec<EmojiAlias> =
        serde_json::from_str(BUNDLED_OVERLAY).map_err(|source| ArchiveError::Parse {
            path: PathBuf::from("<bundled emoji.json>"),
            source,
        })?;

    let mut hyphenated = Vec::new();
    for emoji in emojis::iter() {
        for code in emoji.shortcodes() {
            table.push(EmojiAlias {
                name: code.to_string(),
                glyph: emoji.as_str().to_string(),
            });
            // Exports spell many multi-word codes with hyphens (man-shrugging)
            if code.contains('_') {
                hyphenated.push(EmojiAlias {
                    name: code.replace('_', "-"),
                    glyph: emoji.as_str().to_string(),
                });
            }
        }
    }
    table.extend(hyphenated);

    Ok(table)
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub archive_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub emoji: EmojiSource,
    pub render: RenderConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let archive_path: PathBuf = get("RELIC_ARCHIVE_PATH")
            .ok_or_else(|| anyhow!("RELIC_ARCHIVE_PATH is unset"))?
            .into();
        let host = get("RELIC_HOST").unwrap_or_else(|| "127.0.0.1".into());
        let port: u16 = get("RELIC_PORT")
            .unwrap_or_else(|| "8889".into())
            .parse()
            .context("RELIC_PORT must be a port number")?;
        let emoji = get("RELIC_EMOJI_PATH")
            .map(|p| EmojiSource::File(p.into()))
            .unwrap_or(EmojiSource::Bundled);

        let defaults = RenderConfig::default();
        let render = RenderConfig {
            workspace_name: get("RELIC_WORKSPACE").unwrap_or(defaults.workspace_name),
            default_channel: get("RELIC_DEFAULT_CHANNEL").unwrap_or(defaults.default_channel),
            ..defaults
        };

        Ok(Self {
            archive_path,
            host,
            port,
            emoji,
            render,
        })
    }
}
