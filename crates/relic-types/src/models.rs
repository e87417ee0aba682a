//! Archive record types. These map directly to the JSON files of an
//! exported workspace and are never written back.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    /// Display name shown for authors, mentions and reactors.
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub name: String,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_private: bool,
}

/// One row of the emoji table: `char` is a literal glyph, another emoji
/// name, or several names joined by `::` (skin tone modifiers).
#[derive(Debug, Clone, Deserialize)]
pub struct EmojiAlias {
    pub name: String,
    #[serde(rename = "char")]
    pub glyph: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Author id. Bot and system messages carry none.
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    pub ts: String,
    #[serde(default)]
    pub client_msg_id: Option<String>,
    #[serde(default)]
    pub files: Option<Vec<FileRef>>,
    #[serde(default)]
    pub reactions: Option<Vec<ReactionRecord>>,
    #[serde(default)]
    pub blocks: Option<Vec<Value>>,
    /// Link unfurls and bot cards. Kept so they can be reported, not rendered.
    #[serde(default)]
    pub attachments: Option<Vec<Value>>,
}

impl Message {
    /// Storage directory key for this message's uploaded files.
    pub fn subfolder(&self) -> &str {
        self.client_msg_id.as_deref().unwrap_or(&self.ts)
    }

    /// Parses the `seconds.micros` timestamp. `None` if it is not numeric.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        let (secs, frac) = self.ts.split_once('.').unwrap_or((&self.ts, "0"));
        let secs: i64 = secs.parse().ok()?;
        let micros: u32 = format!("{:0<6}", frac).get(..6)?.parse().ok()?;
        DateTime::from_timestamp(secs, micros * 1_000)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileRef {
    /// Archive-relative path of the downloaded file, `<channel>/<name>`.
    #[serde(default)]
    pub url_private_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReactionRecord {
    /// Emoji short-code without the surrounding colons.
    pub name: String,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub count: u32,
}
