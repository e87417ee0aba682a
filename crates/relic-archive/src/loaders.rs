use std::fs;
use std::path::{Path, PathBuf};

use relic_types::{Channel, EmojiAlias, Message, User};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ArchiveError, Result};
use crate::Archive;

const USERS_FILE: &str = "users.json";
const CHANNELS_FILE: &str = "channels.json";
const HISTORY_FILE: &str = "all.json";

impl Archive {
    // -- Directory --

    pub fn users(&self) -> Result<Vec<User>> {
        read_json(&self.root.join(USERS_FILE))
    }

    pub fn channels(&self) -> Result<Vec<Channel>> {
        read_json(&self.root.join(CHANNELS_FILE))
    }

    // -- History --

    /// Full chronological history of one channel.
    ///
    /// Reads `<channel>/all.json` when present. Otherwise every day file in
    /// the channel directory is read in file-name order, which is date order
    /// for `YYYY-MM-DD.json` names.
    pub fn history(&self, channel: &str) -> Result<Vec<Message>> {
        let dir = self.channel_dir(channel)?;

        let combined = dir.join(HISTORY_FILE);
        if combined.is_file() {
            return read_json(&combined);
        }

        let day_files = list_day_files(&dir)?;
        if day_files.is_empty() {
            return Err(ArchiveError::MissingHistory(channel.to_string()));
        }

        let mut messages = Vec::new();
        for path in &day_files {
            let mut day: Vec<Message> = read_json(path)?;
            messages.append(&mut day);
        }
        debug!(
            "Merged {} day files into {} messages for #{}",
            day_files.len(),
            messages.len(),
            channel
        );
        Ok(messages)
    }

    fn channel_dir(&self, channel: &str) -> Result<PathBuf> {
        // Channel names come from the query string; keep them inside the root.
        if channel.is_empty()
            || channel == "."
            || channel == ".."
            || channel.contains(['/', '\\'])
        {
            return Err(ArchiveError::InvalidChannel(channel.to_string()));
        }
        Ok(self.root.join(channel))
    }
}

/// Load the emoji table shipped with the viewer (not part of the archive).
pub fn load_emoji_table(path: &Path) -> Result<Vec<EmojiAlias>> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|source| ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArchiveError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn list_day_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
        Err(source) => {
            return Err(ArchiveError::Io {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ArchiveError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, contents: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn archive() -> (TempDir, Archive) {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "users.json",
            r#"[{"id":"U1","name":"alice"},{"id":"U2","name":"bob","real_name":"Bob B"}]"#,
        );
        write(
            tmp.path(),
            "channels.json",
            r#"[{"name":"general","is_archived":false,"is_private":false},{"name":"old","is_archived":true}]"#,
        );
        let archive = Archive::open(tmp.path()).unwrap();
        (tmp, archive)
    }

    #[test]
    fn open_rejects_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = Archive::open(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, ArchiveError::NotADirectory(_)));
    }

    #[test]
    fn loads_users_and_channels() {
        let (_tmp, archive) = archive();

        let users = archive.users().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].name, "bob");

        let channels = archive.channels().unwrap();
        assert_eq!(channels.len(), 2);
        assert!(channels[1].is_archived);
        assert!(!channels[1].is_private);
    }

    #[test]
    fn history_prefers_all_json() {
        let (tmp, archive) = archive();
        write(tmp.path(), "general/all.json", r#"[{"ts":"1.0","text":"combined"}]"#);
        write(tmp.path(), "general/2021-01-01.json", r#"[{"ts":"2.0","text":"daily"}]"#);

        let history = archive.history("general").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text.as_deref(), Some("combined"));
    }

    #[test]
    fn history_merges_day_files_in_date_order() {
        let (tmp, archive) = archive();
        write(tmp.path(), "general/2021-01-02.json", r#"[{"ts":"3.0","text":"third"}]"#);
        write(
            tmp.path(),
            "general/2021-01-01.json",
            r#"[{"ts":"1.0","text":"first"},{"ts":"2.0","text":"second"}]"#,
        );
        write(tmp.path(), "general/notes.txt", "ignored");

        let texts: Vec<_> = archive
            .history("general")
            .unwrap()
            .into_iter()
            .filter_map(|m| m.text)
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn missing_history_is_an_error() {
        let (_tmp, archive) = archive();
        let err = archive.history("general").unwrap_err();
        assert!(matches!(err, ArchiveError::MissingHistory(ref c) if c == "general"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let (tmp, archive) = archive();
        write(tmp.path(), "general/all.json", "[{not json");
        let err = archive.history("general").unwrap_err();
        assert!(matches!(err, ArchiveError::Parse { .. }));
    }

    #[test]
    fn channel_names_cannot_escape_root() {
        let (_tmp, archive) = archive();
        for name in ["", "..", "../etc", "a/b", "a\\b"] {
            let err = archive.history(name).unwrap_err();
            assert!(matches!(err, ArchiveError::InvalidChannel(_)), "{name:?}");
        }
    }

    #[test]
    fn emoji_table_loads_from_any_path() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "emoji.json",
            r#"[{"name":"wave","char":"👋","category":"people"}]"#,
        );
        let table = load_emoji_table(&tmp.path().join("emoji.json")).unwrap();
        assert_eq!(table[0].name, "wave");
        assert_eq!(table[0].glyph, "👋");

        let err = load_emoji_table(&tmp.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ArchiveError::Io { .. }));
    }
}
