use relic_types::FileRef;

use crate::href::encode_path;

/// Extensions rendered inline as pictures. Matched case-sensitively.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "heic"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaItem {
    /// Clickable thumbnail linking to the full asset.
    Image { href: String, filename: String },
    /// Plain download link labelled with the file name.
    File { href: String, filename: String },
}

pub fn is_image(filename: &str) -> bool {
    let extension = filename.rsplit('.').next().unwrap_or(filename);
    IMAGE_EXTENSIONS.contains(&extension)
}

/// Decide how one attached file is shown and where the server will find it.
///
/// The href is `<public_prefix>/<channel>/<subfolder>/<filename>`, with every
/// path segment after the prefix percent-encoded. Files
/// without a private url were never downloaded and yield `None`. Nothing is
/// checked on disk; the server answers missing files with a placeholder.
pub fn classify(file: &FileRef, channel: &str, subfolder: &str, public_prefix: &str) -> Option<MediaItem> {
    let private_url = file.url_private_file.as_deref()?;
    let filename = private_url
        .strip_prefix(channel)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(private_url);

    let href = format!(
        "{}/{}",
        public_prefix.trim_end_matches('/'),
        encode_path(&format!("{channel}/{subfolder}/{filename}"))
    );
    let filename = filename.to_string();

    Some(if is_image(&filename) {
        MediaItem::Image { href, filename }
    } else {
        MediaItem::File { href, filename }
    })
}

impl MediaItem {
    pub fn to_html(&self) -> String {
        match self {
            Self::Image { href, filename } => {
                let href = html_escape::encode_double_quoted_attribute(href);
                format!(
                    r#"<div class="message-image"><a href="{href}" target="_blank"><img src="{href}" alt="{}"></a></div>"#,
                    html_escape::encode_double_quoted_attribute(filename)
                )
            }
            Self::File { href, filename } => format!(
                r#"<div class="message-file"><a href="{}" target="_blank">{}</a></div>"#,
                html_escape::encode_double_quoted_attribute(href),
                html_escape::encode_text(filename)
            ),
        }
    }
}
