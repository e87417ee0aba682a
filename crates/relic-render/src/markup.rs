//! Converts the archive's message markup into HTML.
//!
//! Supported: `*bold*`, `_italic_`, `~strike~`, `` `code` ``, fenced
//! ```` ``` ```` blocks, `>` quotes (`>>>` quotes the rest of the message),
//! and `<…>` constructs for links, channels, broadcasts and user mentions.
//! User mentions are emitted as bare `@<id>` tokens for the mention resolver.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

const FENCE: &str = "```";
const LINK_SCHEMES: &[&str] = &["http://", "https://", "mailto:", "ftp://"];

// Private-use markers around the index of a fragment that is already HTML.
const STASH_OPEN: char = '\u{E000}';
const STASH_CLOSE: char = '\u{E001}';

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("inline code pattern"));
static ANGLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^<>\n]+)>").expect("angle token pattern"));
static STASHED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}([0-9]+)\u{E001}").expect("stash pattern"));

/// Convert raw message text to an HTML fragment. `None` is treated as empty.
pub fn to_html(raw: Option<&str>) -> String {
    let text: String = raw
        .unwrap_or_default()
        .chars()
        .filter(|&c| c != STASH_OPEN && c != STASH_CLOSE)
        .collect();

    let mut html = String::with_capacity(text.len());
    let mut rest = text.as_str();

    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];
        let Some(close) = after_open.find(FENCE) else {
            break;
        };

        html.push_str(&render_blocks(rest[..open].strip_suffix('\n').unwrap_or(&rest[..open])));

        let code = &after_open[..close];
        let code = code.strip_prefix('\n').unwrap_or(code);
        let code = code.strip_suffix('\n').unwrap_or(code);
        html.push_str("<pre><code>");
        html.push_str(&escape_text(code));
        html.push_str("</code></pre>");

        rest = &after_open[close + FENCE.len()..];
        rest = rest.strip_prefix('\n').unwrap_or(rest);
    }
    html.push_str(&render_blocks(rest));

    html
}

enum Block<'a> {
    Line(&'a str),
    Quote(Vec<&'a str>),
}

/// Lines and quote blocks of a segment with no code fences in it.
fn render_blocks(segment: &str) -> String {
    if segment.is_empty() {
        return String::new();
    }

    let mut blocks: Vec<Block<'_>> = Vec::new();
    let mut quote_rest = false;

    for line in segment.split('\n') {
        let quoted = if quote_rest {
            Some(line)
        } else if let Some(body) = strip_quote_marker(line, ">>>", "&gt;&gt;&gt;") {
            quote_rest = true;
            Some(body)
        } else {
            strip_quote_marker(line, ">", "&gt;")
        };

        match quoted {
            Some(body) => {
                if let Some(Block::Quote(lines)) = blocks.last_mut() {
                    lines.push(body);
                } else {
                    blocks.push(Block::Quote(vec![body]));
                }
            }
            None => blocks.push(Block::Line(line)),
        }
    }

    let mut html = String::new();
    let mut prev_line = false;
    for block in blocks {
        match block {
            Block::Line(line) => {
                if prev_line {
                    html.push_str("<br>");
                }
                html.push_str(&inline(line));
                prev_line = true;
            }
            Block::Quote(lines) => {
                let body: Vec<String> = lines.into_iter().map(inline).collect();
                html.push_str("<blockquote>");
                html.push_str(&body.join("<br>"));
                html.push_str("</blockquote>");
                prev_line = false;
            }
        }
    }
    html
}

fn strip_quote_marker<'a>(line: &'a str, raw: &str, encoded: &str) -> Option<&'a str> {
    let body = line.strip_prefix(encoded).or_else(|| line.strip_prefix(raw))?;
    Some(body.strip_prefix(' ').unwrap_or(body))
}

/// Inline formatting for a single line.
fn inline(line: &str) -> String {
    let mut stash = Vec::new();
    let mut protected = String::with_capacity(line.len());
    let mut last = 0;

    for caps in INLINE_CODE.captures_iter(line) {
        let Some(m) = caps.get(0) else { continue };
        protected.push_str(&protect_angles(&line[last..m.start()], &mut stash));
        let code = format!("<code>{}</code>", escape_text(&caps[1]));
        protected.push_str(&stash_fragment(&mut stash, code));
        last = m.end();
    }
    protected.push_str(&protect_angles(&line[last..], &mut stash));

    let emphasized = emphasize(&protected);

    STASHED
        .replace_all(&emphasized, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|idx| stash.get(idx))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}

/// Escape plain text and swap every recognised `<…>` construct for a marker.
fn protect_angles(text: &str, stash: &mut Vec<String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in ANGLE.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        out.push_str(&escape_text(&text[last..m.start()]));
        match render_angle(&caps[1]) {
            Some(html) => out.push_str(&stash_fragment(stash, html)),
            None => out.push_str(&escape_text(m.as_str())),
        }
        last = m.end();
    }
    out.push_str(&escape_text(&text[last..]));
    out
}

fn stash_fragment(stash: &mut Vec<String>, html: String) -> String {
    stash.push(html);
    format!("{STASH_OPEN}{}{STASH_CLOSE}", stash.len() - 1)
}

fn render_angle(inner: &str) -> Option<String> {
    let (target, label) = match inner.split_once('|') {
        Some((target, label)) => (target, Some(label)),
        None => (inner, None),
    };

    if let Some(id) = target.strip_prefix('@') {
        // Left bare so the mention resolver can find it.
        return Some(format!("@{}", escape_text(id)));
    }
    if let Some(channel_id) = target.strip_prefix('#') {
        return Some(format!("#{}", escape_text(label.unwrap_or(channel_id))));
    }
    if let Some(command) = target.strip_prefix('!') {
        return Some(match label {
            Some(label) => escape_text(label),
            None => {
                let keyword = command.split('^').next().unwrap_or(command);
                format!("@{}", escape_text(keyword))
            }
        });
    }

    let lower = target.to_ascii_lowercase();
    if !LINK_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return None;
    }

    let href = html_escape::decode_html_entities(target);
    let text = match label {
        Some(label) => escape_text(label),
        None => escape_text(target.strip_prefix("mailto:").unwrap_or(target)),
    };
    Some(format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        html_escape::encode_double_quoted_attribute(&href),
        text
    ))
}

/// Archive text arrives with `&`, `<` and `>` entity-encoded. Decode first so
/// the output is escaped exactly once.
fn escape_text(text: &str) -> String {
    let decoded: Cow<'_, str> = html_escape::decode_html_entities(text);
    html_escape::encode_text(&decoded).into_owned()
}

fn emphasis_tag(delimiter: char) -> Option<&'static str> {
    match delimiter {
        '*' => Some("strong"),
        '_' => Some("em"),
        '~' => Some("del"),
        _ => None,
    }
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric()
}

fn emphasize(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if let Some(tag) = emphasis_tag(c) {
            if let Some(close) = opens_at(&chars, i).then(|| find_close(&chars, i)).flatten() {
                let inner: String = chars[i + 1..close].iter().collect();
                out.push_str(&format!("<{tag}>{}</{tag}>", emphasize(&inner)));
                i = close + 1;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }
    out
}

fn opens_at(chars: &[char], i: usize) -> bool {
    let delimiter = chars[i];
    let boundary_before = i == 0 || !is_word(chars[i - 1]);
    boundary_before
        && chars
            .get(i + 1)
            .is_some_and(|&next| !next.is_whitespace() && next != delimiter)
}

fn find_close(chars: &[char], open: usize) -> Option<usize> {
    let delimiter = chars[open];
    (open + 2..chars.len()).find(|&j| {
        chars[j] == delimiter
            && !chars[j - 1].is_whitespace()
            && chars.get(j + 1).is_none_or(|&next| !is_word(next))
    })
}
