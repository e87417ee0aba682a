use relic_render::page::{channel_listing, render_page, select_channel};
use relic_render::{ChannelRenderer, Directory, EmojiTable, RenderConfig};
use relic_types::{Channel, EmojiAlias, Message, User};

fn load<T: serde::de::DeserializeOwned>(json: &str) -> T {
    serde_json::from_str(json).unwrap()
}

#[test]
fn renders_a_channel_page_end_to_end() {
    let config = RenderConfig {
        workspace_name: "Acme".into(),
        ..RenderConfig::default()
    };
    let channels: Vec<Channel> = load(
        r#"[{"name":"general","is_archived":false,"is_private":false},
            {"name":"design","is_archived":true,"is_private":false}]"#,
    );
    let users: Vec<User> = load(r#"[{"id":"U1","name":"alice"},{"id":"U2","name":"bob"}]"#);
    let emoji: Vec<EmojiAlias> = load(
        r#"[{"name":"wave","char":"base::tone2"},{"name":"base","char":"👋"},{"name":"tone2","char":"🏽"}]"#,
    );
    let history: Vec<Message> = load(
        r#"[
            {"user":"U1","text":"hello <@U2>, *welcome*","ts":"1600000000.000100",
             "reactions":[{"name":"wave","users":["U2","U1"],"count":2}]},
            {"user":"U2","text":"thanks","ts":"1600000060.000200","client_msg_id":"c-2",
             "files":[{"url_private_file":"design/mock.png"},{"url_private_file":"design/spec.pdf"}]}
        ]"#,
    );

    let active = select_channel(&channels, Some("design"), &config);
    assert_eq!(active, "design");

    let directory = Directory::new(users);
    let table = EmojiTable::new(emoji);
    let renderer = ChannelRenderer::new(&config, &directory, &table, active);
    let messages = renderer.render_history(&history);
    let page = render_page(&config, active, &channel_listing(&channels, active), &messages);

    let first = page.find("hello").unwrap();
    let second = page.find("thanks").unwrap();
    assert!(first < second, "messages keep archive order");

    assert!(page.contains(r#"hello <span class="fw-bold">@bob</span>, <strong>welcome</strong>"#));
    assert!(page.contains(r#"<span class="message-reaction-emoji">👋🏽</span>"#));
    assert!(page.contains("<li>bob</li><li>alice</li>"));
    assert!(page.contains(r#"<img src="/public/design/c-2/mock.png" alt="mock.png">"#));
    assert!(page.contains(r#"<a href="/public/design/c-2/spec.pdf" target="_blank">spec.pdf</a>"#));
    assert!(page.contains(r#"<li class="active inactive"><a href="?channel=design">design</a></li>"#));
    assert_eq!(page.matches(r#"class="message-reactions""#).count(), 1);
}
