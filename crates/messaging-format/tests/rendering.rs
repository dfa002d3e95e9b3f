use messaging_format::{
    FormatTarget, FormattedImage, MessageBuilder, Render, Table, TableAlignment, TextNode,
};

fn all_targets() -> Vec<FormatTarget> {
    vec![
        FormatTarget::PLAINTEXT,
        FormatTarget::MARKDOWN,
        FormatTarget::SLACK_MARKDOWN,
        FormatTarget::DISCORD_MARKDOWN,
        FormatTarget::HTML,
        FormatTarget::SYMPHONY_MESSAGEML,
        FormatTarget::new("teams-adaptive"),
    ]
}

fn sample_document() -> TextNode {
    TextNode::document([
        TextNode::heading("Release <notes>", 2),
        TextNode::paragraph([
            TextNode::text("Fixes for "),
            TextNode::user_mention("U42", "ann"),
            TextNode::text(" in "),
            TextNode::channel_mention("C7", "dev"),
        ]),
        TextNode::unordered_list(["a & b", "${c}"]),
        TextNode::quote(TextNode::italic("quoted")),
        TextNode::code_block("let x = 1 < 2;", "rust"),
        TextNode::horizontal_rule(),
        TextNode::emoji("tada"),
        TextNode::link_with_title("docs", "https://x.io/?a=1&b=2", "Docs"),
    ])
}

#[test]
fn rendering_is_deterministic() {
    let doc = sample_document();
    for target in all_targets() {
        assert_eq!(doc.render(&target), doc.render(&target), "target {target}");
    }
}

#[test]
fn html_text_never_leaks_angle_brackets() {
    for content in ["<script>", "a < b > c", "&<>&", "<<>>"] {
        let rendered = TextNode::text(content).render(&FormatTarget::HTML);
        assert!(!rendered.contains('<'), "{rendered}");
        assert!(!rendered.contains('>'), "{rendered}");
    }
}

#[test]
fn messageml_neutralizes_template_sequences() {
    let node = TextNode::text("${x} and #{y}");
    let rendered = node.render(&FormatTarget::SYMPHONY_MESSAGEML);
    assert!(!rendered.contains("${"));
    assert!(!rendered.contains("#{"));
    assert_eq!(node.render(&FormatTarget::MARKDOWN), "${x} and #{y}");
}

#[test]
fn raw_passes_through_everywhere() {
    let raw = TextNode::raw(r#"<mention uid="1"/>"#);
    for target in all_targets() {
        assert_eq!(raw.render(&target), r#"<mention uid="1"/>"#);
    }
}

#[test]
fn bold_diverges_between_dialects() {
    let bold = TextNode::bold(TextNode::text("hi"));
    assert_eq!(bold.render(&FormatTarget::MARKDOWN), "**hi**");
    assert_eq!(bold.render(&FormatTarget::DISCORD_MARKDOWN), "**hi**");
    assert_eq!(bold.render(&FormatTarget::SLACK_MARKDOWN), "*hi*");
    assert_eq!(bold.render(&FormatTarget::HTML), "<b>hi</b>");
    assert_eq!(bold.render(&FormatTarget::PLAINTEXT), "hi");
}

#[test]
fn unicode_emoji_wins_on_every_target() {
    let emoji = TextNode::Emoji {
        name: "party".to_string(),
        unicode: "🎉".to_string(),
        custom_id: "123".to_string(),
    };
    for target in all_targets() {
        assert_eq!(emoji.render(&target), "🎉");
    }
}

#[test]
fn extension_targets_render_as_plaintext() {
    let doc = sample_document();
    assert_eq!(
        doc.render(&FormatTarget::new("teams-adaptive")),
        doc.render(&FormatTarget::PLAINTEXT)
    );
    let table = Table::from_data(vec![vec!["x", "y"]], Some(vec!["a".into(), "b".into()]));
    assert_eq!(
        table.render(&FormatTarget::new("irc-ansi")),
        table.render(&FormatTarget::PLAINTEXT)
    );
}

#[test]
fn document_per_target() {
    let doc = TextNode::document([
        TextNode::heading("Hi", 1),
        TextNode::paragraph([TextNode::text("a "), TextNode::bold("b")]),
    ]);
    assert_eq!(doc.render(&FormatTarget::MARKDOWN), "# Hi\na **b**\n");
    assert_eq!(doc.render(&FormatTarget::SLACK_MARKDOWN), "*Hi*\na *b*\n");
    assert_eq!(
        doc.render(&FormatTarget::HTML),
        "<div><h1>Hi</h1><p>a <b>b</b></p></div>"
    );
    assert_eq!(
        doc.render(&FormatTarget::SYMPHONY_MESSAGEML),
        "<h1>Hi</h1><p>a <b>b</b></p>"
    );
    assert_eq!(doc.render(&FormatTarget::PLAINTEXT), "HI\na b\n");
}

#[test]
fn table_width_pads_every_cell() {
    let table = Table::from_data(
        vec![vec!["Alice", "30"], vec!["Bob", "5"]],
        Some(vec!["Name".into(), "Age".into()]),
    );
    assert_eq!(table.column_widths()[1], 3);
    let rendered = table.render(&FormatTarget::MARKDOWN);
    let cells: Vec<&str> = rendered
        .lines()
        .filter(|line| !line.starts_with("|-"))
        .map(|line| line.trim_matches('|').split('|').nth(1).unwrap_or_default())
        .collect();
    assert_eq!(cells, vec![" Age ", " 30  ", " 5   "]);
}

#[test]
fn table_alignment_markers() {
    let table = Table::from_data(vec![vec!["1", "2", "3"]], Some(vec!["l".into(), "c".into(), "r".into()]))
        .with_alignments(vec![
            TableAlignment::Left,
            TableAlignment::Center,
            TableAlignment::Right,
        ]);
    let separator = table
        .render(&FormatTarget::MARKDOWN)
        .lines()
        .nth(1)
        .map(str::to_string);
    assert_eq!(separator.as_deref(), Some("|---|:-:|-:|"));
}

#[test]
fn empty_table_is_empty_everywhere() {
    for target in all_targets() {
        assert_eq!(Table::new().render(&target), "");
    }
}

#[test]
fn builder_freeze_copies_state() {
    let mut builder = MessageBuilder::new();
    builder.text("a").bold("b");
    let first = builder.build();
    builder.text("c");
    let second = builder.build();
    assert_eq!(first.render(&FormatTarget::MARKDOWN), "a**b**");
    assert_eq!(second.render(&FormatTarget::MARKDOWN), "a**b**c");
}

#[test]
fn concatenation_leaves_operands_untouched() {
    let greeting = TextNode::text("Hello, ");
    let name = TextNode::bold("world");
    let line = &greeting + &name + "!";
    assert_eq!(line.render(&FormatTarget::SLACK_MARKDOWN), "Hello, *world*!");
    assert_eq!(greeting.render(&FormatTarget::MARKDOWN), "Hello, ");
    assert_eq!(name.render(&FormatTarget::MARKDOWN), "**world**");
}

#[test]
fn cross_platform_message() {
    let mut builder = MessageBuilder::new();
    builder
        .heading("Status", 2)
        .text("Build ")
        .bold("passed")
        .line_break()
        .node(FormattedImage::new("https://x.io/badge.svg", "badge"));
    let message = builder.build();
    assert_eq!(
        message.render(&FormatTarget::MARKDOWN),
        "## Status\nBuild **passed**\n![badge](https://x.io/badge.svg)"
    );
    assert_eq!(
        message.render(&FormatTarget::SLACK_MARKDOWN),
        "*Status*\nBuild *passed*\nhttps://x.io/badge.svg"
    );
    assert_eq!(
        message.render(&FormatTarget::HTML),
        "<h2>Status</h2>Build <b>passed</b><br/><img src=\"https://x.io/badge.svg\" alt=\"badge\"/>"
    );
    assert_eq!(
        message.render(&FormatTarget::PLAINTEXT),
        "STATUS\nBuild passed\nbadge: https://x.io/badge.svg"
    );
}
