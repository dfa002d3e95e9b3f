use super::{ListItem, TextNode};
use crate::escape::{escape_attr_for, escape_text};
use crate::render::Render;
use crate::target::{Dialect, FormatTarget};

const PLAIN_RULE_WIDTH: usize = 40;

impl Render for TextNode {
    fn render(&self, target: &FormatTarget) -> String {
        render_node(self, target, target.dialect().or_plain())
    }
}

impl Render for ListItem {
    fn render(&self, target: &FormatTarget) -> String {
        self.child.render(target)
    }
}

fn render_node(node: &TextNode, target: &FormatTarget, dialect: Dialect) -> String {
    match node {
        TextNode::Text { content } => escape_text(content, dialect),
        TextNode::Raw { content } => content.clone(),
        TextNode::Bold { child } => {
            let inner = child.render(target);
            match dialect {
                Dialect::Markdown | Dialect::Discord => format!("**{inner}**"),
                Dialect::Slack => format!("*{inner}*"),
                Dialect::Html | Dialect::MessageMl => format!("<b>{inner}</b>"),
                _ => inner,
            }
        }
        TextNode::Italic { child } => {
            let inner = child.render(target);
            match dialect {
                Dialect::Markdown | Dialect::Discord => format!("*{inner}*"),
                Dialect::Slack => format!("_{inner}_"),
                Dialect::Html | Dialect::MessageMl => format!("<i>{inner}</i>"),
                _ => inner,
            }
        }
        TextNode::Strikethrough { child } => {
            let inner = child.render(target);
            match dialect {
                Dialect::Markdown | Dialect::Discord => format!("~~{inner}~~"),
                Dialect::Slack => format!("~{inner}~"),
                Dialect::Html | Dialect::MessageMl => format!("<s>{inner}</s>"),
                _ => inner,
            }
        }
        TextNode::Underline { child } => {
            let inner = child.render(target);
            match dialect {
                Dialect::Discord => format!("__{inner}__"),
                Dialect::Html | Dialect::MessageMl => format!("<u>{inner}</u>"),
                _ => inner,
            }
        }
        TextNode::Code { content } => {
            if dialect.is_markup() {
                format!("`{content}`")
            } else if dialect.is_html_family() {
                format!("<code>{}</code>", escape_text(content, dialect))
            } else {
                content.clone()
            }
        }
        TextNode::CodeBlock { content, language } => render_code_block(content, language, dialect),
        TextNode::Link { text, url, title } => render_link(text, url, title, dialect),
        TextNode::Quote { child } => {
            let inner = child.render(target);
            if dialect.is_markup() {
                inner
                    .split('\n')
                    .map(|line| format!("> {line}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            } else if dialect.is_html_family() {
                format!("<blockquote>{inner}</blockquote>")
            } else {
                inner
            }
        }
        TextNode::Paragraph { children } => {
            let inner = children.render(target);
            if dialect.is_html_family() {
                format!("<p>{inner}</p>")
            } else {
                format!("{inner}\n")
            }
        }
        TextNode::LineBreak => {
            if dialect.is_html_family() {
                "<br/>".to_string()
            } else {
                "\n".to_string()
            }
        }
        TextNode::HorizontalRule => {
            if dialect.is_markup() {
                "\n---\n".to_string()
            } else if dialect.is_html_family() {
                "<hr/>".to_string()
            } else {
                format!("\n{}\n", "-".repeat(PLAIN_RULE_WIDTH))
            }
        }
        TextNode::ListItem(item) => item.render(target),
        TextNode::UnorderedList { items } => {
            if dialect.is_html_family() {
                format!("<ul>{}</ul>", render_html_items(items, target))
            } else {
                items
                    .iter()
                    .map(|item| format!("- {}", item.render(target)))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        TextNode::OrderedList { items, start } => {
            if dialect.is_html_family() {
                let start_attr = if *start != 1 {
                    format!(" start=\"{start}\"")
                } else {
                    String::new()
                };
                format!("<ol{start_attr}>{}</ol>", render_html_items(items, target))
            } else {
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| {
                        let number = u64::from(*start) + idx as u64;
                        format!("{number}. {}", item.render(target))
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        TextNode::Heading { child, level } => {
            let inner = child.render(target);
            let level = (*level).clamp(1, super::MAX_HEADING_LEVEL);
            match dialect {
                Dialect::Markdown | Dialect::Discord => {
                    format!("{} {inner}\n", "#".repeat(usize::from(level)))
                }
                // no heading syntax in mrkdwn
                Dialect::Slack => format!("*{inner}*\n"),
                Dialect::Html | Dialect::MessageMl => format!("<h{level}>{inner}</h{level}>"),
                _ => format!("{}\n", inner.to_uppercase()),
            }
        }
        TextNode::UserMention {
            user_id,
            display_name,
        } => {
            let label = label_or_id(display_name, user_id);
            match dialect {
                Dialect::Discord | Dialect::Slack => format!("<@{user_id}>"),
                Dialect::MessageMl => {
                    format!("<mention uid=\"{}\"/>", escape_attr_for(user_id, dialect))
                }
                Dialect::Html => format!(
                    "<span class=\"mention\" data-user-id=\"{}\">@{}</span>",
                    escape_attr_for(user_id, dialect),
                    escape_text(label, dialect)
                ),
                _ => format!("@{label}"),
            }
        }
        TextNode::ChannelMention {
            channel_id,
            display_name,
        } => {
            let label = label_or_id(display_name, channel_id);
            match dialect {
                Dialect::Discord | Dialect::Slack => format!("<#{channel_id}>"),
                Dialect::Html => format!(
                    "<span class=\"channel-mention\" data-channel-id=\"{}\">#{}</span>",
                    escape_attr_for(channel_id, dialect),
                    escape_text(label, dialect)
                ),
                _ => format!("#{}", escape_text(label, dialect)),
            }
        }
        TextNode::Emoji {
            name,
            unicode,
            custom_id,
        } => {
            if !unicode.is_empty() {
                return unicode.clone();
            }
            match dialect {
                Dialect::Discord if !custom_id.is_empty() => format!("<:{name}:{custom_id}>"),
                Dialect::Html | Dialect::MessageMl => format!(
                    "<span class=\"emoji\" data-emoji=\"{}\">:{}:</span>",
                    escape_attr_for(name, dialect),
                    escape_text(name, dialect)
                ),
                _ => format!(":{name}:"),
            }
        }
        TextNode::Span { children } => children.render(target),
        TextNode::Document { children } => {
            let inner = children.render(target);
            if dialect == Dialect::Html {
                format!("<div>{inner}</div>")
            } else {
                inner
            }
        }
    }
}

fn render_code_block(content: &str, language: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::Markdown | Dialect::Discord | Dialect::Slack => {
            format!("```{language}\n{content}\n```")
        }
        // MessageML rejects <code> nested inside <pre>
        Dialect::MessageMl => format!("<pre>{}</pre>", escape_text(content, dialect)),
        Dialect::Html => {
            let class_attr = if language.is_empty() {
                String::new()
            } else {
                format!(" class=\"language-{}\"", escape_attr_for(language, dialect))
            };
            format!(
                "<pre><code{class_attr}>{}</code></pre>",
                escape_text(content, dialect)
            )
        }
        _ => content.to_string(),
    }
}

fn render_link(text: &str, url: &str, title: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::Markdown | Dialect::Discord => {
            if title.is_empty() {
                format!("[{text}]({url})")
            } else {
                format!("[{text}]({url} \"{title}\")")
            }
        }
        Dialect::Slack => format!("<{url}|{text}>"),
        Dialect::Html | Dialect::MessageMl => {
            let title_attr = if title.is_empty() {
                String::new()
            } else {
                format!(" title=\"{}\"", escape_attr_for(title, dialect))
            };
            format!(
                "<a href=\"{}\"{title_attr}>{}</a>",
                escape_attr_for(url, dialect),
                escape_text(text, dialect)
            )
        }
        _ => format!("{text} ({url})"),
    }
}

fn render_html_items(items: &[ListItem], target: &FormatTarget) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", item.render(target)))
        .collect()
}

fn label_or_id<'a>(display_name: &'a str, id: &'a str) -> &'a str {
    if display_name.is_empty() {
        id
    } else {
        display_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md() -> FormatTarget {
        FormatTarget::MARKDOWN
    }

    #[test]
    fn emphasis_per_dialect() {
        let node = TextNode::italic("x");
        assert_eq!(node.render(&md()), "*x*");
        assert_eq!(node.render(&FormatTarget::SLACK_MARKDOWN), "_x_");
        assert_eq!(node.render(&FormatTarget::HTML), "<i>x</i>");
        assert_eq!(node.render(&FormatTarget::PLAINTEXT), "x");

        let strike = TextNode::strikethrough("x");
        assert_eq!(strike.render(&FormatTarget::DISCORD_MARKDOWN), "~~x~~");
        assert_eq!(strike.render(&FormatTarget::SLACK_MARKDOWN), "~x~");
        assert_eq!(strike.render(&FormatTarget::SYMPHONY_MESSAGEML), "<s>x</s>");
    }

    #[test]
    fn underline_only_where_supported() {
        let node = TextNode::underline("x");
        assert_eq!(node.render(&FormatTarget::DISCORD_MARKDOWN), "__x__");
        assert_eq!(node.render(&FormatTarget::HTML), "<u>x</u>");
        assert_eq!(node.render(&md()), "x");
        assert_eq!(node.render(&FormatTarget::SLACK_MARKDOWN), "x");
    }

    #[test]
    fn nested_emphasis_escapes_leaf_text() {
        let node = TextNode::bold(TextNode::italic("a<b"));
        assert_eq!(node.render(&FormatTarget::HTML), "<b><i>a&lt;b</i></b>");
        assert_eq!(node.render(&md()), "***a<b***");
    }

    #[test]
    fn inline_code() {
        let node = TextNode::code("a < b");
        assert_eq!(node.render(&FormatTarget::SLACK_MARKDOWN), "`a < b`");
        assert_eq!(node.render(&FormatTarget::HTML), "<code>a &lt; b</code>");
        assert_eq!(node.render(&FormatTarget::PLAINTEXT), "a < b");
    }

    #[test]
    fn code_blocks() {
        let node = TextNode::code_block("let x = a < b;", "rust");
        assert_eq!(node.render(&md()), "```rust\nlet x = a < b;\n```");
        assert_eq!(
            node.render(&FormatTarget::HTML),
            "<pre><code class=\"language-rust\">let x = a &lt; b;</code></pre>"
        );
        assert_eq!(
            node.render(&FormatTarget::SYMPHONY_MESSAGEML),
            "<pre>let x = a &lt; b;</pre>"
        );
        assert_eq!(node.render(&FormatTarget::PLAINTEXT), "let x = a < b;");

        let bare = TextNode::code_block("x", "");
        assert_eq!(bare.render(&FormatTarget::HTML), "<pre><code>x</code></pre>");
        assert_eq!(bare.render(&md()), "```\nx\n```");
    }

    #[test]
    fn links() {
        let node = TextNode::link("Docs", "https://d.io");
        assert_eq!(node.render(&md()), "[Docs](https://d.io)");
        assert_eq!(node.render(&FormatTarget::SLACK_MARKDOWN), "<https://d.io|Docs>");
        assert_eq!(
            node.render(&FormatTarget::HTML),
            "<a href=\"https://d.io\">Docs</a>"
        );
        assert_eq!(node.render(&FormatTarget::PLAINTEXT), "Docs (https://d.io)");

        let titled = TextNode::link_with_title("Docs", "https://d.io", "Read");
        assert_eq!(titled.render(&md()), "[Docs](https://d.io \"Read\")");
        assert_eq!(
            titled.render(&FormatTarget::SYMPHONY_MESSAGEML),
            "<a href=\"https://d.io\" title=\"Read\">Docs</a>"
        );
    }

    #[test]
    fn quote_prefixes_every_line() {
        let node = TextNode::quote("one\ntwo");
        assert_eq!(node.render(&md()), "> one\n> two");
        assert_eq!(
            node.render(&FormatTarget::HTML),
            "<blockquote>one\ntwo</blockquote>"
        );
        assert_eq!(node.render(&FormatTarget::PLAINTEXT), "one\ntwo");
    }

    #[test]
    fn block_separators() {
        assert_eq!(TextNode::line_break().render(&md()), "\n");
        assert_eq!(TextNode::line_break().render(&FormatTarget::HTML), "<br/>");
        assert_eq!(TextNode::horizontal_rule().render(&md()), "\n---\n");
        assert_eq!(
            TextNode::horizontal_rule().render(&FormatTarget::SYMPHONY_MESSAGEML),
            "<hr/>"
        );
        let plain = TextNode::horizontal_rule().render(&FormatTarget::PLAINTEXT);
        assert_eq!(plain.len(), 42);
        assert!(plain.starts_with("\n---"));

        let para = TextNode::paragraph(["a", "b"]);
        assert_eq!(para.render(&md()), "ab\n");
        assert_eq!(para.render(&FormatTarget::HTML), "<p>ab</p>");
    }

    #[test]
    fn lists() {
        let bullets = TextNode::unordered_list(["a", "b"]);
        assert_eq!(bullets.render(&md()), "- a\n- b");
        assert_eq!(bullets.render(&FormatTarget::PLAINTEXT), "- a\n- b");
        assert_eq!(
            bullets.render(&FormatTarget::HTML),
            "<ul><li>a</li><li>b</li></ul>"
        );

        let numbered = TextNode::ordered_list(["a", "b"], 3);
        assert_eq!(numbered.render(&FormatTarget::SLACK_MARKDOWN), "3. a\n4. b");
        assert_eq!(
            numbered.render(&FormatTarget::HTML),
            "<ol start=\"3\"><li>a</li><li>b</li></ol>"
        );
        assert_eq!(
            TextNode::ordered_list(["a"], 1).render(&FormatTarget::HTML),
            "<ol><li>a</li></ol>"
        );
    }

    #[test]
    fn headings() {
        let node = TextNode::heading("Title", 2);
        assert_eq!(node.render(&md()), "## Title\n");
        assert_eq!(node.render(&FormatTarget::SLACK_MARKDOWN), "*Title*\n");
        assert_eq!(node.render(&FormatTarget::HTML), "<h2>Title</h2>");
        assert_eq!(node.render(&FormatTarget::PLAINTEXT), "TITLE\n");
    }

    #[test]
    fn mentions() {
        let user = TextNode::user_mention("U1", "alice");
        assert_eq!(user.render(&FormatTarget::SLACK_MARKDOWN), "<@U1>");
        assert_eq!(user.render(&FormatTarget::DISCORD_MARKDOWN), "<@U1>");
        assert_eq!(
            user.render(&FormatTarget::SYMPHONY_MESSAGEML),
            "<mention uid=\"U1\"/>"
        );
        assert_eq!(
            user.render(&FormatTarget::HTML),
            "<span class=\"mention\" data-user-id=\"U1\">@alice</span>"
        );
        assert_eq!(user.render(&md()), "@alice");
        assert_eq!(TextNode::user_mention("U1", "").render(&md()), "@U1");

        let channel = TextNode::channel_mention("C9", "general");
        assert_eq!(channel.render(&FormatTarget::SLACK_MARKDOWN), "<#C9>");
        assert_eq!(
            channel.render(&FormatTarget::HTML),
            "<span class=\"channel-mention\" data-channel-id=\"C9\">#general</span>"
        );
        assert_eq!(channel.render(&FormatTarget::new("irc-ansi")), "#general");
    }

    #[test]
    fn emoji_variants() {
        let named = TextNode::emoji("wave");
        assert_eq!(named.render(&FormatTarget::SLACK_MARKDOWN), ":wave:");
        assert_eq!(
            named.render(&FormatTarget::HTML),
            "<span class=\"emoji\" data-emoji=\"wave\">:wave:</span>"
        );
        let custom = TextNode::custom_emoji("party", "123");
        assert_eq!(
            custom.render(&FormatTarget::DISCORD_MARKDOWN),
            "<:party:123>"
        );
        assert_eq!(custom.render(&FormatTarget::SLACK_MARKDOWN), ":party:");
    }

    #[test]
    fn document_wraps_only_html() {
        let doc = TextNode::document([TextNode::text("a"), TextNode::bold("b")]);
        assert_eq!(doc.render(&FormatTarget::HTML), "<div>a<b>b</b></div>");
        assert_eq!(doc.render(&FormatTarget::SYMPHONY_MESSAGEML), "a<b>b</b>");
        assert_eq!(doc.render(&md()), "a**b**");
    }

    #[test]
    fn unknown_target_renders_as_plaintext() {
        let target = FormatTarget::new("teams-adaptive");
        let node = TextNode::bold("x") + TextNode::link("d", "u") + TextNode::heading("h", 1);
        assert_eq!(node.render(&target), node.render(&FormatTarget::PLAINTEXT));
    }
}
