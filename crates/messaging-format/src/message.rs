use crate::attachment::{FormattedAttachment, FormattedImage};
use crate::escape::{escape_html, escape_reserved};
use crate::render::Render;
use crate::resolution::{FormatRegistry, global_registry};
use crate::table::Table;
use crate::target::{Dialect, FormatTarget};
use crate::text::TextNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One top-level piece of a [`FormattedMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    Text { node: TextNode },
    Table { table: Table },
    Image { image: FormattedImage },
    Attachment { attachment: FormattedAttachment },
}

impl Render for ContentItem {
    fn render(&self, target: &FormatTarget) -> String {
        match self {
            ContentItem::Text { node } => node.render(target),
            ContentItem::Table { table } => table.render(target),
            ContentItem::Image { image } => image.render(target),
            ContentItem::Attachment { attachment } => attachment.render(target),
        }
    }
}

impl From<TextNode> for ContentItem {
    fn from(node: TextNode) -> Self {
        ContentItem::Text { node }
    }
}

impl From<&str> for ContentItem {
    fn from(value: &str) -> Self {
        ContentItem::Text {
            node: TextNode::text(value),
        }
    }
}

impl From<String> for ContentItem {
    fn from(value: String) -> Self {
        ContentItem::Text {
            node: TextNode::text(value),
        }
    }
}

impl From<Table> for ContentItem {
    fn from(table: Table) -> Self {
        ContentItem::Table { table }
    }
}

impl From<FormattedImage> for ContentItem {
    fn from(image: FormattedImage) -> Self {
        ContentItem::Image { image }
    }
}

impl From<FormattedAttachment> for ContentItem {
    fn from(attachment: FormattedAttachment) -> Self {
        ContentItem::Attachment { attachment }
    }
}

/// A renderable message: ordered content, file attachments and metadata.
///
/// Rendering borrows the message immutably, so one value can be rendered for
/// several targets from several threads. The `add_*` helpers take `self` by
/// value and return the extended message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedMessage {
    #[serde(default)]
    content: Vec<ContentItem>,
    #[serde(default)]
    attachments: Vec<FormattedAttachment>,
    #[serde(default)]
    metadata: BTreeMap<String, Value>,
}

impl FormattedMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        content: Vec<ContentItem>,
        attachments: Vec<FormattedAttachment>,
        metadata: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            content,
            attachments,
            metadata,
        }
    }

    pub fn content(&self) -> &[ContentItem] {
        &self.content
    }

    /// File attachments. They are delivered alongside the rendered body, not inside it.
    pub fn attachments(&self) -> &[FormattedAttachment] {
        &self.attachments
    }

    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Render the content in the platform's preferred format, per the process-wide registry.
    pub fn render_for(&self, platform: &str) -> String {
        self.render_with(global_registry(), platform)
    }

    pub fn render_with(&self, registry: &FormatRegistry, platform: &str) -> String {
        self.render(&registry.resolve(platform))
    }

    pub fn append(mut self, item: impl Into<ContentItem>) -> Self {
        self.content.push(item.into());
        self
    }

    pub fn add_text(self, text: impl Into<String>) -> Self {
        self.append(TextNode::text(text))
    }

    pub fn add_bold(self, text: impl Into<String>) -> Self {
        self.append(TextNode::bold(TextNode::text(text)))
    }

    pub fn add_italic(self, text: impl Into<String>) -> Self {
        self.append(TextNode::italic(TextNode::text(text)))
    }

    pub fn add_code(self, code: impl Into<String>) -> Self {
        self.append(TextNode::code(code))
    }

    pub fn add_code_block(self, code: impl Into<String>, language: impl Into<String>) -> Self {
        self.append(TextNode::code_block(code, language))
    }

    pub fn add_link(self, text: impl Into<String>, url: impl Into<String>) -> Self {
        self.append(TextNode::link(text, url))
    }

    pub fn add_line_break(self) -> Self {
        self.append(TextNode::line_break())
    }

    pub fn add_table(self, table: Table) -> Self {
        self.append(table)
    }

    pub fn add_image(self, image: FormattedImage) -> Self {
        self.append(image)
    }

    pub fn add_mention(self, user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.append(TextNode::user_mention(user_id, display_name))
    }

    /// Target-native markup, inserted without escaping.
    pub fn add_raw(self, content: impl Into<String>) -> Self {
        self.append(TextNode::raw(content))
    }

    /// Attach a file. Unlike [`append`](Self::append) with an attachment, this does
    /// not render a link in the body.
    pub fn add_attachment(mut self, attachment: FormattedAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl Render for FormattedMessage {
    /// Concatenation of every content item, with no separators.
    fn render(&self, target: &FormatTarget) -> String {
        self.content.render(target)
    }
}

/// Escape a plain string for `target` without building a message.
///
/// `plaintext` and the markup dialects are returned untouched. The two flags
/// toggle HTML escaping (html and MessageML) and the MessageML `${`/`#{` rule.
pub fn format_message(
    content: &str,
    target: &FormatTarget,
    escape_html_chars: bool,
    escape_templates: bool,
) -> String {
    let dialect = target.dialect();
    let mut text = content.to_string();
    if dialect.is_html_family() && escape_html_chars {
        text = escape_html(&text);
    }
    if dialect == Dialect::MessageMl && escape_templates {
        text = escape_reserved(&text);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_concatenates_without_separators() {
        let message = FormattedMessage::new()
            .add_text("Hello, ")
            .add_bold("world")
            .add_text("!");
        assert_eq!(message.render(&FormatTarget::MARKDOWN), "Hello, **world**!");
        assert_eq!(
            message.render(&FormatTarget::SLACK_MARKDOWN),
            "Hello, *world*!"
        );
    }

    #[test]
    fn render_with_uses_registry() {
        let registry = FormatRegistry::with_builtins();
        let message = FormattedMessage::new().add_bold("Hello");
        assert_eq!(message.render_with(&registry, "slack"), "*Hello*");
        assert_eq!(message.render_with(&registry, "discord"), "**Hello**");
        assert_eq!(message.render_with(&registry, "unknown"), "**Hello**");
        assert_eq!(message.render_for("matrix"), "<b>Hello</b>");
    }

    #[test]
    fn raw_content_is_not_escaped() {
        let message = FormattedMessage::new()
            .add_text("Check ")
            .add_raw("<hash tag=\"fmt\"/>")
            .add_text("<ok>");
        assert_eq!(
            message.render(&FormatTarget::SYMPHONY_MESSAGEML),
            "Check <hash tag=\"fmt\"/>&lt;ok&gt;"
        );
    }

    #[test]
    fn attachments_stay_out_of_body() {
        let message = FormattedMessage::new()
            .add_text("see file")
            .add_attachment(FormattedAttachment::new("a.txt", "https://x.io/a.txt"))
            .with_metadata("source", "test")
            .with_metadata("ids", json!(["1", "2"]));
        assert_eq!(message.render(&FormatTarget::MARKDOWN), "see file");
        assert_eq!(message.attachments().len(), 1);
        assert_eq!(message.metadata()["ids"], json!(["1", "2"]));
    }

    #[test]
    fn mixed_content_items() {
        let message = FormattedMessage::new()
            .add_image(FormattedImage::new("https://x.io/i.png", "pic"))
            .append(FormattedAttachment::new("f", "https://x.io/f"))
            .add_mention("U1", "ann");
        assert_eq!(
            message.render(&FormatTarget::SLACK_MARKDOWN),
            "https://x.io/i.png<https://x.io/f|f><@U1>"
        );
        assert_eq!(message.content().len(), 3);
    }

    #[test]
    fn format_message_escapes_per_target() {
        let raw = "a < b ${x}";
        assert_eq!(format_message(raw, &FormatTarget::PLAINTEXT, true, true), raw);
        assert_eq!(format_message(raw, &FormatTarget::MARKDOWN, true, true), raw);
        assert_eq!(
            format_message(raw, &FormatTarget::HTML, true, true),
            "a &lt; b ${x}"
        );
        assert_eq!(
            format_message(raw, &FormatTarget::SYMPHONY_MESSAGEML, true, true),
            "a &lt; b &#36;{x}"
        );
        assert_eq!(
            format_message(raw, &FormatTarget::SYMPHONY_MESSAGEML, false, true),
            "a < b &#36;{x}"
        );
    }

    #[test]
    fn serde_round_trip_keeps_content_tags() {
        let message = FormattedMessage::new()
            .add_text("hi")
            .add_table(Table::from_data(vec![vec!["1"]], None));
        let value = serde_json::to_value(&message).expect("serialize");
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][1]["type"], "table");
        let decoded: FormattedMessage = serde_json::from_value(value).expect("deserialize");
        assert_eq!(decoded, message);
    }
}
