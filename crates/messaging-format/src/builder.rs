use crate::attachment::{FormattedAttachment, FormattedImage};
use crate::message::{ContentItem, FormattedMessage};
use crate::table::Table;
use crate::text::TextNode;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Fluent, single-owner accumulator for a [`FormattedMessage`].
///
/// Every method appends exactly one unit. [`build`](Self::build) copies the
/// accumulated state, so the builder stays usable afterwards:
///
/// ```
/// use messaging_format::{FormatTarget, MessageBuilder, Render};
///
/// let mut builder = MessageBuilder::new();
/// builder.text("a").bold("b");
/// let first = builder.build();
/// let second = builder.text("c").build();
/// assert_eq!(first.render(&FormatTarget::MARKDOWN), "a**b**");
/// assert_eq!(second.render(&FormatTarget::MARKDOWN), "a**b**c");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    content: Vec<ContentItem>,
    attachments: Vec<FormattedAttachment>,
    metadata: BTreeMap<String, Value>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, item: impl Into<ContentItem>) -> &mut Self {
        self.content.push(item.into());
        self
    }

    pub fn text(&mut self, content: impl Into<String>) -> &mut Self {
        self.push(TextNode::text(content))
    }

    pub fn bold(&mut self, content: impl Into<String>) -> &mut Self {
        self.push(TextNode::bold(TextNode::text(content)))
    }

    pub fn italic(&mut self, content: impl Into<String>) -> &mut Self {
        self.push(TextNode::italic(TextNode::text(content)))
    }

    pub fn strikethrough(&mut self, content: impl Into<String>) -> &mut Self {
        self.push(TextNode::strikethrough(TextNode::text(content)))
    }

    pub fn code(&mut self, content: impl Into<String>) -> &mut Self {
        self.push(TextNode::code(content))
    }

    pub fn code_block(
        &mut self,
        content: impl Into<String>,
        language: impl Into<String>,
    ) -> &mut Self {
        self.push(TextNode::code_block(content, language))
    }

    /// Link; an empty `title` is omitted from the output.
    pub fn link(
        &mut self,
        text: impl Into<String>,
        url: impl Into<String>,
        title: impl Into<String>,
    ) -> &mut Self {
        self.push(TextNode::link_with_title(text, url, title))
    }

    pub fn quote(&mut self, content: impl Into<String>) -> &mut Self {
        self.push(TextNode::quote(TextNode::text(content)))
    }

    pub fn heading(&mut self, content: impl Into<String>, level: u8) -> &mut Self {
        self.push(TextNode::heading(TextNode::text(content), level))
    }

    pub fn line_break(&mut self) -> &mut Self {
        self.push(TextNode::line_break())
    }

    pub fn paragraph(&mut self, content: impl Into<String>) -> &mut Self {
        self.push(TextNode::paragraph([TextNode::text(content)]))
    }

    pub fn bullet_list<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(TextNode::unordered_list(
            items.into_iter().map(|item| TextNode::text(item)),
        ))
    }

    pub fn numbered_list<I, S>(&mut self, items: I, start: u32) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(TextNode::ordered_list(
            items.into_iter().map(|item| TextNode::text(item)),
            start,
        ))
    }

    /// Table from row values with an optional header row.
    pub fn table<R, C, S>(&mut self, data: R, headers: Option<Vec<String>>) -> &mut Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Table::from_data(data, headers))
    }

    /// Table from column-keyed records; see [`Table::from_records`].
    pub fn table_from_dicts(
        &mut self,
        records: &[Map<String, Value>],
        columns: Option<Vec<String>>,
    ) -> &mut Self {
        self.push(Table::from_records(records, columns))
    }

    pub fn image(
        &mut self,
        url: impl Into<String>,
        alt_text: impl Into<String>,
        title: impl Into<String>,
    ) -> &mut Self {
        self.push(FormattedImage::new(url, alt_text).with_title(title))
    }

    /// Add a file attachment. It travels with the message but is not rendered in the body.
    pub fn attachment(
        &mut self,
        filename: impl Into<String>,
        url: impl Into<String>,
        content_type: impl Into<String>,
    ) -> &mut Self {
        self.attachments
            .push(FormattedAttachment::new(filename, url).with_content_type(content_type));
        self
    }

    /// Append a pre-built node, table, image or inline attachment.
    pub fn node(&mut self, node: impl Into<ContentItem>) -> &mut Self {
        self.push(node)
    }

    pub fn metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Freeze a copy of the accumulated content.
    pub fn build(&self) -> FormattedMessage {
        FormattedMessage::from_parts(
            self.content.clone(),
            self.attachments.clone(),
            self.metadata.clone(),
        )
    }
}
