//! Rich-text node tree.
//!
//! A [`TextNode`] is an immutable tree; rendering is implemented in
//! [`render`](self::render) via the crate-level [`Render`](crate::Render) trait.

mod render;

use crate::render::Render;
use crate::target::FormatTarget;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Highest heading level; levels are clamped into `1..=MAX_HEADING_LEVEL`.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// A single formatted-text element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextNode {
    /// Plain text, escaped for markup targets that need it.
    Text { content: String },
    /// Target-native markup inserted verbatim on every target.
    Raw { content: String },
    Bold { child: Box<TextNode> },
    Italic { child: Box<TextNode> },
    Strikethrough { child: Box<TextNode> },
    Underline { child: Box<TextNode> },
    Code { content: String },
    CodeBlock {
        content: String,
        #[serde(default)]
        language: String,
    },
    Link {
        text: String,
        url: String,
        #[serde(default)]
        title: String,
    },
    Quote { child: Box<TextNode> },
    Paragraph { children: Vec<TextNode> },
    LineBreak,
    HorizontalRule,
    ListItem(ListItem),
    UnorderedList { items: Vec<ListItem> },
    OrderedList {
        items: Vec<ListItem>,
        #[serde(default = "default_list_start")]
        start: u32,
    },
    Heading {
        child: Box<TextNode>,
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    UserMention {
        user_id: String,
        #[serde(default)]
        display_name: String,
    },
    ChannelMention {
        channel_id: String,
        #[serde(default)]
        display_name: String,
    },
    Emoji {
        name: String,
        #[serde(default)]
        unicode: String,
        #[serde(default)]
        custom_id: String,
    },
    Span { children: Vec<TextNode> },
    Document { children: Vec<TextNode> },
}

fn default_list_start() -> u32 {
    1
}

fn default_heading_level() -> u8 {
    1
}

/// One entry of an ordered or unordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub child: Box<TextNode>,
}

impl ListItem {
    pub fn new(child: impl Into<TextNode>) -> Self {
        Self {
            child: Box::new(child.into()),
        }
    }
}

fn into_list_item(node: TextNode) -> ListItem {
    match node {
        TextNode::ListItem(item) => item,
        other => ListItem {
            child: Box::new(other),
        },
    }
}

impl TextNode {
    pub fn text(content: impl Into<String>) -> Self {
        TextNode::Text {
            content: content.into(),
        }
    }

    pub fn raw(content: impl Into<String>) -> Self {
        TextNode::Raw {
            content: content.into(),
        }
    }

    pub fn bold(child: impl Into<TextNode>) -> Self {
        TextNode::Bold {
            child: Box::new(child.into()),
        }
    }

    pub fn italic(child: impl Into<TextNode>) -> Self {
        TextNode::Italic {
            child: Box::new(child.into()),
        }
    }

    pub fn strikethrough(child: impl Into<TextNode>) -> Self {
        TextNode::Strikethrough {
            child: Box::new(child.into()),
        }
    }

    pub fn underline(child: impl Into<TextNode>) -> Self {
        TextNode::Underline {
            child: Box::new(child.into()),
        }
    }

    pub fn code(content: impl Into<String>) -> Self {
        TextNode::Code {
            content: content.into(),
        }
    }

    pub fn code_block(content: impl Into<String>, language: impl Into<String>) -> Self {
        TextNode::CodeBlock {
            content: content.into(),
            language: language.into(),
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        TextNode::Link {
            text: text.into(),
            url: url.into(),
            title: String::new(),
        }
    }

    pub fn link_with_title(
        text: impl Into<String>,
        url: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        TextNode::Link {
            text: text.into(),
            url: url.into(),
            title: title.into(),
        }
    }

    pub fn quote(child: impl Into<TextNode>) -> Self {
        TextNode::Quote {
            child: Box::new(child.into()),
        }
    }

    pub fn paragraph<I, T>(children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TextNode>,
    {
        TextNode::Paragraph {
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    pub fn line_break() -> Self {
        TextNode::LineBreak
    }

    pub fn horizontal_rule() -> Self {
        TextNode::HorizontalRule
    }

    pub fn list_item(child: impl Into<TextNode>) -> Self {
        TextNode::ListItem(ListItem::new(child))
    }

    pub fn unordered_list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TextNode>,
    {
        TextNode::UnorderedList {
            items: items
                .into_iter()
                .map(|item| into_list_item(item.into()))
                .collect(),
        }
    }

    pub fn ordered_list<I, T>(items: I, start: u32) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TextNode>,
    {
        TextNode::OrderedList {
            items: items
                .into_iter()
                .map(|item| into_list_item(item.into()))
                .collect(),
            start,
        }
    }

    /// Heading; `level` is clamped into `1..=6`.
    pub fn heading(child: impl Into<TextNode>, level: u8) -> Self {
        TextNode::Heading {
            child: Box::new(child.into()),
            level: level.clamp(1, MAX_HEADING_LEVEL),
        }
    }

    pub fn user_mention(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        TextNode::UserMention {
            user_id: user_id.into(),
            display_name: display_name.into(),
        }
    }

    pub fn channel_mention(
        channel_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        TextNode::ChannelMention {
            channel_id: channel_id.into(),
            display_name: display_name.into(),
        }
    }

    /// Emoji by short name, rendered as `:name:` or the platform's id syntax.
    pub fn emoji(name: impl Into<String>) -> Self {
        TextNode::Emoji {
            name: name.into(),
            unicode: String::new(),
            custom_id: String::new(),
        }
    }

    /// Emoji with a literal glyph, which wins on every target.
    pub fn emoji_unicode(name: impl Into<String>, unicode: impl Into<String>) -> Self {
        TextNode::Emoji {
            name: name.into(),
            unicode: unicode.into(),
            custom_id: String::new(),
        }
    }

    /// Platform-specific custom emoji (`<:name:id>` on Discord).
    pub fn custom_emoji(name: impl Into<String>, custom_id: impl Into<String>) -> Self {
        TextNode::Emoji {
            name: name.into(),
            unicode: String::new(),
            custom_id: custom_id.into(),
        }
    }

    pub fn span<I, T>(children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TextNode>,
    {
        TextNode::Span {
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    pub fn document<I, T>(children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TextNode>,
    {
        TextNode::Document {
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a child to a container node (span, document or paragraph).
    ///
    /// Non-container nodes are combined with `node` into a new span, the same as `+`.
    pub fn append(self, node: impl Into<TextNode>) -> TextNode {
        let node = node.into();
        match self {
            TextNode::Document { mut children } => {
                children.push(node);
                TextNode::Document { children }
            }
            TextNode::Paragraph { mut children } => {
                children.push(node);
                TextNode::Paragraph { children }
            }
            other => other + node,
        }
    }

    /// Child nodes of container variants; empty for leaves.
    pub fn children(&self) -> &[TextNode] {
        match self {
            TextNode::Paragraph { children }
            | TextNode::Span { children }
            | TextNode::Document { children } => children,
            TextNode::Bold { child }
            | TextNode::Italic { child }
            | TextNode::Strikethrough { child }
            | TextNode::Underline { child }
            | TextNode::Quote { child }
            | TextNode::Heading { child, .. } => std::slice::from_ref(&**child),
            TextNode::ListItem(item) => std::slice::from_ref(&*item.child),
            _ => &[],
        }
    }
}

impl From<&str> for TextNode {
    fn from(value: &str) -> Self {
        TextNode::text(value)
    }
}

impl From<String> for TextNode {
    fn from(value: String) -> Self {
        TextNode::text(value)
    }
}

impl From<&TextNode> for TextNode {
    fn from(value: &TextNode) -> Self {
        value.clone()
    }
}

impl From<ListItem> for TextNode {
    fn from(value: ListItem) -> Self {
        TextNode::ListItem(value)
    }
}

impl<T: Into<TextNode>> Add<T> for TextNode {
    type Output = TextNode;

    /// Concatenate into a span. A span on the left is extended rather than nested.
    fn add(self, rhs: T) -> TextNode {
        let rhs = rhs.into();
        match self {
            TextNode::Span { mut children } => {
                children.push(rhs);
                TextNode::Span { children }
            }
            other => TextNode::Span {
                children: vec![other, rhs],
            },
        }
    }
}

impl<T: Into<TextNode>> Add<T> for &TextNode {
    type Output = TextNode;

    fn add(self, rhs: T) -> TextNode {
        self.clone() + rhs
    }
}

impl fmt::Display for TextNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&FormatTarget::PLAINTEXT))
    }
}
