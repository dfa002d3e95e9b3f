use crate::escape::{escape_attr_for, escape_text};
use crate::render::Render;
use crate::target::{Dialect, FormatTarget};
use serde::{Deserialize, Serialize};

/// A file linked from a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedAttachment {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default)]
    pub content_type: String,
}

impl FormattedAttachment {
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

impl Render for FormattedAttachment {
    fn render(&self, target: &FormatTarget) -> String {
        match target.dialect().or_plain() {
            Dialect::Markdown | Dialect::Discord => format!("[{}]({})", self.filename, self.url),
            Dialect::Slack => format!("<{}|{}>", self.url, self.filename),
            dialect @ (Dialect::Html | Dialect::MessageMl) => format!(
                "<a href=\"{}\">{}</a>",
                escape_attr_for(&self.url, dialect),
                escape_text(&self.filename, dialect)
            ),
            _ => format!("{}: {}", self.filename, self.url),
        }
    }
}

/// An inline image. Alt text falls back to `"image"` when blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedImage {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl FormattedImage {
    pub fn new(url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt_text: alt_text.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    fn alt(&self) -> &str {
        if self.alt_text.is_empty() {
            "image"
        } else {
            &self.alt_text
        }
    }
}

impl Render for FormattedImage {
    fn render(&self, target: &FormatTarget) -> String {
        let alt = self.alt();
        match target.dialect().or_plain() {
            Dialect::Markdown | Dialect::Discord if self.title.is_empty() => {
                format!("![{alt}]({})", self.url)
            }
            Dialect::Markdown | Dialect::Discord => {
                format!("![{alt}]({} \"{}\")", self.url, self.title)
            }
            // unfurled by the client
            Dialect::Slack => self.url.clone(),
            Dialect::Html => {
                let mut attrs = vec![
                    format!("src=\"{}\"", escape_attr_for(&self.url, Dialect::Html)),
                    format!("alt=\"{}\"", escape_attr_for(alt, Dialect::Html)),
                ];
                if !self.title.is_empty() {
                    attrs.push(format!(
                        "title=\"{}\"",
                        escape_attr_for(&self.title, Dialect::Html)
                    ));
                }
                if let Some(width) = self.width.filter(|width| *width > 0) {
                    attrs.push(format!("width=\"{width}\""));
                }
                if let Some(height) = self.height.filter(|height| *height > 0) {
                    attrs.push(format!("height=\"{height}\""));
                }
                format!("<img {}/>", attrs.join(" "))
            }
            Dialect::MessageMl => format!(
                "<card><header>{}</header><body><img src=\"{}\"/></body></card>",
                escape_text(alt, Dialect::MessageMl),
                escape_attr_for(&self.url, Dialect::MessageMl)
            ),
            _ => format!("{alt}: {}", self.url),
        }
    }
}
