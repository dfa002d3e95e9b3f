//! Platform-independent rich-text messages.
//! Build a document once from [`TextNode`]s, tables, images and attachments, then
//! render it for markdown, Slack mrkdwn, Discord markdown, HTML, Symphony
//! MessageML, plain text or any extension target.

pub mod attachment;
pub mod builder;
pub mod components;
pub mod convert;
pub mod errors;
pub mod escape;
pub mod message;
pub mod render;
pub mod resolution;
pub mod table;
pub mod target;
pub mod text;

pub use attachment::{FormattedAttachment, FormattedImage};
pub use builder::MessageBuilder;
pub use components::{
    ActionRow, Button, ButtonStyle, ComponentContainer, Modal, RowComponent, SelectMenu,
    SelectOption, TextInput, TextInputStyle,
};
pub use convert::{IncomingMessage, markup_to_plain_text};
pub use errors::FormatError;
pub use message::{ContentItem, FormattedMessage, format_message};
pub use messaging_format_config::{FormatConfigError, FormatRuntimeConfig};
pub use render::Render;
pub use resolution::{FormatRegistry, lookup_format, register_format, resolve_format};
pub use table::{Table, TableAlignment, TableCell, TableRow};
pub use target::FormatTarget;
pub use text::{ListItem, TextNode};
