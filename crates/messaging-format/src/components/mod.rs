//! Interactive components (buttons, select menus, text inputs, modals).
//!
//! Components render to structured records rather than strings: Slack Block
//! Kit objects, Discord component objects, inline Symphony MessageML (as a JSON
//! string) and a generic record for every other target.

mod button;
mod input;
mod row;
mod select;

pub use button::{Button, ButtonStyle};
pub use input::{Modal, TextInput, TextInputStyle};
pub use row::{ActionRow, ComponentContainer, RowComponent};
pub use select::{SelectMenu, SelectOption};

use crate::target::{Dialect, FormatTarget};

/// Discord component type codes.
pub mod discord {
    pub const ACTION_ROW: u8 = 1;
    pub const BUTTON: u8 = 2;
    pub const STRING_SELECT: u8 = 3;
    pub const TEXT_INPUT: u8 = 4;
    pub const MODAL_RESPONSE: u8 = 9;
}

/// Platform families with a native component schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Platform {
    Slack,
    Discord,
    Symphony,
    Generic,
}

impl Platform {
    fn of(target: &FormatTarget) -> Self {
        match target.dialect() {
            Dialect::Slack => Platform::Slack,
            Dialect::Discord => Platform::Discord,
            Dialect::MessageMl => Platform::Symphony,
            _ => Platform::Generic,
        }
    }
}

fn plain_text(text: &str) -> serde_json::Value {
    serde_json::json!({ "type": "plain_text", "text": text })
}
