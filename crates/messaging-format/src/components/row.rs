use super::{Button, Platform, SelectMenu, discord};
use crate::target::FormatTarget;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A component that may sit in an [`ActionRow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowComponent {
    Button(Button),
    Select(SelectMenu),
}

impl RowComponent {
    pub fn render(&self, target: &FormatTarget) -> Value {
        match self {
            RowComponent::Button(button) => button.render(target),
            RowComponent::Select(select) => select.render(target),
        }
    }

    fn render_messageml(&self) -> String {
        match self {
            RowComponent::Button(button) => button.render_messageml(),
            RowComponent::Select(select) => select.render_messageml(),
        }
    }
}

impl From<Button> for RowComponent {
    fn from(value: Button) -> Self {
        RowComponent::Button(value)
    }
}

impl From<SelectMenu> for RowComponent {
    fn from(value: SelectMenu) -> Self {
        RowComponent::Select(value)
    }
}

/// Components laid out side by side, rendered as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRow {
    #[serde(default)]
    pub components: Vec<RowComponent>,
}

impl ActionRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_button(&mut self, button: Button) -> &mut Self {
        self.components.push(button.into());
        self
    }

    pub fn add_select(&mut self, select: SelectMenu) -> &mut Self {
        self.components.push(select.into());
        self
    }

    pub fn with(mut self, component: impl Into<RowComponent>) -> Self {
        self.components.push(component.into());
        self
    }

    pub fn render(&self, target: &FormatTarget) -> Value {
        match Platform::of(target) {
            Platform::Slack => json!({
                "type": "actions",
                "elements": self.render_children(target),
            }),
            Platform::Discord => json!({
                "type": discord::ACTION_ROW,
                "components": self.render_children(target),
            }),
            Platform::Symphony => Value::String(self.render_messageml()),
            Platform::Generic => json!({
                "type": "action_row",
                "components": self.render_children(target),
            }),
        }
    }

    fn render_children(&self, target: &FormatTarget) -> Vec<Value> {
        self.components
            .iter()
            .map(|component| component.render(target))
            .collect()
    }

    fn render_messageml(&self) -> String {
        self.components
            .iter()
            .map(RowComponent::render_messageml)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Top-level holder for the rows attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentContainer {
    #[serde(default)]
    pub rows: Vec<ActionRow>,
}

impl ComponentContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty row and hand it back for filling.
    pub fn add_row(&mut self) -> &mut ActionRow {
        self.rows.push(ActionRow::new());
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Add a button to the last row. A new row is started when there is none
    /// or when the last one holds a select menu.
    pub fn add_button(&mut self, button: Button) -> &mut Self {
        let needs_row = self.rows.last().is_none_or(|row| {
            row.components
                .iter()
                .any(|component| matches!(component, RowComponent::Select(_)))
        });
        if needs_row {
            self.rows.push(ActionRow::new());
        }
        if let Some(row) = self.rows.last_mut() {
            row.add_button(button);
        }
        self
    }

    /// Add a select menu on a row of its own.
    pub fn add_select(&mut self, select: SelectMenu) -> &mut Self {
        self.add_row().add_select(select);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One record per row; Symphony gets a single `{"messageml": ...}` record.
    pub fn render(&self, target: &FormatTarget) -> Vec<Value> {
        if Platform::of(target) == Platform::Symphony {
            let markup = self
                .rows
                .iter()
                .map(ActionRow::render_messageml)
                .collect::<Vec<_>>()
                .join("\n");
            return vec![json!({ "messageml": markup })];
        }
        self.rows.iter().map(|row| row.render(target)).collect()
    }
}
