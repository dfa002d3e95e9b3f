use super::{Platform, discord, plain_text};
use crate::escape::{escape_attr_for, escape_text};
use crate::target::{Dialect, FormatTarget};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextInputStyle {
    #[default]
    Short,
    Paragraph,
}

impl TextInputStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            TextInputStyle::Short => "short",
            TextInputStyle::Paragraph => "paragraph",
        }
    }
}

/// A form field shown inside a [`Modal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInput {
    pub action_id: String,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub style: TextInputStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub default_value: String,
}

fn default_required() -> bool {
    true
}

impl TextInput {
    pub fn new(action_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            label: label.into(),
            placeholder: String::new(),
            style: TextInputStyle::Short,
            min_length: None,
            max_length: None,
            required: true,
            default_value: String::new(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_style(mut self, style: TextInputStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_length(mut self, min_length: Option<u32>, max_length: Option<u32>) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    // zero means "no limit" on every platform
    fn limits(&self) -> (Option<u32>, Option<u32>) {
        (
            self.min_length.filter(|len| *len > 0),
            self.max_length.filter(|len| *len > 0),
        )
    }

    pub fn render(&self, target: &FormatTarget) -> Value {
        match Platform::of(target) {
            Platform::Slack => self.render_slack(),
            Platform::Discord => self.render_discord(),
            Platform::Symphony => Value::String(self.render_messageml()),
            Platform::Generic => self.render_generic(),
        }
    }

    fn render_slack(&self) -> Value {
        let mut element = json!({
            "type": "plain_text_input",
            "action_id": self.action_id,
            "multiline": self.style == TextInputStyle::Paragraph,
        });
        if !self.placeholder.is_empty() {
            element["placeholder"] = plain_text(&self.placeholder);
        }
        let (min, max) = self.limits();
        if let Some(min) = min {
            element["min_length"] = json!(min);
        }
        if let Some(max) = max {
            element["max_length"] = json!(max);
        }
        if !self.default_value.is_empty() {
            element["initial_value"] = json!(self.default_value);
        }
        json!({
            "type": "input",
            "label": plain_text(&self.label),
            "element": element,
            "optional": !self.required,
        })
    }

    fn render_discord(&self) -> Value {
        let style = match self.style {
            TextInputStyle::Short => 1,
            TextInputStyle::Paragraph => 2,
        };
        let mut input = json!({
            "type": discord::TEXT_INPUT,
            "custom_id": self.action_id,
            "style": style,
            "label": self.label,
            "required": self.required,
        });
        if !self.placeholder.is_empty() {
            input["placeholder"] = json!(self.placeholder);
        }
        let (min, max) = self.limits();
        if let Some(min) = min {
            input["min_length"] = json!(min);
        }
        if let Some(max) = max {
            input["max_length"] = json!(max);
        }
        if !self.default_value.is_empty() {
            input["value"] = json!(self.default_value);
        }
        // modal inputs must sit in their own action row
        json!({
            "type": discord::ACTION_ROW,
            "components": [input],
        })
    }

    pub(crate) fn render_messageml(&self) -> String {
        let dialect = Dialect::MessageMl;
        let tag = match self.style {
            TextInputStyle::Paragraph => "textarea",
            TextInputStyle::Short => "text-field",
        };
        let required = if self.required { " required=\"true\"" } else { "" };
        let placeholder = if self.placeholder.is_empty() {
            String::new()
        } else {
            format!(
                " placeholder=\"{}\"",
                escape_attr_for(&self.placeholder, dialect)
            )
        };
        format!(
            "<{tag} name=\"{}\"{required}{placeholder}>{}</{tag}>",
            escape_attr_for(&self.action_id, dialect),
            escape_text(&self.default_value, dialect)
        )
    }

    fn render_generic(&self) -> Value {
        json!({
            "type": "text_input",
            "action_id": self.action_id,
            "label": self.label,
            "style": self.style.as_str(),
            "required": self.required,
        })
    }
}

/// A dialog collecting [`TextInput`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modal {
    pub callback_id: String,
    pub title: String,
    #[serde(default = "default_submit")]
    pub submit_label: String,
    #[serde(default = "default_close")]
    pub close_label: String,
    #[serde(default)]
    pub inputs: Vec<TextInput>,
}

fn default_submit() -> String {
    "Submit".to_string()
}

fn default_close() -> String {
    "Cancel".to_string()
}

impl Modal {
    pub fn new(callback_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            callback_id: callback_id.into(),
            title: title.into(),
            submit_label: default_submit(),
            close_label: default_close(),
            inputs: Vec::new(),
        }
    }

    pub fn with_labels(mut self, submit: impl Into<String>, close: impl Into<String>) -> Self {
        self.submit_label = submit.into();
        self.close_label = close.into();
        self
    }

    pub fn with_input(mut self, input: TextInput) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn add_text_input(&mut self, input: TextInput) -> &mut Self {
        self.inputs.push(input);
        self
    }

    pub fn render(&self, target: &FormatTarget) -> Value {
        let inputs = || self.inputs.iter().map(|input| input.render(target));
        match Platform::of(target) {
            Platform::Slack => json!({
                "type": "modal",
                "callback_id": self.callback_id,
                "title": plain_text(&self.title),
                "submit": plain_text(&self.submit_label),
                "close": plain_text(&self.close_label),
                "blocks": inputs().collect::<Vec<_>>(),
            }),
            Platform::Discord => json!({
                "type": discord::MODAL_RESPONSE,
                "custom_id": self.callback_id,
                "title": self.title,
                "components": inputs().collect::<Vec<_>>(),
            }),
            Platform::Symphony => Value::String(self.render_messageml()),
            Platform::Generic => json!({
                "type": "modal",
                "callback_id": self.callback_id,
                "title": self.title,
                "inputs": inputs().collect::<Vec<_>>(),
            }),
        }
    }

    fn render_messageml(&self) -> String {
        let dialect = Dialect::MessageMl;
        let mut lines = vec![
            format!(
                "<form id=\"{}\">",
                escape_attr_for(&self.callback_id, dialect)
            ),
            format!("<h3>{}</h3>", escape_text(&self.title, dialect)),
        ];
        lines.extend(self.inputs.iter().map(TextInput::render_messageml));
        lines.push(format!(
            "<button name=\"submit\" type=\"action\">{}</button>",
            escape_text(&self.submit_label, dialect)
        ));
        lines.push("</form>".to_string());
        lines.join("\n")
    }
}
