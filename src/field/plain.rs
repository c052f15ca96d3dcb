use crossterm::event::KeyEvent;
use serde_json::Value;

use super::input::handle_text_edit;
use crate::params::ParamsHandle;

/// Any field the selector shows but does not track. Edits keep the JSON type
/// of a saved number or bool while the text still parses as one.
#[derive(Debug, Clone)]
pub struct PlainField {
    name: Option<String>,
    label: String,
    description: Option<String>,
    params: ParamsHandle,
    buffer: String,
    saved: Option<Value>,
}

impl PlainField {
    pub fn new(name: Option<String>, label: impl Into<String>, params: ParamsHandle) -> Self {
        let saved = name.as_deref().and_then(|key| params.get(key));
        let buffer = match &saved {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        Self {
            name,
            label: label.into(),
            description: None,
            params,
            buffer,
            saved,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn params(&self) -> Option<Value> {
        self.name.as_deref().and_then(|key| self.params.get(key))
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !handle_text_edit(&mut self.buffer, key) {
            return false;
        }
        if let Some(name) = self.name.as_deref() {
            if self.buffer.is_empty() {
                self.params.remove(name);
            } else {
                self.params.insert(name, typed_value(&self.buffer, self.saved.as_ref()));
            }
        }
        true
    }
}

fn typed_value(text: &str, saved: Option<&Value>) -> Value {
    let parsed = match saved {
        Some(Value::Number(_)) => serde_json::from_str::<Value>(text)
            .ok()
            .filter(Value::is_number),
        Some(Value::Bool(_)) => text.parse::<bool>().ok().map(Value::Bool),
        _ => None,
    };
    parsed.unwrap_or_else(|| Value::String(text.to_string()))
}
