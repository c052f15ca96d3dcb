use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::SelectorError;

use super::schema::{ChoiceFieldSchema, ChoiceKind, SelectorSchema};

#[derive(Debug, Deserialize)]
struct RawSelector {
    name: Option<String>,
    label: Option<String>,
    description: Option<String>,
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: Option<String>,
    #[serde(rename = "type", default)]
    field_type: String,
    widget: Option<String>,
    label: Option<String>,
    description: Option<String>,
}

/// Maps host type and widget names onto the field variants the selector adapts.
/// Widget matches take precedence over type matches.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    widgets: IndexMap<String, ChoiceKind>,
    types: IndexMap<String, ChoiceKind>,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        let mut registry = Self {
            widgets: IndexMap::new(),
            types: IndexMap::new(),
        };
        registry.register_type("image", ChoiceKind::Image);
        registry.register_widget("colorSelector", ChoiceKind::Color);
        registry
    }
}

impl FieldRegistry {
    pub fn register_type(&mut self, name: impl Into<String>, kind: ChoiceKind) -> &mut Self {
        self.types.insert(name.into(), kind);
        self
    }

    pub fn register_widget(&mut self, name: impl Into<String>, kind: ChoiceKind) -> &mut Self {
        self.widgets.insert(name.into(), kind);
        self
    }

    pub fn resolve(&self, field_type: &str, widget: Option<&str>) -> ChoiceKind {
        widget
            .and_then(|name| self.widgets.get(name))
            .or_else(|| self.types.get(field_type))
            .cloned()
            .unwrap_or_else(|| ChoiceKind::Other(field_type.to_string()))
    }
}

/// Parse a selector group document using the default field registry.
pub fn parse_selector_schema(value: &Value) -> Result<SelectorSchema, SelectorError> {
    parse_selector_schema_with(value, &FieldRegistry::default())
}

pub fn parse_selector_schema_with(
    value: &Value,
    registry: &FieldRegistry,
) -> Result<SelectorSchema, SelectorError> {
    let raw = RawSelector::deserialize(value)?;
    if raw.fields.is_empty() {
        return Err(SelectorError::NoFields);
    }

    let fields = raw
        .fields
        .into_iter()
        .enumerate()
        .map(|(idx, field)| {
            let kind = registry.resolve(&field.field_type, field.widget.as_deref());
            let name = field.name.filter(|name| !name.is_empty());
            let label = field
                .label
                .filter(|label| !label.is_empty())
                .or_else(|| name.clone())
                .unwrap_or_else(|| format!("Option {}", idx + 1));
            ChoiceFieldSchema {
                name,
                label,
                description: field.description,
                kind,
            }
        })
        .collect();

    Ok(SelectorSchema {
        name: raw.name,
        label: raw.label,
        description: raw.description,
        fields,
    })
}
