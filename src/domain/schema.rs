/// Group field hosting the exclusive choices.
#[derive(Debug, Clone)]
pub struct SelectorSchema {
    pub name: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<ChoiceFieldSchema>,
}

impl SelectorSchema {
    pub fn field_names(&self) -> impl Iterator<Item = Option<&str>> {
        self.fields.iter().map(|field| field.name.as_deref())
    }

    pub fn title(&self) -> &str {
        self.label
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Background")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceKind {
    Image,
    Color,
    /// Any field type the selector does not adapt; keeps the host's type name.
    Other(String),
}

#[derive(Debug, Clone)]
pub struct ChoiceFieldSchema {
    pub name: Option<String>,
    pub label: String,
    pub description: Option<String>,
    pub kind: ChoiceKind,
}
