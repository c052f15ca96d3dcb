mod parser;
mod schema;

pub use parser::{FieldRegistry, parse_selector_schema, parse_selector_schema_with};
pub use schema::{ChoiceFieldSchema, ChoiceKind, SelectorSchema};
