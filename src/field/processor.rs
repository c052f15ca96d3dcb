use crate::domain::{ChoiceFieldSchema, ChoiceKind};
use crate::options::SelectorOptions;
use crate::params::ParamsHandle;

use super::{ChildField, ColorField, ImageField, PlainField};

/// Builds the live child fields for a selector. Implementations must return
/// exactly one child per schema entry, in schema order.
pub trait SemanticsProcessor {
    fn process(
        &self,
        fields: &[ChoiceFieldSchema],
        params: &ParamsHandle,
        options: &SelectorOptions,
    ) -> Vec<ChildField>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProcessor;

impl SemanticsProcessor for DefaultProcessor {
    fn process(
        &self,
        fields: &[ChoiceFieldSchema],
        params: &ParamsHandle,
        options: &SelectorOptions,
    ) -> Vec<ChildField> {
        fields
            .iter()
            .map(|field| {
                let name = field.name.clone();
                let description = field.description.clone();
                match &field.kind {
                    ChoiceKind::Image => ChildField::Image(
                        ImageField::new(name, field.label.clone(), params.clone())
                            .with_description(description),
                    ),
                    ChoiceKind::Color => ChildField::Color(
                        ColorField::new(
                            name,
                            field.label.clone(),
                            params.clone(),
                            options.palette.clone(),
                        )
                        .with_description(description),
                    ),
                    ChoiceKind::Other(_) => ChildField::Plain(
                        PlainField::new(name, field.label.clone(), params.clone())
                            .with_description(description),
                    ),
                }
            })
            .collect()
    }
}
