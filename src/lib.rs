#![deny(rust_2018_idioms)]

pub mod domain;
pub mod error;
pub mod field;
pub mod io;
pub mod options;
pub mod params;
pub mod presentation;
mod runtime;
pub mod selector;

pub use domain::{
    ChoiceFieldSchema, ChoiceKind, FieldRegistry, SelectorSchema, parse_selector_schema,
};
pub use error::SelectorError;
pub use field::{ChildField, DefaultProcessor, SemanticsProcessor};
pub use options::{SelectorHints, SelectorOptions};
pub use params::ParamsHandle;
pub use runtime::{SelectorUI, UiOptions};
pub use selector::{OptionKind, RadioSelector, SelectorEvent, StoredOption};

pub mod prelude {
    pub use super::io::{DocumentFormat, ParamsSink, SaveOptions};
    pub use super::{
        DefaultProcessor, ParamsHandle, RadioSelector, SelectorEvent, SelectorOptions, SelectorUI,
        StoredOption, UiOptions,
    };
}
