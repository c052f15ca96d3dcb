//! Reads child fields into stored options.
//!
//! New field variants only need an arm here (and the capability accessors on
//! [`ChildField`]); the controller never looks at field variants.

use serde_json::Value;

use crate::field::{ChildField, FieldSignal, PathResolver, SignalSink};
use crate::params::is_truthy;

use super::store::StoredOption;

/// Option a child contributes from the params it was created with.
pub(crate) fn initial_option(child: &ChildField, resolver: &PathResolver) -> Option<StoredOption> {
    let params = child.params().filter(is_truthy)?;
    match child {
        ChildField::Image(_) => params
            .get("path")
            .and_then(Value::as_str)
            .filter(|path| !path.is_empty())
            .map(|path| StoredOption::image(resolver.resolve(path))),
        // the picker holds the parsed params; unparseable colors count as empty
        ChildField::Color(field) => field
            .color()
            .map(|color| StoredOption::color(color.to_hex_string())),
        ChildField::Plain(_) => None,
    }
}

/// `None` means the field no longer holds a value.
pub(crate) fn normalize(signal: &FieldSignal, resolver: &PathResolver) -> Option<StoredOption> {
    match signal {
        FieldSignal::File(file) => file
            .as_ref()
            .map(|file| file.path.as_str())
            .filter(|path| !path.is_empty())
            .map(|path| StoredOption::image(resolver.resolve(path))),
        FieldSignal::ColorMove(color) => color.map(|color| StoredOption::color(color.to_hex_string())),
    }
}

/// Returns `false` for fields that never report value changes.
pub(crate) fn subscribe(child: &mut ChildField, sink: SignalSink) -> bool {
    match child.notifications() {
        Some(source) => {
            source.subscribe(sink);
            true
        }
        None => false,
    }
}
