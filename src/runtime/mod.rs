//! Interactive terminal session around a single [`RadioSelector`].

mod app;
mod terminal;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::field::{DefaultProcessor, SemanticsProcessor};
use crate::options::SelectorOptions;
use crate::selector::RadioSelector;

use app::App;

#[derive(Debug, Clone)]
pub struct UiOptions {
    pub show_help: bool,
    pub confirm_exit: bool,
    /// Refuse to save while the checked choice holds no value.
    pub require_value: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            show_help: true,
            confirm_exit: true,
            require_value: false,
        }
    }
}

impl UiOptions {
    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_confirm_exit(mut self, confirm: bool) -> Self {
        self.confirm_exit = confirm;
        self
    }

    pub fn with_require_value(mut self, require: bool) -> Self {
        self.require_value = require;
        self
    }
}

/// Builder for a terminal session editing one background selector.
///
/// ```no_run
/// use radio_selector::SelectorUI;
/// use serde_json::json;
///
/// let schema = json!({"fields": [
///     {"name": "image", "type": "image"},
///     {"name": "color", "widget": "colorSelector"}
/// ]});
/// let params = SelectorUI::new(schema, json!({})).run()?;
/// println!("{params}");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct SelectorUI {
    schema: Value,
    params: Value,
    title: Option<String>,
    options: UiOptions,
    selector_options: SelectorOptions,
    processor: Box<dyn SemanticsProcessor>,
}

impl SelectorUI {
    pub fn new(schema: Value, params: Value) -> Self {
        Self {
            schema,
            params,
            title: None,
            options: UiOptions::default(),
            selector_options: SelectorOptions::default(),
            processor: Box::new(DefaultProcessor),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_selector_options(mut self, options: SelectorOptions) -> Self {
        self.selector_options = options;
        self
    }

    pub fn with_processor(mut self, processor: impl SemanticsProcessor + 'static) -> Self {
        self.processor = Box::new(processor);
        self
    }

    /// Run until the user saves (returns the pruned params) or quits (error).
    pub fn run(self) -> Result<Value> {
        let SelectorUI {
            schema,
            params,
            title,
            options,
            selector_options,
            processor,
        } = self;

        let mut selector = RadioSelector::from_documents(&schema, params, |_, _| {})
            .context("failed to build selector from schema")?
            .with_options(selector_options);
        selector.mount(processor.as_ref());
        App::new(selector, title, options).run()
    }
}
