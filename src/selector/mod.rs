//! Exclusive choice between background fields.
//!
//! [`RadioSelector`] keeps one choice checked, mirrors the checked field's
//! value into the option store, and tells the host form through
//! [`SelectorEvent`]s whenever the active value appears or disappears.

mod adapter;
mod controller;
mod events;
mod group;
mod store;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{Frame, layout::Rect};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{SelectorSchema, parse_selector_schema};
use crate::error::SelectorError;
use crate::field::{ChildField, FieldSignal, PendingSignal, SemanticsProcessor, SignalQueue};
use crate::options::SelectorOptions;
use crate::params::ParamsHandle;
use crate::presentation::{self, ChoiceList, Focus, SelectorView};

pub use controller::SelectionController;
pub use events::{EventBridge, ListenerId, SelectorEvent};
pub use group::GroupId;
pub use store::{OptionKind, OptionStore, StoredOption};

#[derive(Debug)]
pub struct RadioSelector {
    schema: SelectorSchema,
    params: ParamsHandle,
    options: SelectorOptions,
    group: GroupId,
    controller: SelectionController,
    children: Vec<ChildField>,
    signals: SignalQueue,
    choices: ChoiceList,
    mounted: bool,
}

impl RadioSelector {
    /// Create a selector over `schema`. `persist` is called once, right away,
    /// so the host stores the params object the selector works on.
    pub fn new<F>(schema: SelectorSchema, params: ParamsHandle, persist: F) -> Self
    where
        F: FnOnce(&SelectorSchema, &ParamsHandle),
    {
        let current = initial_index(&schema, &params);
        persist(&schema, &params);
        let group = GroupId::next();
        debug!(group = %group, current, "created selector");
        Self {
            schema,
            params,
            options: SelectorOptions::default(),
            group,
            controller: SelectionController::new(current),
            children: Vec::new(),
            signals: SignalQueue::default(),
            choices: ChoiceList::new(group, Vec::new(), current),
            mounted: false,
        }
    }

    /// Parse the schema document and wrap a params document (anything but an
    /// object becomes `{}`).
    pub fn from_documents<F>(
        schema: &Value,
        params: Value,
        persist: F,
    ) -> Result<Self, SelectorError>
    where
        F: FnOnce(&SelectorSchema, &ParamsHandle),
    {
        let schema = parse_selector_schema(schema)?;
        Ok(Self::new(schema, ParamsHandle::from_value(params), persist))
    }

    pub fn with_options(mut self, options: SelectorOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the child fields, check and show the current choice, subscribe to
    /// field changes and record the values the fields start with.
    pub fn mount(&mut self, processor: &dyn SemanticsProcessor) {
        if self.mounted {
            warn!(group = %self.group, "selector is already mounted");
            return;
        }
        self.children = processor.process(&self.schema.fields, &self.params, &self.options);
        if self.children.len() != self.schema.fields.len() {
            warn!(
                group = %self.group,
                expected = self.schema.fields.len(),
                actual = self.children.len(),
                "semantics processor returned an unexpected number of children"
            );
        }

        let labels = self
            .children
            .iter()
            .map(|child| child.label().to_string())
            .collect();
        self.choices = ChoiceList::new(self.group, labels, self.controller.current());

        for (index, child) in self.children.iter_mut().enumerate() {
            adapter::subscribe(child, self.signals.sink(index));
        }
        for (index, child) in self.children.iter().enumerate() {
            if let Some(option) = adapter::initial_option(child, &self.options.resolver) {
                self.controller.seed(index, option);
            }
        }
        self.mounted = true;
        debug!(
            group = %self.group,
            children = self.children.len(),
            stored = self.controller.store().len(),
            "mounted selector"
        );
    }

    pub fn group_id(&self) -> GroupId {
        self.group
    }

    pub fn schema(&self) -> &SelectorSchema {
        &self.schema
    }

    pub fn params(&self) -> &ParamsHandle {
        &self.params
    }

    pub fn children(&self) -> &[ChildField] {
        &self.children
    }

    pub fn choices(&self) -> &ChoiceList {
        &self.choices
    }

    pub fn store(&self) -> &OptionStore {
        self.controller.store()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(SelectorEvent) + 'static) -> ListenerId {
        self.controller.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.controller.unsubscribe(id)
    }

    /// Make the field area at `index` the only visible one.
    pub fn show_content(&mut self, index: usize) {
        if !self.choices.show(index) {
            warn!(group = %self.group, index, "no field area to show");
        }
    }

    pub fn get_stored_option(&self) -> Option<&StoredOption> {
        self.controller.stored()
    }

    pub fn get_selected_index(&self) -> usize {
        self.controller.current()
    }

    /// Check the choice at `index` as if the user picked it. Returns `false`
    /// when it is already checked or does not exist.
    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if index >= self.choices.len() {
            warn!(group = %self.group, index, "ignoring selection of unknown choice");
            return false;
        }
        if self.choices.is_checked(index) {
            return false;
        }
        self.choose(index);
        true
    }

    /// Clear the checked field through its own clear action and drop its
    /// option. Fields that cannot be cleared are left alone.
    pub fn reset_checked_option(&mut self) {
        let index = self.controller.current();
        let Some(clearable) = self
            .children
            .get_mut(index)
            .and_then(|child| child.clearable())
        else {
            debug!(group = %self.group, index, "checked field cannot be cleared");
            return;
        };
        clearable.clear();
        self.pump_signals();
        self.controller.record(index, None);
    }

    pub fn reflow(&mut self) {
        let index = self.controller.current();
        if let Some(layout) = self
            .children
            .get_mut(index)
            .and_then(|child| child.reflowable())
        {
            layout.reflow();
        }
    }

    /// Drop params of every unchecked choice and persist the checked color
    /// picker. Always reports success.
    pub fn validate(&mut self) -> bool {
        for (index, child) in self.children.iter_mut().enumerate() {
            if !self.choices.is_checked(index) {
                let name = self
                    .schema
                    .fields
                    .get(index)
                    .and_then(|field| field.name.as_deref());
                if let Some(name) = name
                    && self.params.remove(name).is_some()
                {
                    debug!(group = %self.group, index, name, "pruned params of unchecked choice");
                }
            } else if let Some(sync) = child.color_sync() {
                sync.sync_color();
            }
        }
        true
    }

    /// [`validate`](Self::validate), then fail when the checked choice holds
    /// no value.
    pub fn validate_strict(&mut self) -> Result<(), SelectorError> {
        self.validate();
        match self.controller.stored() {
            Some(_) => Ok(()),
            None => Err(SelectorError::NoActiveOption {
                index: self.controller.current(),
            }),
        }
    }

    pub fn ready(&self) -> bool {
        true
    }

    /// Teardown hook. The selector holds no external resources.
    pub fn remove(&mut self) {
        debug!(group = %self.group, "removed selector");
    }

    /// Run `edit` against the child at `index` and apply whatever value
    /// changes it reported before returning.
    pub fn edit_child<R>(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut ChildField) -> R,
    ) -> Option<R> {
        let child = self.children.get_mut(index)?;
        let result = edit(child);
        self.pump_signals();
        Some(result)
    }

    pub fn set_viewport_width(&mut self, width: u16) {
        for child in &mut self.children {
            child.set_viewport_width(width);
        }
    }

    pub fn focus(&self) -> Focus {
        self.choices.focus()
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match self.choices.focus() {
            Focus::Choices => match key.code {
                KeyCode::Up | KeyCode::Left => self.step_selection(-1),
                KeyCode::Down | KeyCode::Right => self.step_selection(1),
                KeyCode::Enter | KeyCode::Tab => {
                    if self.children.is_empty() {
                        return false;
                    }
                    self.choices.set_focus(Focus::Field);
                    true
                }
                _ => false,
            },
            Focus::Field => match key.code {
                KeyCode::Esc | KeyCode::BackTab => {
                    self.choices.set_focus(Focus::Choices);
                    true
                }
                _ => {
                    let index = self.choices.visible();
                    self.edit_child(index, |child| child.handle_key(key))
                        .unwrap_or(false)
                }
            },
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        presentation::render_selector(
            frame,
            area,
            SelectorView {
                title: self.schema.title(),
                choices: &self.choices,
                children: &self.children,
                stored: self.controller.stored(),
                hints: &self.options.hints,
            },
        );
    }

    fn step_selection(&mut self, delta: i32) -> bool {
        match self.choices.neighbour(delta) {
            Some(index) => self.set_selected_index(index),
            None => false,
        }
    }

    fn choose(&mut self, index: usize) {
        self.choices.check(index);
        self.controller.select(index);
        self.show_content(index);
    }

    fn pump_signals(&mut self) {
        while let Some(PendingSignal { index, signal }) = self.signals.pop() {
            let option = adapter::normalize(&signal, &self.options.resolver);
            self.controller.record(index, option);
            if matches!(signal, FieldSignal::ColorMove(_))
                && let Some(sync) = self
                    .children
                    .get_mut(index)
                    .and_then(|child| child.color_sync())
            {
                sync.sync_color();
            }
        }
    }
}

/// Position of the last named field whose params hold a value; 0 otherwise.
fn initial_index(schema: &SelectorSchema, params: &ParamsHandle) -> usize {
    let mut current = 0;
    for (index, name) in schema.field_names().enumerate() {
        if let Some(name) = name
            && params.is_truthy(name)
        {
            current = index;
        }
    }
    current
}
