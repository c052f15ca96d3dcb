//! Child fields the selector hosts, and the capabilities it relies on.
//!
//! Each variant exposes only the capabilities it actually has through the
//! `ChildField` accessors; callers ask for a capability and skip the field
//! when it is missing.

mod color;
mod image;
mod input;
mod plain;
mod processor;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crossterm::event::KeyEvent;
use serde_json::Value;

pub use color::{ColorField, Rgb, default_palette};
pub use image::{FilePayload, ImageField, PathResolver};
pub use plain::PlainField;
pub use processor::{DefaultProcessor, SemanticsProcessor};

/// Raw change notification emitted by a child field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSignal {
    /// File field changed; `None` when the file was removed.
    File(Option<FilePayload>),
    /// Live color picker change; `None` when the picker was emptied.
    ColorMove(Option<Rgb>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingSignal {
    pub index: usize,
    pub signal: FieldSignal,
}

/// Signals waiting to be applied, in emission order.
#[derive(Debug, Clone, Default)]
pub struct SignalQueue {
    inner: Rc<RefCell<VecDeque<PendingSignal>>>,
}

impl SignalQueue {
    /// Sink that tags every signal with the child position it was issued for.
    pub fn sink(&self, index: usize) -> SignalSink {
        SignalSink {
            index,
            queue: self.clone(),
        }
    }

    pub fn pop(&self) -> Option<PendingSignal> {
        self.inner.borrow_mut().pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    fn push(&self, pending: PendingSignal) {
        self.inner.borrow_mut().push_back(pending);
    }
}

#[derive(Debug, Clone)]
pub struct SignalSink {
    index: usize,
    queue: SignalQueue,
}

impl SignalSink {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn emit(&self, signal: FieldSignal) {
        self.queue.push(PendingSignal {
            index: self.index,
            signal,
        });
    }
}

pub trait HasValueNotifications {
    fn subscribe(&mut self, sink: SignalSink);
}

pub trait HasClearable {
    fn clear(&mut self);
}

pub trait HasReflow {
    fn reflow(&mut self);
}

/// Fields whose live value must be copied into params by hand.
pub trait HasColorSync {
    fn sync_color(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTag {
    Image,
    Color,
    Plain,
}

#[derive(Debug, Clone)]
pub enum ChildField {
    Image(ImageField),
    Color(ColorField),
    Plain(PlainField),
}

impl ChildField {
    pub fn tag(&self) -> FieldTag {
        match self {
            ChildField::Image(_) => FieldTag::Image,
            ChildField::Color(_) => FieldTag::Color,
            ChildField::Plain(_) => FieldTag::Plain,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ChildField::Image(field) => field.name(),
            ChildField::Color(field) => field.name(),
            ChildField::Plain(field) => field.name(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ChildField::Image(field) => field.label(),
            ChildField::Color(field) => field.label(),
            ChildField::Plain(field) => field.label(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            ChildField::Image(field) => field.description(),
            ChildField::Color(field) => field.description(),
            ChildField::Plain(field) => field.description(),
        }
    }

    /// The field's own slice of the params object, if it has been saved.
    pub fn params(&self) -> Option<Value> {
        match self {
            ChildField::Image(field) => field.params(),
            ChildField::Color(field) => field.params(),
            ChildField::Plain(field) => field.params(),
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageField> {
        match self {
            ChildField::Image(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_color_mut(&mut self) -> Option<&mut ColorField> {
        match self {
            ChildField::Color(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_plain_mut(&mut self) -> Option<&mut PlainField> {
        match self {
            ChildField::Plain(field) => Some(field),
            _ => None,
        }
    }

    pub fn notifications(&mut self) -> Option<&mut dyn HasValueNotifications> {
        match self {
            ChildField::Image(field) => Some(field),
            ChildField::Color(field) => Some(field),
            ChildField::Plain(_) => None,
        }
    }

    pub fn clearable(&mut self) -> Option<&mut dyn HasClearable> {
        match self {
            ChildField::Image(field) => Some(field),
            ChildField::Color(field) => Some(field),
            ChildField::Plain(_) => None,
        }
    }

    pub fn reflowable(&mut self) -> Option<&mut dyn HasReflow> {
        match self {
            ChildField::Color(field) => Some(field),
            _ => None,
        }
    }

    pub fn color_sync(&mut self) -> Option<&mut dyn HasColorSync> {
        match self {
            ChildField::Color(field) => Some(field),
            _ => None,
        }
    }

    pub fn set_viewport_width(&mut self, width: u16) {
        if let ChildField::Color(field) = self {
            field.set_viewport_width(width);
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match self {
            ChildField::Image(field) => field.handle_key(key),
            ChildField::Color(field) => field.handle_key(key),
            ChildField::Plain(field) => field.handle_key(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamsHandle;

    #[test]
    fn sinks_tag_signals_with_their_index() {
        let queue = SignalQueue::default();
        let first = queue.sink(0);
        let second = queue.sink(3);
        second.emit(FieldSignal::ColorMove(None));
        first.emit(FieldSignal::File(None));
        assert_eq!(queue.pop().map(|pending| pending.index), Some(3));
        assert_eq!(queue.pop().map(|pending| pending.index), Some(0));
        assert!(queue.is_empty());
    }

    #[test]
    fn plain_fields_expose_no_capabilities() {
        let mut field = ChildField::Plain(PlainField::new(
            Some("note".into()),
            "Note",
            ParamsHandle::default(),
        ));
        assert_eq!(field.tag(), FieldTag::Plain);
        assert!(field.notifications().is_none());
        assert!(field.clearable().is_none());
        assert!(field.reflowable().is_none());
        assert!(field.color_sync().is_none());
    }

    #[test]
    fn only_color_fields_reflow_and_sync() {
        let params = ParamsHandle::default();
        let mut image = ChildField::Image(ImageField::new(
            Some("image".into()),
            "Image",
            params.clone(),
        ));
        let mut color = ChildField::Color(ColorField::new(
            Some("color".into()),
            "Color",
            params,
            default_palette(),
        ));
        assert!(image.reflowable().is_none());
        assert!(image.color_sync().is_none());
        assert!(image.clearable().is_some());
        assert!(color.reflowable().is_some());
        assert!(color.color_sync().is_some());
    }
}
