use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Map, Value};

/// Params object owned by the host form and shared with the selector and its
/// child fields. Cloning the handle shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct ParamsHandle {
    inner: Rc<RefCell<Map<String, Value>>>,
}

impl ParamsHandle {
    pub fn new(map: Map<String, Value>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(map)),
        }
    }

    /// Anything but an object collapses to an empty params map.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::new(map),
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.borrow().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().contains_key(key)
    }

    pub fn is_truthy(&self, key: &str) -> bool {
        self.inner.borrow().get(key).is_some_and(is_truthy)
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.inner.borrow_mut().insert(key.into(), value)
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.inner.borrow_mut().shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn snapshot(&self) -> Value {
        Value::Object(self.inner.borrow().clone())
    }

    /// Two handles are the same params object when they share storage.
    pub fn same_as(&self, other: &ParamsHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Host-form truthiness: empty strings, zero, `false` and `null` hold no value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(num) => num.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
