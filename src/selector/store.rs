use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKind {
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "bgColor", alias = "color")]
    Color,
}

/// Value recorded for a choice whose field currently holds data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredOption {
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub value: String,
}

impl StoredOption {
    pub fn image(value: impl Into<String>) -> Self {
        Self {
            kind: OptionKind::Image,
            value: value.into(),
        }
    }

    pub fn color(value: impl Into<String>) -> Self {
        Self {
            kind: OptionKind::Color,
            value: value.into(),
        }
    }
}

/// Sparse option entries keyed by choice position, plus the current position.
#[derive(Debug, Clone, Default)]
pub struct OptionStore {
    entries: BTreeMap<usize, StoredOption>,
    current: usize,
}

impl OptionStore {
    pub fn new(current: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            current,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub(crate) fn set_current(&mut self, index: usize) {
        self.current = index;
    }

    pub fn get(&self, index: usize) -> Option<&StoredOption> {
        self.entries.get(&index)
    }

    pub fn active(&self) -> Option<&StoredOption> {
        self.entries.get(&self.current)
    }

    /// Returns the entry that was replaced, if any.
    pub fn insert(&mut self, index: usize, option: StoredOption) -> Option<StoredOption> {
        self.entries.insert(index, option)
    }

    pub fn remove(&mut self, index: usize) -> Option<StoredOption> {
        self.entries.remove(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &StoredOption)> {
        self.entries.iter().map(|(index, option)| (*index, option))
    }
}
