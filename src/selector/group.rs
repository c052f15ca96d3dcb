use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_GROUP: AtomicUsize = AtomicUsize::new(0);

/// Process-unique key shared by the choices of one selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

impl GroupId {
    pub fn next() -> Self {
        Self(NEXT_GROUP.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "radio-selector-{}", self.0)
    }
}
