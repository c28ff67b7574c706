// Raw key capture. Key meaning is decided by the server, never here.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Platform key identifier, e.g. `ArrowLeft` or `Space`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(String);

impl KeyId {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Keys held during exactly one tick. Ordered so outbound messages are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFrame {
    keys: BTreeSet<KeyId>,
}

impl InputFrame {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn contains(&self, key: &KeyId) -> bool {
        self.keys.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &KeyId> {
        self.keys.iter()
    }
}

impl FromIterator<KeyId> for InputFrame {
    fn from_iter<I: IntoIterator<Item = KeyId>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// What the platform should do with a key event after capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Game key: the platform default (scrolling etc.) must be suppressed.
    SuppressDefault,
    /// Recorded but otherwise left to the platform.
    PassThrough,
}

/// Accumulates key-down events for the current tick.
#[derive(Debug, Default)]
pub struct InputCapture {
    captured: HashSet<KeyId>,
    held: BTreeSet<KeyId>,
}

impl InputCapture {
    pub fn new(captured: impl IntoIterator<Item = KeyId>) -> Self {
        Self {
            captured: captured.into_iter().collect(),
            held: BTreeSet::new(),
        }
    }

    /// Marks `key` as held for this tick. Unrecognized keys are recorded too.
    /// The caller owns the platform side: it suppresses the default action for
    /// [`KeyDisposition::SuppressDefault`].
    #[must_use]
    pub fn record_key_down(&mut self, key: KeyId) -> KeyDisposition {
        let disposition = if self.captured.contains(&key) {
            KeyDisposition::SuppressDefault
        } else {
            KeyDisposition::PassThrough
        };
        self.held.insert(key);
        disposition
    }

    /// Takes the held set and leaves the capture empty.
    pub fn consume_frame(&mut self) -> InputFrame {
        InputFrame {
            keys: std::mem::take(&mut self.held),
        }
    }

    pub fn pending(&self) -> usize {
        self.held.len()
    }
}
