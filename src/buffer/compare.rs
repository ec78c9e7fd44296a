//! Byte-exact comparisons.
//!
//! Only the bytes in use take part; capacity, growth unit and stale bytes
//! past the logical end never affect equality.

use std::hash::{Hash, Hasher};

use super::Buffer;

impl Buffer {
    /// Returns true if the content is exactly `text`.
    pub fn eq_str(&self, text: &str) -> bool {
        self.as_bytes() == text.as_bytes()
    }

    /// Returns true if the content starts with `prefix`.
    ///
    /// The empty string is a prefix of every buffer.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.as_bytes().starts_with(prefix.as_bytes())
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Buffer {}

impl Hash for Buffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl PartialEq<[u8]> for Buffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for Buffer {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl PartialEq<str> for Buffer {
    fn eq(&self, other: &str) -> bool {
        self.eq_str(other)
    }
}

impl PartialEq<&str> for Buffer {
    fn eq(&self, other: &&str) -> bool {
        self.eq_str(other)
    }
}
