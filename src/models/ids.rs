use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of hex characters kept from the digest.
const SHORT_ID_LEN: usize = 7;

/// Short, filename-friendly identifier for a note.
///
/// Derived from the note's unique identifier so that the same note always
/// maps to the same exported file, even after its title changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortId(String);

impl ShortId {
    /// Derives the short id for a note's unique identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use freddiebear::ShortId;
    ///
    /// let id = ShortId::from_uuid("6F1C3A0E-0000-4000-8000-000000000001");
    /// assert_eq!(id.as_str().len(), 7);
    /// ```
    pub fn from_uuid(uuid: &str) -> Self {
        let digest = hex::encode(Sha256::digest(uuid.as_bytes()));
        Self(digest[..SHORT_ID_LEN].to_string())
    }

    /// Wraps an already-derived short id, e.g. one parsed from a filename.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
