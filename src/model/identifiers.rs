//! Identifier newtypes for fold toggles.
//!
//! Every collapsible region of a document is a hidden checkbox paired with a label
//! (`ToggleId`) and a hidden content block whose class starts with `lvl-`
//! (`EncapsulationTag`). Both are random v4 UUIDs, so they never repeat within a
//! document, including across nested embeddings.

use std::fmt;
use uuid::Uuid;

/// Identifier linking a fold's `<label for>` with its checkbox `<input id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToggleId(Uuid);

impl ToggleId {
    /// Generate a fresh identifier.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ToggleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// CSS class of a block that stays hidden until its paired checkbox is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncapsulationTag(Uuid);

impl EncapsulationTag {
    /// Class prefix the themes key their show/hide rule on.
    pub const PREFIX: &'static str = "lvl-";

    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EncapsulationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}
