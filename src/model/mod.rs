//! Domain model types (pure).
//!
//! Errors, fold identifiers and entry markers shared by the document, the render
//! engine and the HTTP renderer.

pub mod error;
pub mod identifiers;
pub mod marker;

// Re-export for convenience
pub use error::{DocumentError, SinkKind, TransactionError};
pub use identifiers::{EncapsulationTag, ToggleId};
