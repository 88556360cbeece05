//! foldlog
//!
//! Structured logging documents: timestamped entries rendered as a standalone HTML
//! page of collapsible sections, echoed line by line to a plain-text stream.
//!
//! - [`document`] owns the entry table, the lifecycle and the two sinks.
//! - [`render`] turns arbitrary values into nested, folded HTML without writing.
//! - [`http`] shows HTTP request/response pairs and runs whole transactions.
//! - [`view`] holds the markup primitives, page framing and themes.

pub mod config;
pub mod document;
pub mod http;
pub mod logging;
pub mod model;
pub mod render;
pub mod view;

pub use config::{DocumentConfig, RenderLimits};
pub use document::{Document, DocumentBuilder, SinkTarget};
pub use model::{marker, DocumentError, TransactionError};
pub use render::{Describe, Describer, RenderEngine, RenderedValue};
pub use view::Theme;
