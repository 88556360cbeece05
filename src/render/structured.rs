//! Turning a serialized value into indented text for structured dumps.
//!
//! The render engine hands a `serde_json::Value` to a [`Stringify`] and shows whatever
//! text comes back in a code block. [`PrettyJson`] is the default; any closure with
//! the right shape works too.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Why a value could not be turned into text.
#[derive(Debug, Error)]
pub enum StringifyError {
    /// The value could not be serialized.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The stringifier produced something unusable.
    #[error("{0}")]
    Other(String),
}

/// Value → indented textual form.
pub trait Stringify {
    fn stringify(&self, value: &Value) -> Result<String, StringifyError>;
}

impl<F> Stringify for F
where
    F: Fn(&Value) -> Result<String, StringifyError>,
{
    fn stringify(&self, value: &Value) -> Result<String, StringifyError> {
        self(value)
    }
}

/// Pretty-printed JSON with a configurable indent width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrettyJson {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for PrettyJson {
    fn default() -> Self {
        Self { indent: 3 }
    }
}

impl Stringify for PrettyJson {
    fn stringify(&self, value: &Value) -> Result<String, StringifyError> {
        let indent = " ".repeat(self.indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(|e| StringifyError::Other(e.to_string()))
    }
}
