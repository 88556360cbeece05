//! Marker glyphs shown in the marker column of each entry.
//!
//! Any string may be used as a marker through [`crate::document::Document::info_with`];
//! these are the ones foldlog uses itself plus a few conventional ones for test logs.

pub const SETUP: &str = "🛠";
pub const CLEANUP: &str = "🧹";
pub const PASSING_TEST: &str = "✅";
pub const SUBJECTIVE_TEST: &str = "🤔";
pub const INCONCLUSIVE_TEST: &str = "🛑";
pub const FAILING_TEST: &str = "❌";
pub const DEBUG: &str = "🐞";
pub const ERROR: &str = "😱";
pub const DOCUMENT: &str = "📝";
pub const CONCLUDE: &str = "⤴️";
/// No glyph; plain entries and blank lines.
pub const BLANK: &str = "";
pub const OBJECT: &str = "🔲";
pub const CAUSED_BY: &str = "→";
pub const OUTGOING: &str = "↗️";
pub const INCOMING: &str = "↩️";
