//! Small HTML building blocks shared by the document, the render engine and the HTTP
//! renderer.
//!
//! Messages passed to `Document::info` are HTML fragments and are *not* escaped; the
//! helpers here are how callers (and foldlog itself) produce such fragments safely.

use crate::model::{EncapsulationTag, ToggleId};
use std::fmt::Write as _;

/// Line terminator used in both outputs, independent of platform.
pub const CRLF: &str = "\r\n";

/// Title used when a document is built with an empty one.
pub const UNKNOWN: &str = "(unknown)";

/// Variable label used when a value is shown without a name.
pub const NAMELESS: &str = "(name not given)";

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap a message so it stands out; `debug` and `error` entries use this.
pub fn highlight(message: &str) -> String {
    format!("<p class=\"highlighted outlined\">&nbsp;{message}&nbsp;</p>")
}

/// Render text in a monospace block, keeping line breaks and indentation.
pub fn treat_as_code(text: &str) -> String {
    format!("<pre><code>{}</code></pre>", escape_html(text))
}

/// A `<small><i>` notice such as `(no headers)`.
pub fn notice(text: &str) -> String {
    format!("<small><i>{text}</i></small>")
}

/// Hide `inner` behind a visible checkbox labelled `summary`.
///
/// Returns the identifier linking the label and checkbox together with the markup.
pub fn fold(summary: &str, inner: &str) -> (ToggleId, String) {
    let toggle = ToggleId::fresh();
    let mut out = String::with_capacity(inner.len() + 160);
    let _ = write!(
        out,
        "<label for=\"{toggle}\">{CRLF}<input id=\"{toggle}\" type=\"checkbox\">{CRLF}{summary}{CRLF}<div class=\"{tag}\">{CRLF}",
        tag = EncapsulationTag::fresh(),
    );
    out.push_str(inner);
    out.push_str("</div></label>");
    (toggle, out)
}

/// Opening half of a region whose own heading acts as the toggle.
///
/// The checkbox is hidden (`gone`), so clicking anywhere on the label flips it. Pair
/// with [`HEADED_FOLD_CLOSE`].
pub fn headed_fold_open(heading: &str) -> (ToggleId, String) {
    let toggle = ToggleId::fresh();
    let markup = format!(
        "<label for=\"{toggle}\">{CRLF}<input id=\"{toggle}\" class=\"gone\" type=\"checkbox\">{CRLF}{heading}{CRLF}<div class=\"{tag}\">{CRLF}",
        tag = EncapsulationTag::fresh(),
    );
    (toggle, markup)
}

/// Closing half of [`headed_fold_open`].
pub const HEADED_FOLD_CLOSE: &str = "</div></label>";
