//! Framing of the standalone HTML artifact: the head written when the HTML sink opens
//! and the tail written when the document concludes.

use super::markup::{escape_html, CRLF};
use crate::model::marker;

/// Produces the visible header placed above the entry table.
///
/// Receives the document title (unescaped).
pub type HeaderFn = fn(&str) -> String;

/// Seed of every document's content buffer.
pub const PREAMBLE: &str = "<table class=\"left_justified\">\r\n";

/// Appended to the content buffer when the document concludes.
pub const TABLE_CLOSE: &str = "\r\n</table>";

/// Written to the HTML sink after the content.
pub const PAGE_CLOSE: &str = "\r\n</body>\r\n</html>";

/// Header used unless the builder is given another one.
pub fn default_header(title: &str) -> String {
    format!(
        "<h1>{logo}&nbsp;{title}</h1>{CRLF}<hr>{CRLF}<small><i>Powered by foldlog...</i></small>{CRLF}{CRLF}",
        logo = marker::DOCUMENT,
        title = escape_html(title),
    )
}

/// Everything the HTML sink receives before the content buffer.
pub fn page_open(title: &str, theme_css: &str, header: HeaderFn) -> String {
    format!(
        "<html>{CRLF}<meta charset=\"UTF-8\">{CRLF}<head>{CRLF}<title>{}</title>{CRLF}{theme_css}</head>{CRLF}<body>{CRLF}{}",
        escape_html(title),
        header(title),
    )
}
