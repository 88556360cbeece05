//! Splicing a concluded document into another one as a collapsible block.

use super::Document;
use crate::model::{marker, DocumentError};
use crate::view::markup::{escape_html, headed_fold_open, CRLF, HEADED_FOLD_CLOSE};
use chrono::Local;
use tracing::debug;

/// Style class used by [`Document::embed`].
pub const DEFAULT_CATEGORY: &str = "boolog";

/// Wrap a child's final content so its title toggles the content's visibility.
pub fn wrap_as_subordinate(title: &str, content: &str, category: &str) -> String {
    let (_, open) = headed_fold_open(&format!("<h2>{}</h2>", escape_html(title)));
    format!(
        "{CRLF}{CRLF}<div class=\"boolog {}\">{CRLF}{open}{content}{CRLF}{HEADED_FOLD_CLOSE}</div>",
        escape_html(category)
    )
}

impl Document {
    /// Conclude `child` and append it as a collapsible entry.
    ///
    /// Equivalent to `embed_with(child, marker::DOCUMENT, DEFAULT_CATEGORY, 0)`.
    pub fn embed(&mut self, child: &mut Document) -> Result<String, DocumentError> {
        self.embed_with(child, marker::DOCUMENT, DEFAULT_CATEGORY, 0)
    }

    /// Conclude `child`, wrap its content and, when `recurse_level` is 0, append it.
    ///
    /// The child is concluded whatever happens to the parent write, so it rejects
    /// further entries afterwards. Returns the wrapped block.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Concluded`] if this document is already concluded.
    pub fn embed_with(
        &mut self,
        child: &mut Document,
        marker: &str,
        category: &str,
        recurse_level: usize,
    ) -> Result<String, DocumentError> {
        let timestamp = Local::now();
        let content = child.conclude();
        let wrapped = wrap_as_subordinate(&child.title, &content, category);

        if recurse_level < 1 {
            self.write_entry(timestamp, marker, &wrapped, &child.title)?;
        }

        debug!(
            parent = %self.title,
            child = %child.title,
            category,
            recurse_level,
            "Embedded document"
        );
        Ok(wrapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SinkTarget;

    fn quiet(title: &str) -> Document {
        Document::builder(title)
            .text_target(SinkTarget::None)
            .build()
            .unwrap()
    }

    #[test]
    fn wrapper_structure_matches_subordinate_block() {
        let wrapped = wrap_as_subordinate("Child <1>", "<table></table>", "boolog");
        assert!(wrapped.starts_with("\r\n\r\n<div class=\"boolog boolog\">\r\n<label for=\""));
        assert!(wrapped.contains("class=\"gone\" type=\"checkbox\">\r\n<h2>Child &lt;1&gt;</h2>\r\n<div class=\"lvl-"));
        assert!(wrapped.ends_with("<table></table>\r\n</div></label></div>"));
    }

    #[test]
    fn embedding_concludes_child_and_adds_one_row() {
        let mut parent = quiet("parent");
        let mut child = quiet("child");
        child.info("inside").unwrap();

        let before = parent.content().len();
        let wrapped = parent.embed(&mut child).unwrap();

        assert!(child.is_concluded());
        assert!(child.info("late").unwrap_err().is_concluded());
        assert!(parent.content()[before..].contains(&wrapped));
        assert!(wrapped.contains("inside"));
    }

    #[test]
    fn nonzero_recurse_level_only_wraps() {
        let mut parent = quiet("parent");
        let mut child = quiet("child");

        let wrapped = parent
            .embed_with(&mut child, marker::SETUP, "setup", 1)
            .unwrap();

        assert!(child.is_concluded());
        assert!(!parent.was_used());
        assert!(wrapped.contains("<div class=\"boolog setup\">"));
    }

    #[test]
    fn embedding_into_concluded_parent_still_concludes_child() {
        let mut parent = quiet("parent");
        parent.conclude();
        let mut child = quiet("child");

        let err = parent.embed(&mut child).unwrap_err();

        assert!(err.is_concluded());
        assert!(child.is_concluded());
    }
}
