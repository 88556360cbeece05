//! Recursive rendering of structured values into nested, collapsible HTML.
//!
//! The engine is pure: [`RenderEngine::render`] returns an owned [`RenderedValue`] and
//! never touches a document. The outermost caller (`Document::show` and friends) is
//! the one that writes the fragment as an entry, so a whole tree of nested values
//! costs exactly one write.
//!
//! Three rules bound the output:
//!
//! - scalars are printed, never recursed into;
//! - compound values deeper than [`RenderLimits::max_depth`] become a fixed sentinel,
//!   which is what stops cyclic `Rc` graphs;
//! - sequences and records with more than [`RenderLimits::max_items`] entries, and
//!   structured dumps longer than [`RenderLimits::max_body_length`], are folded
//!   behind a "show" checkbox.

pub mod describe;
pub mod structured;

pub use describe::{short_type_name, Describe, Describer, RecordBuilder};
pub use structured::{PrettyJson, Stringify, StringifyError};

use crate::config::RenderLimits;
use crate::model::{marker, ToggleId};
use crate::view::markup::{self, escape_html, treat_as_code, CRLF, NAMELESS};
use serde::Serialize;
use std::fmt::Write as _;
use tracing::warn;

/// A size-triggered fold applied to a rendered value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    /// Identifier of the checkbox that reveals the folded content.
    pub toggle: ToggleId,
    /// Text shown next to the checkbox, e.g. `(show 12 items)`.
    pub summary: String,
}

/// The fragment produced for one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedValue {
    /// Type shown in the block header.
    pub type_label: String,
    /// Name the value was shown under.
    pub variable_label: String,
    /// The HTML fragment.
    pub html: String,
    /// Present when the body exceeded its size threshold and was folded.
    pub fold: Option<Fold>,
}

impl RenderedValue {
    pub(crate) fn scalar(type_label: &str, variable_label: &str, text: &str) -> Self {
        Self {
            type_label: type_label.to_string(),
            variable_label: variable_label.to_string(),
            html: escape_html(text),
            fold: None,
        }
    }

    /// The depth-guard sentinel.
    pub(crate) fn too_deep(type_label: &str, variable_label: &str) -> Self {
        Self {
            type_label: type_label.to_string(),
            variable_label: variable_label.to_string(),
            html: format!(
                "<div class=\"outlined\">{0} Too Many Levels In {0}</div>",
                marker::INCONCLUSIVE_TEST
            ),
            fold: None,
        }
    }

    fn placeholder(type_label: &str, variable_label: &str, reason: &str) -> Self {
        Self {
            type_label: type_label.to_string(),
            variable_label: variable_label.to_string(),
            html: format!(
                "<div class=\"outlined\">(could not render \"{}\": {})</div>",
                escape_html(variable_label),
                escape_html(reason)
            ),
            fold: None,
        }
    }

    /// True when the body was folded because it exceeded its threshold.
    pub fn is_foldable(&self) -> bool {
        self.fold.is_some()
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

/// Renders values according to a set of [`RenderLimits`].
#[derive(Debug, Clone, Default)]
pub struct RenderEngine {
    limits: RenderLimits,
}

impl RenderEngine {
    pub fn new(limits: RenderLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &RenderLimits {
        &self.limits
    }

    /// Render `value`, shown under `label`, at nesting level `depth` (0 = outermost).
    pub fn render(&self, value: &dyn Describe, label: &str, depth: usize) -> RenderedValue {
        let label = if label.is_empty() { NAMELESS } else { label };
        let mut describer = Describer::new(self, label, depth);
        value.describe(&mut describer);
        describer.finish()
    }

    /// Structured-dump mode: serialize `value`, stringify it and show the text as code.
    ///
    /// A value that cannot be serialized or stringified yields a placeholder block.
    pub fn render_structured<T>(
        &self,
        value: &T,
        label: &str,
        stringify: &dyn Stringify,
    ) -> RenderedValue
    where
        T: Serialize + ?Sized,
    {
        let label = if label.is_empty() { NAMELESS } else { label };
        let type_name = short_type_name::<T>();

        let text = serde_json::to_value(value)
            .map_err(StringifyError::from)
            .and_then(|json| stringify.stringify(&json));

        let text = match text {
            Ok(text) => text,
            Err(err) => {
                warn!(value = label, error = %err, "Structured value could not be rendered");
                return RenderedValue::placeholder(&type_name, label, &err.to_string());
            }
        };

        let code = treat_as_code(&text);
        let (body, fold) = if text.chars().count() > self.limits.max_body_length {
            let summary = "(show large object)".to_string();
            let (toggle, folded) = markup::fold(&summary, &code);
            (folded, Some(Fold { toggle, summary }))
        } else {
            (code, None)
        };

        let html = object_block("plate left_justified", &type_name, label, 0, &body);
        RenderedValue {
            type_label: type_name,
            variable_label: label.to_string(),
            html,
            fold,
        }
    }

    /// An error and its chain of sources, outermost first.
    pub fn render_error(&self, error: &dyn std::error::Error, label: &str) -> RenderedValue {
        let label = if label.is_empty() { NAMELESS } else { label };

        let mut body = format!("<p>{}</p>", escape_html(&error.to_string()));
        let mut source = error.source();
        let mut causes = 0;
        while let Some(cause) = source {
            causes += 1;
            if causes > self.limits.max_depth {
                body.push_str(&RenderedValue::too_deep("error", label).html);
                break;
            }
            let _ = write!(
                body,
                "{CRLF}<p>{} {}</p>",
                marker::CAUSED_BY,
                escape_html(&cause.to_string())
            );
            source = cause.source();
        }

        RenderedValue {
            type_label: "error".to_string(),
            variable_label: label.to_string(),
            html: object_block("exception", "error", label, 0, &body),
            fold: None,
        }
    }

    pub(crate) fn is_too_deep(&self, depth: usize) -> bool {
        depth > self.limits.max_depth
    }

    pub(crate) fn sequence_block(
        &self,
        type_name: &str,
        label: &str,
        depth: usize,
        elements: Vec<RenderedValue>,
    ) -> RenderedValue {
        if elements.is_empty() {
            return RenderedValue {
                type_label: type_name.to_string(),
                variable_label: label.to_string(),
                html: format!(
                    "<div class=\"outlined\">({} \"{}\" is empty)</div>",
                    escape_html(type_name),
                    escape_html(label)
                ),
                fold: None,
            };
        }

        let count = elements.len();
        let rows = elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| (index.to_string(), element));
        let (body, fold) = self.gridded(rows, count, "items");

        RenderedValue {
            type_label: type_name.to_string(),
            variable_label: label.to_string(),
            html: object_block("neutral", type_name, label, depth, &body),
            fold,
        }
    }

    pub(crate) fn record_block(
        &self,
        type_name: &str,
        label: &str,
        depth: usize,
        fields: Vec<(String, RenderedValue)>,
    ) -> RenderedValue {
        let (body, fold) = if fields.is_empty() {
            (markup::notice("(no fields)"), None)
        } else {
            let count = fields.len();
            self.gridded(fields.into_iter(), count, "fields")
        };

        RenderedValue {
            type_label: type_name.to_string(),
            variable_label: label.to_string(),
            html: object_block("neutral", type_name, label, depth, &body),
            fold,
        }
    }

    /// Two-column gridlines table, folded when `count` exceeds `max_items`.
    fn gridded(
        &self,
        rows: impl Iterator<Item = (String, RenderedValue)>,
        count: usize,
        noun: &str,
    ) -> (String, Option<Fold>) {
        let mut table = String::from("<br><table class=\"gridlines\">\r\n");
        for (key, value) in rows {
            let _ = write!(
                table,
                "<tr><td>{}</td><td>{}</td></tr>{CRLF}",
                escape_html(&key),
                value.html
            );
        }
        table.push_str("\r\n</table><br>");

        if count > self.limits.max_items {
            let summary = format!("(show {count} {noun})");
            let (toggle, folded) = markup::fold(&summary, &table);
            (folded, Some(Fold { toggle, summary }))
        } else {
            (table, None)
        }
    }
}

/// Outlined block with a type/name header. Nested blocks (depth ≥ 1) collapse under
/// their own header.
fn object_block(style: &str, type_name: &str, label: &str, depth: usize, body: &str) -> String {
    let mut heading = format!("<center><h2>{}</h2>{CRLF}<small>", escape_html(type_name));
    if label == NAMELESS {
        heading.push_str(label);
    } else {
        let _ = write!(heading, "<b>\"{}\"</b>", escape_html(label));
    }
    heading.push_str("</small></center>\r\n");

    let mut out = format!("{CRLF}<div class=\"object {style}\">{CRLF}");
    if depth > 0 {
        let (_, open) = markup::headed_fold_open(&heading);
        out.push_str(&open);
        out.push_str(body);
        out.push_str(CRLF);
        out.push_str(markup::HEADED_FOLD_CLOSE);
    } else {
        out.push_str(&heading);
        out.push_str(body);
    }
    out.push_str("\r\n</div>");
    out
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
