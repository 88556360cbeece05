//! The document: an append-only HTML entry table plus a plain-text echo.
//!
//! A [`Document`] is built once with [`Document::builder`], receives entries through
//! `&mut self` methods, and is sealed by [`Document::conclude`]. After that every
//! write returns [`DocumentError::Concluded`] and the content never changes again.
//!
//! ```no_run
//! use foldlog::Document;
//!
//! # fn main() -> Result<(), foldlog::DocumentError> {
//! let mut doc = Document::builder("Nightly run")
//!     .html_file("nightly.html")
//!     .build()?;
//! doc.info("starting")?;
//! doc.show(&vec![1, 2, 3], "batch")?;
//! doc.conclude();
//! # Ok(())
//! # }
//! ```

pub mod embed;
pub mod entry;
pub mod sink;

pub use embed::DEFAULT_CATEGORY;
pub use sink::SinkTarget;

use crate::config::DocumentConfig;
use crate::model::{marker, DocumentError, SinkKind};
use crate::render::{Describe, PrettyJson, RenderEngine, Stringify};
use crate::view::frame::{self, HeaderFn, PAGE_CLOSE, PREAMBLE, TABLE_CLOSE};
use crate::view::markup::{highlight, UNKNOWN};
use crate::view::Theme;
use chrono::Local;
use serde::Serialize;
use sink::Sink;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, error};

/// Builder for [`Document`].
pub struct DocumentBuilder {
    title: String,
    html: SinkTarget,
    text: SinkTarget,
    theme_css: String,
    header: HeaderFn,
    config: DocumentConfig,
    stringify: Box<dyn Stringify + Send>,
}

impl fmt::Debug for DocumentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentBuilder")
            .field("title", &self.title)
            .field("html", &self.html)
            .field("text", &self.text)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DocumentBuilder {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            html: SinkTarget::None,
            text: SinkTarget::Console,
            theme_css: Theme::default().css(),
            header: frame::default_header,
            config: DocumentConfig::default(),
            stringify: Box::new(PrettyJson::default()),
        }
    }

    /// Write the HTML artifact to `path` when the document concludes.
    pub fn html_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.html = SinkTarget::File(path.into());
        self
    }

    /// Echo the plain-text stream into `path` instead of the console.
    pub fn text_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.text = SinkTarget::File(path.into());
        self
    }

    pub fn html_target(mut self, target: SinkTarget) -> Self {
        self.html = target;
        self
    }

    pub fn text_target(mut self, target: SinkTarget) -> Self {
        self.text = target;
        self
    }

    /// Use one of the built-in stylesheets.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme_css = theme.css();
        self
    }

    /// Use a custom stylesheet, written verbatim into `<head>`.
    pub fn theme_css(mut self, css: impl Into<String>) -> Self {
        self.theme_css = css.into();
        self
    }

    pub fn header(mut self, header: HeaderFn) -> Self {
        self.header = header;
        self
    }

    pub fn config(mut self, config: DocumentConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the stringifier used by [`Document::show_as_structured`].
    pub fn stringify(mut self, stringify: impl Stringify + Send + 'static) -> Self {
        self.stringify = Box::new(stringify);
        self
    }

    /// Open the sinks and write the HTML head.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::SinkOpen`] if a file sink cannot be created or the
    /// HTML head cannot be written.
    pub fn build(self) -> Result<Document, DocumentError> {
        let title = if self.title.is_empty() {
            UNKNOWN.to_string()
        } else {
            self.title
        };

        let text_sink = Sink::open(self.text, SinkKind::Text)?;
        let mut html_sink = Sink::open(self.html, SinkKind::Html)?;
        if let Some(sink) = html_sink.as_mut() {
            let head = frame::page_open(&title, &self.theme_css, self.header);
            sink.write_str(&head)
                .map_err(|source| DocumentError::SinkOpen {
                    kind: SinkKind::Html,
                    path: sink.location(),
                    source,
                })?;
        }

        debug!(
            title = %title,
            html = ?html_sink,
            text = ?text_sink,
            "Document built"
        );

        Ok(Document::assemble(
            title,
            self.config,
            html_sink,
            text_sink,
            self.stringify,
        ))
    }
}

/// An append-only log document with an HTML and a plain-text output.
pub struct Document {
    title: String,
    content: String,
    concluded: bool,
    first_echo: bool,
    entries: usize,
    config: DocumentConfig,
    engine: RenderEngine,
    stringify: Box<dyn Stringify + Send>,
    html_sink: Option<Sink>,
    text_sink: Option<Sink>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("title", &self.title)
            .field("concluded", &self.concluded)
            .field("entries", &self.entries)
            .field("content_len", &self.content.len())
            .field("html_sink", &self.html_sink)
            .field("text_sink", &self.text_sink)
            .finish_non_exhaustive()
    }
}

impl Document {
    pub fn builder(title: impl Into<String>) -> DocumentBuilder {
        DocumentBuilder::new(title)
    }

    /// A document that echoes to the console and writes no HTML file.
    ///
    /// This is the usual shape of a document that will be embedded in another.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let title = if title.is_empty() {
            UNKNOWN.to_string()
        } else {
            title
        };
        Self::assemble(
            title,
            DocumentConfig::default(),
            None,
            Some(Sink::Console),
            Box::new(PrettyJson::default()),
        )
    }

    fn assemble(
        title: String,
        config: DocumentConfig,
        html_sink: Option<Sink>,
        text_sink: Option<Sink>,
        stringify: Box<dyn Stringify + Send>,
    ) -> Self {
        Self {
            title,
            content: PREAMBLE.to_string(),
            concluded: false,
            first_echo: true,
            entries: 0,
            engine: RenderEngine::new(config.limits),
            config,
            stringify,
            html_sink,
            text_sink,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// The HTML content accumulated so far.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_concluded(&self) -> bool {
        self.concluded
    }

    /// True once at least one entry has been appended.
    pub fn was_used(&self) -> bool {
        self.entries > 0
    }

    /// Append a plain informational entry.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Concluded`] after [`Document::conclude`].
    pub fn info(&mut self, message: &str) -> Result<(), DocumentError> {
        self.info_with(marker::BLANK, message)
    }

    /// Append an entry under a caller-chosen marker such as [`marker::PASSING_TEST`].
    pub fn info_with(&mut self, marker: &str, message: &str) -> Result<(), DocumentError> {
        self.write_entry(Local::now(), marker, message, message)
    }

    /// Append a highlighted entry with the debug marker.
    pub fn debug(&mut self, message: &str) -> Result<(), DocumentError> {
        self.write_entry(Local::now(), marker::DEBUG, &highlight(message), message)
    }

    /// Append a highlighted entry with the error marker.
    pub fn error(&mut self, message: &str) -> Result<(), DocumentError> {
        self.write_entry(Local::now(), marker::ERROR, &highlight(message), message)
    }

    /// Append an empty, timestamped entry.
    pub fn skip_line(&mut self) -> Result<(), DocumentError> {
        self.write_entry(Local::now(), marker::BLANK, "", "")
    }

    /// Render `value` and append it as one entry. Returns the fragment.
    pub fn show(&mut self, value: &dyn Describe, name: &str) -> Result<String, DocumentError> {
        self.ensure_open()?;
        let rendered = self.engine.render(value, name, 0);
        let echo = showing(&rendered.type_label, &rendered.variable_label);
        self.write_entry(Local::now(), marker::OBJECT, &rendered.html, &echo)?;
        Ok(rendered.into_html())
    }

    /// Serialize `value`, stringify it and append the text as a code block.
    ///
    /// Values that fail to serialize are shown as a placeholder; that is not an error.
    pub fn show_as_structured<T>(&mut self, value: &T, name: &str) -> Result<String, DocumentError>
    where
        T: Serialize + ?Sized,
    {
        self.ensure_open()?;
        let rendered = self
            .engine
            .render_structured(value, name, &*self.stringify);
        let echo = showing(&rendered.type_label, &rendered.variable_label);
        self.write_entry(Local::now(), marker::OBJECT, &rendered.html, &echo)?;
        Ok(rendered.into_html())
    }

    /// Append an error and its chain of causes.
    pub fn show_error(
        &mut self,
        err: &dyn std::error::Error,
        name: &str,
    ) -> Result<String, DocumentError> {
        self.ensure_open()?;
        let rendered = self.engine.render_error(err, name);
        self.write_entry(Local::now(), marker::ERROR, &rendered.html, &err.to_string())?;
        Ok(rendered.into_html())
    }

    /// Seal the document and return its final content.
    ///
    /// The first call echoes a closing line, writes the HTML artifact and releases
    /// the sinks. Later calls only return the content.
    pub fn conclude(&mut self) -> String {
        if !self.concluded {
            let now = Local::now();
            // Echo failures are already logged; the document is open here.
            let _ = self.echo(&now, marker::CONCLUDE, "");
            let _ = self.echo(&now, marker::BLANK, "");

            self.concluded = true;
            self.content.push_str(TABLE_CLOSE);

            if let Some(mut sink) = self.html_sink.take() {
                let page = format!("{}{PAGE_CLOSE}", self.content);
                if let Err(err) = sink.write_str(&page).and_then(|()| sink.flush()) {
                    error!(
                        title = %self.title,
                        location = %sink.location().display(),
                        error = %err,
                        "Failed to write HTML document"
                    );
                }
            }
            if let Some(mut sink) = self.text_sink.take() {
                if let Err(err) = sink.flush() {
                    error!(
                        title = %self.title,
                        location = %sink.location().display(),
                        error = %err,
                        "Failed to flush plain-text sink"
                    );
                }
            }

            debug!(title = %self.title, bytes = self.content.len(), "Document concluded");
        }
        self.content.clone()
    }
}

fn showing(type_label: &str, name: &str) -> String {
    format!("Showing {type_label}: {name} (details in HTML log)")
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
