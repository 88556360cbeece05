//! Shared helpers for integration tests.

#![allow(dead_code)]

use foldlog::{Document, SinkTarget};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// A `Write` whose contents stay readable after the document takes ownership.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn target(&self) -> SinkTarget {
        SinkTarget::Writer(Box::new(self.clone()))
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A document with no text echo.
pub fn quiet(title: &str) -> Document {
    Document::builder(title)
        .text_target(SinkTarget::None)
        .build()
        .expect("document without file sinks always builds")
}

/// Entry rows carry a date cell; nested tables do not.
pub fn row_count(content: &str) -> usize {
    content.matches("<tr><td class=\"min\">").count()
}

/// Every `for="…"` toggle identifier in `html`.
pub fn toggle_ids(html: &str) -> Vec<String> {
    html.split("<label for=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}
