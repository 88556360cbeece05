//! Output destinations of a document.

use crate::model::{DocumentError, SinkKind};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Where one of a document's two outputs goes.
#[derive(Default)]
pub enum SinkTarget {
    /// Standard output. Flushed on conclude, never closed.
    Console,
    /// A file created (or truncated) when the document is built.
    File(PathBuf),
    /// Any writer; dropped when the document concludes.
    Writer(Box<dyn Write + Send>),
    /// Discard this output.
    #[default]
    None,
}

impl fmt::Debug for SinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkTarget::Console => f.write_str("Console"),
            SinkTarget::File(path) => f.debug_tuple("File").field(path).finish(),
            SinkTarget::Writer(_) => f.write_str("Writer(..)"),
            SinkTarget::None => f.write_str("None"),
        }
    }
}

impl From<PathBuf> for SinkTarget {
    fn from(path: PathBuf) -> Self {
        SinkTarget::File(path)
    }
}

/// An opened sink.
pub(crate) enum Sink {
    Console,
    File {
        path: PathBuf,
        writer: BufWriter<File>,
    },
    Writer(Box<dyn Write + Send>),
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Console => f.write_str("Console"),
            Sink::File { path, .. } => f.debug_struct("File").field("path", path).finish(),
            Sink::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

impl Sink {
    /// Open `target`. `SinkTarget::None` opens nothing.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::SinkOpen` if a file cannot be created.
    pub(crate) fn open(target: SinkTarget, kind: SinkKind) -> Result<Option<Sink>, DocumentError> {
        let sink = match target {
            SinkTarget::Console => Sink::Console,
            SinkTarget::File(path) => {
                let file = File::create(&path).map_err(|source| DocumentError::SinkOpen {
                    kind,
                    path: path.clone(),
                    source,
                })?;
                Sink::File {
                    path,
                    writer: BufWriter::new(file),
                }
            }
            SinkTarget::Writer(writer) => Sink::Writer(writer),
            SinkTarget::None => return Ok(None),
        };
        Ok(Some(sink))
    }

    pub(crate) fn write_str(&mut self, text: &str) -> io::Result<()> {
        match self {
            Sink::Console => io::stdout().lock().write_all(text.as_bytes()),
            Sink::File { writer, .. } => writer.write_all(text.as_bytes()),
            Sink::Writer(writer) => writer.write_all(text.as_bytes()),
        }
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Console => io::stdout().lock().flush(),
            Sink::File { writer, .. } => writer.flush(),
            Sink::Writer(writer) => writer.flush(),
        }
    }

    /// Human-readable location, for diagnostics.
    pub(crate) fn location(&self) -> PathBuf {
        match self {
            Sink::Console => PathBuf::from("<console>"),
            Sink::File { path, .. } => path.clone(),
            Sink::Writer(_) => PathBuf::from("<writer>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_target_opens_nothing() {
        let sink = Sink::open(SinkTarget::None, SinkKind::Text).unwrap();
        assert!(sink.is_none());
    }

    #[test]
    fn unwritable_file_is_a_sink_open_error() {
        let target = SinkTarget::File(PathBuf::from("/definitely/not/a/dir/out.html"));
        let err = Sink::open(target, SinkKind::Html).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::SinkOpen {
                kind: SinkKind::Html,
                ..
            }
        ));
    }

    #[test]
    fn file_sink_writes_after_flush() {
        let path = std::env::temp_dir().join("foldlog_sink_file_test.txt");
        let mut sink = Sink::open(SinkTarget::File(path.clone()), SinkKind::Text)
            .unwrap()
            .unwrap();
        sink.write_str("hello\r\n").unwrap();
        sink.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\r\n");
        assert_eq!(sink.location(), path);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn debug_hides_writer_internals() {
        let target = SinkTarget::Writer(Box::new(Vec::<u8>::new()));
        assert_eq!(format!("{target:?}"), "Writer(..)");
    }
}
