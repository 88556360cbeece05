use super::*;
use crate::config::RenderLimits;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
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

fn quiet(title: &str) -> Document {
    Document::builder(title)
        .text_target(SinkTarget::None)
        .build()
        .unwrap()
}

fn rows(content: &str) -> usize {
    content.matches("<tr><td class=\"min\">").count()
}

#[test]
fn fresh_document_is_unused() {
    let doc = quiet("fresh");
    assert_eq!(doc.content(), PREAMBLE);
    assert!(!doc.was_used());
    assert!(!doc.is_concluded());
}

#[test]
fn concluding_an_empty_document_leaves_it_unused() {
    // GIVEN a document that never received an entry
    let mut doc = quiet("empty");

    // WHEN it is concluded
    doc.conclude();

    // THEN it still reports as unused even though the table was closed
    assert!(!doc.was_used());
    assert!(doc.content().ends_with("</table>"));
}

#[test]
fn concluding_a_written_document_keeps_it_used() {
    let mut doc = quiet("written");
    doc.skip_line().unwrap();
    doc.conclude();
    assert!(doc.was_used());
}

#[test]
fn empty_title_becomes_unknown() {
    assert_eq!(quiet("").title(), "(unknown)");
    assert_eq!(Document::new("").title(), "(unknown)");
}

#[test]
fn info_then_debug_gives_two_rows_second_highlighted() {
    // GIVEN a fresh document
    let mut doc = quiet("scenario");

    // WHEN one plain and one debug entry are written and the document concluded
    doc.info("a").unwrap();
    doc.debug("b").unwrap();
    let content = doc.conclude();

    // THEN there are exactly two rows and only the second is highlighted
    assert_eq!(rows(&content), 2);
    let second = content.rfind("<tr>").unwrap();
    assert!(!content[..second].contains("highlighted"));
    assert!(content[second..].contains("<p class=\"highlighted outlined\">&nbsp;b&nbsp;</p>"));
    assert!(content[second..].contains("<h2>🐞</h2>"));
    assert!(content.ends_with("</tr>\r\n\r\n</table>"));
}

#[test]
fn writes_after_conclude_fail_and_change_nothing() {
    let mut doc = quiet("sealed");
    doc.info("only").unwrap();
    let content = doc.conclude();

    assert!(doc.info("late").unwrap_err().is_concluded());
    assert!(doc.debug("late").unwrap_err().is_concluded());
    assert!(doc.error("late").unwrap_err().is_concluded());
    assert!(doc.skip_line().unwrap_err().is_concluded());
    assert!(doc.show(&1, "n").unwrap_err().is_concluded());
    assert!(doc.show_as_structured(&1, "n").unwrap_err().is_concluded());

    assert_eq!(doc.content(), content);
    assert_eq!(doc.conclude(), content);
}

#[test]
fn settings_control_row_cells() {
    let config = DocumentConfig {
        show_timestamps: false,
        show_emojis: false,
        ..DocumentConfig::default()
    };
    let mut doc = Document::builder("bare")
        .text_target(SinkTarget::None)
        .config(config)
        .build()
        .unwrap();

    doc.info_with(marker::PASSING_TEST, "ok").unwrap();

    assert!(doc.content().ends_with("<tr><td>ok</td></tr>\r\n"));
}

#[test]
fn text_stream_has_banner_once_and_closing_lines() {
    let buffer = SharedBuffer::default();
    let config = DocumentConfig {
        show_timestamps: false,
        ..DocumentConfig::default()
    };
    let mut doc = Document::builder("Echoed")
        .text_target(SinkTarget::Writer(Box::new(buffer.clone())))
        .config(config)
        .build()
        .unwrap();

    doc.info_with(marker::SETUP, "one").unwrap();
    doc.debug("two").unwrap();
    doc.conclude();
    doc.conclude();

    assert_eq!(
        buffer.text(),
        "\t\r\n📝\tEchoed\r\n🛠\tone\r\n🐞\ttwo\r\n⤴️\t\r\n\t\r\n"
    );
}

#[test]
fn missing_text_sink_is_silent() {
    let mut doc = quiet("no echo");
    doc.info("kept in html only").unwrap();
    assert!(doc.content().contains("kept in html only"));
}

#[test]
fn html_sink_receives_head_content_and_tail() {
    let buffer = SharedBuffer::default();
    let mut doc = Document::builder("Artifact")
        .html_target(SinkTarget::Writer(Box::new(buffer.clone())))
        .text_target(SinkTarget::None)
        .theme(Theme::DarkFlat)
        .build()
        .unwrap();

    let head = buffer.text();
    assert!(head.contains("<title>Artifact</title>"));
    assert!(head.contains(&Theme::DarkFlat.css()));
    assert!(head.ends_with(&frame::default_header("Artifact")));

    doc.info("body").unwrap();
    let content = doc.conclude();

    let page = buffer.text();
    assert_eq!(page, format!("{head}{content}\r\n</body>\r\n</html>"));
}

#[test]
fn custom_header_and_css_are_used() {
    fn header(title: &str) -> String {
        format!("<h3>[{title}]</h3>")
    }

    let buffer = SharedBuffer::default();
    let _doc = Document::builder("Custom")
        .html_target(SinkTarget::Writer(Box::new(buffer.clone())))
        .text_target(SinkTarget::None)
        .theme_css("<style>td {}</style>")
        .header(header)
        .build()
        .unwrap();

    let head = buffer.text();
    assert!(head.contains("<style>td {}</style></head>"));
    assert!(head.ends_with("<h3>[Custom]</h3>"));
}

#[test]
fn show_writes_one_object_row_and_returns_fragment() {
    let mut doc = quiet("show");
    let fragment = doc.show(&vec![1, 2, 3], "numbers").unwrap();

    assert_eq!(rows(doc.content()), 1);
    assert!(doc.content().contains(&fragment));
    assert!(doc.content().contains("<h2>🔲</h2>"));
}

#[test]
fn show_echoes_a_summary_line() {
    let buffer = SharedBuffer::default();
    let config = DocumentConfig {
        show_timestamps: false,
        show_emojis: false,
        ..DocumentConfig::default()
    };
    let mut doc = Document::builder("echo")
        .text_target(SinkTarget::Writer(Box::new(buffer.clone())))
        .config(config)
        .build()
        .unwrap();

    doc.show(&vec![1, 2], "pair").unwrap();

    assert!(buffer
        .text()
        .ends_with("Showing Vec<i32>: pair (details in HTML log)\r\n"));
}

#[test]
fn structured_dump_uses_injected_stringifier() {
    let compact = |value: &serde_json::Value| -> Result<String, crate::render::StringifyError> {
        Ok(format!("compact:{value}"))
    };
    let mut doc = Document::builder("dump")
        .text_target(SinkTarget::None)
        .stringify(compact)
        .build()
        .unwrap();

    let fragment = doc
        .show_as_structured(&serde_json::json!({"k": 1}), "payload")
        .unwrap();

    assert!(fragment.contains("compact:{&quot;k&quot;:1}"));
}

#[test]
fn limits_reach_the_engine() {
    let config = DocumentConfig {
        limits: RenderLimits {
            max_items: 2,
            ..RenderLimits::default()
        },
        ..DocumentConfig::default()
    };
    let mut doc = Document::builder("limits")
        .text_target(SinkTarget::None)
        .config(config)
        .build()
        .unwrap();

    let fragment = doc.show(&vec![1, 2, 3], "three").unwrap();

    assert!(fragment.contains("(show 3 items)"));
}

#[test]
fn show_error_lists_causes() {
    #[derive(Debug, thiserror::Error)]
    #[error("outer failure")]
    struct Outer(#[source] io::Error);

    let mut doc = quiet("errors");
    let err = Outer(io::Error::new(io::ErrorKind::Other, "disk gone"));
    let fragment = doc.show_error(&err, "failure").unwrap();

    assert!(fragment.contains("outer failure"));
    assert!(fragment.contains("→ disk gone"));
    assert!(doc.content().contains("<h2>😱</h2>"));
}

#[test]
fn html_file_is_written_on_conclude() {
    let path = std::env::temp_dir().join(format!("foldlog_doc_{}.html", uuid::Uuid::new_v4()));
    let mut doc = Document::builder("On disk")
        .html_file(&path)
        .text_target(SinkTarget::None)
        .build()
        .unwrap();
    doc.info("persisted").unwrap();
    doc.conclude();

    let page = std::fs::read_to_string(&path).unwrap();
    assert!(page.starts_with("<html>"));
    assert!(page.contains("persisted"));
    assert!(page.ends_with("</body>\r\n</html>"));
    std::fs::remove_file(path).ok();
}

#[test]
fn unopenable_html_file_fails_build() {
    let err = Document::builder("nowhere")
        .html_file("/definitely/not/a/dir/out.html")
        .build()
        .unwrap_err();
    assert!(matches!(err, DocumentError::SinkOpen { .. }));
}
