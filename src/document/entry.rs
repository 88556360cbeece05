//! Serialization of single entries.
//!
//! An entry exists only in serialized form: one table row appended to the HTML
//! buffer and one line echoed to the plain-text sink. Both carry the same
//! timestamp, captured once by the caller.

use super::Document;
use crate::config::DocumentConfig;
use crate::model::{marker, DocumentError};
use crate::view::markup::CRLF;
use chrono::{DateTime, Local};
use tracing::{error, warn};

/// Calendar date of an entry, e.g. `2024-03-09`.
pub fn format_date(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Wall-clock time of an entry with four fractional digits, e.g. `07:05:03.1200`.
pub fn format_time(timestamp: &DateTime<Local>) -> String {
    format!(
        "{}.{:04}",
        timestamp.format("%H:%M:%S"),
        timestamp.timestamp_subsec_micros() / 100
    )
}

/// One row of the entry table.
pub fn html_row(
    settings: &DocumentConfig,
    timestamp: &DateTime<Local>,
    marker: &str,
    message: &str,
) -> String {
    let mut row = String::from("<tr>");
    if settings.show_timestamps {
        row.push_str(&format!(
            "<td class=\"min\"><small>{}</small></td><td>&nbsp;</td><td class=\"min\"><small>{}</small></td><td>&nbsp;</td>",
            format_date(timestamp),
            format_time(timestamp)
        ));
    }
    if settings.show_emojis {
        row.push_str(&format!("<td><h2>{marker}</h2></td>"));
    }
    row.push_str(&format!("<td>{message}</td></tr>{CRLF}"));
    row
}

/// One line of the plain-text stream.
pub fn text_line(
    settings: &DocumentConfig,
    timestamp: &DateTime<Local>,
    marker: &str,
    message: &str,
) -> String {
    let mut line = String::new();
    if settings.show_timestamps {
        line.push_str(&format!(
            "{} {}\t",
            format_date(timestamp),
            format_time(timestamp)
        ));
    }
    if settings.show_emojis {
        line.push_str(marker);
        line.push('\t');
    }
    line.push_str(message);
    line.push_str(CRLF);
    line
}

impl Document {
    fn refuse(&self) -> DocumentError {
        warn!(title = %self.title, "Refused write to concluded document");
        DocumentError::Concluded {
            title: self.title.clone(),
        }
    }

    /// Fail fast when the document no longer accepts entries.
    pub(crate) fn ensure_open(&self) -> Result<(), DocumentError> {
        if self.concluded {
            return Err(self.refuse());
        }
        Ok(())
    }

    /// Write one entry to both outputs.
    pub(crate) fn write_entry(
        &mut self,
        timestamp: DateTime<Local>,
        marker: &str,
        html_message: &str,
        text_message: &str,
    ) -> Result<(), DocumentError> {
        self.append_row(&timestamp, marker, html_message)?;
        self.echo(&timestamp, marker, text_message)
    }

    fn append_row(
        &mut self,
        timestamp: &DateTime<Local>,
        marker: &str,
        message: &str,
    ) -> Result<(), DocumentError> {
        self.ensure_open()?;
        let row = html_row(&self.config, timestamp, marker, message);
        self.content.push_str(&row);
        self.entries += 1;
        Ok(())
    }

    /// Echo one line to the plain-text sink, preceded by the banner on first use.
    ///
    /// A document without a text sink accepts and drops the line.
    pub(crate) fn echo(
        &mut self,
        timestamp: &DateTime<Local>,
        marker: &str,
        message: &str,
    ) -> Result<(), DocumentError> {
        if self.text_sink.is_none() {
            return Ok(());
        }
        self.ensure_open()?;

        let mut out = String::new();
        if self.first_echo {
            self.first_echo = false;
            out.push_str(&text_line(&self.config, timestamp, marker::BLANK, ""));
            out.push_str(&text_line(
                &self.config,
                timestamp,
                marker::DOCUMENT,
                &self.title,
            ));
        }
        out.push_str(&text_line(&self.config, timestamp, marker, message));

        if let Some(sink) = self.text_sink.as_mut() {
            if let Err(err) = sink.write_str(&out) {
                error!(
                    title = %self.title,
                    location = %sink.location().display(),
                    error = %err,
                    "Failed to echo plain-text line"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 3)
            .single()
            .unwrap()
            + chrono::Duration::microseconds(120_456)
    }

    fn settings(show_timestamps: bool, show_emojis: bool) -> DocumentConfig {
        DocumentConfig {
            show_timestamps,
            show_emojis,
            ..DocumentConfig::default()
        }
    }

    #[test]
    fn time_has_four_fractional_digits() {
        assert_eq!(format_date(&at()), "2024-03-09");
        assert_eq!(format_time(&at()), "07:05:03.1204");
    }

    #[test]
    fn full_row_has_date_time_marker_and_message() {
        let row = html_row(&settings(true, true), &at(), "✅", "passed");
        insta::assert_snapshot!(row.trim_end(), @r#"<tr><td class="min"><small>2024-03-09</small></td><td>&nbsp;</td><td class="min"><small>07:05:03.1204</small></td><td>&nbsp;</td><td><h2>✅</h2></td><td>passed</td></tr>"#);
        assert!(row.ends_with("</tr>\r\n"));
    }

    #[test]
    fn bare_row_has_only_the_message() {
        let row = html_row(&settings(false, false), &at(), "✅", "passed");
        assert_eq!(row, "<tr><td>passed</td></tr>\r\n");
    }

    #[test]
    fn text_line_is_tab_separated() {
        let line = text_line(&settings(true, true), &at(), "🐞", "look here");
        assert_eq!(line, "2024-03-09 07:05:03.1204\t🐞\tlook here\r\n");

        let line = text_line(&settings(false, true), &at(), "🐞", "look here");
        assert_eq!(line, "🐞\tlook here\r\n");

        let line = text_line(&settings(false, false), &at(), "🐞", "look here");
        assert_eq!(line, "look here\r\n");
    }
}
