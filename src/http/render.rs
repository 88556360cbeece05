//! HTML for HTTP requests and responses.

use super::{HttpClient, HttpRequest, HttpResponse};
use crate::config::RenderLimits;
use crate::document::Document;
use crate::model::{marker, DocumentError, TransactionError};
use crate::view::markup::{escape_html, fold, notice, treat_as_code, CRLF};
use chrono::Local;
use reqwest::header::{HeaderMap, HeaderValue};
use std::fmt::Write as _;
use tracing::{debug, error};

/// Post-processes one field value before display: `(field name, value) -> shown text`.
pub type FieldHook = dyn Fn(&str, &str) -> String;

/// Field name the hook receives for message bodies.
pub const BODY_FIELD: &str = "HTTP Req/Resp Body/Payload";

fn process(field: &str, value: &str, hook: Option<&FieldHook>) -> String {
    match hook {
        Some(hook) => hook(field, value),
        None => value.to_string(),
    }
}

fn header_text(value: &HeaderValue) -> String {
    match value.to_str() {
        Ok(text) => text.to_string(),
        Err(_) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
    }
}

/// Request headline, e.g. `GET /search`.
pub fn request_headline(request: &HttpRequest) -> String {
    format!("{} {}", request.method(), request.url().path())
}

/// The block shown for an outgoing request.
pub fn render_request(
    request: &HttpRequest,
    hook: Option<&FieldHook>,
    limits: &RenderLimits,
) -> String {
    let url = request.url();
    let mut out = format!("<div class=\"outgoing implied_caution\">{CRLF}");
    let _ = write!(
        out,
        "<center><h2>{}</h2><small><b><i>{}</i></b></small>",
        escape_html(&request_headline(request)),
        escape_html(url.host_str().unwrap_or_default()),
    );

    let (_, full_url) = fold(
        &notice("(show complete URL)"),
        &format!("<br>{CRLF}{}{CRLF}", url.as_str().replace('&', "&amp;")),
    );
    let _ = write!(out, "<br><br>{full_url}");

    if url.query().map_or(true, str::is_empty) {
        let _ = write!(out, "<br><br>{}", notice("(no query)"));
    } else {
        let _ = write!(out, "<br><br><b>Queries</b><br><table class=\"gridlines\">{CRLF}");
        for (key, value) in url.query_pairs() {
            let shown = if value.is_empty() {
                "(unset)".to_string()
            } else {
                escape_html(&process(&key, &value, hook))
            };
            let _ = write!(out, "<tr><td>{}</td><td>{shown}</td></tr>", escape_html(&key));
        }
        let _ = write!(out, "{CRLF}</table>");
    }

    out.push_str("<br>");
    let body = request.payload().map(|b| &b[..]).unwrap_or_default();
    out.push_str(&headers_and_body(request.headers(), body, hook, limits));
    out.push_str("</div>");
    out
}

/// The block shown for an incoming response.
pub fn render_response(
    response: &HttpResponse,
    hook: Option<&FieldHook>,
    limits: &RenderLimits,
) -> String {
    let style = if response.status().is_success() {
        "implied_good"
    } else {
        "implied_bad"
    };
    let mut out = format!("<div class=\"incoming {style}\">{CRLF}");
    let _ = write!(out, "<center><h2>{}</h2>", escape_html(&response.status_line()));
    out.push_str(&headers_and_body(
        response.headers(),
        response.bytes(),
        hook,
        limits,
    ));
    out.push_str("</div>");
    out
}

/// Headers table followed by the payload; closes the `<center>` the headline opened.
fn headers_and_body(
    headers: &HeaderMap,
    body: &[u8],
    hook: Option<&FieldHook>,
    limits: &RenderLimits,
) -> String {
    let mut out = String::new();

    let names = headers.keys_len();
    if names == 0 {
        let _ = write!(out, "<br><br>{}<br>{CRLF}", notice("(no headers)"));
    } else {
        out.push_str("<br><b>Headers</b><br>");
        let mut table = format!("<table class=\"gridlines\">{CRLF}");
        for name in headers.keys() {
            let values: Vec<String> = headers
                .get_all(name)
                .iter()
                .map(|value| escape_html(&process(name.as_str(), &header_text(value), hook)))
                .collect();
            let _ = write!(table, "<tr><td>{}</td><td>", escape_html(name.as_str()));
            match values.as_slice() {
                [] => table.push_str(&notice("(empty)")),
                [only] => table.push_str(only),
                many => {
                    let _ = write!(table, "<table class=\"gridlines neutral\">{CRLF}");
                    for value in many {
                        let _ = write!(table, "<tr><td>{value}</td></tr>");
                    }
                    let _ = write!(table, "{CRLF}</table>");
                }
            }
            table.push_str("</td></tr>");
        }
        let _ = write!(table, "{CRLF}</table><br>");

        if names > limits.max_headers {
            let (_, folded) = fold(&format!("(show {names} headers)"), &table);
            out.push_str(&folded);
        } else {
            out.push_str(&table);
        }
    }

    if body.is_empty() {
        let _ = write!(out, "<br><br>{}</center>", notice("(no payload)"));
    } else {
        let payload = String::from_utf8_lossy(body);
        let _ = write!(out, "<br><b>Payload</b><br></center>{CRLF}");
        let code = treat_as_code(&process(BODY_FIELD, &payload, hook));
        if body.len() > limits.max_body_length {
            let (_, folded) = fold("(show large payload)", &code);
            out.push_str(&folded);
        } else {
            out.push_str(&code);
        }
    }

    out
}

impl Document {
    /// Append an outgoing request. Returns the rendered block.
    pub fn show_http_request(
        &mut self,
        request: &HttpRequest,
        hook: Option<&FieldHook>,
    ) -> Result<String, DocumentError> {
        self.ensure_open()?;
        let html = render_request(request, hook, &self.config().limits);
        self.write_entry(
            Local::now(),
            marker::OUTGOING,
            &html,
            &request_headline(request),
        )?;
        Ok(html)
    }

    /// Append a received response. Returns the rendered block.
    pub fn show_http_response(
        &mut self,
        response: &HttpResponse,
        hook: Option<&FieldHook>,
    ) -> Result<String, DocumentError> {
        self.ensure_open()?;
        let html = render_response(response, hook, &self.config().limits);
        self.write_entry(
            Local::now(),
            marker::INCOMING,
            &html,
            &response.status_line(),
        )?;
        Ok(html)
    }

    /// Show `request`, send it through `client`, show the response and return it.
    ///
    /// A transport failure is recorded as an error entry before being returned.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::Document`] if this document is concluded and
    /// whatever `client` returns if the exchange fails.
    pub fn show_http_transaction(
        &mut self,
        client: &dyn HttpClient,
        request: &HttpRequest,
        hook: Option<&FieldHook>,
    ) -> Result<HttpResponse, TransactionError> {
        self.show_http_request(request, hook)?;
        let response = match client.execute(request) {
            Ok(response) => response,
            Err(err) => {
                error!(url = %request.url(), error = %err, "HTTP transaction failed");
                self.error(&escape_html(&format!("Request failed: {err}")))?;
                return Err(err);
            }
        };
        debug!(url = %request.url(), status = %response.status(), "HTTP transaction completed");
        self.show_http_response(&response, hook)?;
        Ok(response)
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
