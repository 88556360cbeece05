//! Captured HTTP messages and their rendering.
//!
//! Requests and responses own their bodies as [`Bytes`], so a body can be shown in a
//! document and still be read by the caller afterwards: every `body_reader()` call
//! starts from the beginning of the same buffer.

pub mod client;
pub mod hooks;
pub mod render;

pub use client::HttpClient;
pub use render::{render_request, render_response, FieldHook, BODY_FIELD};

use crate::model::TransactionError;
use bytes::{buf::Reader, Buf, Bytes};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::io::Read;

/// An outgoing request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl HttpRequest {
    /// # Errors
    ///
    /// Returns [`TransactionError::InvalidRequest`] if `url` does not parse.
    pub fn new(method: Method, url: &str) -> Result<Self, TransactionError> {
        let url = Url::parse(url)
            .map_err(|err| TransactionError::InvalidRequest(format!("bad URL {url:?}: {err}")))?;
        Ok(Self::from_parts(method, url))
    }

    pub fn from_parts(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Append a header value. Repeating a name keeps every value.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::InvalidRequest`] for an invalid name or value.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, TransactionError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| TransactionError::InvalidRequest(format!("header name {name:?}: {err}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|err| TransactionError::InvalidRequest(format!("header value {value:?}: {err}")))?;
        self.headers.append(name, value);
        Ok(self)
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The body, if one was set.
    pub fn payload(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// A fresh reader over the body. Empty when no body was set.
    pub fn body_reader(&self) -> Reader<Bytes> {
        self.body.clone().unwrap_or_default().reader()
    }
}

/// A received response with its body fully buffered.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl HttpResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Drain a one-shot body stream into an owned buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::Body`] if reading the stream fails.
    pub fn capture(
        status: StatusCode,
        headers: HeaderMap,
        mut body: impl Read,
    ) -> Result<Self, TransactionError> {
        let mut buf = Vec::new();
        body.read_to_end(&mut buf)?;
        Ok(Self::new(status, headers, buf))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Status code and reason phrase, e.g. `404 Not Found`.
    pub fn status_line(&self) -> String {
        match self.status.canonical_reason() {
            Some(reason) => format!("{} {reason}", self.status.as_str()),
            None => self.status.as_str().to_string(),
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// A fresh reader over the buffered body.
    pub fn body_reader(&self) -> Reader<Bytes> {
        self.body.clone().reader()
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// # Errors
    ///
    /// Returns the `serde_json` error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn request_builder_collects_repeated_headers() {
        let req = HttpRequest::new(Method::POST, "https://example.com/api?x=1")
            .unwrap()
            .header("Accept", "text/plain")
            .unwrap()
            .header("Accept", "application/json")
            .unwrap()
            .body("payload");

        assert_eq!(req.headers().get_all("accept").iter().count(), 2);
        assert_eq!(req.url().path(), "/api");
        assert_eq!(req.payload().unwrap().as_ref(), b"payload");
    }

    #[test]
    fn invalid_url_and_header_are_rejected() {
        assert!(matches!(
            HttpRequest::new(Method::GET, "not a url"),
            Err(TransactionError::InvalidRequest(_))
        ));

        let req = HttpRequest::new(Method::GET, "https://example.com").unwrap();
        assert!(matches!(
            req.header("bad header", "x"),
            Err(TransactionError::InvalidRequest(_))
        ));
    }

    #[test]
    fn captured_body_can_be_read_repeatedly() {
        let stream = Cursor::new(b"{\"id\": 7}".to_vec());
        let resp = HttpResponse::capture(StatusCode::OK, HeaderMap::new(), stream).unwrap();

        let mut first = String::new();
        resp.body_reader().read_to_string(&mut first).unwrap();
        let mut second = String::new();
        resp.body_reader().read_to_string(&mut second).unwrap();

        assert_eq!(first, second);
        assert_eq!(resp.text(), "{\"id\": 7}");
        let parsed: serde_json::Value = resp.json().unwrap();
        assert_eq!(parsed["id"], 7);
    }

    #[test]
    fn status_line_includes_reason() {
        let resp = HttpResponse::new(StatusCode::NOT_FOUND, HeaderMap::new(), Bytes::new());
        assert_eq!(resp.status_line(), "404 Not Found");
    }

    #[test]
    fn request_without_body_reads_empty() {
        let req = HttpRequest::new(Method::GET, "https://example.com").unwrap();
        let mut out = Vec::new();
        req.body_reader().read_to_end(&mut out).unwrap();
        assert!(out.is_empty());
    }
}
