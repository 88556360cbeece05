//! Executing requests.

use super::{HttpRequest, HttpResponse};
use crate::model::TransactionError;

/// Sends a captured request and returns the captured response.
pub trait HttpClient {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransactionError>;
}

impl HttpClient for reqwest::blocking::Client {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransactionError> {
        let mut builder = self
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());
        if let Some(body) = request.payload() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send()?;
        let status = response.status();
        let headers = response.headers().clone();
        HttpResponse::capture(status, headers, response)
    }
}
