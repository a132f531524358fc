//! Static file transmission boundary.
//!
//! The dispatcher resolves a physical path and hands it over; the
//! transmitter owns the actual byte transfer and response semantics. It is
//! injected at dispatcher construction so tests can substitute a fake.

use std::fs;
use std::path::Path;

use anyhow::Error;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::utils::mime;

/// Outcome of a transmit attempt.
///
/// Failures are split by whether response bytes were already on the wire:
/// before the response starts the request comes back so the caller can
/// still answer it with an error; afterwards the connection is spent and
/// only logging remains.
pub enum SendResult {
    /// Response fully written.
    Sent,
    /// Failed before any response bytes were written.
    NotSent(Request, Error),
    /// Failed mid-transfer; the connection is gone.
    Interrupted(Error),
}

/// Sends a resolved file over the wire.
pub trait FileTransmitter: Send + Sync {
    /// Transfer the file at `path` as the response to `request`.
    fn send(&self, request: Request, path: &Path) -> SendResult;
}

/// Transmitter answering `tiny_http` requests with file bytes and a
/// MIME-typed Content-Type header.
pub struct HttpTransmitter;

impl FileTransmitter for HttpTransmitter {
    fn send(&self, request: Request, path: &Path) -> SendResult {
        let content_type = mime::from_path(path);

        if is_head_request(&request) {
            let response = Response::empty(StatusCode(200))
                .with_header(make_header("Content-Type", content_type));
            return match request.respond(response) {
                Ok(()) => SendResult::Sent,
                Err(e) => SendResult::Interrupted(e.into()),
            };
        }

        let body = match fs::read(path) {
            Ok(body) => body,
            Err(e) => {
                let e = Error::new(e).context(format!("Failed to read {}", path.display()));
                return SendResult::NotSent(request, e);
            }
        };

        let response = Response::from_data(body)
            .with_status_code(StatusCode(200))
            .with_header(make_header("Content-Type", content_type));
        match request.respond(response) {
            Ok(()) => SendResult::Sent,
            Err(e) => SendResult::Interrupted(e.into()),
        }
    }
}

pub(crate) fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

pub(crate) fn make_header(name: &str, value: &str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("static header is valid")
}
