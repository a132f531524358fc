//! Fallback HTTP responses for requests the dispatcher does not serve.

use anyhow::Result;
use tiny_http::{Request, Response, StatusCode};

use crate::dispatch::DispatchError;
use crate::transmit::{is_head_request, make_header};
use crate::utils::mime::types::PLAIN;

/// Respond with 404 for paths nothing downstream claims.
pub fn respond_not_found(request: Request) -> Result<()> {
    send_body(request, 404, b"404 Not Found".to_vec())
}

/// Respond with 500 carrying the compilation error text.
pub fn respond_error(request: Request, error: &DispatchError) -> Result<()> {
    let body = format!("500 Internal Server Error\n\n{error}");
    send_body(request, 500, body.into_bytes())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, b"503 Service Unavailable".to_vec())
}

fn send_body(request: Request, status: u16, body: Vec<u8>) -> Result<()> {
    if is_head_request(&request) {
        let response =
            Response::empty(StatusCode(status)).with_header(make_header("Content-Type", PLAIN));
        return request.respond(response).map_err(Into::into);
    }

    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", PLAIN));
    request.respond(response)?;
    Ok(())
}
