//! Development server wiring the dispatcher into an HTTP request loop.

mod lifecycle;
mod response;

pub use lifecycle::setup_shutdown_handler;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tiny_http::{Request, Server};

use crate::config::Config;
use crate::dispatch::{Dispatcher, Handled};
use crate::log;

/// Bound server ready to accept requests.
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
}

/// Bind the HTTP server without starting the request loop.
///
/// Binding before discovery lets early requests get an answer (a 404)
/// instead of a connection error.
pub fn bind_server(config: &Config) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.server.interface, config.server.port)?;
    let server = Arc::new(server);
    lifecycle::register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);

    Ok(BoundServer { server, addr })
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the request loop (blocking until shutdown).
    pub fn run(self, dispatcher: Arc<Dispatcher>) -> Result<()> {
        run_request_loop(&self.server, dispatcher);
        Ok(())
    }
}

fn run_request_loop(server: &Server, dispatcher: Arc<Dispatcher>) {
    // Thread pool keeps on-demand compilation from blocking other requests
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        let dispatcher = Arc::clone(&dispatcher);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &dispatcher) {
                log!("serve"; "request error: {e:#}");
            }
        });
    }
}

/// Handle a single HTTP request.
///
/// The dispatcher either serves the request, passes it back for the
/// downstream 404, or fails it with a compilation error.
fn handle_request(request: Request, dispatcher: &Dispatcher) -> Result<()> {
    if lifecycle::is_shutdown() {
        return response::respond_unavailable(request);
    }

    match dispatcher.handle(request) {
        Handled::Served => Ok(()),
        Handled::Pass(request) => response::respond_not_found(request),
        Handled::Failed(request, error) => {
            log!("error"; "{error}");
            response::respond_error(request, &error)
        }
    }
}
