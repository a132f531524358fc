//! Request dispatch: prefix matching, resolution, lazy compilation.
//!
//! The dispatcher is the per-request control flow between the hosting
//! pipeline, the asset graph and the file transmitter. It claims a request
//! only in serve mode and only under the configured prefix; everything else
//! is passed back to the caller untouched so a downstream handler decides
//! the final outcome.

mod helpers;
mod resolve;

pub use helpers::AssetHelpers;

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use thiserror::Error;

use crate::config::DispatchConfig;
use crate::graph::{AssetGraph, GraphError};
use crate::map::AssetMap;
use crate::transmit::{FileTransmitter, SendResult};
use crate::{debug, log};

/// Dispatch errors surfaced to the pipeline's error channel.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("asset `{0}` reported compiled but has no compiled path")]
    MissingCompiledPath(String),

    #[error("failed to transmit `{0}`: {1:#}")]
    Transmit(PathBuf, anyhow::Error),
}

/// Outcome of the routing decision for one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Not this dispatcher's concern; downstream continues.
    NotHandled,
    /// Serve the file at this physical path.
    Serve(PathBuf),
}

/// Outcome of handling one HTTP request.
pub enum Handled {
    /// The transmitter consumed the request (response written, or the
    /// connection was lost mid-transfer and nothing more can be sent).
    Served,
    /// Request returned to the caller for downstream handling.
    Pass(tiny_http::Request),
    /// Dispatch or transmit failed before a response started; request
    /// returned with the error.
    Failed(tiny_http::Request, DispatchError),
}

/// Per-request asset dispatcher.
///
/// Configuration and the asset map are immutable for the process lifetime;
/// only the graph's internal compiled state mutates during the run.
pub struct Dispatcher {
    prefix: String,
    serve: bool,
    map: AssetMap,
    graph: Option<Arc<dyn AssetGraph>>,
    transmitter: Arc<dyn FileTransmitter>,
}

impl Dispatcher {
    /// Construct the dispatcher: load the asset map best-effort and, in
    /// serve mode, trigger asynchronous asset discovery.
    ///
    /// Discovery is fire-and-forget: a failure is logged, never fatal.
    /// Requests arriving before it completes see "not found" until the
    /// graph's index fills, since the graph is consulted per request.
    pub fn new(
        config: &DispatchConfig,
        graph: Option<Arc<dyn AssetGraph>>,
        transmitter: Arc<dyn FileTransmitter>,
    ) -> Self {
        let map = AssetMap::load_or_empty(config.asset_map.as_deref());

        if config.serve
            && let Some(graph) = &graph
        {
            spawn_discovery(Arc::clone(graph), config.debug);
        }

        Self {
            prefix: config.prefix.clone(),
            serve: config.serve,
            map,
            graph,
            transmitter,
        }
    }

    /// The configured URL prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Rendering helpers for one request.
    pub fn helpers(self: &Arc<Self>) -> AssetHelpers {
        AssetHelpers::new(Arc::clone(self))
    }

    /// Routing decision for one request path.
    ///
    /// With serve mode off the dispatcher never claims a request; it exists
    /// purely to hand out rendering helpers in that mode.
    pub fn dispatch(&self, request_path: &str) -> Result<Dispatch, DispatchError> {
        if !self.serve {
            return Ok(Dispatch::NotHandled);
        }
        let Some(graph) = &self.graph else {
            return Ok(Dispatch::NotHandled);
        };

        let path = resolve::normalize_url(request_path);
        let Some(logical) = resolve::logical_path(&path, &self.prefix) else {
            return Ok(Dispatch::NotHandled);
        };

        let Some(asset) = graph.asset_by_logical_path(logical) else {
            // Let the rest of the pipeline decide (e.g. 404)
            return Ok(Dispatch::NotHandled);
        };

        let asset = if asset.compiled {
            asset
        } else {
            debug!("compile"; "on demand: {logical}");
            graph.compile_single_asset(&asset.source_path)?;
            // The snapshot taken before compilation is stale; re-fetch
            graph
                .asset_by_logical_path(logical)
                .ok_or_else(|| DispatchError::MissingCompiledPath(logical.to_string()))?
        };

        match asset.compiled_path {
            Some(path) => Ok(Dispatch::Serve(path)),
            None => Err(DispatchError::MissingCompiledPath(asset.logical_path)),
        }
    }

    /// Middleware entry: serve the request or give it back to the caller.
    ///
    /// Exactly one of the three outcomes happens per request, never both a
    /// served response and a pass-through.
    pub fn handle(&self, request: tiny_http::Request) -> Handled {
        match self.dispatch(request.url()) {
            Ok(Dispatch::Serve(path)) => match self.transmitter.send(request, &path) {
                SendResult::Sent => Handled::Served,
                SendResult::NotSent(request, e) => {
                    Handled::Failed(request, DispatchError::Transmit(path, e))
                }
                SendResult::Interrupted(e) => {
                    // The connection is spent mid-transfer; only logging remains
                    log!("serve"; "transmit interrupted for {}: {e:#}", path.display());
                    Handled::Served
                }
            },
            Ok(Dispatch::NotHandled) => Handled::Pass(request),
            Err(e) => Handled::Failed(request, e),
        }
    }

    pub(crate) fn map(&self) -> &AssetMap {
        &self.map
    }
}

fn spawn_discovery(graph: Arc<dyn AssetGraph>, timing: bool) {
    thread::spawn(move || {
        let start = Instant::now();
        match graph.find_assets() {
            Ok(count) if timing => {
                log!("graph"; "{} assets discovered in {} ms", count, start.elapsed().as_millis());
            }
            Ok(count) => {
                debug!("graph"; "{count} assets discovered");
            }
            Err(e) => {
                log!("graph"; "asset discovery failed: {e}");
            }
        }
    });
}
