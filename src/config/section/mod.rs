//! Configuration section definitions.

mod dispatch;
mod graph;
mod server;

pub use dispatch::DispatchConfig;
pub use graph::GraphConfig;
pub use server::ServerConfig;
