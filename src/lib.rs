//! Smelter - a request-time asset dispatcher.
//!
//! Answers, for each incoming HTTP request, whether it addresses a managed
//! static asset and serves the compiled artifact, compiling it on demand the
//! first time it is requested. Template helpers translate logical asset
//! names into tags and URLs across two deployment modes:
//!
//! - **serve mode**: assets are compiled and resolved live against an
//!   [`graph::AssetGraph`];
//! - **precompiled mode**: a static [`map::AssetMap`] produced by
//!   `smelter compile` is consulted instead.
//!
//! The [`dispatch::Dispatcher`] is the middleware seam for a hosting
//! pipeline; the [`server`] module wires it into a standalone dev server.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod graph;
pub mod logger;
pub mod map;
pub mod server;
pub mod transmit;
pub mod utils;
