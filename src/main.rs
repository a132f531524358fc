//! Smelter - request-time asset dispatcher.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::{ColorChoice, Parser};

use smelter::cli::{Cli, Commands};
use smelter::config::Config;
use smelter::dispatch::Dispatcher;
use smelter::graph::{AssetGraph, FsGraph};
use smelter::transmit::HttpTransmitter;
use smelter::{log, logger, server};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    server::setup_shutdown_handler()?;

    let cli = Cli::parse();
    logger::set_verbose(cli.verbose);

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Serve { interface, port } => serve(config, interface, port),
        Commands::Compile { out } => compile(&config, out),
    }
}

/// Bind the server, construct the dispatcher and enter the request loop.
fn serve(mut config: Config, interface: Option<IpAddr>, port: Option<u16>) -> Result<()> {
    if let Some(interface) = interface {
        config.server.interface = interface;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    // Bind first so early requests get a response instead of a refusal
    let bound = server::bind_server(&config)?;

    let graph = config.dispatch.serve.then(|| {
        Arc::new(FsGraph::new(
            config.graph.source.clone(),
            config.graph.output.clone(),
        )) as Arc<dyn AssetGraph>
    });
    let dispatcher = Arc::new(Dispatcher::new(
        &config.dispatch,
        graph,
        Arc::new(HttpTransmitter),
    ));

    bound.run(dispatcher)
}

/// Compile every asset and write the asset map artifact.
fn compile(config: &Config, out: Option<PathBuf>) -> Result<()> {
    let graph = FsGraph::new(config.graph.source.clone(), config.graph.output.clone());

    let start = Instant::now();
    let discovered = graph.find_assets()?;
    let map = graph.compile_all()?;

    let out = out.unwrap_or_else(|| config.root_join("asset-map.json"));
    map.write(&out)?;

    log!(
        "compile";
        "{} assets compiled ({} mapped) in {} ms",
        discovered,
        map.len(),
        start.elapsed().as_millis()
    );
    log!("map"; "{}", out.display());
    Ok(())
}
