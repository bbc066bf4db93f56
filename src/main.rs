// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

mod cli;
mod config;
mod jsonpath;
mod matcher;
mod output;
mod references;
mod resolver;
mod resources;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use matcher::Matcher;
use resolver::Resolver;

/// Initialize logging to stderr, keeping stdout machine-consumable.
fn init_logging(verbose: bool) {
    let filter = if verbose { "k8filter=debug" } else { "k8filter=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = cli::Args::parse();
    init_logging(args.verbose);

    // The kind metadata table loads before any matcher is constructed and
    // stays read-only for the rest of the run.
    let configuration = match &args.config {
        Some(path) => config::load(path)?,
        None => config::init_and_load(&config::default_path()?)?,
    };
    let resolver = Arc::new(Resolver::new(configuration.resources));

    let chain = cli::build_matcher(&args, &resolver)?;

    let mut results = Vec::new();
    resources::decode(&args.source, &mut |item| {
        if chain.matches(&item) {
            results.push(item);
        }
    })?;

    tracing::debug!(matched = results.len(), "filtering complete");

    print!(
        "{}",
        output::render(&results, &args.output, &resolver, args.no_headers)
    );

    Ok(())
}
