//! Book Minder - a book catalog service with ISBN enrichment.
//!
//! Keeps an in-memory catalog of book records and serves it over a small
//! JSON API. Creation can optionally enrich a record's bibliographic
//! fields from Open Library, keyed by ISBN.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod model;
pub mod store;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging; RUST_LOG still wins over the flag
    let directive = format!("book_minder={}", args.log_level).parse()?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive(directive))
        .init();

    cli::run(&args)
}
