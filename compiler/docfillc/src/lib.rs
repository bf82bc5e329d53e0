//! Library side of the `docfill` command-line tool.
//!
//! The binary in `main.rs` only parses arguments; everything it runs lives
//! here so it can be tested without spawning processes.

pub mod commands;
pub mod data;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Nothing is installed unless `RUST_LOG` is
/// set, e.g. `RUST_LOG=docfill_template=debug`. With `DOCFILL_LOG_TREE` set
/// the output is an indented span tree instead of flat lines.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var_os("DOCFILL_LOG_TREE").is_some() {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

#[cfg(test)]
mod tests;
