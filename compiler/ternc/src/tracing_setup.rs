//! Tracing subscriber setup.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=tern_erase=trace`.
/// Safe to call more than once; only the first call has an effect.
pub fn init_tracing(log_tree: bool) {
    TRACING_INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let tree = log_tree.then(|| HierarchicalLayer::new(2).with_targets(true).with_bracketed_fields(true));
        let flat = (!log_tree).then(|| fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr));
        tracing_subscriber::registry().with(tree).with(flat).with(filter).init();
    });
}
