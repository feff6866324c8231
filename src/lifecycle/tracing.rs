//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global subscriber: compact lines, no module path
//! (`with_target(false)`), levels from `RUST_LOG`.
//!
//! Log lines go to stderr so that listings and CSV exports on stdout stay clean.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: start (with the store path) and shutdown (with a request count)
//! - **Requests**: Create, Get, List, Update, Delete and Actions, keyed by `entity_type`
//! - **Client calls**: `#[instrument]` spans around every client method
//! - **Failures**: `warn!` with the entity id and the error
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info rental-desk book --customer 1 --type Car --period "1-30 days"
//! RUST_LOG=debug rental-desk rentals list     # payloads and connection open/close
//! ```
//!
//! Without `RUST_LOG` only warnings and errors are shown.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false) // entity_type says which actor logged
        .compact()
        .init();
}
