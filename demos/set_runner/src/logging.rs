//! Diagnostics for the demo
//!
//! `RUST_LOG` selects what is shown (default `warn`); output goes to stderr
//! so the set reports on stdout stay clean.
//!
//! ```bash
//! RUST_LOG=partix_set=info,partix_hub=debug cargo run -p set_runner -- scenarios/chain.ron
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
