use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Sets up the global subscriber. Levels come from `MARKOV_LOG`
/// (e.g. `MARKOV_LOG=joke_markov=debug`), defaulting to `joke_markov=info`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("MARKOV_LOG")
            .unwrap_or_else(|_| EnvFilter::new("joke_markov=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
