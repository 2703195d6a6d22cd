// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::{io, sync::OnceLock};

use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

// `RUST_LOG` takes precedence over the level given on the command line.
pub fn init_logging(log_level: &str) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_filter(filter),
        );

        if subscriber.try_init().is_err() {
            debug!("Global tracing subscriber already initialized");
        }
    });
}
