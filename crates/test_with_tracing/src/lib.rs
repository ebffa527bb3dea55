// Copyright (C) Microsoft Corporation. All rights reserved.

//! Tests with tracing output.
//!
//! Import [`test`] in place of the built-in attribute:
//!
//! ```ignore
//! use test_with_tracing::test;
//! ```
//!
//! Each test then installs a process-wide `tracing` subscriber that writes to
//! the test harness, so engine events show up next to failing assertions.
//! Spans are reported when they close, with their busy and idle time, which
//! shows how long each instrumented encrypt or decrypt call took.
//!
//! The `RUST_LOG` variable selects targets and levels using the
//! `target=level,...` syntax. Without it the engine crate logs at `TRACE` and
//! everything else at `INFO`, which keeps OpenSSL and harness noise out of
//! the output.

// Only used by test code; `expect` is allowed here (but not `unwrap`).
#![allow(clippy::expect_used)]

#[cfg(test)]
extern crate self as test_with_tracing;

pub use test_with_tracing_macro::test;
use tracing::metadata::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;

const LOG_ENV: &str = "RUST_LOG";

/// Crate whose events are shown in full by default.
const ENGINE_TARGET: &str = "symkit_crypto";

fn targets() -> Targets {
    match std::env::var(LOG_ENV) {
        Ok(filter) => filter
            .parse()
            .expect("Failed to parse RUST_LOG environment variable"),
        Err(_) => default_targets(),
    }
}

fn default_targets() -> Targets {
    Targets::new()
        .with_default(LevelFilter::INFO)
        .with_target(ENGINE_TARGET, LevelFilter::TRACE)
}

#[doc(hidden)]
/// Installs the test subscriber once per process.
pub fn init() {
    static INIT: std::sync::Once = std::sync::Once::new();

    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .pretty()
            .with_ansi(false)
            .with_test_writer()
            .with_span_events(FmtSpan::CLOSE)
            .with_max_level(LevelFilter::TRACE)
            .with_thread_ids(true)
            .log_internal_errors(true)
            .finish()
            .with(targets())
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::test;

    #[test]
    fn test_tracing_event() {
        tracing::debug!(suite = "AES-128-CBC", "tracing event reaches the test writer");
    }

    #[test]
    fn test_span_close_reported() {
        #[tracing::instrument(fields(suite = "AES-256-GCM"))]
        fn seal(len: usize) -> usize {
            tracing::trace!("sealing");
            len + 28
        }

        assert_eq!(seal(5), 33);
    }

    #[test]
    fn test_default_targets() {
        use tracing::Level;

        let targets = super::default_targets();
        assert!(targets.would_enable("symkit_crypto::engine", &Level::TRACE));
        assert!(targets.would_enable("openssl", &Level::INFO));
        assert!(!targets.would_enable("openssl", &Level::DEBUG));
    }

    #[test]
    fn test_log_event() {
        log::info!("log records are bridged into tracing");
    }

    #[test]
    fn test_init_is_idempotent() {
        super::init();
        super::init();
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn test_attributes_kept() {
        panic!("boom");
    }

    #[test]
    fn test_result_return() -> Result<(), std::num::ParseIntError> {
        let bits: usize = "256".parse()?;
        assert_eq!(bits, 256);
        Ok(())
    }
}
