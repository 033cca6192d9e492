//! Tracing/logging setup shared by the binaries.

/// Initialize process-wide logging from `RUST_LOG` and `LOG_FORMAT`.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;
