//! Tracing and logging setup shared by the tourdesk binaries.

/// Initialize process-wide logging, reading the format from `LOG_FORMAT`.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Subscriber configuration (filters, output format).
pub mod tracing;
