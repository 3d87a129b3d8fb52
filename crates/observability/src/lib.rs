//! Tracing and logging setup shared by the binaries.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    self::tracing::init(self::tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, layers).
pub mod tracing;
