//! Metrics Collectors
//!
//! Collectors turn pwrstat status into Prometheus samples. They implement
//! [`prometheus::core::Collector`] and are registered with the exporter's
//! registry, so every scrape runs them synchronously on the gathering thread.
//!
//! # Error Handling
//!
//! A failed status query is not fatal: the collector logs a warning, emits no
//! UPS samples for that scrape and reports `pwrstat_up 0`. The next scrape
//! starts from scratch.

use tracing::{debug, warn};

/// Status of a metrics collection operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatus {
    /// Metrics were successfully collected
    Success,
    /// Collection failed but is non-fatal (already logged as warning)
    Failed,
}

impl CollectionStatus {
    /// Value reported by the up gauge
    pub fn up_value(self) -> f64 {
        match self {
            Self::Success => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// Helper to reduce boilerplate in collectors
///
/// Wraps a query result with consistent error handling:
/// - On success: processes data, logs success, returns `CollectionStatus::Success`
/// - On error: logs warning, returns `CollectionStatus::Failed` (non-fatal)
///
/// # Examples
///
/// ```
/// # use pwrstat_exporter::collectors::{collect_with_handler, CollectionStatus};
/// let mut total: i32 = 0;
/// let status = collect_with_handler("numbers", Ok::<_, String>(vec![1, 2, 3]), |numbers| {
///     total = numbers.iter().sum();
/// });
/// assert_eq!(status, CollectionStatus::Success);
/// assert_eq!(total, 6);
/// ```
pub fn collect_with_handler<T, E, P>(
    name: &str,
    query: Result<T, E>,
    process: P,
) -> CollectionStatus
where
    E: std::fmt::Display,
    P: FnOnce(T),
{
    match query {
        Ok(data) => {
            process(data);
            debug!("Updated {} metrics", name);
            CollectionStatus::Success
        }
        Err(e) => {
            warn!("Failed to query {}: {}", name, e);
            CollectionStatus::Failed
        }
    }
}

pub mod ups;

pub use ups::{device_label, translate, Sample, UpsCollector};
