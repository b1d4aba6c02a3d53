//! OS telemetry collaborator
//!
//! The memory providers never talk to the operating system directly. Every query goes through the [`Telemetry`]
//! trait, which exposes exactly three things: a performance-information structure measured in pages, named
//! counter sets, and the host page size. One backend exists per supported OS and is exported as
//! [`NativeTelemetry`].
//!
//! Counter sets are named after their Windows performance-counter equivalents. Backends on other platforms map
//! the same property names onto whatever their kernel exposes.

use std::collections::HashMap;

use crate::error::Result;

#[cfg(test)]
use mockall::automock;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
pub use linux::ProcfsTelemetry as NativeTelemetry;
#[cfg(target_os = "macos")]
pub use macos::SysctlTelemetry as NativeTelemetry;
#[cfg(target_os = "windows")]
pub use windows::PdhTelemetry as NativeTelemetry;

/// Values returned by a counter-set query, keyed by property name
///
/// A property missing from the map is a counter that exists but has not been populated yet. Callers treat it as
/// zero.
pub type CounterValues = HashMap<String, u64>;

/// Memory figures reported by the OS, all in pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerformanceInfo {
    /// Maximum pages the system can commit (physical memory plus swap)
    pub commit_limit: u64,
    /// Installed physical memory
    pub physical_total: u64,
    /// Physical memory currently available to processes
    pub physical_available: u64,
}

/// A named group of counters queried together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSet {
    /// Counter object name, e.g. `Memory`
    pub name: &'static str,
    /// Instance within the object, if the object has instances
    pub instance: Option<&'static str>,
    /// Properties read in one query
    pub properties: &'static [&'static str],
}

/// Swap usage property of [`PAGING_FILE`]
pub const PERCENT_USAGE: &str = "% Usage";

/// Pages read from swap, property of [`MEMORY`]
pub const PAGES_INPUT: &str = "Pages Input/sec";

/// Pages written to swap, property of [`MEMORY`]
pub const PAGES_OUTPUT: &str = "Pages Output/sec";

/// Swap file usage, summed over all paging files
pub const PAGING_FILE: CounterSet = CounterSet {
    name: "Paging File",
    instance: Some("_Total"),
    properties: &[PERCENT_USAGE],
};

/// Paging activity
pub const MEMORY: CounterSet = CounterSet {
    name: "Memory",
    instance: None,
    properties: &[PAGES_INPUT, PAGES_OUTPUT],
};

/// Render the full counter path for a property, e.g. `\Paging File(_Total)\% Usage`
pub fn counter_path(set: &CounterSet, property: &str) -> String {
    match set.instance {
        Some(instance) => format!("\\{}({})\\{}", set.name, instance, property),
        None => format!("\\{}\\{}", set.name, property),
    }
}

/// Platform-specific source of memory telemetry
#[cfg_attr(test, automock)]
pub trait Telemetry: Send + Sync + std::fmt::Debug {
    /// Query commit limit and physical memory figures, in pages
    fn performance_info(&self) -> Result<PerformanceInfo>;

    /// Query every property of `set` in one call
    fn query_counters(&self, set: CounterSet) -> Result<CounterValues>;

    /// Host page size in bytes, always positive
    fn page_size(&self) -> u64;
}
