//! Physical and virtual memory telemetry
//!
//! [`Memory`] reports installed and available RAM and owns a [`Swap`] provider for the same host. Both sit on top
//! of a [`Telemetry`] backend, so the caching rules below hold on every platform.
//!
//! # Caching
//!
//! - Installed memory and swap capacity are read once and kept for the life of the provider. A failed read is
//!   not cached; the next call queries again.
//! - Available memory and swap usage are queried on every call.
//! - Paging activity is sampled at most once per refresh interval (300 ms by default).
//!
//! Accessors never fail. When the OS cannot answer, the failure is logged and `0` is returned.
//!
//! # Examples
//!
//! ```no_run
//! use memory_telemetry::memory::Memory;
//! use memory_telemetry::traits::{PhysicalMemoryProvider, VirtualMemoryProvider};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let memory = Memory::system()?;
//!     println!("{}", memory);
//!
//!     let swap = memory.virtual_memory();
//!     println!("Swap total: {} bytes", swap.swap_total());
//!     println!("Swap used: {} bytes", swap.swap_used());
//!     println!("Pages in/out: {}/{}", swap.swap_pages_in(), swap.swap_pages_out());
//!     Ok(())
//! }
//! ```

/// Memory telemetry constants
pub mod constants;

/// Swap provider implementation
pub mod swap;

/// Memory data types
pub mod types;


pub use swap::Swap;
pub use types::*;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::core::types::ByteSize;
use crate::error::Result;
use crate::telemetry::Telemetry;
use crate::traits::PhysicalMemoryProvider;

/// Physical memory provider
#[derive(Debug)]
pub struct Memory {
    telemetry: Arc<dyn Telemetry>,
    page_size: u64,
    total: OnceCell<u64>,
    swap: Swap,
}

impl Memory {
    /// Creates a provider backed by the given telemetry source
    pub fn new(telemetry: Arc<dyn Telemetry>) -> Self {
        let page_size = telemetry.page_size();
        let swap = Swap::new(Arc::clone(&telemetry), page_size);
        Self { telemetry, page_size, total: OnceCell::new(), swap }
    }

    /// Creates a provider backed by this platform's native telemetry
    #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
    pub fn system() -> Result<Self> {
        let telemetry = crate::telemetry::NativeTelemetry::new()?;
        Ok(Self::new(Arc::new(telemetry)))
    }

    /// Creates a provider backed by this platform's native telemetry
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    pub fn system() -> Result<Self> {
        Err(crate::Error::not_available("Memory telemetry is not supported on this platform"))
    }

    /// Set the minimum interval between two paging-activity samples of the owned swap provider
    pub fn with_refresh_interval(mut self, interval: Duration) -> Result<Self> {
        self.swap = self.swap.with_refresh_interval(interval)?;
        Ok(self)
    }

    /// Page size in bytes
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot { total: self.total(), available: self.available(), page_size: self.page_size }
    }
}

impl PhysicalMemoryProvider for Memory {
    type Virtual = Swap;

    fn total(&self) -> u64 {
        let total = self.total.get_or_try_init(|| {
            let info = self.telemetry.performance_info()?;
            let bytes = info.physical_total.saturating_mul(self.page_size);
            debug!(bytes, "Physical memory total cached");
            Ok::<_, crate::Error>(bytes)
        });

        match total {
            Ok(bytes) => *bytes,
            Err(e) => {
                warn!(error = %e, "Failed to get total physical memory");
                0
            }
        }
    }

    fn available(&self) -> u64 {
        match self.telemetry.performance_info() {
            Ok(info) => info.physical_available.saturating_mul(self.page_size),
            Err(e) => {
                warn!(error = %e, "Failed to get available physical memory");
                0
            }
        }
    }

    fn virtual_memory(&self) -> &Swap {
        &self.swap
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Available: {}/{}", ByteSize(self.available()), ByteSize(self.total()))
    }
}
