//! Memory Telemetry - physical and virtual memory metrics behind one interface
//!
//! This crate reports installed and available RAM, swap capacity, swap usage and paging activity without
//! exposing how each operating system provides them. Windows figures come from `GetPerformanceInfo` and PDH
//! performance counters, Linux figures from procfs, and macOS figures from `sysctl` and the Mach host
//! statistics.
//!
//! # Features
//!
//! - **Physical Memory**: total installed memory (cached) and available memory (always fresh)
//! - **Swap Capacity**: computed once from the commit limit and cached
//! - **Swap Usage**: re-queried on every call
//! - **Paging Activity**: pages swapped in/out, sampled together at most once per refresh interval
//!
//! # Examples
//!
//! ```no_run
//! use memory_telemetry::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let memory = Memory::system()?;
//!     println!("{}", memory);
//!
//!     let swap = memory.virtual_memory();
//!     println!("{}", swap);
//!     println!("Pages in: {}, pages out: {}", swap.swap_pages_in(), swap.swap_pages_out());
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Construction can fail, for example on a platform without a telemetry backend. The accessors themselves
//! never fail: a query the OS cannot answer is logged through `tracing` and reported as `0`.
//!
//! # Thread Safety
//!
//! Providers are `Send` and `Sync`. Cached values are guarded by locks, so concurrent callers never trigger
//! duplicate capacity queries and never observe a half-updated paging sample.

#![doc(html_root_url = "https://docs.rs/memory-telemetry/0.1.0")]

pub mod core;
pub mod error;
pub mod memory;
pub mod telemetry;
pub mod traits;

pub use error::{Error, Result};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::core::types::ByteSize;
    pub use crate::memory::{Memory, MemorySnapshot, PagingActivity, Swap, SwapSnapshot, SwapTotal};
    pub use crate::telemetry::Telemetry;
    pub use crate::traits::{PhysicalMemoryProvider, VirtualMemoryProvider};
    pub use crate::{Error, Result};
}
