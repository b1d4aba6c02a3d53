/// Trait for physical memory providers
///
/// Reports installed and currently available RAM and hands out the swap provider for the same host.
///
/// # Examples
///
/// ```rust,no_run
/// use memory_telemetry::memory::Memory;
/// use memory_telemetry::traits::{PhysicalMemoryProvider, VirtualMemoryProvider};
///
/// let memory = Memory::system()?;
/// println!("{} of {} bytes available", memory.available(), memory.total());
/// println!("swap in use: {} bytes", memory.virtual_memory().swap_used());
/// # Ok::<(), memory_telemetry::Error>(())
/// ```
pub trait PhysicalMemoryProvider: Send + Sync {
    /// The swap provider owned by this memory provider
    type Virtual: VirtualMemoryProvider;

    /// Get total installed memory in bytes
    ///
    /// Cached after the first successful read.
    fn total(&self) -> u64;

    /// Get currently available memory in bytes
    ///
    /// Re-queried on every call.
    fn available(&self) -> u64;

    /// Get the swap provider for this host
    fn virtual_memory(&self) -> &Self::Virtual;
}

/// Trait for swap (virtual memory) providers
pub trait VirtualMemoryProvider: Send + Sync {
    /// Get swap capacity in bytes
    fn swap_total(&self) -> u64;

    /// Get swap currently in use in bytes
    fn swap_used(&self) -> u64;

    /// Get pages swapped in, as reported by the most recent paging sample
    fn swap_pages_in(&self) -> u64;

    /// Get pages swapped out, as reported by the most recent paging sample
    fn swap_pages_out(&self) -> u64;
}
