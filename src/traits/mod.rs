// Traits module
//
// Capability interfaces implemented by the memory providers.

pub mod hardware;

pub use hardware::{PhysicalMemoryProvider, VirtualMemoryProvider};
