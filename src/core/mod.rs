// Core modules
pub mod types;

/// Core prelude module that re-exports commonly used types and traits
pub mod prelude {
    pub use super::types::ByteSize;
    pub use crate::traits::{PhysicalMemoryProvider, VirtualMemoryProvider};
}
