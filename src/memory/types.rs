#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cached swap capacity
///
/// Starts out `Unknown` and moves to `Known` after the first successful query. There is no way back: a known
/// capacity is never re-queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwapTotal {
    /// Not queried yet, or every query so far has failed
    #[default]
    Unknown,
    /// Swap capacity in bytes
    Known(u64),
}

impl SwapTotal {
    /// The cached capacity, if any
    pub fn bytes(&self) -> Option<u64> {
        match self {
            Self::Unknown => None,
            Self::Known(bytes) => Some(*bytes),
        }
    }
}

/// Pages swapped in and out, taken from a single counter sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PagingActivity {
    /// Pages read back from swap
    pub pages_in: u64,
    /// Pages written out to swap
    pub pages_out: u64,
}

/// Physical memory figures collected in one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemorySnapshot {
    /// Installed memory in bytes
    pub total: u64,
    /// Available memory in bytes
    pub available: u64,
    /// Page size in bytes
    pub page_size: u64,
}

/// Swap figures collected in one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SwapSnapshot {
    /// Swap capacity in bytes
    pub total: u64,
    /// Swap in use in bytes
    pub used: u64,
    /// Paging activity of the latest sample
    pub paging: PagingActivity,
}
