//! # Core Types Module
//!
//! Fundamental value types shared by the memory providers.
//!
//! ## Example
//!
//! ```rust
//! use memory_telemetry::core::types::ByteSize;
//!
//! let size = ByteSize::new(1024);
//! assert_eq!(size.as_kb(), 1.0);
//! assert_eq!(size.to_string(), "1 KiB");
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const KIBI: u64 = 1 << 10;

const BINARY_UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Represents a size in bytes with convenient conversion methods
///
/// The `Display` implementation picks the largest binary unit that keeps the value at or above one, printing
/// whole numbers exactly and everything else with a single decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ByteSize(pub u64);

impl ByteSize {
    /// Creates a new ByteSize instance from the given number of bytes
    pub fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Returns the size in bytes
    pub fn as_bytes(&self) -> u64 {
        self.0
    }

    /// Returns the size in kilobytes
    pub fn as_kb(&self) -> f64 {
        self.0 as f64 / 1024.0
    }

    /// Returns the size in megabytes
    pub fn as_mb(&self) -> f64 {
        self.as_kb() / 1024.0
    }

    /// Returns the size in gigabytes
    pub fn as_gb(&self) -> f64 {
        self.as_mb() / 1024.0
    }
}

impl From<u64> for ByteSize {
    fn from(bytes: u64) -> Self {
        Self(bytes)
    }
}

impl From<ByteSize> for u64 {
    fn from(size: ByteSize) -> Self {
        size.as_bytes()
    }
}

impl std::ops::Sub for ByteSize {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0;
        if bytes == 1 {
            return write!(f, "1 byte");
        }
        if bytes < KIBI {
            return write!(f, "{} bytes", bytes);
        }

        let mut prefix = KIBI;
        let mut unit = BINARY_UNITS[0];
        for (i, candidate) in BINARY_UNITS.iter().enumerate().skip(1) {
            let next = KIBI << (10 * i);
            if bytes < next {
                break;
            }
            prefix = next;
            unit = candidate;
        }

        if bytes % prefix == 0 {
            write!(f, "{} {}", bytes / prefix, unit)
        } else {
            write!(f, "{:.1} {}", bytes as f64 / prefix as f64, unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_size_conversions() {
        let size = ByteSize::new(3 * 1024 * 1024 * 1024);
        assert_eq!(size.as_bytes(), 3 * 1024 * 1024 * 1024);
        assert_eq!(size.as_gb(), 3.0);
        assert_eq!(size.as_mb(), 3072.0);
        assert_eq!(u64::from(size), 3 * 1024 * 1024 * 1024);
        assert_eq!(ByteSize::new(10) - ByteSize::new(20), ByteSize::new(0));
    }

    #[test]
    fn test_byte_size_display_small_values() {
        assert_eq!(ByteSize::new(0).to_string(), "0 bytes");
        assert_eq!(ByteSize::new(1).to_string(), "1 byte");
        assert_eq!(ByteSize::new(1023).to_string(), "1023 bytes");
    }

    #[test]
    fn test_byte_size_display_binary_units() {
        assert_eq!(ByteSize::new(1024).to_string(), "1 KiB");
        assert_eq!(ByteSize::new(1536).to_string(), "1.5 KiB");
        assert_eq!(ByteSize::new(2_457_600).to_string(), "2.3 MiB");
        assert_eq!(ByteSize::new(16 * 1024 * 1024 * 1024).to_string(), "16 GiB");
        assert_eq!(ByteSize::new(1 << 40).to_string(), "1 TiB");
        assert_eq!(ByteSize::new(u64::MAX).to_string(), "16.0 EiB");
    }
}
