use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, instrument, trace, warn};

use crate::core::types::ByteSize;
use crate::error::{Error, Result};
use crate::memory::constants::{
    DEFAULT_SWAP_REFRESH_INTERVAL_MS, MAX_SWAP_REFRESH_INTERVAL_MS, MIN_SWAP_REFRESH_INTERVAL_MS,
};
use crate::memory::types::{PagingActivity, SwapSnapshot, SwapTotal};
use crate::telemetry::{Telemetry, MEMORY, PAGES_INPUT, PAGES_OUTPUT, PAGING_FILE, PERCENT_USAGE};
use crate::traits::VirtualMemoryProvider;

#[derive(Debug, Default)]
struct PagingState {
    activity: PagingActivity,
    last_sample: Option<Instant>,
}

/// Swap (virtual memory) provider
///
/// Swap capacity is queried once and cached for the life of the provider. Swap usage is queried on every call.
/// Paging activity is sampled at most once per refresh interval; both directions always come from the same
/// sample.
#[derive(Debug)]
pub struct Swap {
    telemetry: Arc<dyn Telemetry>,
    page_size: u64,
    refresh_interval: Duration,
    total: Mutex<SwapTotal>,
    paging: Mutex<PagingState>,
}

impl Swap {
    /// Create a swap provider for a host with the given page size
    pub fn new(telemetry: Arc<dyn Telemetry>, page_size: u64) -> Self {
        Self {
            telemetry,
            page_size,
            refresh_interval: Duration::from_millis(DEFAULT_SWAP_REFRESH_INTERVAL_MS),
            total: Mutex::new(SwapTotal::Unknown),
            paging: Mutex::new(PagingState::default()),
        }
    }

    /// Set the minimum interval between two paging-activity samples
    pub fn with_refresh_interval(mut self, interval: Duration) -> Result<Self> {
        let min = Duration::from_millis(MIN_SWAP_REFRESH_INTERVAL_MS);
        let max = Duration::from_millis(MAX_SWAP_REFRESH_INTERVAL_MS);
        if interval < min || interval > max {
            return Err(Error::invalid_argument(
                format!(
                    "Refresh interval must be between {}ms and {}ms",
                    MIN_SWAP_REFRESH_INTERVAL_MS, MAX_SWAP_REFRESH_INTERVAL_MS
                ),
                format!("{}ms", interval.as_millis()),
            ));
        }
        self.refresh_interval = interval;
        Ok(self)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Current state of the swap capacity cache
    pub fn cached_total(&self) -> SwapTotal {
        *self.total.lock()
    }

    /// When paging activity was last sampled
    pub fn last_sample_time(&self) -> Option<Instant> {
        self.paging.lock().last_sample
    }

    /// Pages swapped in and out, from one sample
    ///
    /// Returns the cached pair if the previous sample is younger than the refresh interval.
    #[instrument(level = "trace", skip(self))]
    pub fn paging_activity(&self) -> PagingActivity {
        let mut state = self.paging.lock();
        if let Some(last) = state.last_sample {
            if last.elapsed() < self.refresh_interval {
                trace!("Paging activity served from cache");
                return state.activity;
            }
        }

        let activity = match self.telemetry.query_counters(MEMORY) {
            Ok(values) => PagingActivity {
                pages_in: values.get(PAGES_INPUT).copied().unwrap_or(0),
                pages_out: values.get(PAGES_OUTPUT).copied().unwrap_or(0),
            },
            Err(e) => {
                warn!(error = %e, "Failed to query paging activity counters");
                PagingActivity::default()
            }
        };
        debug!(pages_in = activity.pages_in, pages_out = activity.pages_out, "Paging activity refreshed");

        state.activity = activity;
        state.last_sample = Some(Instant::now());
        activity
    }

    /// Collect capacity, usage and paging activity
    pub fn snapshot(&self) -> SwapSnapshot {
        SwapSnapshot {
            total: self.swap_total(),
            used: self.swap_used(),
            paging: self.paging_activity(),
        }
    }
}

impl VirtualMemoryProvider for Swap {
    #[instrument(level = "trace", skip(self))]
    fn swap_total(&self) -> u64 {
        let mut total = self.total.lock();
        if let SwapTotal::Known(bytes) = *total {
            return bytes;
        }

        match self.telemetry.performance_info() {
            Ok(info) => {
                let bytes = self
                    .page_size
                    .saturating_mul(info.commit_limit.saturating_sub(info.physical_total));
                debug!(bytes, "Swap total cached");
                *total = SwapTotal::Known(bytes);
                bytes
            }
            Err(e) => {
                warn!(error = %e, "Failed to get performance info, swap total left unknown");
                0
            }
        }
    }

    fn swap_used(&self) -> u64 {
        match self.telemetry.query_counters(PAGING_FILE) {
            Ok(values) => values
                .get(PERCENT_USAGE)
                .copied()
                .unwrap_or(0)
                .saturating_mul(self.page_size),
            Err(e) => {
                warn!(error = %e, "Failed to query paging file usage");
                0
            }
        }
    }

    fn swap_pages_in(&self) -> u64 {
        self.paging_activity().pages_in
    }

    fn swap_pages_out(&self) -> u64 {
        self.paging_activity().pages_out
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Swap Used/Avail: {}/{}", ByteSize(self.swap_used()), ByteSize(self.swap_total()))
    }
}
