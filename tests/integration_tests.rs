use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use memory_telemetry::prelude::*;
use memory_telemetry::telemetry::{
    CounterSet, CounterValues, PerformanceInfo, MEMORY, PAGES_INPUT, PAGES_OUTPUT, PAGING_FILE, PERCENT_USAGE,
};

/// Telemetry source with fixed answers that counts how often it is asked
#[derive(Debug, Default)]
struct FixedTelemetry {
    fail_performance_info: bool,
    performance_queries: AtomicUsize,
    usage_queries: AtomicUsize,
    paging_queries: AtomicUsize,
}

impl Telemetry for FixedTelemetry {
    fn performance_info(&self) -> Result<PerformanceInfo> {
        self.performance_queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_performance_info {
            return Err(Error::Unavailable("access denied".to_string()));
        }
        Ok(PerformanceInfo { commit_limit: 1000, physical_total: 400, physical_available: 150 })
    }

    fn query_counters(&self, set: CounterSet) -> Result<CounterValues> {
        let mut values = HashMap::new();
        if set == PAGING_FILE {
            self.usage_queries.fetch_add(1, Ordering::SeqCst);
            values.insert(PERCENT_USAGE.to_string(), 25);
        } else if set == MEMORY {
            let sample = self.paging_queries.fetch_add(1, Ordering::SeqCst) as u64;
            values.insert(PAGES_INPUT.to_string(), sample);
            values.insert(PAGES_OUTPUT.to_string(), sample + 100);
        }
        Ok(values)
    }

    fn page_size(&self) -> u64 {
        4096
    }
}

#[test]
fn test_fixed_telemetry_end_to_end() {
    let telemetry = Arc::new(FixedTelemetry::default());
    let memory = Memory::new(telemetry.clone());
    let swap = memory.virtual_memory();

    assert_eq!(swap.swap_total(), 2_457_600);
    assert_eq!(swap.swap_total(), 2_457_600);
    assert_eq!(swap.swap_used(), 102_400);
    assert_eq!(swap.swap_used(), 102_400);
    assert_eq!(swap.swap_pages_in(), 0);
    assert_eq!(swap.swap_pages_out(), 100);

    assert_eq!(memory.total(), 400 * 4096);
    assert_eq!(memory.available(), 150 * 4096);

    // swap total once, memory total once, available once
    assert_eq!(telemetry.performance_queries.load(Ordering::SeqCst), 3);
    assert_eq!(telemetry.usage_queries.load(Ordering::SeqCst), 2);
    assert_eq!(telemetry.paging_queries.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failing_telemetry_degrades_to_zero() {
    let telemetry = Arc::new(FixedTelemetry { fail_performance_info: true, ..Default::default() });
    let memory = Memory::new(telemetry.clone());

    assert_eq!(memory.total(), 0);
    assert_eq!(memory.available(), 0);
    assert_eq!(memory.virtual_memory().swap_total(), 0);
    assert_eq!(memory.virtual_memory().swap_total(), 0);
    assert_eq!(memory.virtual_memory().cached_total(), SwapTotal::Unknown);
    assert_eq!(memory.to_string(), "Available: 0 bytes/0 bytes");

    // Nothing was cached, so every call went to the OS
    assert_eq!(telemetry.performance_queries.load(Ordering::SeqCst), 6);
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
mod native {
    use super::*;

    #[test]
    fn test_system_memory() -> Result<()> {
        let memory = Memory::system()?;

        assert!(memory.page_size() > 0);
        assert!(memory.page_size().is_power_of_two());

        let total = memory.total();
        assert!(total > 0);
        assert_eq!(memory.total(), total);
        assert!(memory.to_string().starts_with("Available: "));
        Ok(())
    }

    #[test]
    fn test_system_swap() -> Result<()> {
        let memory = Memory::system()?;
        let swap = memory.virtual_memory();

        let total = swap.swap_total();
        assert_eq!(swap.swap_total(), total);
        assert!(matches!(swap.cached_total(), SwapTotal::Known(_)));

        let first = swap.paging_activity();
        assert_eq!(swap.paging_activity(), first);
        assert!(swap.last_sample_time().is_some());
        assert!(swap.to_string().starts_with("Swap Used/Avail: "));
        Ok(())
    }

    #[test]
    fn test_system_snapshot() -> Result<()> {
        let memory = Memory::system()?;
        let snapshot = memory.snapshot();

        assert_eq!(snapshot.page_size, memory.page_size());
        assert_eq!(snapshot.total, memory.total());
        Ok(())
    }

    #[test]
    fn test_concurrent_access() -> Result<()> {
        let memory = Arc::new(Memory::system()?);

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let memory = Arc::clone(&memory);
                std::thread::spawn(move || {
                    let swap = memory.virtual_memory();
                    (memory.total(), swap.swap_total())
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        Ok(())
    }
}
