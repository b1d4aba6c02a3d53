use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::warn;

use super::{CounterSet, CounterValues, PerformanceInfo, Telemetry, PAGES_INPUT, PAGES_OUTPUT, PERCENT_USAGE};
use crate::error::{Error, Result};

const DEFAULT_PROC_ROOT: &str = "/proc";
const FALLBACK_PAGE_SIZE: u64 = 4096;

/// Telemetry backend reading `/proc/meminfo` and `/proc/vmstat`
#[derive(Debug, Clone)]
pub struct ProcfsTelemetry {
    root: PathBuf,
    page_size: u64,
}

impl Default for ProcfsTelemetry {
    fn default() -> Self {
        Self::with_root(DEFAULT_PROC_ROOT)
    }
}

impl ProcfsTelemetry {
    pub fn new() -> Result<Self> {
        Ok(Self::default())
    }

    /// Read procfs files from `root` instead of `/proc`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), page_size: system_page_size() }
    }

    fn read(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        fs::read_to_string(&path).map_err(|e| Error::unavailable(format!("{}: {}", path.display(), e)))
    }

    fn meminfo(&self) -> Result<HashMap<String, u64>> {
        Ok(parse_meminfo(&self.read("meminfo")?))
    }

    fn pages(&self, bytes: u64) -> u64 {
        bytes / self.page_size
    }
}

impl Telemetry for ProcfsTelemetry {
    fn performance_info(&self) -> Result<PerformanceInfo> {
        let meminfo = self.meminfo()?;
        let total = *meminfo
            .get("MemTotal")
            .ok_or_else(|| Error::unavailable("MemTotal missing from meminfo"))?;
        let available = meminfo
            .get("MemAvailable")
            .or_else(|| meminfo.get("MemFree"))
            .copied()
            .unwrap_or(0);
        let swap_total = meminfo.get("SwapTotal").copied().unwrap_or(0);

        Ok(PerformanceInfo {
            commit_limit: self.pages(total) + self.pages(swap_total),
            physical_total: self.pages(total),
            physical_available: self.pages(available),
        })
    }

    fn query_counters(&self, set: CounterSet) -> Result<CounterValues> {
        let mut values = CounterValues::new();
        match set.name {
            "Paging File" => {
                let meminfo = self.meminfo()?;
                if let (Some(total), Some(free)) = (meminfo.get("SwapTotal"), meminfo.get("SwapFree")) {
                    values.insert(PERCENT_USAGE.to_string(), self.pages(total.saturating_sub(*free)));
                }
            }
            "Memory" => {
                let vmstat = parse_vmstat(&self.read("vmstat")?);
                if let Some(pswpin) = vmstat.get("pswpin") {
                    values.insert(PAGES_INPUT.to_string(), *pswpin);
                }
                if let Some(pswpout) = vmstat.get("pswpout") {
                    values.insert(PAGES_OUTPUT.to_string(), *pswpout);
                }
            }
            other => return Err(Error::unavailable(format!("Unknown counter set: {}", other))),
        }
        values.retain(|property, _| set.properties.contains(&property.as_str()));
        Ok(values)
    }

    fn page_size(&self) -> u64 {
        self.page_size
    }
}

fn system_page_size() -> u64 {
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 {
        size as u64
    } else {
        warn!(fallback = FALLBACK_PAGE_SIZE, "sysconf(_SC_PAGESIZE) failed");
        FALLBACK_PAGE_SIZE
    }
}

/// Parse `/proc/meminfo` into byte values keyed by field name
fn parse_meminfo(content: &str) -> HashMap<String, u64> {
    content
        .lines()
        .filter_map(|line| {
            let (key, rest) = line.split_once(':')?;
            let mut parts = rest.split_whitespace();
            let value: u64 = parts.next()?.parse().ok()?;
            let value = match parts.next() {
                Some("kB") => value.saturating_mul(1024),
                _ => value,
            };
            Some((key.trim().to_string(), value))
        })
        .collect()
}

/// Parse `/proc/vmstat` into counter values keyed by name
fn parse_vmstat(content: &str) -> HashMap<String, u64> {
    content
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let key = parts.next()?;
            let value = parts.next()?.parse().ok()?;
            Some((key.to_string(), value))
        })
        .collect()
}
