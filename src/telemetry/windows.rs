use std::mem;
use std::ptr;

use tracing::debug;
use widestring::U16CString;
use winapi::shared::minwindef::DWORD;
use winapi::shared::winerror::ERROR_SUCCESS;
use winapi::um::errhandlingapi::GetLastError;
use winapi::um::pdh::{
    PdhAddEnglishCounterW, PdhCloseQuery, PdhCollectQueryData, PdhGetRawCounterValue, PdhOpenQueryW,
    PDH_HCOUNTER, PDH_HQUERY, PDH_RAW_COUNTER,
};
use winapi::um::psapi::{GetPerformanceInfo, PERFORMANCE_INFORMATION};
use winapi::um::sysinfoapi::{GetSystemInfo, SYSTEM_INFO};

use super::{counter_path, CounterSet, CounterValues, PerformanceInfo, Telemetry};
use crate::error::{Error, Result};

// Counter status codes from pdhmsg.h that carry a usable value
const PDH_CSTATUS_VALID_DATA: DWORD = 0x0000_0000;
const PDH_CSTATUS_NEW_DATA: DWORD = 0x0000_0001;

/// Telemetry backend using `GetPerformanceInfo` and raw PDH counter values
#[derive(Debug, Clone)]
pub struct PdhTelemetry {
    page_size: u64,
}

impl Default for PdhTelemetry {
    fn default() -> Self {
        Self { page_size: system_page_size() }
    }
}

impl PdhTelemetry {
    pub fn new() -> Result<Self> {
        Ok(Self::default())
    }
}

impl Telemetry for PdhTelemetry {
    fn performance_info(&self) -> Result<PerformanceInfo> {
        let size = mem::size_of::<PERFORMANCE_INFORMATION>() as DWORD;
        let mut info: PERFORMANCE_INFORMATION = unsafe { mem::zeroed() };
        info.cb = size;

        if unsafe { GetPerformanceInfo(&mut info, size) } == 0 {
            let code = unsafe { GetLastError() };
            return Err(Error::unavailable(format!("Failed to get Performance Info. Error code: {}", code)));
        }

        Ok(PerformanceInfo {
            commit_limit: info.CommitLimit as u64,
            physical_total: info.PhysicalTotal as u64,
            physical_available: info.PhysicalAvailable as u64,
        })
    }

    fn query_counters(&self, set: CounterSet) -> Result<CounterValues> {
        let mut raw_query: PDH_HQUERY = ptr::null_mut();
        let status = unsafe { PdhOpenQueryW(ptr::null(), 0, &mut raw_query) };
        if status as u32 != ERROR_SUCCESS {
            return Err(Error::unavailable(format!("PdhOpenQueryW failed for {}: 0x{:08x}", set.name, status)));
        }

        // The query handle owns every counter added to it
        let query = scopeguard::guard(raw_query, |query| unsafe {
            PdhCloseQuery(query);
        });

        let mut counters: Vec<(&'static str, PDH_HCOUNTER)> = Vec::with_capacity(set.properties.len());
        for property in set.properties {
            let path = counter_path(&set, property);
            let wide = U16CString::from_str(&path)
                .map_err(|e| Error::unavailable(format!("Invalid counter path {}: {}", path, e)))?;

            let mut counter: PDH_HCOUNTER = ptr::null_mut();
            let status = unsafe { PdhAddEnglishCounterW(*query, wide.as_ptr(), 0, &mut counter) };
            if status as u32 != ERROR_SUCCESS {
                debug!(counter = %path, status, "Counter not present");
                continue;
            }
            counters.push((*property, counter));
        }

        if counters.is_empty() {
            return Err(Error::unavailable(format!("No counters of {} could be added", set.name)));
        }

        let status = unsafe { PdhCollectQueryData(*query) };
        if status as u32 != ERROR_SUCCESS {
            return Err(Error::unavailable(format!("PdhCollectQueryData failed for {}: 0x{:08x}", set.name, status)));
        }

        let mut values = CounterValues::new();
        for (property, counter) in counters {
            let mut raw: PDH_RAW_COUNTER = unsafe { mem::zeroed() };
            let status = unsafe { PdhGetRawCounterValue(counter, ptr::null_mut(), &mut raw) };
            if status as u32 != ERROR_SUCCESS {
                debug!(property, status, "Raw counter value unavailable");
                continue;
            }
            if raw.CStatus != PDH_CSTATUS_VALID_DATA && raw.CStatus != PDH_CSTATUS_NEW_DATA {
                debug!(property, cstatus = raw.CStatus, "Counter not populated");
                continue;
            }
            values.insert(property.to_string(), raw.FirstValue.max(0) as u64);
        }

        Ok(values)
    }

    fn page_size(&self) -> u64 {
        self.page_size
    }
}

fn system_page_size() -> u64 {
    let mut info: SYSTEM_INFO = unsafe { mem::zeroed() };
    unsafe { GetSystemInfo(&mut info) };
    u64::from(info.dwPageSize)
}
