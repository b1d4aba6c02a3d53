use std::ffi::c_void;

use super::{CounterSet, CounterValues, PerformanceInfo, Telemetry, PAGES_INPUT, PAGES_OUTPUT, PERCENT_USAGE};
use crate::error::{Error, Result};

/// Telemetry backend using `sysctl` and `host_statistics64`
#[derive(Debug, Clone)]
pub struct SysctlTelemetry {
    page_size: u64,
}

impl Default for SysctlTelemetry {
    fn default() -> Self {
        Self { page_size: unsafe { vm_kernel_page_size as u64 } }
    }
}

impl SysctlTelemetry {
    pub fn new() -> Result<Self> {
        Ok(Self::default())
    }

    fn get_total_memory() -> Result<u64> {
        let mut size = 0u64;
        let mut size_len = std::mem::size_of::<u64>();

        let mib = [CTL_HW, HW_MEMSIZE];

        let result = unsafe {
            sysctl(
                mib.as_ptr(),
                mib.len() as u32,
                &mut size as *mut u64 as *mut _,
                &mut size_len,
                std::ptr::null(),
                0,
            )
        };

        if result == 0 {
            Ok(size)
        } else {
            Err(Error::unavailable(format!("Failed to get total memory: {}", result)))
        }
    }

    fn get_vm_statistics() -> Result<vm_statistics64> {
        let mut info = vm_statistics64::default();
        let mut count = HOST_VM_INFO64_COUNT;

        let kern_result = unsafe {
            host_statistics64(
                mach_host_self(),
                HOST_VM_INFO64,
                (&mut info as *mut vm_statistics64) as HostInfoT,
                &mut count,
            )
        };

        if kern_result != KERN_SUCCESS {
            return Err(Error::unavailable(format!("Failed to get VM statistics: {}", kern_result)));
        }

        Ok(info)
    }

    fn get_swap_usage() -> Result<xsw_usage> {
        let mut usage = xsw_usage::default();
        let mut size = std::mem::size_of::<xsw_usage>();

        let mib = [CTL_VM, VM_SWAPUSAGE];

        let result = unsafe {
            sysctl(
                mib.as_ptr(),
                mib.len() as u32,
                &mut usage as *mut xsw_usage as *mut _,
                &mut size,
                std::ptr::null(),
                0,
            )
        };

        if result != 0 {
            return Err(Error::unavailable(format!("Failed to get swap usage: {}", result)));
        }

        Ok(usage)
    }
}

impl Telemetry for SysctlTelemetry {
    fn performance_info(&self) -> Result<PerformanceInfo> {
        let total = Self::get_total_memory()? / self.page_size;
        let vmstat = Self::get_vm_statistics()?;
        let swap = Self::get_swap_usage()?;

        Ok(PerformanceInfo {
            commit_limit: total + swap.xsu_total / self.page_size,
            physical_total: total,
            physical_available: u64::from(vmstat.free_count) + u64::from(vmstat.inactive_count),
        })
    }

    fn query_counters(&self, set: CounterSet) -> Result<CounterValues> {
        let mut values = CounterValues::new();
        match set.name {
            "Paging File" => {
                let swap = Self::get_swap_usage()?;
                values.insert(PERCENT_USAGE.to_string(), swap.xsu_used / self.page_size);
            }
            "Memory" => {
                let vmstat = Self::get_vm_statistics()?;
                values.insert(PAGES_INPUT.to_string(), vmstat.swapins);
                values.insert(PAGES_OUTPUT.to_string(), vmstat.swapouts);
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

const CTL_HW: i32 = 6;
const HW_MEMSIZE: i32 = 24;
const CTL_VM: i32 = 2;
const VM_SWAPUSAGE: i32 = 5;
const KERN_SUCCESS: i32 = 0;
const HOST_VM_INFO64: i32 = 4;
const HOST_VM_INFO64_COUNT: u32 = 38;

type HostInfoT = *mut i32;
type MachPortT = u32;

#[repr(C)]
#[derive(Debug, Default)]
#[allow(non_camel_case_types, dead_code)]
struct vm_statistics64 {
    free_count: u32,
    active_count: u32,
    inactive_count: u32,
    wire_count: u32,
    zero_fill_count: u64,
    reactivations: u64,
    pageins: u64,
    pageouts: u64,
    faults: u64,
    cow_faults: u64,
    lookups: u64,
    hits: u64,
    purges: u64,
    purgeable_count: u32,
    speculative_count: u32,
    decompressions: u64,
    compressions: u64,
    swapins: u64,
    swapouts: u64,
    compressor_page_count: u32,
    throttled_count: u32,
    external_page_count: u32,
    internal_page_count: u32,
    total_uncompressed_pages_in_compressor: u64,
}

#[repr(C)]
#[derive(Debug, Default)]
#[allow(non_camel_case_types, dead_code)]
struct xsw_usage {
    xsu_total: u64,
    xsu_avail: u64,
    xsu_used: u64,
    xsu_pagesize: u32,
    xsu_encrypted: u32,
}

extern "C" {
    static vm_kernel_page_size: usize;

    fn host_statistics64(
        host_priv: MachPortT,
        flavor: i32,
        host_info_out: HostInfoT,
        host_info_out_cnt: *mut u32,
    ) -> i32;

    fn mach_host_self() -> MachPortT;

    fn sysctl(
        name: *const i32,
        namelen: u32,
        oldp: *mut c_void,
        oldlenp: *mut usize,
        newp: *const c_void,
        newlen: usize,
    ) -> i32;
}
