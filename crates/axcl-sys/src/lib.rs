//! Low-level ABI definitions for the AXCL device runtime.
//!
//! This crate mirrors the parts of the vendor headers (`axcl_base.h`,
//! `axcl_rt_type.h`, `axcl_rt_context.h`, `axcl_rt_stream.h`) that the stub
//! runtime exports against. Names, widths and field order follow the C
//! headers exactly so that a consumer compiled against the real SDK can link
//! against `libaxcl_stub` instead.
//!
//! # Layout
//!
//! Both structs are `#[repr(C)]` and padding-free:
//!
//! - [`axclrtDeviceList`]: 1028 bytes, 4-byte aligned
//! - [`axclrtDeviceProperties`]: 240 bytes, 8-byte aligned
//!
//! Arrays longer than 32 elements do not implement `Default`, so both structs
//! provide a `zeroed()` constructor instead.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use std::os::raw::c_void;

/// Status code returned by every runtime call. Zero is success.
pub type axclError = i32;

/// Success status.
pub const AXCL_SUCC: axclError = 0;

/// Maximum number of devices reported by `axclrtGetDeviceList`.
pub const AXCL_MAX_DEVICE_COUNT: usize = 256;

/// Size of the `swVersion` field in [`axclrtDeviceProperties`].
pub const AXCL_SW_VERSION_LEN: usize = 64;

/// Number of reserved words in [`axclrtDeviceProperties`].
pub const AXCL_PROPERTIES_RESERVED_LEN: usize = 32;

/// Opaque runtime context handle.
pub type axclrtContext = *mut c_void;

/// Opaque runtime stream handle.
pub type axclrtStream = *mut c_void;

/// Ids of the devices connected to the host.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct axclrtDeviceList {
    /// Number of valid entries in `devices`
    pub num: u32,
    /// Device ids; entries past `num` are zero
    pub devices: [i32; AXCL_MAX_DEVICE_COUNT],
}

impl axclrtDeviceList {
    /// All-zero value, the state every output struct starts from.
    pub const fn zeroed() -> Self {
        Self {
            num: 0,
            devices: [0; AXCL_MAX_DEVICE_COUNT],
        }
    }

    /// The populated prefix of `devices`.
    pub fn ids(&self) -> &[i32] {
        let len = (self.num as usize).min(AXCL_MAX_DEVICE_COUNT);
        &self.devices[..len]
    }
}

impl Default for axclrtDeviceList {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Static and live properties of one device.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct axclrtDeviceProperties {
    /// NUL-terminated firmware version string
    pub swVersion: [u8; AXCL_SW_VERSION_LEN],
    /// Unique device id
    pub uid: u64,
    /// PCIe domain
    pub pciDomain: u32,
    /// PCIe bus number
    pub pciBusID: u32,
    /// PCIe device number
    pub pciDeviceID: u32,
    /// Chip temperature
    pub temperature: i32,
    /// Total system memory, KiB
    pub totalMemSize: u32,
    /// Free system memory, KiB
    pub freeMemSize: u32,
    /// Total CMM memory, KiB
    pub totalCmmSize: u32,
    /// Free CMM memory, KiB
    pub freeCmmSize: u32,
    /// CPU load, percent
    pub cpuLoading: u32,
    /// NPU load, percent
    pub npuLoading: u32,
    /// Reserved words
    pub reserved: [u32; AXCL_PROPERTIES_RESERVED_LEN],
}

impl axclrtDeviceProperties {
    /// All-zero value, the state every output struct starts from.
    pub const fn zeroed() -> Self {
        Self {
            swVersion: [0; AXCL_SW_VERSION_LEN],
            uid: 0,
            pciDomain: 0,
            pciBusID: 0,
            pciDeviceID: 0,
            temperature: 0,
            totalMemSize: 0,
            freeMemSize: 0,
            totalCmmSize: 0,
            freeCmmSize: 0,
            cpuLoading: 0,
            npuLoading: 0,
            reserved: [0; AXCL_PROPERTIES_RESERVED_LEN],
        }
    }

    /// Copy `version` into `swVersion`, truncating so a NUL terminator always fits.
    pub fn set_sw_version(&mut self, version: &[u8]) {
        self.swVersion = [0; AXCL_SW_VERSION_LEN];
        let len = version.len().min(AXCL_SW_VERSION_LEN - 1);
        self.swVersion[..len].copy_from_slice(&version[..len]);
    }

    /// `swVersion` up to the first NUL.
    pub fn sw_version(&self) -> &[u8] {
        let end = self
            .swVersion
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(AXCL_SW_VERSION_LEN);
        &self.swVersion[..end]
    }
}

impl Default for axclrtDeviceProperties {
    fn default() -> Self {
        Self::zeroed()
    }
}
