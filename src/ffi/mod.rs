//! Exported AXCL entry points.
//!
//! Every function here carries the exact C signature of the vendor header and
//! is exported unmangled, so a consumer built against the real SDK links
//! against `libaxcl_stub` unchanged. The shape of each call is always the
//! same: record the inputs, fabricate outputs, record the status and outputs,
//! return the status.
//!
//! - [`axcl`]: init/finalize, logging, versions
//! - [`rt_device`]: device enumeration and properties
//! - [`rt_context`]: runtime contexts
//! - [`rt_stream`]: runtime streams
//! - [`harness`]: `AXCL_STUB_*` hooks used by binding test suites

#![allow(unsafe_code)]
#![allow(non_snake_case)]
#![allow(clippy::missing_safety_doc)]

pub mod axcl;
pub mod harness;
pub mod rt_context;
pub mod rt_device;
pub mod rt_stream;

pub use axcl::*;
pub use harness::*;
pub use rt_context::*;
pub use rt_device::*;
pub use rt_stream::*;

use crate::runtime::runtime;
use crate::serializer::{CallBuilder, TraceArg};
use axcl_sys::axclError;
use std::os::raw::c_void;

/// Status returned (and recorded) when a required output pointer is NULL.
pub const AXCL_STUB_ERR_NULL_POINTER: axclError = -1;

/// Record `inputs`, fabricate a status, record it and return it.
pub(crate) fn status_only(function: &'static str, inputs: &[&dyn TraceArg]) -> axclError {
    let rt = runtime();
    let mut call = rt.serializer().begin(function);
    call.input(inputs);
    let ret = rt.fabricate_status();
    call.output(&[&ret]);
    call.commit();
    ret
}

/// Finish a call whose output pointer was NULL.
pub(crate) fn reject_null_output(mut call: CallBuilder<'_>, function: &'static str) -> axclError {
    tracing::warn!(function, "output pointer is NULL");
    let ret = AXCL_STUB_ERR_NULL_POINTER;
    call.output(&[&ret]);
    call.commit();
    ret
}

/// Fabricate an opaque handle into `out`, then the status.
///
/// # Safety
///
/// `out` must be NULL or valid for writing one pointer.
pub(crate) unsafe fn fabricate_handle(
    function: &'static str,
    out: *mut *mut c_void,
    inputs: &[&dyn TraceArg],
) -> axclError {
    let rt = runtime();
    let mut call = rt.serializer().begin(function);
    call.input(inputs);
    if out.is_null() {
        return reject_null_output(call, function);
    }

    let handle = rt.randomizer().handle() as *mut c_void;
    out.write(handle);
    let ret = rt.fabricate_status();
    call.output(&[&ret, &handle]);
    call.commit();
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::serialize_args;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_status_only_records_call() {
        let ret = status_only("axclrtSetDevice", &[&4i32]);
        let last = runtime().serializer().last_call().unwrap();
        assert_eq!(last.function, "axclrtSetDevice");
        assert_eq!(last.input, serialize_args(&[&4i32]));
        assert_eq!(last.output, serialize_args(&[&ret]));
    }

    #[test]
    #[serial]
    fn test_fabricate_handle_rejects_null() {
        let ret = unsafe { fabricate_handle("axclrtCreateStream", std::ptr::null_mut(), &[]) };
        assert_eq!(ret, AXCL_STUB_ERR_NULL_POINTER);
        let last = runtime().serializer().last_call().unwrap();
        assert_eq!(last.output, serialize_args(&[&AXCL_STUB_ERR_NULL_POINTER]));
    }

    #[test]
    #[serial]
    fn test_fabricate_handle_writes_non_null() {
        let mut handle: *mut c_void = std::ptr::null_mut();
        let ret = unsafe { fabricate_handle("axclrtCreateStream", &mut handle, &[]) };
        assert!(!handle.is_null());
        let last = runtime().serializer().last_call().unwrap();
        assert_eq!(last.output, serialize_args(&[&ret, &handle]));
    }
}
