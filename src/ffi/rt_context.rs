//! `axcl_rt_context.h`: runtime contexts.
//!
//! Handles are random non-null values. They are never dereferenced, and any
//! handle is accepted back.

use super::{fabricate_handle, status_only};
use axcl_sys::{axclError, axclrtContext};

/// `axclError axclrtCreateContext(axclrtContext *context, int32_t deviceId);`
#[no_mangle]
pub unsafe extern "C" fn axclrtCreateContext(
    context: *mut axclrtContext,
    deviceId: i32,
) -> axclError {
    fabricate_handle("axclrtCreateContext", context, &[&deviceId])
}

/// `axclError axclrtDestroyContext(axclrtContext context);`
#[no_mangle]
pub extern "C" fn axclrtDestroyContext(context: axclrtContext) -> axclError {
    status_only("axclrtDestroyContext", &[&context])
}

/// `axclError axclrtSetCurrentContext(axclrtContext context);`
#[no_mangle]
pub extern "C" fn axclrtSetCurrentContext(context: axclrtContext) -> axclError {
    status_only("axclrtSetCurrentContext", &[&context])
}

/// `axclError axclrtGetCurrentContext(axclrtContext *context);`
#[no_mangle]
pub unsafe extern "C" fn axclrtGetCurrentContext(context: *mut axclrtContext) -> axclError {
    fabricate_handle("axclrtGetCurrentContext", context, &[])
}

/// `axclError axclrtGetDefaultContext(axclrtContext *context, int32_t deviceId);`
#[no_mangle]
pub unsafe extern "C" fn axclrtGetDefaultContext(
    context: *mut axclrtContext,
    deviceId: i32,
) -> axclError {
    fabricate_handle("axclrtGetDefaultContext", context, &[&deviceId])
}
