//! `axcl_rt_stream.h`: runtime streams.

use super::{fabricate_handle, status_only};
use axcl_sys::{axclError, axclrtStream};

/// `axclError axclrtCreateStream(axclrtStream *stream);`
#[no_mangle]
pub unsafe extern "C" fn axclrtCreateStream(stream: *mut axclrtStream) -> axclError {
    fabricate_handle("axclrtCreateStream", stream, &[])
}

/// `axclError axclrtDestroyStream(axclrtStream stream);`
#[no_mangle]
pub extern "C" fn axclrtDestroyStream(stream: axclrtStream) -> axclError {
    status_only("axclrtDestroyStream", &[&stream])
}

/// `axclError axclrtDestroyStreamForce(axclrtStream stream);`
#[no_mangle]
pub extern "C" fn axclrtDestroyStreamForce(stream: axclrtStream) -> axclError {
    status_only("axclrtDestroyStreamForce", &[&stream])
}

/// `axclError axclrtSynchronizeStream(axclrtStream stream);`
#[no_mangle]
pub extern "C" fn axclrtSynchronizeStream(stream: axclrtStream) -> axclError {
    status_only("axclrtSynchronizeStream", &[&stream])
}

/// `axclError axclrtSynchronizeStreamWithTimeout(axclrtStream stream, int32_t timeout);`
#[no_mangle]
pub extern "C" fn axclrtSynchronizeStreamWithTimeout(
    stream: axclrtStream,
    timeout: i32,
) -> axclError {
    status_only("axclrtSynchronizeStreamWithTimeout", &[&stream, &timeout])
}
