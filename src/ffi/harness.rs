//! `AXCL_STUB_*` hooks for binding test suites.
//!
//! These are not part of the vendor ABI. A binding test calls a wrapped API,
//! serializes the arguments and results it expects on its own side, then asks
//! the stub whether the last recorded call matches.

use crate::randomizer::StatusPolicy;
use crate::runtime::runtime;
use std::os::raw::c_void;

/// `AXCL_STUB_SetStatusPolicy` mode: uniform random status.
pub const AXCL_STUB_STATUS_RANDOM: i32 = 0;
/// `AXCL_STUB_SetStatusPolicy` mode: always success.
pub const AXCL_STUB_STATUS_SUCCESS: i32 = 1;
/// `AXCL_STUB_SetStatusPolicy` mode: fail with probability `rate`.
pub const AXCL_STUB_STATUS_FAILURE_RATE: i32 = 2;

unsafe fn bytes_or_empty<'a>(data: *const c_void, len: u32) -> &'a [u8] {
    if data.is_null() || len == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(data.cast::<u8>(), len as usize)
    }
}

/// `int32_t AXCL_STUB_CheckInputAndOutput(const void *inputs, uint32_t inputs_len, const void *outputs, uint32_t outputs_len);`
///
/// Returns 0 when both byte strings equal the last recorded call, 1 on an
/// input mismatch, 2 on an output mismatch and 3 when nothing was recorded.
/// A NULL pointer stands for an empty byte string.
#[no_mangle]
pub unsafe extern "C" fn AXCL_STUB_CheckInputAndOutput(
    inputs: *const c_void,
    inputs_len: u32,
    outputs: *const c_void,
    outputs_len: u32,
) -> i32 {
    let input = bytes_or_empty(inputs, inputs_len);
    let output = bytes_or_empty(outputs, outputs_len);
    runtime().serializer().check(input, output).code()
}

/// `void AXCL_STUB_SetSeed(uint64_t seed);`
#[no_mangle]
pub extern "C" fn AXCL_STUB_SetSeed(seed: u64) {
    tracing::debug!(seed, "randomizer reseeded");
    runtime().randomizer().reseed(seed);
}

/// `void AXCL_STUB_ClearTrace(void);`
#[no_mangle]
pub extern "C" fn AXCL_STUB_ClearTrace() {
    runtime().serializer().clear();
}

/// `int32_t AXCL_STUB_SetHistoryCapacity(uint32_t capacity);`
///
/// Changes how many call records are retained, dropping the oldest ones.
/// Returns 0, or -1 when `capacity` is zero.
#[no_mangle]
pub extern "C" fn AXCL_STUB_SetHistoryCapacity(capacity: u32) -> i32 {
    if capacity == 0 {
        tracing::warn!("rejected zero history capacity");
        return -1;
    }
    runtime().serializer().set_capacity(capacity as usize);
    0
}

/// `void AXCL_STUB_ResetRuntime(void);`
///
/// Restores the configured status policy, history capacity and seed, and
/// empties the trace.
#[no_mangle]
pub extern "C" fn AXCL_STUB_ResetRuntime() {
    runtime().restore_defaults();
}

/// `int32_t AXCL_STUB_SetStatusPolicy(int32_t mode, double rate);`
///
/// `rate` is only read for [`AXCL_STUB_STATUS_FAILURE_RATE`]. Returns 0 on
/// success and -1 for an unknown mode or a rate outside `[0, 1]`.
#[no_mangle]
pub extern "C" fn AXCL_STUB_SetStatusPolicy(mode: i32, rate: f64) -> i32 {
    let policy = match mode {
        AXCL_STUB_STATUS_RANDOM => StatusPolicy::Random,
        AXCL_STUB_STATUS_SUCCESS => StatusPolicy::Success,
        AXCL_STUB_STATUS_FAILURE_RATE if (0.0..=1.0).contains(&rate) => {
            StatusPolicy::FailureRate { rate }
        }
        _ => {
            tracing::warn!(mode, rate, "rejected status policy");
            return -1;
        }
    };
    runtime().set_status_policy(policy);
    0
}
