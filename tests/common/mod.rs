//! Shared helpers for driving the exported C ABI from integration tests.
//!
//! Expected trace bytes are built from raw memory images, independently of
//! the crate's own serializer, the same way a binding test builds them.

#![allow(dead_code)]

use axcl_stub::ffi::{
    AXCL_STUB_CheckInputAndOutput, AXCL_STUB_ClearTrace, AXCL_STUB_SetStatusPolicy,
    AXCL_STUB_STATUS_RANDOM, AXCL_STUB_STATUS_SUCCESS,
};

pub const MATCHED: i32 = 0;
pub const INPUT_MISMATCH: i32 = 1;
pub const OUTPUT_MISMATCH: i32 = 2;
pub const NO_CALL: i32 = 3;

/// Native memory image of a padding-free value.
pub fn image<T: Copy>(value: &T) -> Vec<u8> {
    let ptr = (value as *const T).cast::<u8>();
    unsafe { std::slice::from_raw_parts(ptr, std::mem::size_of::<T>()) }.to_vec()
}

/// Concatenate byte parts in order.
pub fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.iter().flat_map(|part| part.iter().copied()).collect()
}

/// Compare raw bytes with the last recorded call through the C entry point.
pub fn check(input: &[u8], output: &[u8]) -> i32 {
    unsafe {
        AXCL_STUB_CheckInputAndOutput(
            input.as_ptr().cast(),
            input.len() as u32,
            output.as_ptr().cast(),
            output.len() as u32,
        )
    }
}

/// Empty the trace and restore the default random status policy.
pub fn reset() {
    AXCL_STUB_ClearTrace();
    assert_eq!(AXCL_STUB_SetStatusPolicy(AXCL_STUB_STATUS_RANDOM, 0.0), 0);
}

/// Empty the trace and make every fabricated status `AXCL_SUCC`.
pub fn reset_with_success() {
    AXCL_STUB_ClearTrace();
    assert_eq!(AXCL_STUB_SetStatusPolicy(AXCL_STUB_STATUS_SUCCESS, 0.0), 0);
}
