//! Call-trace serializer.
//!
//! Each stub call records two byte strings: the serialized inputs and the
//! serialized outputs. A value serializes to its native-endian in-memory
//! image, concatenated in argument order with no separators or length
//! prefixes, which is exactly what a binding test produces on its side with
//! `ctypes.string_at(addressof(x), sizeof(x))`. The harness then hands both
//! strings to [`Serializer::check`] (exported as
//! `AXCL_STUB_CheckInputAndOutput`) to assert the call happened as expected.
//!
//! # Example
//!
//! ```
//! use axcl_stub::serializer::{serialize_args, Serializer, TraceMatch};
//!
//! let serializer = Serializer::new(8);
//! let mut call = serializer.begin("axclrtSetDevice");
//! call.input(&[&3i32]);
//! call.output(&[&0i32]);
//! call.commit();
//!
//! let input = serialize_args(&[&3i32]);
//! let output = serialize_args(&[&0i32]);
//! assert_eq!(serializer.check(&input, &output), TraceMatch::Matched);
//! ```

use axcl_sys::{axclrtDeviceList, axclrtDeviceProperties};
use bytes::{BufMut, Bytes, BytesMut};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::ffi::CStr;
use std::os::raw::{c_char, c_void};

/// A value that can be written into a call trace.
pub trait TraceArg {
    /// Append this value's native in-memory bytes to `buf`.
    fn serialize_into(&self, buf: &mut BytesMut);
}

macro_rules! impl_scalar_trace_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TraceArg for $ty {
                fn serialize_into(&self, buf: &mut BytesMut) {
                    buf.put_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_scalar_trace_arg!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);

// Opaque handles serialize as their address
impl TraceArg for *mut c_void {
    fn serialize_into(&self, buf: &mut BytesMut) {
        buf.put_slice(&(*self as usize).to_ne_bytes());
    }
}

impl<T: TraceArg + ?Sized> TraceArg for &T {
    fn serialize_into(&self, buf: &mut BytesMut) {
        (**self).serialize_into(buf);
    }
}

impl TraceArg for axclrtDeviceList {
    fn serialize_into(&self, buf: &mut BytesMut) {
        self.num.serialize_into(buf);
        for id in &self.devices {
            id.serialize_into(buf);
        }
    }
}

impl TraceArg for axclrtDeviceProperties {
    fn serialize_into(&self, buf: &mut BytesMut) {
        buf.put_slice(&self.swVersion);
        self.uid.serialize_into(buf);
        self.pciDomain.serialize_into(buf);
        self.pciBusID.serialize_into(buf);
        self.pciDeviceID.serialize_into(buf);
        self.temperature.serialize_into(buf);
        self.totalMemSize.serialize_into(buf);
        self.freeMemSize.serialize_into(buf);
        self.totalCmmSize.serialize_into(buf);
        self.freeCmmSize.serialize_into(buf);
        self.cpuLoading.serialize_into(buf);
        self.npuLoading.serialize_into(buf);
        for word in &self.reserved {
            word.serialize_into(buf);
        }
    }
}

/// Raw byte buffer argument. Writes its bytes only, never its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteArray<'a> {
    data: &'a [u8],
}

impl<'a> ByteArray<'a> {
    /// Wrap a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Bytes of a C string without its NUL terminator. NULL yields an empty array.
    ///
    /// # Safety
    ///
    /// `ptr` must be NULL or point to a NUL-terminated string that outlives `'a`.
    #[allow(unsafe_code)]
    pub unsafe fn from_c_str(ptr: *const c_char) -> Self {
        if ptr.is_null() {
            return Self { data: &[] };
        }
        Self {
            data: CStr::from_ptr(ptr).to_bytes(),
        }
    }

    /// The wrapped bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

impl TraceArg for ByteArray<'_> {
    fn serialize_into(&self, buf: &mut BytesMut) {
        buf.put_slice(self.data);
    }
}

/// Serialize `args` in order, the same way a stub call records them.
pub fn serialize_args(args: &[&dyn TraceArg]) -> Bytes {
    let mut buf = BytesMut::new();
    for arg in args {
        arg.serialize_into(&mut buf);
    }
    buf.freeze()
}

/// One committed stub call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    /// Monotonic call number, starting at 1 for the process
    pub sequence: u64,
    /// Exported symbol name
    pub function: &'static str,
    /// Serialized input arguments
    pub input: Bytes,
    /// Serialized status and output parameters
    pub output: Bytes,
}

/// Result of comparing caller-built bytes with the last recorded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMatch {
    /// Both inputs and outputs match
    Matched,
    /// Inputs differ
    InputMismatch,
    /// Inputs match, outputs differ
    OutputMismatch,
    /// No call has been recorded
    NoCall,
}

impl TraceMatch {
    /// Integer code returned across the C ABI.
    pub fn code(self) -> i32 {
        match self {
            TraceMatch::Matched => 0,
            TraceMatch::InputMismatch => 1,
            TraceMatch::OutputMismatch => 2,
            TraceMatch::NoCall => 3,
        }
    }
}

#[derive(Debug)]
struct TraceState {
    history: VecDeque<CallRecord>,
    capacity: usize,
    next_sequence: u64,
}

/// Sink for call traces with a bounded history.
#[derive(Debug)]
pub struct Serializer {
    state: Mutex<TraceState>,
}

impl Serializer {
    /// Create a serializer keeping at most `capacity` records (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(TraceState {
                history: VecDeque::with_capacity(capacity),
                capacity,
                next_sequence: 1,
            }),
        }
    }

    /// Start recording a call to `function`.
    pub fn begin(&self, function: &'static str) -> CallBuilder<'_> {
        CallBuilder {
            serializer: self,
            function,
            input: BytesMut::new(),
            output: BytesMut::new(),
        }
    }

    fn commit(&self, function: &'static str, input: Bytes, output: Bytes) -> u64 {
        let mut state = self.state.lock();
        let sequence = state.next_sequence;
        state.next_sequence += 1;

        tracing::trace!(
            function,
            sequence,
            input_len = input.len(),
            output_len = output.len(),
            "recorded call"
        );

        if state.history.len() == state.capacity {
            state.history.pop_front();
        }
        state.history.push_back(CallRecord {
            sequence,
            function,
            input,
            output,
        });
        sequence
    }

    /// Most recent record, if any.
    pub fn last_call(&self) -> Option<CallRecord> {
        self.state.lock().history.back().cloned()
    }

    /// All retained records, oldest first.
    pub fn history(&self) -> Vec<CallRecord> {
        self.state.lock().history.iter().cloned().collect()
    }

    /// Retained records of calls to `function`, oldest first.
    pub fn calls_to(&self, function: &str) -> Vec<CallRecord> {
        self.state
            .lock()
            .history
            .iter()
            .filter(|record| record.function == function)
            .cloned()
            .collect()
    }

    /// Forget every record. Sequence numbers keep counting.
    pub fn clear(&self) {
        self.state.lock().history.clear();
    }

    /// Maximum number of retained records.
    pub fn capacity(&self) -> usize {
        self.state.lock().capacity
    }

    /// Change the history bound, dropping the oldest records if needed.
    pub fn set_capacity(&self, capacity: usize) {
        let mut state = self.state.lock();
        state.capacity = capacity.max(1);
        while state.history.len() > state.capacity {
            state.history.pop_front();
        }
    }

    /// Compare `input` and `output` with the last recorded call.
    pub fn check(&self, input: &[u8], output: &[u8]) -> TraceMatch {
        let state = self.state.lock();
        let Some(last) = state.history.back() else {
            tracing::debug!("trace check with no recorded call");
            return TraceMatch::NoCall;
        };

        let result = if last.input.as_ref() != input {
            TraceMatch::InputMismatch
        } else if last.output.as_ref() != output {
            TraceMatch::OutputMismatch
        } else {
            TraceMatch::Matched
        };

        if result != TraceMatch::Matched {
            tracing::debug!(
                function = last.function,
                sequence = last.sequence,
                ?result,
                recorded_input_len = last.input.len(),
                expected_input_len = input.len(),
                recorded_output_len = last.output.len(),
                expected_output_len = output.len(),
                "trace check failed"
            );
        }
        result
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Input and output buffers of a call in progress.
///
/// Nothing is visible to readers until [`CallBuilder::commit`], so a record is
/// never observed half-written.
#[derive(Debug)]
pub struct CallBuilder<'s> {
    serializer: &'s Serializer,
    function: &'static str,
    input: BytesMut,
    output: BytesMut,
}

impl CallBuilder<'_> {
    /// Append input arguments.
    pub fn input(&mut self, args: &[&dyn TraceArg]) -> &mut Self {
        for arg in args {
            arg.serialize_into(&mut self.input);
        }
        self
    }

    /// Append output values (status first, then out-parameters).
    pub fn output(&mut self, args: &[&dyn TraceArg]) -> &mut Self {
        for arg in args {
            arg.serialize_into(&mut self.output);
        }
        self
    }

    /// Publish the record and return its sequence number.
    pub fn commit(self) -> u64 {
        self.serializer
            .commit(self.function, self.input.freeze(), self.output.freeze())
    }
}
