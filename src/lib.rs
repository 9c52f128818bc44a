//! # AXCL stub runtime
//!
//! `axcl_stub` builds `libaxcl_stub.so`, a drop-in replacement for the AXCL
//! device runtime used when testing language bindings on machines without an
//! accelerator card. Every exported function keeps its vendor C signature but
//! fabricates its results, and records what it was called with and what it
//! returned so a test can assert that the binding marshalled both directions
//! correctly.
//!
//! ## Crate Structure
//!
//! - **`ffi`**: the unmangled `extern "C"` entry points, grouped by vendor
//!   header, plus the `AXCL_STUB_*` test hooks.
//! - **`randomizer`**: seedable source of fabricated values and status codes.
//! - **`serializer`**: native-layout call-trace encoding and the bounded
//!   history the test hooks compare against.
//! - **`runtime`**: the lazily-built process-wide state shared by all calls.
//! - **`config`**: layered configuration (defaults, TOML file, `AXCL_STUB_*`
//!   environment variables).
//! - **`tracing_setup`**: `tracing` subscriber installation.
//! - **`error`**: the crate's `StubError` type.
//!
//! C types and constants come from the `axcl-sys` crate.

pub mod config;
pub mod error;
pub mod ffi;
pub mod randomizer;
pub mod runtime;
pub mod serializer;
pub mod tracing_setup;

pub use config::StubConfig;
pub use error::{StubError, StubResult};
pub use randomizer::{Randomizer, StatusPolicy};
pub use runtime::{runtime, StubRuntime};
pub use serializer::{serialize_args, ByteArray, CallRecord, Serializer, TraceArg, TraceMatch};
