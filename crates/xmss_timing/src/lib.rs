//! Timing harness for XMSS and XMSS^MT.
//!
//! Resolves a variant name to its parameters, sizes the key and message
//! buffers from them, and drives keygen, signing and verification through a
//! [`SignatureBackend`] for a fixed number of sequential trials.

pub mod backend;
pub mod buffers;
pub mod clock;
pub mod error;
pub mod harness;
#[cfg(xmss_reference)]
pub mod reference;
pub mod report;
pub mod variant;

pub use backend::{OsRandom, RandomSource, SignatureBackend};
pub use buffers::{BufferAllocator, Buffers, HeapAllocator};
pub use clock::{elapsed_ms, measure_time, Clock, MonotonicClock};
pub use error::{BackendStatus, HarnessError, Phase, VerificationFailure};
pub use harness::{BenchmarkConfig, Harness, MESSAGE_LEN, NTESTS};
#[cfg(xmss_reference)]
pub use reference::ReferenceBackend;
pub use report::{kib, Averages, BenchmarkReport, SizeReport, TrialRecord};
pub use variant::{
    resolve, variants, Family, HashFunction, SchemeParameters, OID_LEN,
    XMSSMT_DEFAULT_VARIANT, XMSS_DEFAULT_VARIANT,
};

/// Whether this build links the xmss-reference C backend.
pub const fn reference_backend_linked() -> bool {
    cfg!(xmss_reference)
}
