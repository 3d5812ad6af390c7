use crate::error::{BackendStatus, HarnessError};
use crate::variant::SchemeParameters;

/// Buffer-oriented view of an XMSS/XMSS^MT implementation.
///
/// Keys carry the OID prefix. `sign` writes `signature || message` into
/// `signed` and returns the number of bytes written; `open` verifies such a
/// buffer and writes the recovered message into `recovered`, returning its
/// length.
pub trait SignatureBackend {
    fn name(&self) -> &'static str;

    fn keypair(
        &mut self,
        params: &SchemeParameters,
        public_key: &mut [u8],
        secret_key: &mut [u8],
    ) -> Result<(), BackendStatus>;

    fn sign(
        &mut self,
        params: &SchemeParameters,
        secret_key: &mut [u8],
        signed: &mut [u8],
        message: &[u8],
    ) -> Result<usize, BackendStatus>;

    fn open(
        &mut self,
        params: &SchemeParameters,
        recovered: &mut [u8],
        signed: &[u8],
        public_key: &[u8],
    ) -> Result<usize, BackendStatus>;
}

pub trait RandomSource {
    fn fill(&mut self, buffer: &mut [u8]) -> Result<(), HarnessError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&mut self, buffer: &mut [u8]) -> Result<(), HarnessError> {
        getrandom::fill(buffer)
            .map_err(|err| HarnessError::Randomness(err.to_string()))
    }
}
