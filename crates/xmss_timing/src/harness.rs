use std::mem;

use crate::backend::{OsRandom, RandomSource, SignatureBackend};
use crate::buffers::{BufferAllocator, Buffers, HeapAllocator};
use crate::clock::{measure_time, Clock, MonotonicClock};
use crate::error::{HarnessError, Phase, VerificationFailure};
use crate::report::{BenchmarkReport, TrialRecord};
use crate::variant::{resolve, Family, SchemeParameters};

pub const MESSAGE_LEN: usize = 32;
pub const NTESTS: usize = 10;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BenchmarkConfig {
    pub variant: String,
    pub iterations: usize,
    pub message_len: usize,
}

impl BenchmarkConfig {
    pub fn new(family: Family) -> Self {
        Self {
            variant: family.default_variant().to_owned(),
            iterations: NTESTS,
            message_len: MESSAGE_LEN,
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_message_len(mut self, message_len: usize) -> Self {
        self.message_len = message_len;
        self
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.iterations == 0 {
            return Err(HarnessError::configuration(
                "iteration count must be positive",
            ));
        }
        if self.message_len == 0 {
            return Err(HarnessError::configuration(
                "message size must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self::new(Family::Xmss)
    }
}

pub struct Harness<B, R = OsRandom, C = MonotonicClock, A = HeapAllocator> {
    backend: B,
    random: R,
    clock: C,
    allocator: A,
}

impl<B: SignatureBackend> Harness<B> {
    pub fn new(backend: B) -> Self {
        Self::with_parts(
            backend,
            OsRandom,
            MonotonicClock::new(),
            HeapAllocator,
        )
    }
}

impl<B, R, C, A> Harness<B, R, C, A>
where
    B: SignatureBackend,
    R: RandomSource,
    C: Clock,
    A: BufferAllocator,
{
    pub fn with_parts(backend: B, random: R, clock: C, allocator: A) -> Self {
        Self {
            backend,
            random,
            clock,
            allocator,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn run(
        &mut self,
        config: &BenchmarkConfig,
    ) -> Result<BenchmarkReport, HarnessError> {
        config.validate()?;
        let (_, params) = resolve(&config.variant)?;

        let mut buffers =
            Buffers::allocate(&params, config.message_len, &mut self.allocator)?;
        let mut records = Vec::new();
        records.try_reserve_exact(config.iterations).map_err(|_| {
            HarnessError::Resource {
                what: "trial records",
                bytes: config
                    .iterations
                    .saturating_mul(mem::size_of::<TrialRecord>()),
            }
        })?;

        self.random.fill(&mut buffers.message)?;

        self.run_trials(&params, &mut buffers, config.iterations, &mut records)?;

        Ok(BenchmarkReport::new(
            &params,
            self.backend.name(),
            config.message_len,
            &records,
        ))
    }

    fn run_trials(
        &mut self,
        params: &SchemeParameters,
        buffers: &mut Buffers,
        iterations: usize,
        records: &mut Vec<TrialRecord>,
    ) -> Result<(), HarnessError> {
        for trial in 1..=iterations {
            let record = self.run_trial(params, buffers, trial)?;
            records.push(record);
        }
        Ok(())
    }

    fn run_trial(
        &mut self,
        params: &SchemeParameters,
        buffers: &mut Buffers,
        trial: usize,
    ) -> Result<TrialRecord, HarnessError> {
        let backend = &mut self.backend;
        let clock = &self.clock;

        let (status, keygen_ms) = measure_time(clock, || {
            backend.keypair(
                params,
                &mut buffers.public_key,
                &mut buffers.secret_key,
            )
        });
        status.map_err(|status| HarnessError::CryptoOperation {
            phase: Phase::Keygen,
            trial,
            status,
        })?;

        let (signed_len, sign_ms) = measure_time(clock, || {
            backend.sign(
                params,
                &mut buffers.secret_key,
                &mut buffers.signed,
                &buffers.message,
            )
        });
        let signed_len =
            signed_len.map_err(|status| HarnessError::CryptoOperation {
                phase: Phase::Sign,
                trial,
                status,
            })?;
        if signed_len > buffers.signed.len() {
            return Err(HarnessError::MalformedOutput {
                phase: Phase::Sign,
                trial,
                len: signed_len,
                capacity: buffers.signed.len(),
            });
        }

        let (recovered_len, verify_ms) = measure_time(clock, || {
            backend.open(
                params,
                &mut buffers.recovered,
                &buffers.signed[..signed_len],
                &buffers.public_key,
            )
        });
        let recovered_len = recovered_len.map_err(|status| {
            HarnessError::Verification {
                trial,
                reason: VerificationFailure::Rejected(status),
            }
        })?;
        check_recovered(&buffers.message, &buffers.recovered, recovered_len)
            .map_err(|reason| HarnessError::Verification { trial, reason })?;

        Ok(TrialRecord {
            keygen_ms,
            sign_ms,
            verify_ms,
        })
    }
}

fn check_recovered(
    message: &[u8],
    recovered: &[u8],
    recovered_len: usize,
) -> Result<(), VerificationFailure> {
    if recovered_len != message.len() || recovered_len > recovered.len() {
        return Err(VerificationFailure::LengthMismatch {
            expected: message.len(),
            actual: recovered_len,
        });
    }

    match message
        .iter()
        .zip(&recovered[..recovered_len])
        .position(|(expected, actual)| expected != actual)
    {
        Some(offset) => Err(VerificationFailure::ContentMismatch { offset }),
        None => Ok(()),
    }
}
