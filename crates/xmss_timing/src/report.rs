use std::fmt;

use crate::variant::{Family, SchemeParameters};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrialRecord {
    pub keygen_ms: f64,
    pub sign_ms: f64,
    pub verify_ms: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Averages {
    pub keygen_ms: f64,
    pub sign_ms: f64,
    pub verify_ms: f64,
}

impl Averages {
    /// Column means of `records`. Callers reject empty runs before the
    /// loop, so `records` is never empty here.
    pub fn from_records(records: &[TrialRecord]) -> Self {
        debug_assert!(!records.is_empty());

        let mut sums = Self::default();
        for record in records {
            sums.keygen_ms += record.keygen_ms;
            sums.sign_ms += record.sign_ms;
            sums.verify_ms += record.verify_ms;
        }

        let count = records.len() as f64;
        Self {
            keygen_ms: sums.keygen_ms / count,
            sign_ms: sums.sign_ms / count,
            verify_ms: sums.verify_ms / count,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeReport {
    pub signature_bytes: usize,
    pub public_key_bytes: usize,
    pub secret_key_bytes: usize,
}

impl SizeReport {
    pub fn of(params: &SchemeParameters) -> Self {
        Self {
            signature_bytes: params.signature_size(),
            public_key_bytes: params.public_key_size(),
            secret_key_bytes: params.secret_key_size(),
        }
    }
}

pub fn kib(bytes: usize) -> f64 {
    bytes as f64 / 1024.0
}

fn throughput(avg_ms: f64) -> f64 {
    if avg_ms <= 0.0 {
        0.0
    } else {
        1_000.0 / avg_ms
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkReport {
    pub variant: String,
    pub family: Family,
    pub oid: u32,
    pub backend: &'static str,
    pub iterations: usize,
    pub message_len: usize,
    pub full_height: u32,
    pub tree_height: u32,
    pub layers: u32,
    pub max_signatures: u64,
    pub averages: Averages,
    pub sizes: SizeReport,
}

impl BenchmarkReport {
    pub fn new(
        params: &SchemeParameters,
        backend: &'static str,
        message_len: usize,
        records: &[TrialRecord],
    ) -> Self {
        Self {
            variant: params.name().to_owned(),
            family: params.family(),
            oid: params.oid(),
            backend,
            iterations: records.len(),
            message_len,
            full_height: params.full_height,
            tree_height: params.tree_height,
            layers: params.d,
            max_signatures: params.max_signatures(),
            averages: Averages::from_records(records),
            sizes: SizeReport::of(params),
        }
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let avg = &self.averages;
        let sizes = &self.sizes;

        writeln!(f, "Results for {}", self.variant)?;
        writeln!(f, "Average times over {} iterations:", self.iterations)?;
        writeln!(f, "Key Generation: {:.2} ms", avg.keygen_ms)?;
        writeln!(f, "Signing:       {:.2} ms", avg.sign_ms)?;
        writeln!(f, "Verification:  {:.2} ms", avg.verify_ms)?;
        writeln!(f)?;

        writeln!(f, "Sizes:")?;
        writeln!(
            f,
            "Signature: {} bytes ({:.2} KiB)",
            sizes.signature_bytes,
            kib(sizes.signature_bytes)
        )?;
        writeln!(
            f,
            "Public key: {} bytes ({:.2} KiB)",
            sizes.public_key_bytes,
            kib(sizes.public_key_bytes)
        )?;
        writeln!(
            f,
            "Secret key: {} bytes ({:.2} KiB)",
            sizes.secret_key_bytes,
            kib(sizes.secret_key_bytes)
        )?;
        writeln!(f)?;

        writeln!(f, "Throughput:")?;
        writeln!(f, "keygen_ops_per_s: {:.3}", throughput(avg.keygen_ms))?;
        writeln!(f, "sign_ops_per_s: {:.3}", throughput(avg.sign_ms))?;
        writeln!(f, "verify_ops_per_s: {:.3}", throughput(avg.verify_ms))?;
        writeln!(f)?;

        writeln!(f, "Scheme:")?;
        writeln!(f, "family: {}", self.family)?;
        writeln!(f, "oid: {:#010x}", self.oid)?;
        writeln!(f, "full_height: {}", self.full_height)?;
        writeln!(f, "tree_height: {}", self.tree_height)?;
        writeln!(f, "layers: {}", self.layers)?;
        writeln!(f, "signatures_per_key: {}", self.max_signatures)?;
        writeln!(f, "message_size: {}", self.message_len)?;
        write!(f, "backend: {}", self.backend)
    }
}
