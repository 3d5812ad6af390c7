use std::fmt;
use std::str::FromStr;

use crate::error::HarnessError;

/// Length of the big-endian OID prefix carried by serialized keys.
pub const OID_LEN: usize = 4;

pub const XMSS_DEFAULT_VARIANT: &str = "XMSS-SHA2_10_256";
pub const XMSSMT_DEFAULT_VARIANT: &str = "XMSSMT-SHA2_20/2_256";

const WOTS_W: u32 = 16;
const WOTS_LOG_W: u32 = 4;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Family {
    Xmss,
    Xmssmt,
}

impl Family {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xmss => "XMSS",
            Self::Xmssmt => "XMSSMT",
        }
    }

    pub const fn default_variant(self) -> &'static str {
        match self {
            Self::Xmss => XMSS_DEFAULT_VARIANT,
            Self::Xmssmt => XMSSMT_DEFAULT_VARIANT,
        }
    }

    pub fn of_name(name: &str) -> Option<Self> {
        if name.starts_with("XMSSMT-") {
            Some(Self::Xmssmt)
        } else if name.starts_with("XMSS-") {
            Some(Self::Xmss)
        } else {
            None
        }
    }

    fn shapes(self) -> &'static [(u32, u32)] {
        match self {
            Self::Xmss => XMSS_SHAPES,
            Self::Xmssmt => XMSSMT_SHAPES,
        }
    }
}

impl FromStr for Family {
    type Err = HarnessError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "xmss" => Ok(Self::Xmss),
            "xmssmt" => Ok(Self::Xmssmt),
            _ => Err(HarnessError::configuration(format!(
                "unknown signature family {value:?}; expected xmss or xmssmt"
            ))),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HashFunction {
    Sha2,
    Shake128,
    Shake256,
}

#[derive(Clone, Copy, Debug)]
struct Suite {
    label: &'static str,
    func: HashFunction,
    n: u32,
}

// OIDs are assigned suite-major, shape-minor, starting at 1.
const SUITES: &[Suite] = &[
    Suite {
        label: "SHA2",
        func: HashFunction::Sha2,
        n: 32,
    },
    Suite {
        label: "SHA2",
        func: HashFunction::Sha2,
        n: 64,
    },
    Suite {
        label: "SHAKE",
        func: HashFunction::Shake128,
        n: 32,
    },
    Suite {
        label: "SHAKE",
        func: HashFunction::Shake256,
        n: 64,
    },
    Suite {
        label: "SHA2",
        func: HashFunction::Sha2,
        n: 24,
    },
    Suite {
        label: "SHAKE256",
        func: HashFunction::Shake256,
        n: 32,
    },
    Suite {
        label: "SHAKE256",
        func: HashFunction::Shake256,
        n: 24,
    },
];

// (full_height, layers)
const XMSS_SHAPES: &[(u32, u32)] = &[(10, 1), (16, 1), (20, 1)];
const XMSSMT_SHAPES: &[(u32, u32)] = &[
    (20, 2),
    (20, 4),
    (40, 2),
    (40, 4),
    (40, 8),
    (60, 3),
    (60, 6),
    (60, 12),
];

#[derive(Clone, Copy, Debug)]
struct Variant {
    family: Family,
    oid: u32,
    suite: Suite,
    full_height: u32,
    d: u32,
}

impl Variant {
    fn name(&self) -> String {
        let bits = self.suite.n * 8;
        match self.family {
            Family::Xmss => format!(
                "XMSS-{}_{}_{bits}",
                self.suite.label, self.full_height
            ),
            Family::Xmssmt => format!(
                "XMSSMT-{}_{}/{}_{bits}",
                self.suite.label, self.full_height, self.d
            ),
        }
    }
}

fn all_variants(family: Family) -> impl Iterator<Item = Variant> {
    let shapes = family.shapes();
    SUITES.iter().enumerate().flat_map(move |(suite_idx, suite)| {
        shapes.iter().enumerate().map(move |(shape_idx, &(h, d))| Variant {
            family,
            oid: (suite_idx * shapes.len() + shape_idx + 1) as u32,
            suite: *suite,
            full_height: h,
            d,
        })
    })
}

/// Canonical names of every supported variant of `family`, in OID order.
pub fn variants(family: Family) -> Vec<String> {
    all_variants(family).map(|variant| variant.name()).collect()
}

/// Resolves a canonical variant name to its OID and parameters.
pub fn resolve(name: &str) -> Result<(u32, SchemeParameters), HarnessError> {
    let family = Family::of_name(name).ok_or_else(|| {
        HarnessError::configuration(format!("unknown variant {name:?}"))
    })?;
    let variant = all_variants(family)
        .find(|variant| variant.name() == name)
        .ok_or_else(|| {
            HarnessError::configuration(format!("unknown variant {name:?}"))
        })?;
    Ok((variant.oid, SchemeParameters::derive(&variant)))
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchemeParameters {
    family: Family,
    oid: u32,
    name: String,
    pub func: HashFunction,
    pub n: u32,
    pub wots_w: u32,
    pub wots_log_w: u32,
    pub wots_len1: u32,
    pub wots_len2: u32,
    pub wots_len: u32,
    pub wots_sig_bytes: u32,
    pub full_height: u32,
    pub tree_height: u32,
    pub d: u32,
    pub index_bytes: u32,
    pub sig_bytes: u32,
    pub pk_bytes: u32,
    pub sk_bytes: u32,
}

impl SchemeParameters {
    pub fn from_oid(family: Family, oid: u32) -> Result<Self, HarnessError> {
        all_variants(family)
            .find(|variant| variant.oid == oid)
            .map(|variant| Self::derive(&variant))
            .ok_or_else(|| {
                HarnessError::configuration(format!(
                    "unknown {family} OID {oid:#010x}"
                ))
            })
    }

    fn derive(variant: &Variant) -> Self {
        let n = variant.suite.n;
        let full_height = variant.full_height;
        let d = variant.d;

        let wots_len1 = 8 * n / WOTS_LOG_W;
        let wots_len2 =
            (wots_len1 * (WOTS_W - 1)).ilog2() / WOTS_LOG_W + 1;
        let wots_len = wots_len1 + wots_len2;
        let wots_sig_bytes = wots_len * n;

        let index_bytes = if d == 1 { 4 } else { full_height.div_ceil(8) };

        Self {
            family: variant.family,
            oid: variant.oid,
            name: variant.name(),
            func: variant.suite.func,
            n,
            wots_w: WOTS_W,
            wots_log_w: WOTS_LOG_W,
            wots_len1,
            wots_len2,
            wots_len,
            wots_sig_bytes,
            full_height,
            tree_height: full_height / d,
            d,
            index_bytes,
            sig_bytes: index_bytes + n + d * wots_sig_bytes + full_height * n,
            pk_bytes: 2 * n,
            sk_bytes: index_bytes + 4 * n,
        }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn oid(&self) -> u32 {
        self.oid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature_size(&self) -> usize {
        self.sig_bytes as usize
    }

    pub fn public_key_size(&self) -> usize {
        self.pk_bytes as usize
    }

    pub fn secret_key_size(&self) -> usize {
        self.sk_bytes as usize
    }

    pub fn max_signatures(&self) -> u64 {
        1_u64 << self.full_height
    }
}
