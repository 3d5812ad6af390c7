use std::ffi::{c_ulonglong, CString};

use crate::backend::SignatureBackend;
use crate::error::{BackendStatus, HarnessError};
use crate::variant::{Family, SchemeParameters, OID_LEN};

/// Backend linked against the xmss-reference C implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceBackend;

impl ReferenceBackend {
    /// OID the C library assigns to `name`, through `*_str_to_oid`.
    pub fn str_to_oid(
        &self,
        family: Family,
        name: &str,
    ) -> Result<u32, HarnessError> {
        let c_name = CString::new(name).map_err(|_| {
            HarnessError::configuration(format!("invalid variant {name:?}"))
        })?;
        let mut oid = 0_u32;

        // SAFETY: `oid` is a valid out pointer and `c_name` is
        // NUL-terminated for the duration of the call.
        let result = unsafe {
            match family {
                Family::Xmss => ffi::xmss_str_to_oid(&mut oid, c_name.as_ptr()),
                Family::Xmssmt => {
                    ffi::xmssmt_str_to_oid(&mut oid, c_name.as_ptr())
                }
            }
        };
        if result != 0 {
            return Err(HarnessError::configuration(format!(
                "xmss-reference does not know {name:?}"
            )));
        }
        Ok(oid)
    }

    /// Parameter block the C library derives for `oid`.
    pub fn parse_oid(
        &self,
        family: Family,
        oid: u32,
    ) -> Result<ffi::XmssParams, HarnessError> {
        let mut params = ffi::XmssParams::default();

        // SAFETY: `params` is a valid mutable pointer for the call.
        let result = unsafe {
            match family {
                Family::Xmss => ffi::xmss_parse_oid(&mut params, oid),
                Family::Xmssmt => ffi::xmssmt_parse_oid(&mut params, oid),
            }
        };
        if result != 0 {
            return Err(HarnessError::configuration(format!(
                "xmss-reference rejected {family} OID {oid:#010x}"
            )));
        }
        Ok(params)
    }
}

fn status(result: i32) -> Result<(), BackendStatus> {
    if result == 0 {
        Ok(())
    } else {
        Err(BackendStatus(result))
    }
}

impl SignatureBackend for ReferenceBackend {
    fn name(&self) -> &'static str {
        "xmss-reference (C FFI)"
    }

    fn keypair(
        &mut self,
        params: &SchemeParameters,
        public_key: &mut [u8],
        secret_key: &mut [u8],
    ) -> Result<(), BackendStatus> {
        if public_key.len() < OID_LEN + params.public_key_size()
            || secret_key.len() < OID_LEN + params.secret_key_size()
        {
            return Err(BackendStatus(-1));
        }

        // SAFETY: Buffers are sized from the parameters of this OID.
        let result = unsafe {
            match params.family() {
                Family::Xmss => ffi::xmss_keypair(
                    public_key.as_mut_ptr(),
                    secret_key.as_mut_ptr(),
                    params.oid(),
                ),
                Family::Xmssmt => ffi::xmssmt_keypair(
                    public_key.as_mut_ptr(),
                    secret_key.as_mut_ptr(),
                    params.oid(),
                ),
            }
        };
        status(result)
    }

    fn sign(
        &mut self,
        params: &SchemeParameters,
        secret_key: &mut [u8],
        signed: &mut [u8],
        message: &[u8],
    ) -> Result<usize, BackendStatus> {
        if signed.len() < params.signature_size() + message.len() {
            return Err(BackendStatus(-1));
        }
        let mut signed_len: c_ulonglong = 0;

        // SAFETY: `signed` holds signature plus message bytes and the
        // secret key buffer carries the OID prefix the C code reads.
        let result = unsafe {
            match params.family() {
                Family::Xmss => ffi::xmss_sign(
                    secret_key.as_mut_ptr(),
                    signed.as_mut_ptr(),
                    &mut signed_len,
                    message.as_ptr(),
                    message.len() as c_ulonglong,
                ),
                Family::Xmssmt => ffi::xmssmt_sign(
                    secret_key.as_mut_ptr(),
                    signed.as_mut_ptr(),
                    &mut signed_len,
                    message.as_ptr(),
                    message.len() as c_ulonglong,
                ),
            }
        };
        status(result)?;
        Ok(signed_len as usize)
    }

    fn open(
        &mut self,
        params: &SchemeParameters,
        recovered: &mut [u8],
        signed: &[u8],
        public_key: &[u8],
    ) -> Result<usize, BackendStatus> {
        // sign_open uses the output buffer as scratch for the whole input.
        if recovered.len() < signed.len() {
            return Err(BackendStatus(-1));
        }
        let mut recovered_len: c_ulonglong = 0;

        // SAFETY: `recovered` is at least as long as `signed`.
        let result = unsafe {
            match params.family() {
                Family::Xmss => ffi::xmss_sign_open(
                    recovered.as_mut_ptr(),
                    &mut recovered_len,
                    signed.as_ptr(),
                    signed.len() as c_ulonglong,
                    public_key.as_ptr(),
                ),
                Family::Xmssmt => ffi::xmssmt_sign_open(
                    recovered.as_mut_ptr(),
                    &mut recovered_len,
                    signed.as_ptr(),
                    signed.len() as c_ulonglong,
                    public_key.as_ptr(),
                ),
            }
        };
        status(result)?;
        Ok(recovered_len as usize)
    }
}

pub mod ffi {
    use std::ffi::{c_char, c_int, c_uchar, c_uint, c_ulonglong};

    #[repr(C)]
    #[derive(Clone, Copy, Debug, Default)]
    pub struct XmssParams {
        pub func: c_uint,
        pub n: c_uint,
        pub padding_len: c_uint,
        pub wots_w: c_uint,
        pub wots_log_w: c_uint,
        pub wots_len1: c_uint,
        pub wots_len2: c_uint,
        pub wots_len: c_uint,
        pub wots_sig_bytes: c_uint,
        pub full_height: c_uint,
        pub tree_height: c_uint,
        pub d: c_uint,
        pub index_bytes: c_uint,
        pub sig_bytes: c_uint,
        pub pk_bytes: c_uint,
        pub sk_bytes: c_ulonglong,
        pub bds_k: c_uint,
    }

    unsafe extern "C" {
        pub fn xmss_str_to_oid(oid: *mut c_uint, s: *const c_char) -> c_int;
        pub fn xmssmt_str_to_oid(oid: *mut c_uint, s: *const c_char)
            -> c_int;

        pub fn xmss_parse_oid(params: *mut XmssParams, oid: c_uint) -> c_int;
        pub fn xmssmt_parse_oid(params: *mut XmssParams, oid: c_uint)
            -> c_int;

        pub fn xmss_keypair(
            pk: *mut c_uchar,
            sk: *mut c_uchar,
            oid: c_uint,
        ) -> c_int;
        pub fn xmssmt_keypair(
            pk: *mut c_uchar,
            sk: *mut c_uchar,
            oid: c_uint,
        ) -> c_int;

        pub fn xmss_sign(
            sk: *mut c_uchar,
            sm: *mut c_uchar,
            smlen: *mut c_ulonglong,
            m: *const c_uchar,
            mlen: c_ulonglong,
        ) -> c_int;
        pub fn xmssmt_sign(
            sk: *mut c_uchar,
            sm: *mut c_uchar,
            smlen: *mut c_ulonglong,
            m: *const c_uchar,
            mlen: c_ulonglong,
        ) -> c_int;

        pub fn xmss_sign_open(
            m: *mut c_uchar,
            mlen: *mut c_ulonglong,
            sm: *const c_uchar,
            smlen: c_ulonglong,
            pk: *const c_uchar,
        ) -> c_int;
        pub fn xmssmt_sign_open(
            m: *mut c_uchar,
            mlen: *mut c_ulonglong,
            sm: *const c_uchar,
            smlen: c_ulonglong,
            pk: *const c_uchar,
        ) -> c_int;
    }
}
