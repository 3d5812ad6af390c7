use crate::error::HarnessError;
use crate::variant::{SchemeParameters, OID_LEN};

pub trait BufferAllocator {
    fn zeroed(
        &mut self,
        what: &'static str,
        len: usize,
    ) -> Result<Vec<u8>, HarnessError>;
}

/// Heap allocation that reports failure instead of aborting.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapAllocator;

impl BufferAllocator for HeapAllocator {
    fn zeroed(
        &mut self,
        what: &'static str,
        len: usize,
    ) -> Result<Vec<u8>, HarnessError> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|_| HarnessError::Resource { what, bytes: len })?;
        buffer.resize(len, 0);
        Ok(buffer)
    }
}

#[derive(Debug)]
pub struct Buffers {
    pub public_key: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub message: Vec<u8>,
    pub signed: Vec<u8>,
    pub recovered: Vec<u8>,
}

impl Buffers {
    pub fn allocate<A: BufferAllocator>(
        params: &SchemeParameters,
        message_len: usize,
        allocator: &mut A,
    ) -> Result<Self, HarnessError> {
        let signed_len = params
            .signature_size()
            .checked_add(message_len)
            .ok_or(HarnessError::Resource {
                what: "signed message",
                bytes: usize::MAX,
            })?;

        Ok(Self {
            public_key: allocator
                .zeroed("public key", OID_LEN + params.public_key_size())?,
            secret_key: allocator
                .zeroed("secret key", OID_LEN + params.secret_key_size())?,
            message: allocator.zeroed("message", message_len)?,
            signed: allocator.zeroed("signed message", signed_len)?,
            recovered: allocator.zeroed("recovered message", signed_len)?,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{BufferAllocator, Buffers, HeapAllocator};
    use crate::error::HarnessError;
    use crate::variant::resolve;

    #[derive(Debug, Default)]
    pub(crate) struct CountingAllocator {
        pub calls: usize,
        pub bytes: usize,
        pub fail_on: Option<&'static str>,
    }

    impl BufferAllocator for CountingAllocator {
        fn zeroed(
            &mut self,
            what: &'static str,
            len: usize,
        ) -> Result<Vec<u8>, HarnessError> {
            self.calls += 1;
            if self.fail_on == Some(what) {
                return Err(HarnessError::Resource { what, bytes: len });
            }
            self.bytes += len;
            Ok(vec![0; len])
        }
    }

    #[test]
    fn sizes_come_from_parameters() {
        let (_, params) = resolve("XMSS-SHA2_10_256").expect("known variant");
        let buffers = Buffers::allocate(&params, 32, &mut HeapAllocator)
            .expect("allocation succeeds");

        assert_eq!(buffers.public_key.len(), 4 + 64);
        assert_eq!(buffers.secret_key.len(), 4 + 132);
        assert_eq!(buffers.message.len(), 32);
        assert_eq!(buffers.signed.len(), 2500 + 32);
        assert_eq!(buffers.recovered.len(), buffers.signed.len());
    }

    #[test]
    fn multi_tree_buffers_differ() {
        let (_, params) =
            resolve("XMSSMT-SHA2_20/2_256").expect("known variant");
        let buffers = Buffers::allocate(&params, 32, &mut HeapAllocator)
            .expect("allocation succeeds");

        assert_eq!(buffers.secret_key.len(), 4 + 131);
        assert_eq!(buffers.signed.len(), 4963 + 32);
    }

    #[test]
    fn allocation_failure_is_resource_error() {
        let (_, params) = resolve("XMSS-SHA2_10_256").expect("known variant");
        let mut allocator = CountingAllocator {
            fail_on: Some("signed message"),
            ..CountingAllocator::default()
        };

        let err = Buffers::allocate(&params, 32, &mut allocator)
            .expect_err("allocation must fail");
        assert!(matches!(
            err,
            HarnessError::Resource {
                what: "signed message",
                ..
            }
        ));
        assert_eq!(allocator.calls, 4);
    }

    #[test]
    fn heap_allocator_rejects_impossible_sizes() {
        let err = HeapAllocator
            .zeroed("message", usize::MAX)
            .expect_err("capacity overflow");
        assert!(matches!(err, HarnessError::Resource { .. }));
    }
}
