use divan::{black_box, Bencher};
use xmss_timing::{resolve, XMSSMT_DEFAULT_VARIANT, XMSS_DEFAULT_VARIANT};

const VARIANTS: [&str; 3] = [
    XMSS_DEFAULT_VARIANT,
    XMSSMT_DEFAULT_VARIANT,
    "XMSSMT-SHAKE256_60/12_192",
];

fn main() {
    if !xmss_timing::reference_backend_linked() {
        println!("xmss-reference not linked; only resolver benches run");
    }
    divan::main();
}

#[divan::bench(args = VARIANTS)]
fn resolve_variant(bencher: Bencher, name: &'static str) {
    bencher.bench(|| {
        let resolved = resolve(black_box(name)).expect("known variant");
        black_box(resolved);
    });
}

#[cfg(xmss_reference)]
mod reference {
    use divan::{black_box, Bencher};
    use xmss_timing::{
        resolve, Buffers, HeapAllocator, ReferenceBackend, SignatureBackend,
        MESSAGE_LEN, XMSSMT_DEFAULT_VARIANT, XMSS_DEFAULT_VARIANT,
    };

    const VARIANTS: [&str; 2] = [XMSS_DEFAULT_VARIANT, XMSSMT_DEFAULT_VARIANT];

    fn setup(name: &'static str) -> (xmss_timing::SchemeParameters, Buffers) {
        let (_, params) = resolve(name).expect("known variant");
        let buffers =
            Buffers::allocate(&params, MESSAGE_LEN, &mut HeapAllocator)
                .expect("buffers allocate");
        (params, buffers)
    }

    #[divan::bench(args = VARIANTS, sample_count = 10)]
    fn keygen(bencher: Bencher, name: &'static str) {
        let (params, mut buffers) = setup(name);
        let mut backend = ReferenceBackend;

        bencher.bench_local(|| {
            backend
                .keypair(
                    &params,
                    &mut buffers.public_key,
                    &mut buffers.secret_key,
                )
                .expect("keypair must succeed");
        });
    }

    // Each sample signs with a fresh key so stateful keys never run out.
    #[divan::bench(args = VARIANTS, sample_count = 10)]
    fn sign(bencher: Bencher, name: &'static str) {
        bencher
            .with_inputs(|| {
                let (params, mut buffers) = setup(name);
                ReferenceBackend
                    .keypair(
                        &params,
                        &mut buffers.public_key,
                        &mut buffers.secret_key,
                    )
                    .expect("keypair must succeed");
                (params, buffers)
            })
            .bench_local_refs(|(params, buffers)| {
                let len = ReferenceBackend
                    .sign(
                        params,
                        &mut buffers.secret_key,
                        &mut buffers.signed,
                        black_box(&buffers.message),
                    )
                    .expect("sign must succeed");
                black_box(len);
            });
    }

    #[divan::bench(args = VARIANTS)]
    fn verify(bencher: Bencher, name: &'static str) {
        let (params, mut buffers) = setup(name);
        let mut backend = ReferenceBackend;
        backend
            .keypair(&params, &mut buffers.public_key, &mut buffers.secret_key)
            .expect("keypair must succeed");
        let signed_len = backend
            .sign(
                &params,
                &mut buffers.secret_key,
                &mut buffers.signed,
                &buffers.message,
            )
            .expect("sign must succeed");

        bencher.bench_local(|| {
            let len = backend
                .open(
                    &params,
                    &mut buffers.recovered,
                    black_box(&buffers.signed[..signed_len]),
                    &buffers.public_key,
                )
                .expect("signature must verify");
            assert_eq!(len, MESSAGE_LEN, "recovered message length");
        });
    }
}
