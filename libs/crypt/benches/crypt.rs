use criterion::{criterion_group, criterion_main, Criterion};
use grubcrypt_crypt::{encode, generate_salt, hash, SaltSpec, Scheme};

fn hash_schemes(c: &mut Criterion) {
    let spec = SaltSpec::with_salt("saltsalt");

    for scheme in Scheme::ALL {
        c.bench_function(&format!("hash {}", scheme), |b| {
            b.iter(|| {
                hash(scheme, "correct horse battery staple", Some(&spec)).unwrap();
            });
        });
    }
}

fn encode_digest(c: &mut Criterion) {
    let digest = [0x5au8; 64];

    c.bench_function("encode sha-512 digest", |b| {
        b.iter(|| encode(Scheme::Sha512, &digest));
    });
}

fn salt(c: &mut Criterion) {
    c.bench_function("generate salt", |b| {
        b.iter(|| generate_salt(Scheme::Sha512).unwrap());
    });
}

criterion_group!(benches, hash_schemes, encode_digest, salt);
criterion_main!(benches);
