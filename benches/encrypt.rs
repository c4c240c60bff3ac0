// benches/encrypt.rs
//! Encrypt throughput: raw keys across MAC widths, plus password mode with KDF

use aesstream::{Key, Password, PasswordEncryptor, RawEncryptor, StreamCipher};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

const KB: usize = 1024;
const MB: usize = 1024 * 1024;

fn format_size(bytes: usize) -> String {
    if bytes >= MB {
        format!("{} MiB", bytes / MB)
    } else if bytes >= KB {
        format!("{} KiB", bytes / KB)
    } else {
        format!("{bytes} B")
    }
}

fn bench_raw_encrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_encrypt");

    for &(enc_len, auth_len) in &[(16, 28), (32, 32), (32, 64)] {
        let key = Key::generate(enc_len, auth_len).unwrap();

        for &size in &[64, 64 * KB, MB] {
            let input = vec![0x41u8; size];
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("aes{}_mac{}", enc_len * 8, auth_len), format_size(size)),
                &size,
                |b, _| {
                    b.iter(|| {
                        let mut enc = RawEncryptor::with_key(&key).unwrap();
                        let mut out = Vec::with_capacity(size + size / 8 + 256);
                        // 4 KiB chunks, as a stream adapter would feed them.
                        for chunk in black_box(&input).chunks(4 * KB) {
                            out.extend(enc.process(chunk).unwrap());
                        }
                        out.extend(enc.finalize(&[]).unwrap());
                        black_box(out)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_password_encrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("password_encrypt");
    group.sample_size(20);

    let password = Password::from("benchmark-password");
    let input = vec![0x41u8; 64 * KB];

    for &iters in &[1_000u32, 10_000] {
        group.bench_with_input(BenchmarkId::new("iterations", iters), &iters, |b, &iters| {
            b.iter(|| {
                let mut enc = PasswordEncryptor::with_password(&password, black_box(iters)).unwrap();
                black_box(enc.finalize(black_box(&input)).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_raw_encrypt, bench_password_encrypt);
criterion_main!(benches);
