use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fake::Fake;
use fake::faker::lorem::en::Words;
use hill_crypto::preset::alphabet::symbol_index;
use hill_crypto::{HillCipher, KeyGenParams, KeyPair};

fn setup_cipher(key_size: usize) -> HillCipher {
    let params = KeyGenParams::try_with(key_size, Some(12345)).expect("key params");
    HillCipher::from(KeyPair::generate(&params).expect("generate key"))
}

/// Roughly `len` characters of lorem text, upper-cased, restricted to the
/// cipher alphabet and padded with spaces to a whole number of blocks.
fn make_string(len: usize, block_size: usize) -> String {
    let mut s = String::with_capacity(len + block_size);
    while s.len() < len {
        let words: Vec<String> = Words(10..20).fake();
        if !s.is_empty() {
            s.push(' ');
        }
        s.extend(
            words
                .join(" ")
                .to_uppercase()
                .chars()
                .filter(|&ch| symbol_index(ch).is_some()),
        );
        s.truncate(len);
    }
    while s.len() % block_size != 0 {
        s.push(' ');
    }
    s
}

fn bench_sizes(c: &mut Criterion) {
    let sizes: [(usize, &str); 3] = [(1_000, "1k"), (100_000, "100k"), (1_000_000, "1m")];

    for key_size in [2, 4, 8] {
        let cipher = setup_cipher(key_size);
        let mut group = c.benchmark_group(format!("Hill {key_size}x{key_size} Encrypt/Decrypt"));

        for (len, label) in sizes {
            let data = make_string(len, key_size);
            // precompute ciphertext for decrypt bench to avoid measuring encrypt twice
            let ciphertext = cipher.encrypt(&data).expect("encrypt");

            group.bench_with_input(BenchmarkId::new("encrypt", label), &data, |b, d| {
                b.iter(|| cipher.encrypt(black_box(d)).expect("encrypt"));
            });

            group.bench_with_input(BenchmarkId::new("decrypt", label), &ciphertext, |b, ctext| {
                b.iter(|| cipher.decrypt(black_box(ctext)).expect("decrypt"));
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_sizes);
criterion_main!(benches);
