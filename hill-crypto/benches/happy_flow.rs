use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hill_crypto::HillCipher;

fn bench_happy_flow(c: &mut Criterion) {
    let cipher = HillCipher::new();

    // the same message every iteration
    let original = "MEET ME AT THE USUAL PLACE? ".to_string();

    c.bench_function("happy_flow", |b| {
        b.iter(|| {
            let encrypted = cipher.encrypt(black_box(&original)).expect("encrypt");
            let decrypted = cipher.decrypt(&encrypted).expect("decrypt");
            black_box(decrypted);
        })
    });
}

fn bench_known_plaintext_attack(c: &mut Criterion) {
    let cipher = HillCipher::new();
    let plaintexts = ["HELP", "ABCD", "THE CAT."];
    let ciphertexts: Vec<String> = plaintexts
        .iter()
        .map(|p| cipher.encrypt(p).expect("encrypt"))
        .collect();

    c.bench_function("known_plaintext_attack", |b| {
        b.iter(|| {
            let mut attacker = HillCipher::without_keys();
            let pair = attacker
                .known_plaintext_attack(black_box(&plaintexts), black_box(&ciphertexts), 2)
                .expect("recover key")
                .clone();
            black_box(pair);
        })
    });
}

criterion_group!(benches, bench_happy_flow, bench_known_plaintext_attack);
criterion_main!(benches);
