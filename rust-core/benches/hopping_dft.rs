use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hopping_dft::spectrum::{EngineConfig, HoppingGoertzelDft, ReferenceDft};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn loudness_config() -> EngineConfig {
    EngineConfig::from_band_edges(
        48000.0,
        &[0.0, 80.0, 500.0, 1250.0, 2540.0, 4050.0, 24000.0],
        &[8192, 4096, 2048, 1024, 512, 256],
        384,
        128,
    )
    .unwrap()
}

fn bench_streaming(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = loudness_config();
    let mut rng = StdRng::seed_from_u64(0);
    let signal: Vec<f64> = (0..48000).map(|_| rng.gen_range(-1.0..1.0)).collect();

    c.bench_function("hopping goertzel, 1 s of 48 kHz audio", |b| {
        let mut engine = HoppingGoertzelDft::new(config.clone()).unwrap();
        b.iter(|| {
            for block in signal.chunks_exact(128) {
                black_box(engine.process(block).unwrap());
            }
        })
    });

    c.bench_function("reference fft, 1 s of 48 kHz audio", |b| {
        let mut reference = ReferenceDft::new(config.clone());
        b.iter(|| black_box(reference.frames(&signal).unwrap()))
    });
}

criterion_group!(benches, bench_streaming);
criterion_main!(benches);
