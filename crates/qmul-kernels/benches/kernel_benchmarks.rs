//! Criterion benchmarks for kernel performance regression detection

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qmul_common::{KernelConfig, MulParams};
use qmul_kernels::{KernelManager, KernelProvider};

/// Deterministic test data generator.
struct BenchmarkData;

impl BenchmarkData {
    fn vector(len: usize, salt: usize) -> Vec<i8> {
        (0..len).map(|i| (((i * 31 + salt * 17) % 256) as u8) as i8).collect()
    }

    fn params() -> MulParams {
        MulParams {
            input_1_offset: 7,
            input_2_offset: -3,
            out_offset: 1,
            out_shift: 6,
            ..MulParams::unit_scale()
        }
    }
}

/// Benchmark the selected provider across vector sizes.
fn bench_elementwise_mul(c: &mut Criterion) {
    let manager = KernelManager::new();
    let kernel = manager.select_best().expect("Should have a kernel");

    let mut group = c.benchmark_group("elementwise_mul_s8");
    let params = BenchmarkData::params();

    for size in [64usize, 256, 1024, 4096, 16384, 65536] {
        let input_1 = BenchmarkData::vector(size, 1);
        let input_2 = BenchmarkData::vector(size, 2);
        let mut output = vec![0i8; size];

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new(kernel.name(), size), &size, |b, _| {
            b.iter(|| {
                kernel
                    .elementwise_mul_s8(
                        black_box(&input_1),
                        black_box(&input_2),
                        black_box(&mut output),
                        black_box(&params),
                    )
                    .unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark the scalar path on the same sizes for a packed-vs-scalar view.
fn bench_scalar_reference(c: &mut Criterion) {
    let manager = KernelManager::with_config(&KernelConfig { force_scalar: true });
    let kernel = manager.select_best().expect("Should have a kernel");

    let mut group = c.benchmark_group("elementwise_mul_s8_scalar");
    let params = BenchmarkData::params();

    for size in [1024usize, 16384, 65536] {
        let input_1 = BenchmarkData::vector(size, 1);
        let input_2 = BenchmarkData::vector(size, 2);
        let mut output = vec![0i8; size];

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new(kernel.name(), size), &size, |b, _| {
            b.iter(|| {
                kernel
                    .elementwise_mul_s8(
                        black_box(&input_1),
                        black_box(&input_2),
                        black_box(&mut output),
                        black_box(&params),
                    )
                    .unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_elementwise_mul, bench_scalar_reference);
criterion_main!(benches);
