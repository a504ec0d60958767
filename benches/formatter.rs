//! Benchmark suite specifically for field rendering and hexdumping.
//!
//! Isolates the dissector's leaf-level text rendering from monitor-channel
//! demultiplexing overhead to enable precise measurement and optimization of
//! the formatting logic itself.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use hci_dissector::addr::BdAddr;
use hci_dissector::field;

const TEST_ADDR: BdAddr = BdAddr([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);

fn bench_address_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_address");
    group.throughput(Throughput::Elements(1));

    group.bench_function("address", |b| {
        b.iter(|| {
            let line = field::address(black_box(TEST_ADDR));
            black_box(line)
        })
    });

    group.finish();
}

fn bench_hexdump_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("hexdump");

    for size in [16usize, 64, 255] {
        let data = vec![0x5Au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("{size}_bytes"), |b| {
            b.iter(|| {
                let lines = field::hexdump(black_box(&data));
                black_box(lines)
            })
        });
    }

    group.finish();
}

fn bench_eir_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("eir");
    group.throughput(Throughput::Elements(1));

    // A short local-name AD structure padded to the 240-byte EIR block.
    let mut eir = [0u8; 240];
    eir[0] = 9; // length
    eir[1] = 0x09; // AD type: Complete Local Name
    eir[2..9].copy_from_slice(b"hci-test");

    group.bench_function("local_name", |b| {
        b.iter(|| {
            let lines = field::eir(black_box(&eir));
            black_box(lines)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_address_rendering, bench_hexdump_sizes, bench_eir_parsing);
criterion_main!(benches);
