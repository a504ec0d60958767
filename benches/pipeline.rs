//! Integration benchmark for the monitor-channel demultiplexing pipeline.
//!
//! Benchmarks the full application loop using the same patterns as the
//! integration tests in app.rs - with a fake [`MonitorSource`] feeding
//! records through [`run_with_io`].

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use hci_dissector::app::{Options, run_with_io};
use hci_dissector::output::PacketSink;
use hci_dissector::source::{MonitorSource, SourceError};
use hci_dissector::MonitorRecord;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Mutex;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

/// A Reset command, monitor-channel wrapped (opcode 2 = command packet).
fn reset_command_record() -> MonitorRecord {
    MonitorRecord { tv: None, index: 0, opcode: 2, data: vec![0x03, 0x0c, 0x00] }
}

/// A Command Complete event reporting Reset succeeded (opcode 3 = event packet).
fn reset_complete_record() -> MonitorRecord {
    MonitorRecord {
        tv: None,
        index: 0,
        opcode: 3,
        data: vec![0x0e, 0x01, 0x03, 0x0c, 0x00],
    }
}

fn acl_data_record() -> MonitorRecord {
    MonitorRecord { tv: None, index: 0, opcode: 4, data: vec![0x01, 0x00, 0x04, 0x00, 0xaa, 0xbb, 0xcc, 0xdd] }
}

struct FakeSource {
    records: Vec<MonitorRecord>,
}

impl FakeSource {
    fn new(records: Vec<MonitorRecord>) -> Self {
        Self { records }
    }
}

impl MonitorSource for FakeSource {
    fn open(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<mpsc::Receiver<MonitorRecord>, SourceError>> + Send + '_>>
    {
        let records = self.records.clone();
        Box::pin(async move {
            let (tx, rx) = mpsc::channel(records.len().max(1));
            tokio::spawn(async move {
                for r in records {
                    let _ = tx.send(r).await;
                }
            });
            Ok(rx)
        })
    }
}

struct DiscardSink;

impl PacketSink for DiscardSink {
    fn write_record(&self, lines: &[String]) -> std::io::Result<()> {
        black_box(lines);
        Ok(())
    }
}

struct CountingSink {
    lines: Mutex<usize>,
}

impl PacketSink for CountingSink {
    fn write_record(&self, lines: &[String]) -> std::io::Result<()> {
        *self.lines.lock().unwrap() += lines.len();
        Ok(())
    }
}

fn default_options() -> Options {
    Options {
        file: None::<PathBuf>,
        show_index: false,
        show_date: false,
        show_time: false,
        acl_data: false,
        sco_data: false,
        verbose: false,
    }
}

/// Benchmark the full pipeline: source -> demux -> dissect -> sink
fn bench_pipeline_single_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_single_record");
    let rt = Runtime::new().unwrap();

    group.throughput(Throughput::Elements(1));
    group.bench_function("command", |b| {
        b.iter(|| {
            let source = FakeSource::new(vec![reset_command_record()]);
            let sink = DiscardSink;
            let options = default_options();

            rt.block_on(async {
                run_with_io(options, &source, &sink).await.unwrap();
            });
        })
    });

    group.bench_function("command_complete", |b| {
        b.iter(|| {
            let source = FakeSource::new(vec![reset_complete_record()]);
            let sink = DiscardSink;
            let options = default_options();

            rt.block_on(async {
                run_with_io(options, &source, &sink).await.unwrap();
            });
        })
    });

    group.finish();
}

/// Benchmark batch throughput as the record count grows.
fn bench_pipeline_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_batch");
    let rt = Runtime::new().unwrap();

    for batch_size in [1, 10, 100] {
        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(batch_size), &batch_size, |b, &size| {
            let records: Vec<MonitorRecord> = (0..size)
                .map(|i| if i % 2 == 0 { reset_command_record() } else { reset_complete_record() })
                .collect();

            b.iter(|| {
                let source = FakeSource::new(records.clone());
                let sink = CountingSink { lines: Mutex::new(0) };
                let options = default_options();

                rt.block_on(async {
                    run_with_io(options, &source, &sink).await.unwrap();
                });

                black_box(sink.lines.into_inner().unwrap())
            })
        });
    }

    group.finish();
}

/// Benchmark a mixed stream of command, event, and data packets.
fn bench_pipeline_mixed_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_mixed_stream");
    let rt = Runtime::new().unwrap();

    let records = vec![reset_command_record(), reset_complete_record(), acl_data_record()];

    group.throughput(Throughput::Elements(records.len() as u64));
    group.bench_function("command_event_acl", |b| {
        b.iter(|| {
            let source = FakeSource::new(records.clone());
            let sink = DiscardSink;
            let options = default_options();

            rt.block_on(async {
                run_with_io(options, &source, &sink).await.unwrap();
            });
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_pipeline_single_record,
    bench_pipeline_batches,
    bench_pipeline_mixed_stream,
);
criterion_main!(benches);
