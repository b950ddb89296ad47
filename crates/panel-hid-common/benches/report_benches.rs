use criterion::{Criterion, criterion_group, criterion_main};
use panel_hid_common::{ReportBuilder, ReportParser};

fn benchmark_report_parser(c: &mut Criterion) {
    let mut report = [0u8; 25];
    for (i, byte) in report.iter_mut().enumerate() {
        *byte = i as u8;
    }

    c.bench_function("ReportParser sweep u8", |b| {
        b.iter(|| {
            let mut parser = ReportParser::new(std::hint::black_box(&report));
            while let Ok(v) = parser.read_u8() {
                std::hint::black_box(v);
            }
        });
    });

    c.bench_function("ReportParser u16_le_at sensors", |b| {
        b.iter(|| {
            let data = std::hint::black_box(&report);
            std::hint::black_box((
                ReportParser::u16_le_at(data, 17),
                ReportParser::u16_le_at(data, 19),
            ));
        });
    });
}

fn benchmark_report_builder(c: &mut Criterion) {
    c.bench_function("ReportBuilder 64-byte command", |b| {
        b.iter(|| {
            let mut builder = ReportBuilder::with_capacity(64);
            builder
                .write_u16_be(std::hint::black_box(0x60BB))
                .write_u8(0x00)
                .write_u8(std::hint::black_box(0x80))
                .pad_to(64);
            std::hint::black_box(builder.into_inner());
        });
    });
}

criterion_group!(benches, benchmark_report_parser, benchmark_report_builder);
criterion_main!(benches);
