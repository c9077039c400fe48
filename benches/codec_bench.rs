//! Benchmarks for the TLV codec

use std::cell::RefCell;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vbxlink::settings::{DeviceConfig, RecordingPlan, Schedule};
use vbxlink::tlv::{DecodeKind, TlvReader, TlvValue, TlvWriter};

fn full_config() -> DeviceConfig {
    let mut config = DeviceConfig::default();
    config.hotspot.enabled = true;

    let entries = (0..8)
        .map(|i| RecordingPlan {
            start_timestamp: 1_700_000_000 + i * 86_400,
            duration: 1800,
        })
        .collect();
    config.recording.schedule = Schedule::new(entries).unwrap();

    config
}

fn codec_benchmarks(c: &mut Criterion) {
    let config = full_config();
    let image = config.to_tlv().unwrap();

    c.bench_function("encode_config_image", |b| {
        b.iter(|| black_box(&config).to_tlv().unwrap())
    });

    c.bench_function("decode_config_image", |b| {
        b.iter(|| DeviceConfig::from_tlv(black_box(&image)).unwrap())
    });

    // Raw scan over a dense numeric message
    let mut writer = TlvWriter::new();
    writer.write_magic();
    for type_code in 0..32u8 {
        writer.write_u32(type_code, u32::from(type_code) * 7).unwrap();
    }
    let dense = writer.finalize();

    c.bench_function("scan_dense_message", |b| {
        b.iter(|| {
            let sum = RefCell::new(0u64);

            {
                let mut reader = TlvReader::new(black_box(&dense)).unwrap();
                for type_code in 0..32u8 {
                    reader.register(type_code, DecodeKind::Numeric, |_, value| {
                        if let TlvValue::Numeric(v) = value {
                            *sum.borrow_mut() += v;
                        }
                    });
                }
                reader.read_all().unwrap();
            }

            sum.into_inner()
        })
    });
}

criterion_group!(benches, codec_benchmarks);
criterion_main!(benches);
