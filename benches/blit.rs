use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fbstream::blit::blit;
use fbstream::scale::NearestScaler;
use fbstream::traits::FrameScaler;
use fbstream::{Frame, PixelFormat, ScreenGeometry};

/// Webcam-sized frame with a gradient so conversion is not trivially uniform
fn gradient_frame(width: u32, height: u32) -> Frame {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]);
        }
    }
    Frame::new(width, height, pixels).unwrap()
}

fn bench_convert(c: &mut Criterion) {
    let frame = gradient_frame(1920, 1080);
    let mut out = Vec::new();

    let mut group = c.benchmark_group("convert_1080p");
    for format in [PixelFormat::Rgb565, PixelFormat::Bgra8888] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{format:?}")), &format, |b, format| {
            b.iter(|| format.convert(black_box(frame.pixels()), &mut out))
        });
    }
    group.finish();
}

fn bench_scale(c: &mut Criterion) {
    let frame = gradient_frame(640, 480);
    c.bench_function("scale_640x480_to_1080p", |b| {
        b.iter(|| NearestScaler.scale(black_box(&frame), 1920, 1080).pixels().len())
    });
}

fn bench_blit(c: &mut Criterion) {
    let cases = [
        ("tight", ScreenGeometry::new(1920, 1080, 32, 7680)),
        ("padded", ScreenGeometry::new(1912, 1080, 32, 7680)),
    ];

    let mut group = c.benchmark_group("blit");
    for (name, geometry) in cases {
        let converted = vec![0x5Au8; geometry.tight_row_bytes() * geometry.height as usize];
        let mut buffer = vec![0u8; geometry.buffer_len()];
        group.bench_function(name, |b| {
            b.iter(|| blit(&mut buffer, &geometry, black_box(&converted)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_convert, bench_scale, bench_blit);
criterion_main!(benches);
