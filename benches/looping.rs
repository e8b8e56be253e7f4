use audio_loops::{
    AudioFormat, LoopingByteReader, LoopingSampleReader, MemoryByteBuffer, MemorySampleBuffer,
};
use criterion::{Criterion, criterion_group, criterion_main};

pub fn bench_sample_domain(c: &mut Criterion, loop_frames: usize, count: usize) {
    let source = MemorySampleBuffer::new(vec![0.0; 1 << 16], 48_000, 2);
    let reader = LoopingSampleReader::new(source, false);
    reader.set_loop_from_frames(16, 16 + loop_frames - 1);

    let mut out = vec![0.0; count];
    c.bench_function(&format!("looped samples {loop_frames}fr loop {count}"), |b| {
        b.iter(|| reader.read(&mut out).unwrap())
    });

    let source = MemorySampleBuffer::new(vec![0.0; 1 << 16], 48_000, 2);
    let reader = LoopingSampleReader::new(source, false);
    reader.set_looping_enabled(false);

    c.bench_function(&format!("pass-through samples {count}"), |b| {
        b.iter(|| {
            reader.set_position(0);
            reader.read(&mut out).unwrap()
        })
    });
}

pub fn bench_byte_domain(c: &mut Criterion, loop_frames: usize, count: usize) {
    let format = AudioFormat::pcm(48_000, 2, 16);
    let source = MemoryByteBuffer::from_data(format, vec![0; 1 << 18]);
    let reader = LoopingByteReader::new(source, false);
    reader.set_loop_from_frames(16, 16 + loop_frames - 1);

    let mut out = vec![0; count];
    c.bench_function(&format!("looped bytes {loop_frames}fr loop {count}"), |b| {
        b.iter(|| reader.read(&mut out).unwrap())
    });
}

pub fn looped_reads(c: &mut Criterion) {
    bench_sample_domain(c, 64, 512);
    bench_sample_domain(c, 1024, 512);

    bench_byte_domain(c, 64, 2048);
    bench_byte_domain(c, 1024, 2048);
}

criterion_group!(benches, looped_reads);
criterion_main!(benches);
