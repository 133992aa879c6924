use mpfloat::BigFloat;

fn test_parse() {
    let text = "3.14159265358979323846264338327950288419716939937510582097494459";
    black_box(BigFloat::parse(black_box(text)).ok());
}

fn test_format() {
    let a = BigFloat::sqrt_u32_with_prec(3, 4000);
    black_box(a.to_string());
}

fn test_sqrt() {
    black_box(BigFloat::sqrt_u32_with_prec(2, 10000));
}

fn test_pow() {
    let a = BigFloat::from(1.0000001);
    black_box(BigFloat::pow_with_prec(&a, 11000, 2000));
}

fn test_div() {
    let a = BigFloat::sqrt_u32_with_prec(5, 8000);
    let b = BigFloat::sqrt_u32_with_prec(7, 8000);
    black_box(BigFloat::div_with_prec(&a, &b, 8000));
}

fn test_mixed_arithmetic() {
    let mut acc = BigFloat::new(512);
    for i in 1..100u32 {
        acc += BigFloat::sqrt_u32_with_prec(i, 512);
        acc *= 3u32;
        acc /= i;
    }
    black_box(acc);
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("test_parse", |b| b.iter(test_parse));
    c.bench_function("test_format", |b| b.iter(test_format));
    c.bench_function("test_sqrt", |b| b.iter(test_sqrt));
    c.bench_function("test_pow", |b| b.iter(test_pow));
    c.bench_function("test_div", |b| b.iter(test_div));
    c.bench_function("test_mixed_arithmetic", |b| {
        b.iter(test_mixed_arithmetic)
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
