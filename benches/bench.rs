use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urlbuf::encoding::{decode, encode, table, validate};
use urlbuf::Url;

criterion_group!(benches, bench_enc, bench_dec, bench_validate, bench_parse, bench_setters);
criterion_main!(benches);

fn bench_enc(c: &mut Criterion) {
    c.bench_function("enc", |b| {
        b.iter(|| {
            let s = "te😃a 测1`~!@试#$%st^&+=";
            let _ = black_box(encode(black_box(s), table::QUERY));
        })
    });
}

fn bench_dec(c: &mut Criterion) {
    c.bench_function("dec", |b| {
        b.iter(|| {
            let s = "te%F0%9F%98%83a%20%E6%B5%8B1%60~!@%E8%AF%95%23$%25st%5E&+=";
            let _ = black_box(decode(black_box(s)));
        })
    });
}

fn bench_validate(c: &mut Criterion) {
    c.bench_function("validate", |b| {
        b.iter(|| {
            let s = "te%F0%9F%98%83a%20%E6%B5%8B1%60~!@%E8%AF%95%23$%25st%5E&+=";
            let _ = black_box(validate(black_box(s), table::QUERY));
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| {
            let s = "https://user@example.com/search?q=%E6%B5%8B%E8%AF%95#fragment";
            let _ = black_box(Url::parse(black_box(s)));
        })
    });
}

fn bench_setters(c: &mut Criterion) {
    c.bench_function("setters", |b| {
        b.iter(|| {
            let mut url = Url::parse("https://example.com/a/b?x=1").unwrap();
            url.set_encoded_host(black_box("example.org")).unwrap();
            url.set_encoded_path(black_box("/c/d/e")).unwrap();
            url.set_query(black_box("y=2"));
            black_box(url);
        })
    });
}
