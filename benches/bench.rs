use criterion::{black_box, criterion_group, criterion_main, Criterion};
use url_merge::{
    pct_enc::{table::*, *},
    *,
};

criterion_group!(
    benches,
    bench_enc,
    bench_dec,
    bench_merge_path,
    bench_merge_query,
    bench_merge_args,
);
criterion_main!(benches);

const ENC_CASE: &str = "te😃a 测1`~!@试#$%st^&+=";

fn bench_enc(c: &mut Criterion) {
    c.bench_function("enc", |b| b.iter(|| encode(black_box(ENC_CASE), COMPONENT)));
}

const DEC_CASE: &str = "te%F0%9F%98%83a%20%E6%B5%8B1%60~!%40%E8%AF%95%23%24%25st%5E%26%2B%3D";

fn bench_dec(c: &mut Criterion) {
    c.bench_function("dec", |b| b.iter(|| decode(black_box(DEC_CASE))));
}

const PATH_CASE: [&str; 5] = ["https://example.com//", "/api/", "v2", "users//", "42/"];

fn bench_merge_path(c: &mut Criterion) {
    let options = Options::new().trailing_slash(Slash::Keep);
    c.bench_function("merge_path", |b| {
        b.iter(|| merge(black_box(PATH_CASE), &options))
    });
}

const QUERY_CASE: [&str; 3] = [
    "https://example.com/search",
    "results",
    "?q=%E6%B5%8B%E8%AF%95&page=1&tag=a&tag=b&flag",
];

fn bench_merge_query(c: &mut Criterion) {
    let options = Options::new()
        .query("page", 2)
        .query("tag", ["x", "y", "z"])
        .query("lang", "en US");
    c.bench_function("merge_query", |b| {
        b.iter(|| merge(black_box(QUERY_CASE), &options))
    });
}

fn bench_merge_args(c: &mut Criterion) {
    c.bench_function("merge_args", |b| {
        b.iter(|| {
            url_merge!(
                black_box("/users"),
                black_box(42),
                None::<&str>,
                black_box(1.5),
                Options::new().leading_slash(false)
            )
        })
    });
}
