use criterion::{criterion_group, criterion_main, Criterion};
use segtrie::path::{match_segments, normalize_for_storage};
use segtrie::Router;
use std::hint::black_box;

// pattern, path
fn routes() -> Vec<(&'static str, &'static str)> {
    vec![
        ("/", "/"),
        ("/cmd/:tool/:sub", "/cmd/test/3"),
        ("/cmd/whoami", "/cmd/whoami"),
        ("/src/:filepath*", "/src/some/file.png"),
        ("/search/", "/search/"),
        ("/search/:query", "/search/someth!ng+in+ünìcodé"),
        ("/user_:name", "/user_gopher"),
        ("/user/:name/about", "/user/gopher/about"),
        (r"/items/:id(\d+)", "/items/42"),
        (r"/items/:id(\d+)+.json", "/items/42.json"),
        ("/files/:dir/*", "/files/js/inc/framework.js"),
        ("/info/:user/project/:project", "/info/gordon/project/go"),
    ]
}

fn router() -> Router<usize> {
    let mut router = Router::new();
    for (i, (pattern, _)) in routes().into_iter().enumerate() {
        router.insert(pattern, i).unwrap();
    }
    router
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("insert", |b| b.iter(|| black_box(router())));
}

fn bench_at(c: &mut Criterion) {
    let router = router();
    let paths: Vec<&str> = routes().into_iter().map(|(_, path)| path).collect();

    c.bench_function("at", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(router.at(path));
            }
        })
    });

    c.bench_function("at_fixed_path", |b| {
        b.iter(|| black_box(router.at("/INFO//gordon/project/go/")))
    });

    c.bench_function("at_miss", |b| {
        b.iter(|| black_box(router.at("/nothing/here/at/all")))
    });
}

fn bench_normalize(c: &mut Criterion) {
    let long: String = (1..200).map(|i| format!("//{}", "a".repeat(i % 7 + 1))).collect();

    c.bench_function("normalize_for_storage", |b| {
        b.iter(|| black_box(normalize_for_storage(&long, true, true)))
    });

    c.bench_function("match_segments", |b| {
        b.iter(|| black_box(match_segments(&long, true, false)))
    });
}

criterion_group!(benches, bench_insert, bench_at, bench_normalize);
criterion_main!(benches);
