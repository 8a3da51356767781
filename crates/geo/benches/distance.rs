//! Benchmarks for distance calculation and proximity filtering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pulperia_geo::{
    filter_by_distance, haversine_km, search, EndpointPolicy, GeoPoint, InclusionMode, Listing,
    PageRequest, Radius, SearchQuery,
};
use serde_json::json;

const CENTER: GeoPoint = GeoPoint::new(14.0818, -87.2068);

fn create_listings(count: usize) -> Vec<Listing> {
    (0..count)
        .map(|i| {
            // Grid around Tegucigalpa; every tenth listing only has a store location
            let lat = 13.9 + (i as f64 * 0.001) % 0.4;
            let lng = -87.4 + (i as f64 * 0.0007) % 0.4;
            let value = if i % 10 == 0 {
                json!({"id": i, "pulperia": {"latitude": lat, "longitude": lng}})
            } else {
                json!({"id": i, "latitude": lat, "longitude": lng})
            };
            serde_json::from_value(value).expect("valid listing")
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let sps = GeoPoint::new(15.5042, -88.0250);

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_km(black_box(&CENTER), black_box(&sps)))
    });
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by_distance");
    let radius = Radius::km(5.0).expect("valid radius");

    for size in [10, 100, 1000, 10000].iter() {
        let listings = create_listings(*size);

        group.bench_with_input(BenchmarkId::new("strict", size), size, |b, _| {
            b.iter(|| {
                filter_by_distance(
                    black_box(&listings),
                    black_box(CENTER),
                    radius,
                    InclusionMode::Strict,
                )
            })
        });
    }

    group.finish();
}

fn bench_search_page(c: &mut Criterion) {
    let listings = create_listings(10000);
    let policy = EndpointPolicy::default();
    let query = SearchQuery {
        center: Some(CENTER),
        radius: Radius::km(10.0).expect("valid radius"),
        page: PageRequest::new(20, 40),
    };

    c.bench_function("search_page_10000", |b| {
        b.iter(|| search(black_box(&listings), black_box(&query), &policy).len())
    });
}

criterion_group!(benches, bench_single_distance, bench_filter, bench_search_page);
criterion_main!(benches);
