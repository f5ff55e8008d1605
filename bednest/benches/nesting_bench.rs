use std::f64::consts::TAU;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use bednest::entities::{Bin, Item};
use bednest::geometry::primitives::{Point, Rect, SPolygon};
use bednest::nesting::Nester;
use bednest::util::NestConfig;

criterion_main!(benches);
criterion_group!(benches, pack_bench);

const MM: i64 = 1_000_000;

/// Grid of hulls with 3 to 10 vertices and varying radii
fn generate_items(n_items: usize) -> Vec<Item> {
    (0..n_items)
        .map(|i| {
            let n_sides = 3 + i % 8;
            let radius = (5 + (i * 11) % 13) as f64 * MM as f64;
            let center = Point((i % 10) as i64 * 40 * MM, (i / 10) as i64 * 40 * MM);
            let points = (0..n_sides)
                .map(|k| {
                    let angle = TAU * k as f64 / n_sides as f64;
                    Point(
                        center.0 + (radius * angle.cos()) as i64,
                        center.1 + (radius * angle.sin()) as i64,
                    )
                })
                .collect();
            Item::new(i, SPolygon::new(points).unwrap())
        })
        .collect()
}

fn pack_bench(c: &mut Criterion) {
    let bin = Bin::new(Rect::try_new(0, 0, 250 * MM, 210 * MM).unwrap());
    let nester = Nester::new(bin, 2 * MM, NestConfig::default());

    let mut group = c.benchmark_group("pack");
    group.sample_size(10);
    for n_items in [10, 25, 50] {
        let items = generate_items(n_items);
        group.bench_with_input(BenchmarkId::from_parameter(n_items), &items, |b, items| {
            b.iter(|| black_box(nester.pack(items.clone()).unwrap()))
        });
    }
    group.finish();
}
