use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridquery_sheet::{resolve_cell, resolve_range, Book, CellValue, QueryEngine, Sheet};

/// Square sheet of `size` x `size` integers numbered row by row from 0.
fn square_engine(size: usize) -> QueryEngine {
    let data: Vec<Vec<CellValue>> = (0..size)
        .map(|row| {
            (0..size)
                .map(|col| CellValue::Int((row * size + col) as i64))
                .collect()
        })
        .collect();
    QueryEngine::new(Book::from_sheets([("Data", Sheet::from_data(data))]).unwrap())
}

fn bench_resolve_references(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    group.bench_function("cell", |b| b.iter(|| resolve_cell(black_box("B3"))));

    group.bench_function("wide_cell", |b| {
        b.iter(|| resolve_cell(black_box("XFD1048576")))
    });

    group.bench_function("range", |b| {
        b.iter(|| resolve_range(black_box("A1:AZ500")))
    });

    group.finish();
}

fn bench_find_by_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_by_value");

    for size in [10, 100, 500].iter() {
        let engine = square_engine(*size);
        let last = CellValue::Int((size * size - 1) as i64);

        group.bench_with_input(BenchmarkId::new("last_cell", size), size, |b, _| {
            b.iter(|| engine.find_by_value(black_box("Data"), black_box(&last)))
        });
    }

    group.finish();
}

fn bench_ranges(c: &mut Criterion) {
    let mut group = c.benchmark_group("range");
    let engine = square_engine(500);

    for size in [10, 100, 500].iter() {
        group.bench_with_input(BenchmarkId::new("sized", size), size, |b, &size| {
            b.iter(|| engine.get_range_sized(black_box("Data"), (0, 0), (size, size)))
        });
    }

    group.bench_function("by_reference", |b| {
        b.iter(|| engine.get_range_by_reference(black_box("Data"), black_box("B2:K101")))
    });

    group.bench_function("columns_from_row", |b| {
        b.iter(|| engine.get_columns_from_row(black_box("Data"), &["A", "M", "Z"], 2))
    });

    group.finish();
}

criterion_group!(benches, bench_resolve_references, bench_find_by_value, bench_ranges);
criterion_main!(benches);
