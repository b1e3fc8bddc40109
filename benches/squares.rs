use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kurbo::BezPath;

use curveops::{binary_op, resolve, AreaOp, FillRule};

/// An n-by-n checkerboard of unit squares with corner offset `(dx, dy)`.
fn square_grid(n: usize, dx: f64, dy: f64) -> BezPath {
    let mut path = BezPath::new();
    for row in 0..n {
        for col in 0..n {
            if (row + col) % 2 != 0 {
                continue;
            }
            let x = 2.0 * col as f64 + dx;
            let y = 2.0 * row as f64 + dy;
            path.move_to((x, y));
            path.line_to((x + 1.5, y));
            path.line_to((x + 1.5, y + 1.5));
            path.line_to((x, y + 1.5));
            path.close_path();
        }
    }
    path
}

fn resolve_grid(c: &mut Criterion) {
    let grid = square_grid(10, 0.0, 0.0);
    c.bench_function("resolve grid", |b| {
        b.iter(|| black_box(resolve(&grid, FillRule::NonZero).unwrap()))
    });
}

fn union_grids(c: &mut Criterion) {
    let a = square_grid(10, 0.0, 0.0);
    let b_ = square_grid(10, 0.75, 0.75);
    c.bench_function("union grids", |b| {
        b.iter(|| black_box(binary_op(&a, &b_, FillRule::NonZero, AreaOp::Add).unwrap()))
    });
}

fn xor_grids(c: &mut Criterion) {
    let a = square_grid(10, 0.0, 0.0);
    let b_ = square_grid(10, 0.75, 0.75);
    c.bench_function("xor grids", |b| {
        b.iter(|| black_box(binary_op(&a, &b_, FillRule::NonZero, AreaOp::Xor).unwrap()))
    });
}

criterion_group!(benches, resolve_grid, union_grids, xor_grids);
criterion_main!(benches);
