use criterion::{criterion_group, criterion_main, Criterion};
use rand::{SeedableRng, XorShiftRng};
use shiftmaze::{
    generators,
    maze::MediumMaze,
    units::{Height, Width},
};

fn bench_frontier_growth_32(c: &mut Criterion) {
    c.bench_function("frontier_growth_32_u16", |b| {
        let mut rng = XorShiftRng::from_seed([7, 11, 13, 17]);
        b.iter(|| {
            let mut maze = MediumMaze::new(Width(32), Height(32)).unwrap();
            generators::frontier_growth(&mut maze, &mut rng);
            maze
        })
    });
}

fn bench_tangle_32(c: &mut Criterion) {
    c.bench_function("tangle_32_u16", |b| {
        let mut rng = XorShiftRng::from_seed([7, 11, 13, 17]);
        b.iter(|| {
            let mut maze = MediumMaze::new(Width(32), Height(32)).unwrap();
            generators::tangle(&mut maze, &mut rng);
            maze
        })
    });
}

criterion_group!(benches, bench_frontier_growth_32, bench_tangle_32);
criterion_main!(benches);
