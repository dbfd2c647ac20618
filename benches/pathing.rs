use criterion::{criterion_group, criterion_main, Criterion};
use rand::{SeedableRng, XorShiftRng};
use shiftmaze::{
    generators,
    maze::{GridCoordinate, MediumMaze},
    pathing::{self, Traversal},
    units::{Height, Width},
};

fn generated_maze(side: usize) -> MediumMaze {
    let mut maze = MediumMaze::new(Width(side), Height(side)).unwrap();
    let mut rng = XorShiftRng::from_seed([23, 29, 31, 37]);
    generators::frontier_growth(&mut maze, &mut rng);
    maze
}

fn bench_find_path_bfs_64(c: &mut Criterion) {
    let maze = generated_maze(64);
    c.bench_function("find_path_bfs_64_u16", move |b| {
        b.iter(|| {
            pathing::find_path(&maze,
                               GridCoordinate::new(0, 0),
                               GridCoordinate::new(63, 63),
                               Traversal::BreadthFirst)
        })
    });
}

fn bench_find_path_dfs_64(c: &mut Criterion) {
    let maze = generated_maze(64);
    c.bench_function("find_path_dfs_64_u16", move |b| {
        b.iter(|| {
            pathing::find_path(&maze,
                               GridCoordinate::new(0, 0),
                               GridCoordinate::new(63, 63),
                               Traversal::DepthFirst)
        })
    });
}

fn bench_connected_component_64(c: &mut Criterion) {
    let maze = generated_maze(64);
    c.bench_function("connected_component_64_u16", move |b| {
        b.iter(|| pathing::connected_component(&maze, GridCoordinate::new(0, 0)))
    });
}

criterion_group!(benches,
                 bench_find_path_bfs_64,
                 bench_find_path_dfs_64,
                 bench_connected_component_64);
criterion_main!(benches);
