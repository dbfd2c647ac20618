use itertools::Itertools;
use petgraph::graph::IndexType;
use rand::Rng;

use crate::maze::{GridCoordinate, Maze};
use crate::pathing;
use crate::pathing::Traversal;

/// Reroute the maze solution while keeping the maze a spanning tree.
///
/// One passage on the current route from the top left to the bottom right corner
/// is chosen uniformly at random and walled back up. Removing a tree edge always
/// splits the tree into exactly two components, so the grid border between the
/// component holding the top left corner and the rest is never empty and a new
/// passage is carved through a uniformly random border pair. The cell count,
/// passage count and full connectivity are unchanged; only the route moves.
///
/// Does nothing on a single-cell maze. Panics if the maze is not connected, which
/// means the adjacency structure was corrupted outside this module.
pub fn flip<GridIndexType, R>(maze: &mut Maze<GridIndexType>, rng: &mut R)
    where GridIndexType: IndexType,
          R: Rng
{
    if maze.size() < 2 {
        return;
    }
    let origin = GridCoordinate::new(0, 0);
    let goal = GridCoordinate::new(maze.width().0 as u32 - 1, maze.height().0 as u32 - 1);

    let route = pathing::find_path(maze, origin, goal, Traversal::DepthFirst)
        .expect("a spanning tree connects the origin to the goal");
    let route_edges: Vec<(GridCoordinate, GridCoordinate)> =
        route.iter().cloned().tuple_windows().collect();
    let &(a, b) = rng.choose(&route_edges)
        .expect("a route between two distinct cells has at least one edge");
    maze.unlink(a, b);

    let component = pathing::connected_component(maze, origin);

    // Every grid-adjacent pair straddling the split is a reconnection candidate,
    // including the passage just removed.
    let mut border: Vec<(GridCoordinate, GridCoordinate)> = vec![];
    for cell in maze.iter() {
        let cell_index = maze.vertex_index(cell).expect("iterated cells are on the grid");
        if !component.contains(cell_index) {
            continue;
        }
        for &neighbour in &*maze.neighbours(cell) {
            let neighbour_index = maze.vertex_index(neighbour)
                .expect("grid neighbours are on the grid");
            if !component.contains(neighbour_index) {
                border.push((cell, neighbour));
            }
        }
    }

    let &(u, w) = rng.choose(&border)
        .expect("splitting a spanning tree always leaves a joinable border");
    maze.link(u, w).expect("border pairs join adjacent cells");
}

/// Apply `count` solution flips in sequence.
pub fn scramble<GridIndexType, R>(maze: &mut Maze<GridIndexType>, count: usize, rng: &mut R)
    where GridIndexType: IndexType,
          R: Rng
{
    for _ in 0..count {
        flip(maze, rng);
    }
}
