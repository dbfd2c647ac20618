use bit_set::BitSet;
use petgraph::graph::IndexType;
use rand::Rng;

use crate::maze::{GridCoordinate, Maze};
use crate::reshape;

/// Grow a spanning tree over the whole grid by randomized frontier expansion.
///
/// Starting from the top left cell, keep a list of candidate passages `(u, v)` where
/// `u` is already part of the tree and `v` is not. Each round carves one candidate
/// chosen uniformly at random, drops the candidates made stale by `v` joining the
/// tree and adds fresh candidates leading out of `v`. Every round adds exactly one
/// cell and one passage, so the loop runs `width * height - 1` times and the result
/// is a perfect maze: exactly one route between any two cells.
///
/// The caller provides the random source, so a seeded generator reproduces the
/// same maze.
pub fn frontier_growth<GridIndexType, R>(maze: &mut Maze<GridIndexType>, rng: &mut R)
    where GridIndexType: IndexType,
          R: Rng
{
    let cells_count = maze.size();
    let origin = GridCoordinate::new(0, 0);
    let origin_index = maze.vertex_index(origin).expect("the origin cell is always on the grid");

    let mut visited = BitSet::with_capacity(cells_count);
    visited.insert(origin_index);

    let mut frontier: Vec<(GridCoordinate, GridCoordinate)> =
        maze.neighbours(origin).iter().map(|&n| (origin, n)).collect();

    while visited.len() < cells_count {

        let pick = rng.gen::<usize>() % frontier.len();
        let (u, v) = frontier[pick];

        let v_index = maze.vertex_index(v).expect("frontier cells are always on the grid");
        visited.insert(v_index);
        maze.link(u, v).expect("frontier entries join adjacent cells");

        // Other candidates reaching v are stale now that v is inside the tree.
        // A linear filter, fine at the grid sizes we deal in.
        frontier.retain(|&(_, unvisited)| unvisited != v);

        for &w in &*maze.neighbours(v) {
            let w_index = maze.vertex_index(w).expect("grid neighbours are always on the grid");
            if !visited.contains(w_index) {
                frontier.push((v, w));
            }
        }
    }
}

/// Generate a maze with `frontier_growth` and then reroute the solution with
/// `max(width, height)` edge flips, which tends to make the route from the top
/// left to the bottom right corner less direct. The maze stays a spanning tree
/// throughout.
pub fn tangle<GridIndexType, R>(maze: &mut Maze<GridIndexType>, rng: &mut R)
    where GridIndexType: IndexType,
          R: Rng
{
    frontier_growth(maze, rng);
    let flips = ::std::cmp::max(maze.width().0, maze.height().0);
    reshape::scramble(maze, flips, rng);
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::maze::{GridCoordinate, MediumMaze, SmallMaze};
    use crate::pathing;
    use crate::units::{Height, Width};

    use quickcheck::{quickcheck, TestResult};
    use rand::{SeedableRng, XorShiftRng};

    fn rng() -> XorShiftRng {
        XorShiftRng::from_seed([483, 101, 18893, 7])
    }

    fn is_spanning_tree(maze: &MediumMaze) -> bool {
        let component = pathing::connected_component(maze, GridCoordinate::new(0, 0));
        maze.links_count() == maze.size() - 1 && component.len() == maze.size()
    }

    #[test]
    fn two_by_two_maze() {
        let mut maze = SmallMaze::new(Width(2), Height(2)).unwrap();
        frontier_growth(&mut maze, &mut rng());

        assert_eq!(maze.links_count(), 3);
        let component = pathing::connected_component(&maze, GridCoordinate::new(0, 0));
        assert_eq!(component.len(), 4);
    }

    #[test]
    fn single_cell_maze() {
        let mut maze = SmallMaze::new(Width(1), Height(1)).unwrap();
        frontier_growth(&mut maze, &mut rng());
        assert_eq!(maze.links_count(), 0);
    }

    #[test]
    fn line_mazes() {
        for &(w, h) in &[(1, 9), (9, 1)] {
            let mut maze = MediumMaze::new(Width(w), Height(h)).unwrap();
            frontier_growth(&mut maze, &mut rng());
            assert!(is_spanning_tree(&maze));
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let mut a = MediumMaze::new(Width(8), Height(6)).unwrap();
        let mut b = MediumMaze::new(Width(8), Height(6)).unwrap();
        frontier_growth(&mut a, &mut rng());
        frontier_growth(&mut b, &mut rng());
        assert_eq!(a.iter_links().collect::<Vec<_>>(),
                   b.iter_links().collect::<Vec<_>>());
    }

    #[test]
    fn tangled_maze_is_still_a_spanning_tree() {
        let mut maze = MediumMaze::new(Width(12), Height(7)).unwrap();
        tangle(&mut maze, &mut rng());
        assert!(is_spanning_tree(&maze));
    }

    #[test]
    fn quickcheck_generates_spanning_trees() {
        fn prop(w: u8, h: u8) -> TestResult {
            let (w, h) = (usize::from(w % 12), usize::from(h % 12));
            if w == 0 || h == 0 {
                return TestResult::discard();
            }
            let mut maze = MediumMaze::new(Width(w), Height(h)).unwrap();
            frontier_growth(&mut maze, &mut rng());
            TestResult::from_bool(is_spanning_tree(&maze))
        }
        quickcheck(prop as fn(u8, u8) -> TestResult);
    }
}
