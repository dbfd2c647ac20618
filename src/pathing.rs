use bit_set::BitSet;
use petgraph::graph::IndexType;
use std::collections::VecDeque;

use crate::maze::{GridCoordinate, Maze};
use crate::utils;
use crate::utils::FnvHashMap;

/// Search order for `find_path`.
///
/// On a perfect maze (a spanning tree) both orders find the same route, because
/// there is only one route between any two cells and it is therefore also the
/// shortest. Only `BreadthFirst` guarantees a shortest path if the maze has ever
/// been given a cycle by linking cells outside of the usual generators.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Traversal {
    BreadthFirst,
    DepthFirst,
}

/// The route from `start` to `end` over the carved passages, both endpoints
/// included. Each visited cell records the cell that discovered it and the route
/// is read back along those parent links from `end`.
///
/// Returns None when either coordinate is off the grid or `end` is unreachable,
/// which cannot happen on an intact maze. Querying a path never mutates the maze,
/// so repeated calls with the same arguments return the same route.
pub fn find_path<GridIndexType>(maze: &Maze<GridIndexType>,
                                start: GridCoordinate,
                                end: GridCoordinate,
                                order: Traversal)
                                -> Option<Vec<GridCoordinate>>
    where GridIndexType: IndexType
{
    let start_index = match maze.vertex_index(start) {
        Ok(index) => index,
        Err(_) => return None,
    };
    let end_index = match maze.vertex_index(end) {
        Ok(index) => index,
        Err(_) => return None,
    };
    if start_index == end_index {
        return Some(vec![start]);
    }

    let mut parents: FnvHashMap<usize, usize> = utils::fnv_hashmap(maze.size());
    let mut visited = BitSet::with_capacity(maze.size());
    visited.insert(start_index);

    // A deque serves both search orders: take from the front for a queue,
    // from the back for a stack.
    let mut pending = VecDeque::with_capacity(maze.size() / 2);
    pending.push_back(start_index);

    loop {
        let cell_index = match order {
            Traversal::BreadthFirst => pending.pop_front(),
            Traversal::DepthFirst => pending.pop_back(),
        };
        let cell_index = match cell_index {
            Some(index) => index,
            None => return None,
        };

        let cell = maze.vertex_coordinate(cell_index)
            .expect("search only visits cells on the grid");
        let links = maze.links(cell).expect("search only visits cells on the grid");
        for linked in &*links {
            let linked_index = maze.vertex_index(*linked)
                .expect("linked cells are always on the grid");
            if visited.insert(linked_index) {
                parents.insert(linked_index, cell_index);
                if linked_index == end_index {
                    return Some(read_back_path(maze, &parents, start_index, end_index));
                }
                pending.push_back(linked_index);
            }
        }
    }
}

fn read_back_path<GridIndexType>(maze: &Maze<GridIndexType>,
                                 parents: &FnvHashMap<usize, usize>,
                                 start_index: usize,
                                 end_index: usize)
                                 -> Vec<GridCoordinate>
    where GridIndexType: IndexType
{
    let mut path = vec![];
    let mut current = end_index;
    loop {
        path.push(maze.vertex_coordinate(current)
                      .expect("parent chain only holds cells on the grid"));
        if current == start_index {
            break;
        }
        current = parents[&current];
    }
    path.reverse();
    path
}

/// The set of vertex ids reachable from `start` over the carved passages.
/// Empty if `start` is off the grid.
pub fn connected_component<GridIndexType>(maze: &Maze<GridIndexType>,
                                          start: GridCoordinate)
                                          -> BitSet
    where GridIndexType: IndexType
{
    let mut component = BitSet::with_capacity(maze.size());
    let start_index = match maze.vertex_index(start) {
        Ok(index) => index,
        Err(_) => return component,
    };
    component.insert(start_index);

    let mut pending = vec![start_index];
    while let Some(cell_index) = pending.pop() {
        let cell = maze.vertex_coordinate(cell_index)
            .expect("traversal only visits cells on the grid");
        let links = maze.links(cell).expect("traversal only visits cells on the grid");
        for linked in &*links {
            let linked_index = maze.vertex_index(*linked)
                .expect("linked cells are always on the grid");
            if component.insert(linked_index) {
                pending.push(linked_index);
            }
        }
    }
    component
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators;
    use crate::maze::{GridCoordinate, MediumMaze, SmallMaze};
    use crate::units::{Height, Width};

    use itertools::Itertools;
    use rand::{SeedableRng, XorShiftRng};

    fn generated_maze(w: usize, h: usize) -> MediumMaze {
        let mut maze = MediumMaze::new(Width(w), Height(h)).unwrap();
        let mut rng = XorShiftRng::from_seed([99, 7213, 403, 85]);
        generators::frontier_growth(&mut maze, &mut rng);
        maze
    }

    fn assert_valid_path(maze: &MediumMaze,
                         path: &[GridCoordinate],
                         start: GridCoordinate,
                         end: GridCoordinate) {
        assert_eq!(*path.first().unwrap(), start);
        assert_eq!(*path.last().unwrap(), end);
        for (a, b) in path.iter().tuple_windows::<(_, _)>() {
            assert!(maze.is_linked(*a, *b), "path steps through a wall: {:?} -> {:?}", a, b);
        }
    }

    #[test]
    fn path_connects_opposite_corners() {
        let maze = generated_maze(9, 7);
        let start = GridCoordinate::new(0, 0);
        let end = GridCoordinate::new(8, 6);

        for &order in &[Traversal::BreadthFirst, Traversal::DepthFirst] {
            let path = find_path(&maze, start, end, order).expect("maze is connected");
            assert_valid_path(&maze, &path, start, end);
        }
    }

    #[test]
    fn both_search_orders_agree_on_a_tree() {
        // A perfect maze has exactly one route between any two cells, so the
        // search order cannot change the answer.
        let maze = generated_maze(8, 8);
        let start = GridCoordinate::new(2, 5);
        let end = GridCoordinate::new(7, 0);
        let bfs = find_path(&maze, start, end, Traversal::BreadthFirst).unwrap();
        let dfs = find_path(&maze, start, end, Traversal::DepthFirst).unwrap();
        assert_eq!(bfs, dfs);
    }

    #[test]
    fn find_path_is_idempotent() {
        let maze = generated_maze(6, 6);
        let start = GridCoordinate::new(0, 5);
        let end = GridCoordinate::new(5, 0);
        let first = find_path(&maze, start, end, Traversal::DepthFirst);
        let second = find_path(&maze, start, end, Traversal::DepthFirst);
        assert_eq!(first, second);
    }

    #[test]
    fn path_to_self_is_a_single_cell() {
        let maze = generated_maze(4, 4);
        let cell = GridCoordinate::new(2, 2);
        assert_eq!(find_path(&maze, cell, cell, Traversal::BreadthFirst),
                   Some(vec![cell]));
    }

    #[test]
    fn no_path_on_an_uncarved_grid() {
        // No links at all, so nothing is reachable.
        let maze = SmallMaze::new(Width(3), Height(3)).unwrap();
        let path = find_path(&maze,
                             GridCoordinate::new(0, 0),
                             GridCoordinate::new(2, 2),
                             Traversal::BreadthFirst);
        assert_eq!(path, None);
    }

    #[test]
    fn invalid_coordinates_find_no_path() {
        let maze = generated_maze(3, 3);
        let inside = GridCoordinate::new(0, 0);
        let outside = GridCoordinate::new(9, 9);
        assert_eq!(find_path(&maze, inside, outside, Traversal::BreadthFirst), None);
        assert_eq!(find_path(&maze, outside, inside, Traversal::DepthFirst), None);
    }

    #[test]
    fn component_covers_a_generated_maze() {
        let maze = generated_maze(5, 8);
        let component = connected_component(&maze, GridCoordinate::new(0, 0));
        assert_eq!(component.len(), maze.size());
    }

    #[test]
    fn component_splits_when_a_tree_edge_is_removed() {
        let mut maze = generated_maze(6, 6);
        let start = GridCoordinate::new(0, 0);
        let end = GridCoordinate::new(5, 5);
        let path = find_path(&maze, start, end, Traversal::DepthFirst).unwrap();

        maze.unlink(path[0], path[1]);
        let component = connected_component(&maze, start);
        let other = connected_component(&maze, end);
        assert!(component.len() < maze.size());
        assert_eq!(component.len() + other.len(), maze.size());
        let start_index = maze.vertex_index(start).unwrap();
        assert!(component.contains(start_index));
        assert!(!other.contains(start_index));
    }

    #[test]
    fn component_of_an_uncarved_grid_is_just_the_start() {
        let maze = SmallMaze::new(Width(3), Height(3)).unwrap();
        let component = connected_component(&maze, GridCoordinate::new(1, 1));
        assert_eq!(component.len(), 1);
    }
}
