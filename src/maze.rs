use petgraph::graph;
pub use petgraph::graph::IndexType;
use petgraph::visit::EdgeRef;
use petgraph::{Graph, Undirected};
use smallvec::SmallVec;
use std::error;
use std::fmt;

use crate::units::{Height, Width};

/// A cell position on the grid. Valid when `x < width` and `y < height`, with
/// `(0, 0)` the top left corner.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}
impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }
}
impl From<(u32, u32)> for GridCoordinate {
    fn from(x_y_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// Map a unit cell offset to a direction, e.g. `(0, -1)` is `North`.
    /// Returns None for diagonal, zero or larger offsets.
    pub fn from_offset(dx: i32, dy: i32) -> Option<CompassPrimary> {
        match (dx, dy) {
            (0, -1) => Some(CompassPrimary::North),
            (0, 1) => Some(CompassPrimary::South),
            (1, 0) => Some(CompassPrimary::East),
            (-1, 0) => Some(CompassPrimary::West),
            _ => None,
        }
    }
}

/// The coordinate one cell away in the given direction, ignoring any grid bounds.
/// Returns None if the coordinate is not representable (x or y would go below zero).
pub fn offset_coordinate(coord: GridCoordinate, dir: CompassPrimary) -> Option<GridCoordinate> {
    let (x, y) = (coord.x, coord.y);
    match dir {
        CompassPrimary::North => {
            if y > 0 {
                Some(GridCoordinate { x, y: y - 1 })
            } else {
                None
            }
        }
        CompassPrimary::South => Some(GridCoordinate { x, y: y + 1 }),
        CompassPrimary::East => Some(GridCoordinate { x: x + 1, y }),
        CompassPrimary::West => {
            if x > 0 {
                Some(GridCoordinate { x: x - 1, y })
            } else {
                None
            }
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MazeError {
    /// Width or height is zero, or the cell count overflows the grid index type.
    InvalidDimensions(Width, Height),
    CoordinateOutOfRange(GridCoordinate),
    VertexOutOfRange(usize),
    SelfLink,
    /// Linking two cells that are not grid neighbours would break the grid structure.
    NotNeighbours(GridCoordinate, GridCoordinate),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MazeError::InvalidDimensions(Width(w), Height(h)) => {
                write!(f, "invalid maze dimensions {}x{}: both must be positive and the cell count must fit the grid index type", w, h)
            }
            MazeError::CoordinateOutOfRange(coord) => {
                write!(f, "grid coordinate ({}, {}) is outside the maze", coord.x, coord.y)
            }
            MazeError::VertexOutOfRange(index) => {
                write!(f, "vertex index {} is outside the maze", index)
            }
            MazeError::SelfLink => write!(f, "cannot link a cell to itself"),
            MazeError::NotNeighbours(a, b) => {
                write!(f,
                       "cells ({}, {}) and ({}, {}) are not grid neighbours",
                       a.x, a.y, b.x, b.y)
            }
        }
    }
}
impl error::Error for MazeError {}

pub type Result<T> = ::std::result::Result<T, MazeError>;

/// A rectangular maze: one graph node per grid cell, one undirected edge per carved
/// passage. Right after generation the graph is a spanning tree of the grid.
///
/// Cells are indexed bijectively by `vertex_index`, with `id = height * x + y`,
/// so vertex ids run down each column before moving one column east.
#[derive(Debug)]
pub struct Maze<GridIndexType: IndexType = u32> {
    graph: Graph<(), (), Undirected, GridIndexType>,
    width: Width,
    height: Height,
}

pub type SmallMaze = Maze<u8>;
pub type MediumMaze = Maze<u16>;
pub type LargeMaze = Maze<u32>;

impl<GridIndexType: IndexType> Maze<GridIndexType> {
    pub fn new(width: Width, height: Height) -> Result<Maze<GridIndexType>> {
        let (Width(w), Height(h)) = (width, height);

        let cells_count = match w.checked_mul(h) {
            Some(count) if w > 0 && h > 0 &&
                           count <= <GridIndexType as IndexType>::max().index() => count,
            _ => return Err(MazeError::InvalidDimensions(width, height)),
        };

        // A grid graph has fewer than 2 * cells edges, but a spanning tree needs only
        // cells - 1 so the edge capacity is never exceeded in practice.
        let mut maze = Maze {
            graph: Graph::with_capacity(cells_count, cells_count),
            width,
            height,
        };
        for _ in 0..cells_count {
            let _ = maze.graph.add_node(());
        }

        Ok(maze)
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width.0 * self.height.0
    }

    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The linear vertex id of a grid coordinate: `height * x + y`.
    pub fn vertex_index(&self, coord: GridCoordinate) -> Result<usize> {
        if self.is_valid_coordinate(coord) {
            Ok(self.height.0 * coord.x as usize + coord.y as usize)
        } else {
            Err(MazeError::CoordinateOutOfRange(coord))
        }
    }

    /// The grid coordinate of a linear vertex id, inverse of `vertex_index`.
    pub fn vertex_coordinate(&self, index: usize) -> Result<GridCoordinate> {
        if index < self.size() {
            let Height(h) = self.height;
            Ok(GridCoordinate::new((index / h) as u32, (index % h) as u32))
        } else {
            Err(MazeError::VertexOutOfRange(index))
        }
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Carve a passage between two grid-neighbouring cells.
    pub fn link(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<()> {
        if a == b {
            return Err(MazeError::SelfLink);
        }
        if !self.is_neighbour(a, b) {
            return Err(MazeError::NotNeighbours(a, b));
        }
        let a_index = self.graph_index(a).ok_or(MazeError::CoordinateOutOfRange(a))?;
        let b_index = self.graph_index(b).ok_or(MazeError::CoordinateOutOfRange(b))?;
        let _ = self.graph.update_edge(a_index, b_index, ());
        Ok(())
    }

    /// Remove the passage between two cells, if the coordinates are valid and a
    /// passage exists between them. Returns true if an unlink occurred.
    pub fn unlink(&mut self, a: GridCoordinate, b: GridCoordinate) -> bool {
        if let (Some(a_index), Some(b_index)) = (self.graph_index(a), self.graph_index(b)) {
            if let Some(edge_index) = self.graph.find_edge(a_index, b_index) {
                // This invalidates the last edge index in the graph, which is fine as
                // we are not storing edge indices anywhere.
                self.graph.remove_edge(edge_index);
                return true;
            }
        }
        false
    }

    /// Are two cells connected by a passage?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        if let (Some(a_index), Some(b_index)) = (self.graph_index(a), self.graph_index(b)) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    /// Cells connected to `coord` by a passage, ordered by the carve order of the
    /// passages. Removing a passage renumbers the most recently carved one into
    /// the freed slot, which can perturb that order (see `unlink`).
    pub fn links(&self, coord: GridCoordinate) -> Result<CoordinateSmallVec> {
        let graph_node_index =
            self.graph_index(coord).ok_or(MazeError::CoordinateOutOfRange(coord))?;
        // petgraph walks a node's outgoing edge chain then its incoming edge chain,
        // each most recent first, so the adjacency is reordered by edge index.
        let mut linked: SmallVec<[(usize, GridCoordinate); 4]> = self.graph
            .edges(graph_node_index)
            .map(|edge| {
                let other = if edge.source() == graph_node_index {
                    edge.target()
                } else {
                    edge.source()
                };
                let other_coord = self.vertex_coordinate(other.index())
                    .expect("graph nodes always map to valid grid coordinates");
                (edge.id().index(), other_coord)
            })
            .collect();
        linked.sort_by_key(|&(edge_index, _)| edge_index);
        Ok(linked.into_iter().map(|(_, cell)| cell).collect())
    }

    /// Cells to the North, South, East or West of `coord` that are on the grid, but
    /// not necessarily connected to it by a passage.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        [CompassPrimary::North, CompassPrimary::South, CompassPrimary::East, CompassPrimary::West]
            .iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        offset_coordinate(coord, direction)
            .and_then(|neighbour| if self.is_valid_coordinate(neighbour) {
                          Some(neighbour)
                      } else {
                          None
                      })
    }

    pub fn is_neighbour(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        self.neighbours(a).iter().any(|&coord| coord == b)
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour| self.is_linked(coord, neighbour))
    }

    /// All cells of the grid in vertex id order (down each column, then east).
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_index: 0,
            cells_count: self.size(),
            column_length: self.height.0,
        }
    }

    /// The cells of each grid row in turn, one `Vec` per row.
    pub fn iter_row(&self) -> RowIter {
        RowIter {
            current_row: 0,
            row_length: self.width.0,
            rows_count: self.height.0,
        }
    }

    /// All passages as coordinate pairs, ordered by edge index. This matches the
    /// carve order until a passage is removed; `unlink` renumbers the most
    /// recently carved passage into the freed slot.
    pub fn iter_links(&self) -> LinksIter<GridIndexType> {
        LinksIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            column_length: self.height.0,
        }
    }

    #[inline]
    fn graph_index(&self, coord: GridCoordinate) -> Option<graph::NodeIndex<GridIndexType>> {
        self.vertex_index(coord)
            .ok()
            .map(graph::NodeIndex::<GridIndexType>::new)
    }
}

impl<GridIndexType: IndexType> fmt::Display for Maze<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let options = crate::renderers::RenderOptionsBuilder::new().build();
        write!(f, "{}", crate::renderers::render_text(self, &options))
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_index: usize,
    cells_count: usize,
    column_length: usize,
}
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index < self.cells_count {
            let h = self.column_length;
            let coord = GridCoordinate::new((self.current_index / h) as u32,
                                            (self.current_index % h) as u32);
            self.current_index += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_index;
        (remaining, Some(remaining))
    }
}

#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_row: usize,
    row_length: usize,
    rows_count: usize,
}
impl Iterator for RowIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.rows_count {
            let y = self.current_row as u32;
            let row = (0..self.row_length).map(|x| GridCoordinate::new(x as u32, y)).collect();
            self.current_row += 1;
            Some(row)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows_count - self.current_row;
        (remaining, Some(remaining))
    }
}

pub struct LinksIter<'a, GridIndexType: IndexType + 'a> {
    graph_edge_iter: ::std::slice::Iter<'a, graph::Edge<(), GridIndexType>>,
    column_length: usize,
}
impl<'a, GridIndexType: IndexType> Iterator for LinksIter<'a, GridIndexType> {
    type Item = (GridCoordinate, GridCoordinate);
    fn next(&mut self) -> Option<Self::Item> {
        let h = self.column_length;
        self.graph_edge_iter.next().map(|edge| {
            let to_coord = |index: usize| GridCoordinate::new((index / h) as u32, (index % h) as u32);
            (to_coord(edge.source().index()), to_coord(edge.target().index()))
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a, GridIndexType: IndexType> ExactSizeIterator for LinksIter<'a, GridIndexType> {}
