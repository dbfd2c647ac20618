//! **shiftmaze** is a maze generation, route finding and maze reshaping library.
//!
//! A maze is a spanning tree over a rectangular grid of cells, so there is exactly
//! one route between any two cells. The `reshape` module can remove one passage on
//! the current solution route and carve a different one, changing the route while
//! keeping the maze fully connected.

pub mod generators;
pub mod maze;
pub mod pathing;
pub mod renderers;
pub mod reshape;
pub mod session;
pub mod units;
mod utils;
