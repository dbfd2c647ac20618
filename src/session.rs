//! A play session owns the maze plus the pieces of state the drawing and input
//! layers need: the player cell, the goal cell, whether the solution overlay is
//! on and the random source used for reshaping. Collaborators get a `&Session`
//! to draw from rather than reaching for shared globals.

use petgraph::graph::IndexType;
use rand::Rng;

use crate::generators;
use crate::maze::{CompassPrimary, GridCoordinate, Maze, Result};
use crate::pathing;
use crate::pathing::Traversal;
use crate::reshape;
use crate::units::{Height, Width};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct SessionOptions {
    pub width: Width,
    pub height: Height,
    /// Solution flips applied right after generation to make the route less direct.
    pub scramble_flips: usize,
    pub show_solution: bool,
}

impl SessionOptions {
    pub fn new(width: Width, height: Height) -> SessionOptions {
        SessionOptions {
            width,
            height,
            scramble_flips: 0,
            show_solution: false,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MoveOutcome {
    Moved(GridCoordinate),
    ReachedGoal,
    /// The target cell is off the grid or a wall is in the way. The player
    /// stays put; this is the normal response to bumping a wall, not an error.
    Blocked,
}

#[derive(Debug)]
pub struct Session<GridIndexType: IndexType, R: Rng> {
    maze: Maze<GridIndexType>,
    options: SessionOptions,
    player: GridCoordinate,
    goal: GridCoordinate,
    show_solution: bool,
    rng: R,
}

impl<GridIndexType: IndexType, R: Rng> Session<GridIndexType, R> {
    /// Generate a fresh maze and place the player at the top left corner with the
    /// goal at the bottom right. Fails on zero dimensions.
    pub fn new(options: SessionOptions, mut rng: R) -> Result<Session<GridIndexType, R>> {
        let mut maze = Maze::new(options.width, options.height)?;
        generators::frontier_growth(&mut maze, &mut rng);
        reshape::scramble(&mut maze, options.scramble_flips, &mut rng);

        let goal = GridCoordinate::new(options.width.0 as u32 - 1, options.height.0 as u32 - 1);
        Ok(Session {
            maze,
            options,
            player: GridCoordinate::new(0, 0),
            goal,
            show_solution: options.show_solution,
            rng,
        })
    }

    #[inline]
    pub fn maze(&self) -> &Maze<GridIndexType> {
        &self.maze
    }

    #[inline]
    pub fn player(&self) -> GridCoordinate {
        self.player
    }

    #[inline]
    pub fn goal(&self) -> GridCoordinate {
        self.goal
    }

    #[inline]
    pub fn show_solution(&self) -> bool {
        self.show_solution
    }

    pub fn toggle_solution(&mut self) {
        self.show_solution = !self.show_solution;
    }

    /// Step the player one cell in `direction` if a passage is open that way,
    /// otherwise leave the player where they are.
    pub fn move_player(&mut self, direction: CompassPrimary) -> MoveOutcome {
        match self.maze.neighbour_at_direction(self.player, direction) {
            Some(target) if self.maze.is_linked(self.player, target) => {
                self.player = target;
                if target == self.goal {
                    MoveOutcome::ReachedGoal
                } else {
                    MoveOutcome::Moved(target)
                }
            }
            _ => MoveOutcome::Blocked,
        }
    }

    /// Reroute the maze solution with one edge flip. The player and goal cells
    /// are untouched; the caller redraws afterwards.
    pub fn flip(&mut self) {
        reshape::flip(&mut self.maze, &mut self.rng);
    }

    /// The route from the player to the goal over the current passages.
    pub fn solution(&self) -> Option<Vec<GridCoordinate>> {
        pathing::find_path(&self.maze, self.player, self.goal, Traversal::BreadthFirst)
    }

    /// Throw the maze away and generate a new one with the session's options,
    /// placing the player back at the top left corner.
    pub fn reset(&mut self) {
        let mut maze = Maze::new(self.options.width, self.options.height)
            .expect("session dimensions were validated at construction");
        generators::frontier_growth(&mut maze, &mut self.rng);
        reshape::scramble(&mut maze, self.options.scramble_flips, &mut self.rng);
        self.maze = maze;
        self.player = GridCoordinate::new(0, 0);
    }
}
