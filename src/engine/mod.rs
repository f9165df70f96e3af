mod grid;
mod rule;
mod view;

pub use self::grid::Grid;
pub use self::view::GridView;
use crate::{error::Result, pos::Pos2};

/// Drives a [`Grid`] through generations.
///
/// Each step computes the next generation into a separate buffer and swaps
/// it in wholesale, so neighbor counts always read the previous generation.
#[derive(Debug)]
pub struct GameOfLife {
    grid: Grid,
    generation: u64,
}

impl GameOfLife {
    #[inline]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            generation: 0,
        }
    }

    /// Builds a grid of the given dimensions with the seed cells alive.
    ///
    /// Fails with [`GridError::OutOfBounds`] if any seed falls outside the
    /// grid.
    ///
    /// [`GridError::OutOfBounds`]: crate::GridError::OutOfBounds
    pub fn from_seeds(width: i32, height: i32, seeds: &[Pos2]) -> Result<Self> {
        let mut grid = Grid::new(width, height);
        for &seed in seeds {
            grid.set_alive(seed)?;
        }
        Ok(Self::new(grid))
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
    #[inline]
    pub fn alive_count(&self) -> usize {
        self.grid.alive_count()
    }

    pub fn is_alive(&self, pos: Pos2) -> Result<bool> {
        self.grid.is_alive(pos)
    }
    pub fn set_alive(&mut self, pos: Pos2) -> Result<()> {
        self.grid.set_alive(pos)
    }
    pub fn set_dead(&mut self, pos: Pos2) -> Result<()> {
        self.grid.set_dead(pos)
    }

    /// Advances one generation. Returns whether any cell changed state; a
    /// `false` means the grid reached a fixed point.
    pub fn step(&mut self) -> bool {
        let next = self.grid.next_generation();
        self.advance(next)
    }

    /// [`GameOfLife::step`] with the parallel generation function.
    pub fn step_parallel(&mut self) -> bool {
        let next = self.grid.next_generation_parallel();
        self.advance(next)
    }

    fn advance(&mut self, next: Grid) -> bool {
        let changed = next != self.grid;
        self.grid = next;
        self.generation += 1;
        changed
    }

    #[inline]
    pub fn take(self) -> Grid {
        self.grid
    }
}
