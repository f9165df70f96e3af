use super::{rule, view::GridView};
use crate::{
    error::{GridError, Result},
    pos::Pos2,
};
use rayon::prelude::*;

/// A bounded, non-wrapping cell matrix.
///
/// Cells are stored row-major in one contiguous buffer. The dimensions are
/// fixed at construction; zero-sized grids are legal and never step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a grid of the given dimensions with every cell dead.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn contains(&self, pos: Pos2) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn index(&self, pos: Pos2) -> Result<usize> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds {
                row: pos.y,
                col: pos.x,
                rows: self.height,
                cols: self.width,
            });
        }
        Ok(pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Unchecked read; `pos` must be in bounds.
    #[inline]
    fn cell(&self, pos: Pos2) -> bool {
        self.cells[pos.y as usize * self.width as usize + pos.x as usize]
    }

    pub fn is_alive(&self, pos: Pos2) -> Result<bool> {
        Ok(self.cells[self.index(pos)?])
    }

    pub fn set(&mut self, pos: Pos2, alive: bool) -> Result<()> {
        let idx = self.index(pos)?;
        self.cells[idx] = alive;
        Ok(())
    }
    pub fn set_alive(&mut self, pos: Pos2) -> Result<()> {
        self.set(pos, true)
    }
    pub fn set_dead(&mut self, pos: Pos2) -> Result<()> {
        self.set(pos, false)
    }

    /// Counts live cells in the Moore neighborhood of `pos`.
    ///
    /// Neighbors outside the grid count as dead; the plane does not wrap.
    /// The queried cell itself must be in bounds.
    pub fn live_neighbors(&self, pos: Pos2) -> Result<u8> {
        self.index(pos)?;
        Ok(self.count_neighbors(pos))
    }

    fn count_neighbors(&self, pos: Pos2) -> u8 {
        let mut count = 0;
        for nbr in pos.moore_neighbors() {
            if self.contains(nbr) && self.cell(nbr) {
                count += 1;
            }
        }
        count
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Computes the next generation into a fresh buffer.
    ///
    /// Neighbor counts always read this grid; writes land only in the new
    /// buffer, never feeding back into the same step.
    pub fn next_generation(&self) -> Grid {
        let mut next = Grid::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Pos2 { x, y };
                let idx = y as usize * self.width as usize + x as usize;
                next.cells[idx] = rule::next_state(self.cell(pos), self.count_neighbors(pos));
            }
        }
        next
    }

    /// Same result as [`Grid::next_generation`], with rows evaluated in
    /// parallel. Each cell reads only the frozen current grid and writes
    /// only its own slot in the next buffer.
    pub fn next_generation_parallel(&self) -> Grid {
        if self.width == 0 || self.height == 0 {
            return self.clone();
        }

        let mut next = Grid::new(self.width, self.height);
        next.cells
            .par_chunks_mut(self.width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                let y = y as i32;
                for x in 0..self.width {
                    let pos = Pos2 { x, y };
                    row[x as usize] = rule::next_state(self.cell(pos), self.count_neighbors(pos));
                }
            });
        next
    }

    pub fn view(&self, top_left: Pos2, bottom_right: Pos2) -> GridView<'_> {
        GridView::new(self, top_left, bottom_right)
    }

    /// Renders the whole grid as text, one line per row, `*` for live cells
    /// and `.` for dead ones.
    pub fn render(&self) -> String {
        self.view(
            Pos2::zero(),
            Pos2 {
                x: self.width,
                y: self.height,
            },
        )
        .to_string()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2 { x, y }
    }

    /// Block at rows/cols 4..=5 of a 10x10 grid.
    fn block_grid() -> Grid {
        let mut grid = Grid::new(10, 10);
        for seed in [pos(4, 4), pos(5, 4), pos(4, 5), pos(5, 5)] {
            grid.set_alive(seed).unwrap();
        }
        grid
    }

    #[test]
    fn new_grid_is_all_dead() {
        let grid = Grid::new(4, 3);

        assert_eq!(grid.alive_count(), 0);
        for y in 0..3 {
            for x in 0..4 {
                assert!(!grid.is_alive(pos(x, y)).unwrap());
            }
        }
    }

    #[test]
    fn set_and_query_roundtrip() {
        let mut grid = Grid::new(5, 5);

        grid.set_alive(pos(2, 3)).unwrap();
        assert!(grid.is_alive(pos(2, 3)).unwrap());
        assert_eq!(grid.alive_count(), 1);

        grid.set_dead(pos(2, 3)).unwrap();
        assert!(!grid.is_alive(pos(2, 3)).unwrap());
        assert_eq!(grid.alive_count(), 0);
    }

    #[test]
    fn block_neighbor_counts() {
        let grid = block_grid();

        assert_eq!(grid.live_neighbors(pos(4, 4)).unwrap(), 3);
        assert_eq!(grid.live_neighbors(pos(4, 3)).unwrap(), 2);
        assert_eq!(grid.live_neighbors(pos(0, 0)).unwrap(), 0);
    }

    #[test]
    fn neighbors_do_not_wrap() {
        let mut grid = Grid::new(5, 5);
        // live cells on the far edges must not wrap into (0, 0)'s count
        for seed in [pos(0, 0), pos(4, 0), pos(0, 4), pos(4, 4)] {
            grid.set_alive(seed).unwrap();
        }

        assert_eq!(grid.live_neighbors(pos(0, 0)).unwrap(), 0);
        assert_eq!(grid.live_neighbors(pos(4, 4)).unwrap(), 0);
    }

    #[test]
    fn corner_block_is_still_life() {
        let mut grid = Grid::new(4, 4);
        for seed in [pos(0, 0), pos(1, 0), pos(0, 1), pos(1, 1)] {
            grid.set_alive(seed).unwrap();
        }

        assert_eq!(grid.live_neighbors(pos(0, 0)).unwrap(), 3);
        assert_eq!(grid.next_generation(), grid);
    }

    #[test]
    fn block_is_a_fixed_point() {
        let grid = block_grid();

        assert_eq!(grid.next_generation(), grid);
    }

    #[test]
    fn lone_cells_die_of_underpopulation() {
        let mut grid = Grid::new(6, 6);
        grid.set_alive(pos(2, 2)).unwrap();

        assert_eq!(grid.next_generation().alive_count(), 0);

        // a pair gives each cell one neighbor, still not enough
        grid.set_alive(pos(3, 2)).unwrap();
        assert_eq!(grid.next_generation().alive_count(), 0);
    }

    #[test]
    fn crowded_cell_dies_of_overpopulation() {
        let mut grid = Grid::new(6, 6);
        // plus shape: the center has 4 live neighbors
        for seed in [pos(2, 2), pos(1, 2), pos(3, 2), pos(2, 1), pos(2, 3)] {
            grid.set_alive(seed).unwrap();
        }
        assert_eq!(grid.live_neighbors(pos(2, 2)).unwrap(), 4);

        assert!(!grid.next_generation().is_alive(pos(2, 2)).unwrap());
    }

    #[test]
    fn dead_cell_with_three_neighbors_is_born() {
        let mut grid = Grid::new(6, 6);
        for seed in [pos(1, 1), pos(2, 1), pos(3, 1)] {
            grid.set_alive(seed).unwrap();
        }

        let next = grid.next_generation();
        assert!(next.is_alive(pos(2, 0)).unwrap());
        assert!(next.is_alive(pos(2, 2)).unwrap());
        // the blinker ends flipped vertical
        assert!(!next.is_alive(pos(1, 1)).unwrap());
        assert!(!next.is_alive(pos(3, 1)).unwrap());
    }

    #[test]
    fn equality_requires_same_dimensions_and_cells() {
        let grid = block_grid();

        assert_eq!(grid, grid.clone());
        assert_ne!(grid, Grid::new(10, 10));
        assert_ne!(Grid::new(3, 4), Grid::new(4, 3));
    }

    #[test]
    fn empty_grid_is_a_fixed_point() {
        let grid = Grid::new(8, 8);

        assert_eq!(grid.next_generation(), grid);
    }

    #[test]
    fn zero_sized_grids_are_inert() {
        for (w, h) in [(0, 0), (0, 5), (5, 0)] {
            let grid = Grid::new(w, h);
            assert_eq!(grid.alive_count(), 0);
            assert_eq!(grid.next_generation(), grid);
            assert_eq!(grid.next_generation_parallel(), grid);
            assert!(grid.is_alive(Pos2::zero()).is_err());
        }
        assert_eq!(Grid::new(0, 0).render(), "");
    }

    #[test]
    fn out_of_bounds_access_is_an_error() {
        let mut grid = Grid::new(3, 3);
        let oob = GridError::OutOfBounds {
            row: 0,
            col: 3,
            rows: 3,
            cols: 3,
        };

        assert_eq!(grid.is_alive(pos(3, 0)), Err(oob));
        for bad in [pos(3, 0), pos(0, 3), pos(-1, 0), pos(0, -1)] {
            assert!(grid.is_alive(bad).is_err());
            assert!(grid.set_alive(bad).is_err());
            assert!(grid.set_dead(bad).is_err());
            assert!(grid.live_neighbors(bad).is_err());
        }
    }

    #[test]
    fn parallel_step_matches_serial() {
        let mut grid = Grid::new(32, 32);
        for y in 0..32 {
            for x in 0..32 {
                if (x * 7 + y * 3) % 5 == 0 {
                    grid.set_alive(pos(x, y)).unwrap();
                }
            }
        }

        let mut serial = grid.clone();
        let mut parallel = grid;
        for _ in 0..8 {
            serial = serial.next_generation();
            parallel = parallel.next_generation_parallel();
        }
        assert_eq!(serial, parallel);
    }
}
