use super::Grid;
use crate::Pos2;

/// A rectangular window over a [`Grid`], rendered as text.
///
/// Live cells print as `*`, dead cells as `.`, each followed by a space, one
/// line per row in top-to-bottom, left-to-right order. Positions outside the
/// grid render as dead, so a window may pan past the edges.
pub struct GridView<'a> {
    tl: Pos2,
    br: Pos2,
    grid: &'a Grid,
}
impl<'a> GridView<'a> {
    pub fn new(grid: &'a Grid, top_left: Pos2, bottom_right: Pos2) -> Self {
        Self {
            tl: top_left,
            br: bottom_right,
            grid,
        }
    }

    /// One rendered line per visible row.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (self.tl.y..self.br.y).map(move |y| {
            let width = (self.br.x - self.tl.x).max(0) as usize;
            let mut line = String::with_capacity(width * 2);
            for x in self.tl.x..self.br.x {
                let alive = self.grid.is_alive(Pos2 { x, y }).unwrap_or(false);
                line.push(if alive { '*' } else { '.' });
                line.push(' ');
            }
            line
        })
    }
}

impl std::fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.rows() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
