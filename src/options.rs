use std::time::Duration;

use gridlife::{Grid, Pos2};

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn new<T: AsRef<str>>(args: &[T]) -> Option<Self> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "run in console mode");
        opts.optflag("", "interactive", "seed live cells from the terminal");
        opts.optflag("t", "threads", "enables multi-threading");
        opts.optflag(
            "k",
            "keep-running",
            "keep stepping after the grid stabilizes",
        );
        opts.optopt("o", "output", "output file", "FILE");
        opts.optopt("i", "input", "input file", "FILE");
        opts.optopt("w", "width", "set grid width", "WIDTH");
        opts.optopt("h", "height", "set grid height", "HEIGHT");
        opts.optopt("f", "fill", "set fill type", "TYPE");
        opts.optmulti("", "cell", "seed a live cell", "ROW,COL");
        opts.optopt(
            "s",
            "sleep",
            "the amount of time to sleep between generations",
            "MILLIS",
        );
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optopt("", "stats", "write stats csv to file", "FILE");

        let matches = opts.parse(args.iter().map(T::as_ref)).unwrap();
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: gridlife [options]"));
            None
        } else {
            Some(Self { matches })
        }
    }
    pub fn from_env() -> Option<Self> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    pub fn width(&self) -> Option<i32> {
        self.matches.opt_get("width").unwrap()
    }
    pub fn height(&self) -> Option<i32> {
        self.matches.opt_get("height").unwrap()
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn interactive(&self) -> bool {
        self.matches.opt_present("interactive")
    }
    pub fn multithreading(&self) -> bool {
        self.matches.opt_present("threads")
    }
    pub fn keep_running(&self) -> bool {
        self.matches.opt_present("keep-running")
    }

    pub fn generations(&self) -> usize {
        self.matches.opt_get("gens").unwrap().unwrap_or(usize::MAX) // kinda hacky way of saying "infinity"
    }
    pub fn sleep(&self) -> Option<Duration> {
        match self.matches.opt_get("sleep").unwrap() {
            Some(millis) => Some(Duration::from_millis(millis)),
            None if self.console() || self.interactive() => Some(Duration::from_millis(200)),
            None => None,
        }
    }

    pub fn grid_size(&self) -> (i32, i32) {
        let default = if self.console() {
            let (cols, rows) = crossterm::terminal::size().unwrap();
            // two characters per rendered cell, one row reserved for the footer
            ((cols / 2) as i32, rows.saturating_sub(1) as i32)
        } else {
            (500, 500)
        };

        (
            self.width().unwrap_or(default.0),
            self.height().unwrap_or(default.1),
        )
    }

    /// Grid size for a loaded pattern: explicit flags win, otherwise the
    /// pattern extent.
    pub fn grid_size_for(&self, seeds: &[Pos2]) -> (i32, i32) {
        let extent_x = seeds.iter().map(|p| p.x).max().map_or(0, |x| x + 1);
        let extent_y = seeds.iter().map(|p| p.y).max().map_or(0, |y| y + 1);

        (
            self.width().unwrap_or(extent_x),
            self.height().unwrap_or(extent_y),
        )
    }

    pub fn fill_mode(&self) -> FillMode {
        // explicit seeds start from an empty grid unless a fill is requested
        let default = if self.matches.opt_present("cell") || self.interactive() {
            "empty"
        } else {
            "random"
        };
        let mode_str = self.matches.opt_str("fill");
        FillMode::new(mode_str.as_deref().unwrap_or(default)).expect("valid fill mode string")
    }

    pub fn cells(&self) -> Vec<Pos2> {
        self.matches
            .opt_strs("cell")
            .iter()
            .map(|s| {
                let (row, col) = s.split_once(',').expect("cell format is ROW,COL");
                Pos2 {
                    x: col.trim().parse().expect("valid cell column"),
                    y: row.trim().parse().expect("valid cell row"),
                }
            })
            .collect()
    }

    pub fn output_file(&self) -> Option<String> {
        self.matches.opt_str("output")
    }
    pub fn input_file(&self) -> Option<String> {
        self.matches.opt_str("input")
    }

    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }
}

pub enum FillMode {
    Random,
    Alternating,
    All,
    Empty,
}
impl FillMode {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "random" => Some(Self::Random),
            "alternating" => Some(Self::Alternating),
            "all" => Some(Self::All),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    fn cell_state<R: rand::Rng>(&self, cell: Pos2, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (cell.x + cell.y) % 2 == 0,
            Self::All => true,
            Self::Empty => false,
        }
    }

    pub fn fill(self, grid: &mut Grid) {
        if matches!(self, Self::Empty) {
            return;
        }

        let mut rng = rand::rng();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let cell = Pos2 { x, y };
                if self.cell_state(cell, &mut rng) {
                    grid.set_alive(cell).expect("fill positions are in bounds");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(argv: &[&str]) -> Args {
        Args::new(argv).expect("parsed args")
    }

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2 { x, y }
    }

    #[test]
    fn fill_mode_parses() {
        let args = args_with(&["--fill", "alternating"]);

        assert!(matches!(args.fill_mode(), FillMode::Alternating));
    }

    #[test]
    fn explicit_cells_default_to_an_empty_fill() {
        let args = args_with(&["--cell", "1,2"]);

        assert!(matches!(args.fill_mode(), FillMode::Empty));
    }

    #[test]
    fn cells_parse_as_row_col() {
        let args = args_with(&["--cell", "3,4", "--cell", "0,0"]);

        assert_eq!(args.cells(), vec![pos(4, 3), pos(0, 0)]);
    }

    #[test]
    fn grid_size_for_uses_the_pattern_extent() {
        let seeds = [pos(2, 1), pos(0, 3)];

        assert_eq!(args_with(&[]).grid_size_for(&seeds), (3, 4));
        assert_eq!(args_with(&["-w", "10"]).grid_size_for(&seeds), (10, 4));
    }

    #[test]
    fn fill_all_fills_the_grid() {
        let mut grid = Grid::new(3, 2);
        FillMode::All.fill(&mut grid);

        assert_eq!(grid.alive_count(), 6);
    }

    #[test]
    fn fill_empty_leaves_the_grid_dead() {
        let mut grid = Grid::new(5, 4);
        FillMode::Empty.fill(&mut grid);

        assert_eq!(grid.alive_count(), 0);
    }

    #[test]
    fn fill_alternating_uses_parity() {
        let mut grid = Grid::new(3, 3);
        FillMode::Alternating.fill(&mut grid);

        assert!(grid.is_alive(pos(0, 0)).unwrap());
        assert!(!grid.is_alive(pos(1, 0)).unwrap());
        assert!(grid.is_alive(pos(1, 1)).unwrap());
        assert_eq!(grid.alive_count(), 5);
    }

    #[test]
    fn fill_random_stays_within_the_grid() {
        let mut grid = Grid::new(4, 3);
        FillMode::Random.fill(&mut grid);

        assert!(grid.alive_count() <= 12);
    }
}
