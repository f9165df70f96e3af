use crate::{engine::Grid, pos::Pos2};

pub trait PatternCodec {
    fn encode(self, grid: &Grid) -> String;
    fn decode(self, value: &str) -> Vec<Pos2>;
}

struct RunEncoder {
    sequence: String,
    line_len: usize,
    max_line_len: usize,
}
impl RunEncoder {
    fn new(max_line_len: usize) -> Self {
        Self {
            sequence: String::new(),
            line_len: 0,
            max_line_len,
        }
    }

    fn push_run(&mut self, run: i32, c: char) {
        let append = match run {
            0 => String::new(),
            1 => c.to_string(),
            n => format!("{}{}", n, c),
        };
        if self.line_len + append.len() > self.max_line_len {
            self.sequence.push('\n');
            self.line_len = 0;
        }
        self.line_len += append.len();
        self.sequence.push_str(&append);
    }

    pub fn end(mut self) -> String {
        self.sequence.push('!');
        self.sequence
    }
}

pub struct RunLengthEncoded {
    name: Option<String>,
    header: bool,
}
impl RunLengthEncoded {
    pub fn set_name<T: AsRef<str>>(mut self, name: T) -> Self {
        self.name = Some(name.as_ref().to_owned());
        self
    }

    fn encode_header(&self, grid: &Grid) -> String {
        let mut header = String::new();
        if !self.header {
            return header;
        }
        if let Some(name) = &self.name {
            header.push_str(&format!("#N {}\n", name));
        }
        header.push_str(&format!(
            "x = {}, y = {}, rule = B3/S23",
            grid.width(),
            grid.height()
        ));
        header
    }

    fn encode_cells(&self, grid: &Grid) -> String {
        let mut seq = RunEncoder::new(70);
        let mut seen_live = false;
        let mut row_gap = 0;
        for y in 0..grid.height() {
            let row: Vec<bool> = (0..grid.width())
                .map(|x| grid.is_alive(Pos2 { x, y }).unwrap_or(false))
                .collect();
            // blank rows collapse into the next row separator run
            let Some(last_alive) = row.iter().rposition(|&cell| cell) else {
                row_gap += 1;
                continue;
            };

            if seen_live {
                seq.push_run(row_gap + 1, '$');
            }
            seen_live = true;
            row_gap = 0;

            // trailing dead cells in a row are dropped
            let mut run_state = row[0];
            let mut run = 0;
            for &cell in &row[..=last_alive] {
                if cell == run_state {
                    run += 1;
                } else {
                    seq.push_run(run, if run_state { 'o' } else { 'b' });
                    run_state = cell;
                    run = 1;
                }
            }
            seq.push_run(run, if run_state { 'o' } else { 'b' });
        }

        seq.end()
    }
}
impl Default for RunLengthEncoded {
    fn default() -> Self {
        Self {
            name: None,
            header: true,
        }
    }
}

impl PatternCodec for RunLengthEncoded {
    fn encode(self, grid: &Grid) -> String {
        format!("{}\n{}\n", self.encode_header(grid), self.encode_cells(grid))
    }

    fn decode(self, value: &str) -> Vec<Pos2> {
        let re = regex::Regex::new(r"(\d*)([bo$!])").unwrap();

        let mut alive = Vec::new();
        let mut cursor = Pos2 { x: 0, y: 0 };
        'lines_loop: for mut line in value.split('\n') {
            if let Some(i) = line.find('#') {
                line = &line[..i];
            }
            // the dimensions header carries no cell runs
            if line.trim_start().starts_with('x') {
                continue;
            }

            for (_, [run_str, state]) in re.captures_iter(line).map(|x| x.extract()) {
                let run = run_str.parse::<i32>().unwrap_or(1);
                match state {
                    "!" => break 'lines_loop,
                    "o" => {
                        for _ in 0..run {
                            alive.push(cursor);
                            cursor.x += 1;
                        }
                    }
                    "b" => cursor.x += run,
                    "$" => {
                        cursor.x = 0;
                        cursor.y += run;
                    }
                    _ => unreachable!(),
                }
            }
        }

        alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2 { x, y }
    }

    #[test]
    fn decode_glider() {
        let decoder = RunLengthEncoded::default();
        let alive = decoder.decode("bo$2bo$3o!");

        let expected = vec![pos(1, 0), pos(2, 1), pos(0, 2), pos(1, 2), pos(2, 2)];
        assert_eq!(alive, expected);
    }

    #[test]
    fn decode_skips_comments_and_header() {
        let decoder = RunLengthEncoded::default();
        let alive = decoder.decode("#N block\nx = 2, y = 2, rule = B3/S23\n2o$2o!");

        let expected = vec![pos(0, 0), pos(1, 0), pos(0, 1), pos(1, 1)];
        assert_eq!(alive, expected);
    }

    #[test]
    fn decode_stops_at_the_terminator() {
        let decoder = RunLengthEncoded::default();
        let alive = decoder.decode("o!$3o");

        assert_eq!(alive, vec![pos(0, 0)]);
    }

    #[test]
    fn encode_block_with_offset() {
        let mut grid = Grid::new(4, 4);
        for seed in [pos(1, 1), pos(2, 1), pos(1, 2), pos(2, 2)] {
            grid.set_alive(seed).unwrap();
        }

        let encoder = RunLengthEncoded::default();
        let encoded = encoder.encode(&grid);

        assert_eq!(encoded, "x = 4, y = 4, rule = B3/S23\nb2o$b2o!\n");
    }

    #[test]
    fn encode_collapses_blank_rows() {
        let mut grid = Grid::new(3, 5);
        grid.set_alive(pos(0, 0)).unwrap();
        grid.set_alive(pos(0, 4)).unwrap();

        let encoder = RunLengthEncoded::default().set_name("gap");
        let encoded = encoder.encode(&grid);

        assert_eq!(encoded, "#N gap\nx = 3, y = 5, rule = B3/S23\no4$o!\n");
    }
}
