use std::{
    error::Error,
    io::{self, BufRead, Write},
    thread,
};

mod console;
mod options;
mod stats;

use gridlife::{GameOfLife, Grid, Pos2, enc};
use stats::Recorder;

fn build_game(args: &options::Args) -> Result<GameOfLife, Box<dyn Error>> {
    if let Some(file_name) = args.input_file() {
        let decoder = enc::RunLengthEncoded::default();
        let encoded_str = std::fs::read_to_string(file_name)?;
        let seeds = enc::PatternCodec::decode(decoder, &encoded_str);
        let (width, height) = args.grid_size_for(&seeds);
        return Ok(GameOfLife::from_seeds(width, height, &seeds)?);
    }

    let (width, height) = args.grid_size();
    let mut grid = Grid::new(width, height);
    args.fill_mode().fill(&mut grid);

    let mut game = GameOfLife::new(grid);
    for cell in args.cells() {
        game.set_alive(cell)?;
    }
    Ok(game)
}

fn prompt_dimension(prompt: &str) -> io::Result<i32> {
    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("{prompt}");
        io::stdout().flush()?;
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            return Err(io::Error::other("end of input while reading grid size"));
        }
        match input.trim().parse::<i32>() {
            Ok(n) if n >= 0 => return Ok(n),
            _ => println!("enter a non-negative number"),
        }
    }
}

fn seed_interactive(game: &mut GameOfLife) -> io::Result<()> {
    println!("\nEnter the coordinates of live cells (row col).");
    println!("Coordinates are 0-indexed; the top-left cell is 0 0.");
    println!("Enter -1 -1 when you are done to start the simulation.");

    for line in io::stdin().lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let (Some(row), Some(col)) = (parts.next(), parts.next()) else {
            println!("enter two numbers: row col");
            continue;
        };
        let (Ok(row), Ok(col)) = (row.parse::<i32>(), col.parse::<i32>()) else {
            println!("enter two numbers: row col");
            continue;
        };
        if row == -1 && col == -1 {
            break;
        }

        // an out-of-bounds seed is a soft input error: report it and keep going
        match game.set_alive(Pos2 { x: col, y: row }) {
            Ok(()) => {
                println!("Current starting pattern:");
                print!("{}", game.grid());
                println!("\nEnter next coordinates, or -1 -1 to start:");
            }
            Err(err) => println!("{err}, try again"),
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let Some(args) = options::Args::from_env() else {
        return Ok(());
    };

    let mut game = if args.interactive() {
        println!("--- Game of Life setup ---");
        let width = match args.width() {
            Some(width) => width,
            None => prompt_dimension("Enter the width of the grid: ")?,
        };
        let height = match args.height() {
            Some(height) => height,
            None => prompt_dimension("Enter the height of the grid: ")?,
        };
        let mut game = GameOfLife::new(Grid::new(width, height));
        seed_interactive(&mut game)?;
        game
    } else {
        build_game(&args)?
    };
    println!("alive: {}", game.alive_count());

    // setup the console and reporting metrics; interactive runs always animate
    let mut console = if args.console() || args.interactive() {
        Some(console::ConsoleRender::new()?)
    } else {
        None
    };
    let sleep = args.sleep();
    let parallel = args.multithreading();

    let mut stats = stats::SwitchRecorder::new(game.alive_count(), args.stats_file().is_some());
    let mut stabilized = false;
    'generations: for _ in 0..args.generations() {
        // render the console if in console mode
        if let Some(ref mut console) = console {
            while let Some(cmd) = console.poll_events()? {
                match cmd {
                    console::ConsoleCommand::Exit => break 'generations,
                    _ => {}
                }
            }
            console.render(&game)?;
        }

        // report metrics every 500ms
        if stats.has_report() {
            let report = stats.report();
            if let Some(ref mut console) = console {
                console.set_report(report);
            } else {
                println!("{}", report);
            }
        }

        // compute the next generation
        let changed = if parallel {
            game.step_parallel()
        } else {
            game.step()
        };
        stats.record(game.alive_count());

        // an unchanged grid is a fixed point; nothing will ever move again
        if !changed && !args.keep_running() {
            stabilized = true;
            break;
        }
        if let Some(time) = sleep {
            thread::sleep(time);
        }
    }
    std::mem::drop(console);

    if stabilized {
        println!(
            "Simulation has stabilized after {} generations.",
            game.generation()
        );
    }

    if let Some(file_name) = args.output_file() {
        let encoder = enc::RunLengthEncoded::default().set_name("gridlife generated pattern");
        let encoded_game = enc::PatternCodec::encode(encoder, game.grid());
        std::fs::write(file_name, encoded_game)?;
    }
    if let Some(file_name) = args.stats_file() {
        stats.save(file_name)?;
    }

    Ok(())
}
