use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use maze_pathfinding::algorithms::{AStar, BreadthFirst, DepthFirst, PathfindingAlgorithm};
use maze_pathfinding::board::{Board, CellState};
use maze_pathfinding::config::Config;
use maze_pathfinding::error::Error;
use maze_pathfinding::generators::{MazeGenerator, RandomDepthFirst, RandomPrim, RenderHook};

/// Console renderer: redraws the whole board in place on every frame.
struct TermRenderer {
    delay: Duration,
}

impl RenderHook for TermRenderer {
    fn process_events(&mut self) {
        // No input sources at the terminal; nothing to drain.
    }

    fn draw_frame(&mut self, board: &Board) {
        print!("\x1b[2J\x1b[H{board}");
        let _ = io::stdout().flush();
        thread::sleep(self.delay);
    }
}

fn main() {
    env_logger::init();
    let config = Config::parse();

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), Error> {
    let mut board = Board::new(config.rows, config.cols, config.bordered)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut renderer = TermRenderer {
        delay: Duration::from_millis(config.delay_ms),
    };

    if config.generator.as_str() != "none" {
        let hook: Option<&mut dyn RenderHook> = if config.no_visualization {
            None
        } else {
            Some(&mut renderer)
        };
        match config.generator.as_str() {
            "prim" => RandomPrim::new(&mut board, &mut rng, config.multiplier, hook)?.generate()?,
            "depth_first" => {
                RandomDepthFirst::new(&mut board, &mut rng, config.multiplier, hook)?.generate()?
            }
            other => panic!("select 'prim', 'depth_first' or 'none' for generator (got '{other}')"),
        }
    }

    // First and last open cells in row-major order; on an open field these
    // are the two opposite corners.
    let mut open_cells = board
        .iter_logical()
        .filter(|&(_, state)| state == CellState::Path)
        .map(|(pos, _)| pos);
    let start = open_cells.next();
    let goal = open_cells.last();
    let (start, goal) = match (start, goal) {
        (Some(start), Some(goal)) => (start, goal),
        (Some(start), None) => (start, start),
        _ => {
            println!("board has no open cells to search");
            return Ok(());
        }
    };

    board.set(start.row, start.col, CellState::StartEnd)?;
    board.set(goal.row, goal.col, CellState::StartEnd)?;

    let mut algorithm: Box<dyn PathfindingAlgorithm> = match config.algorithm.as_str() {
        "a_star" => Box::new(AStar::new()),
        "bfs" => Box::new(BreadthFirst::new()),
        "dfs" => Box::new(DepthFirst::new()),
        other => panic!("select 'a_star', 'bfs' or 'dfs' for algorithm (got '{other}')"),
    };

    let search_started = Instant::now();
    match algorithm.find_path(&mut board, start, goal) {
        Ok(path) => {
            let elapsed = search_started.elapsed();
            if !config.quiet {
                println!("{board}");
            }
            println!(
                "{}: path of {} cells from {start} to {goal} in {elapsed:.2?}",
                config.algorithm,
                path.len()
            );
        }
        Err(Error::PathNotFound) => {
            if !config.quiet {
                println!("{board}");
            }
            println!("No path between {start} and {goal}");
        }
        Err(err) => return Err(err),
    }

    Ok(())
}
