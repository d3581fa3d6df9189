use std::{
    error::Error,
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

use torus_life::{Board, BoardOptions, Cell, patterns};
use tracing::{info, warn};

mod console;
mod options;
mod stats;

use console::ConsoleCommand;
use stats::Throughput;

/// How long the console waits for input before checking the play schedule
const FRAME: Duration = Duration::from_millis(16);

fn args_to_alive(args: &options::Args) -> Result<Vec<Cell>, Box<dyn Error>> {
    let (rows, columns) = (args.rows()?, args.columns()?);
    let origin = args.origin()?;

    let mut alive = args.fill_mode()?.create_alive(rows, columns);
    if let Some(pattern) = args.pattern()? {
        alive.extend(pattern.cells(origin)?);
    }
    if let Some(file_name) = args.input_file() {
        let encoded = std::fs::read_to_string(&file_name)?;
        let decoded = patterns::decode_rle(&encoded)?;
        info!(file = %file_name, cells = decoded.len(), "loaded pattern");
        alive.extend(patterns::place(&decoded, origin)?);
    }
    Ok(alive)
}

/// Whether a manual single step is allowed: paused and below `--gens`
fn can_step(board: &Board, max_generation: u64) -> bool {
    !board.is_playing() && board.generation() < max_generation
}

fn advance(board: &mut Board, parallel: bool) {
    if parallel {
        board.advance_parallel();
    } else {
        board.advance();
    }
}

/// Runs generations back to back, logging throughput
fn run_headless(board: &mut Board, args: &options::Args) -> Result<(), Box<dyn Error>> {
    let parallel = args.multithreading();
    let sleep = board.interval();
    let mut stats = Throughput::new(board.alive_count());

    for _ in 0..args.generations()? {
        advance(board, parallel);
        stats.record(board.generation(), board.alive_count());
        if stats.has_report() {
            info!("{}", stats.report());
        }
        if !sleep.is_zero() {
            thread::sleep(sleep);
        }
    }
    info!(
        generation = board.generation(),
        alive = board.alive_count(),
        "finished"
    );
    Ok(())
}

/// Interactive mode: space plays and pauses, clicks revive cells while paused
fn run_console(board: &mut Board, args: &options::Args) -> Result<(), Box<dyn Error>> {
    let parallel = args.multithreading();
    let max_generation = args.generations()?;
    let mut console = console::ConsoleRender::new()?;
    let mut stats = Throughput::new(board.alive_count());
    let (ticks, tick_rx) = mpsc::channel();

    let mut dirty = true;
    loop {
        let timeout = match board.next_due() {
            Some(due) => due.saturating_duration_since(Instant::now()).min(FRAME),
            None => FRAME,
        };
        if let Some(cmd) = console.poll_events(board, timeout)? {
            match cmd {
                ConsoleCommand::Exit => return Ok(()),
                ConsoleCommand::TogglePlay if board.is_playing() => board.pause(),
                ConsoleCommand::TogglePlay => {
                    let ticks = ticks.clone();
                    board.play_with(move |b: &Board| {
                        // the receiver only goes away on exit
                        let _ = ticks.send((b.generation(), b.alive_count()));
                    });
                }
                ConsoleCommand::Step if can_step(board, max_generation) => {
                    advance(board, parallel);
                    stats.record(board.generation(), board.alive_count());
                }
                ConsoleCommand::Click(cell) => {
                    board.set_alive(cell.row, cell.column)?;
                }
                ConsoleCommand::Step | ConsoleCommand::Handled => {}
            }
            dirty = true;
        }

        dirty |= board.run_pending(Instant::now());
        for (generation, alive) in tick_rx.try_iter() {
            stats.record(generation, alive);
        }
        if board.generation() >= max_generation {
            board.pause();
        }

        if stats.has_report() {
            console.set_report(stats.report());
            dirty = true;
        }
        if dirty {
            console.render(board)?;
            dirty = false;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };

    // the console owns the terminal, so only log when running headless
    if !args.console() {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let alive = args_to_alive(&args)?;
    let options = BoardOptions::default()
        .rows(args.rows()?)
        .columns(args.columns()?)
        .alive(alive);
    let mut board = match Board::new(options) {
        Ok(board) => board,
        Err(err) => {
            warn!(%err, "cannot build board");
            return Err(err.into());
        }
    };
    board.set_interval(args.interval()?);
    info!(
        rows = board.num_rows(),
        columns = board.num_columns(),
        alive = board.alive_count(),
        "board ready"
    );

    if args.console() {
        run_console(&mut board, &args)
    } else {
        run_headless(&mut board, &args)
    }
}
