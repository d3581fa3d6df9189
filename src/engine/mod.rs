mod grid;
mod index;
mod play;

use self::grid::Grid;
use self::play::Player;
pub use self::play::{DEFAULT_INTERVAL, PlayState, TickHook};
use crate::{BoardError, Cell, Result};
use rayon::prelude::*;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Parameters for (re)initializing a [`Board`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardOptions {
    pub rows: usize,
    pub columns: usize,
    pub alive: Vec<Cell>,
}
impl BoardOptions {
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }
    pub fn alive<I: IntoIterator<Item = Cell>>(mut self, alive: I) -> Self {
        self.alive = alive.into_iter().collect();
        self
    }
    pub fn with_alive<I: IntoIterator<Item = Cell>>(mut self, alive: I) -> Self {
        self.alive.extend(alive);
        self
    }
}
impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            rows: 50,
            columns: 50,
            alive: Vec::new(),
        }
    }
}

/// A Game of Life board on a torus
///
/// Two grids are owned at all times: `current`, which every query reads, and
/// `working`, which an advance writes into before the two trade places.
#[derive(Debug)]
pub struct Board {
    current: Grid,
    working: Grid,
    generation: u64,
    player: Player,
}

impl Board {
    pub fn new(options: BoardOptions) -> Result<Self> {
        let current = Self::build(&options)?;
        Ok(Self::from_grid(current))
    }

    fn from_grid(current: Grid) -> Self {
        let working = Grid::dead(current.rows(), current.columns());
        Self {
            current,
            working,
            generation: 0,
            player: Player::new(),
        }
    }

    /// Validates `options` and builds the seeded grid
    fn build(options: &BoardOptions) -> Result<Grid> {
        let (rows, columns, alive) = (options.rows, options.columns, &options.alive);
        if rows == 0 || columns == 0 || rows.checked_mul(columns).is_none() {
            return Err(BoardError::InvalidDimensions { rows, columns });
        }
        if let Some(cell) = alive
            .iter()
            .find(|cell| cell.row >= rows || cell.column >= columns)
        {
            return Err(BoardError::OutOfBounds {
                row: cell.row,
                column: cell.column,
                rows,
                columns,
            });
        }
        Ok(Grid::seeded(rows, columns, alive))
    }

    /// Replaces the whole board and resets the generation counter
    ///
    /// On error the board is left as it was. The play mode is not affected.
    pub fn initialize(&mut self, options: BoardOptions) -> Result<()> {
        let current = Self::build(&options)?;
        debug!(
            rows = options.rows,
            columns = options.columns,
            alive = options.alive.len(),
            "initialize board"
        );
        self.working = Grid::dead(current.rows(), current.columns());
        self.current = current;
        self.generation = 0;
        Ok(())
    }

    /// Computes the next generation and makes it current
    pub fn advance(&mut self) {
        let current = &self.current;
        for (row, out) in self.working.rows_mut().enumerate() {
            current.next_row(row, out);
        }
        self.swap();
    }

    /// [`Board::advance`] with the rows computed on the rayon thread pool
    pub fn advance_parallel(&mut self) {
        let current = &self.current;
        self.working
            .par_rows_mut()
            .enumerate()
            .for_each(|(row, out)| current.next_row(row, out));
        self.swap();
    }

    /// Advances, then hands the freshly computed board to `complete`
    pub fn advance_with<F: FnOnce(&Board)>(&mut self, complete: F) {
        self.advance();
        complete(self);
    }

    fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.working);
        self.generation += 1;
        trace!(generation = self.generation, "advanced");
    }

    fn check(&self, row: usize, column: usize) -> Result<()> {
        if self.current.contains(row, column) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                row,
                column,
                rows: self.num_rows(),
                columns: self.num_columns(),
            })
        }
    }

    pub fn at(&self, row: usize, column: usize) -> Result<bool> {
        self.check(row, column)?;
        Ok(self.current.get(row, column))
    }

    /// Live cells around `(row, column)`, wrapping at the edges
    pub fn live_neighbors(&self, row: usize, column: usize) -> Result<u8> {
        self.check(row, column)?;
        Ok(self.current.live_neighbors(row, column) as u8)
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.current.rows()
    }
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.current.columns()
    }
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn alive_count(&self) -> usize {
        self.current.alive_count()
    }

    /// Every cell as `(row, column, alive)`, row by row
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.current.iter()
    }

    pub fn each<F: FnMut(usize, usize, bool)>(&self, mut visit: F) {
        for (row, column, alive) in self.iter() {
            visit(row, column, alive);
        }
    }

    /// Brings a cell to life
    ///
    /// Ignored while playing, in which case `Ok(false)` is returned.
    pub fn set_alive(&mut self, row: usize, column: usize) -> Result<bool> {
        self.check(row, column)?;
        if self.player.is_running() {
            trace!(row, column, "edit ignored while playing");
            return Ok(false);
        }
        self.current.set(row, column, true);
        Ok(true)
    }

    /// Starts continuous play
    ///
    /// The first advance happens immediately, later ones are made by
    /// [`Board::run_pending`]. Does nothing if already playing.
    pub fn play(&mut self) {
        self.start(None);
    }

    /// [`Board::play`], calling `on_each_tick` after every automatic advance
    pub fn play_with<F>(&mut self, on_each_tick: F)
    where
        F: FnMut(&Board) + 'static,
    {
        self.start(Some(Box::new(on_each_tick)));
    }

    fn start(&mut self, on_tick: Option<TickHook>) {
        let now = Instant::now();
        if !self.player.start(now, on_tick) {
            return;
        }
        debug!(interval = ?self.player.interval(), "play");
        self.run_pending(now);
    }

    /// Stops continuous play; does nothing if not playing
    pub fn pause(&mut self) {
        if self.player.stop() {
            debug!(generation = self.generation, "pause");
        }
    }

    /// Runs the pending automatic advance if it is due at `now`
    ///
    /// At most one advance is made per call, and the next one is scheduled one
    /// interval after `now`, so a late caller never triggers a burst.
    pub fn run_pending(&mut self, now: Instant) -> bool {
        if !self.player.is_due(now) {
            return false;
        }
        self.advance();

        let mut hook = self.player.take_hook();
        if let Some(on_tick) = hook.as_mut() {
            on_tick(self);
        }
        self.player.restore_hook(hook);
        self.player.reschedule(now);
        true
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.player.is_running()
    }
    pub fn play_state(&self) -> PlayState {
        self.player.state()
    }
    /// When the pending automatic advance is due, if playing
    pub fn next_due(&self) -> Option<Instant> {
        match self.player.state() {
            PlayState::Running { next_due } => Some(next_due),
            PlayState::Idle => None,
        }
    }
    pub fn interval(&self) -> Duration {
        self.player.interval()
    }
    /// Changes the play interval, taking effect from the next reschedule
    pub fn set_interval(&mut self, interval: Duration) {
        self.player.set_interval(interval);
    }
}

impl Default for Board {
    /// An empty 50x50 board
    fn default() -> Self {
        let options = BoardOptions::default();
        Self::from_grid(Grid::dead(options.rows, options.columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell as Counter, rc::Rc};

    fn blinker() -> Board {
        let options = BoardOptions::default()
            .rows(5)
            .columns(5)
            .alive([Cell::new(2, 1), Cell::new(2, 2), Cell::new(2, 3)]);
        Board::new(options).expect("valid blinker")
    }

    #[test]
    fn default_board_is_empty_50_by_50() {
        let board = Board::default();

        assert_eq!((board.num_rows(), board.num_columns()), (50, 50));
        assert_eq!(board.alive_count(), 0);
        assert_eq!(board.generation(), 0);
    }

    #[test]
    fn with_alive_appends_seeds() {
        let options = BoardOptions::default()
            .alive([Cell::new(0, 0)])
            .with_alive([Cell::new(1, 1)]);

        assert_eq!(options.alive, vec![Cell::new(0, 0), Cell::new(1, 1)]);
        assert_eq!(Board::new(options).unwrap().alive_count(), 2);
    }

    #[test]
    fn rejects_zero_dimensions() {
        let err = Board::new(BoardOptions::default().rows(0)).unwrap_err();

        assert_eq!(err, BoardError::InvalidDimensions { rows: 0, columns: 50 });
    }

    #[test]
    fn rejects_unaddressable_dimensions() {
        let options = BoardOptions::default().rows(usize::MAX).columns(2);

        assert_eq!(
            Board::new(options).unwrap_err(),
            BoardError::InvalidDimensions {
                rows: usize::MAX,
                columns: 2
            }
        );
    }

    #[test]
    fn rejects_out_of_range_seed() {
        let options = BoardOptions::default()
            .rows(3)
            .columns(3)
            .alive([Cell::new(3, 0)]);

        assert!(matches!(
            Board::new(options),
            Err(BoardError::OutOfBounds { row: 3, column: 0, .. })
        ));
    }

    #[test]
    fn failed_initialize_keeps_previous_board() {
        let mut board = blinker();
        board.advance();

        assert!(board.initialize(BoardOptions::default().columns(0)).is_err());
        assert_eq!(board.generation(), 1);
        assert_eq!(board.num_rows(), 5);
        assert_eq!(board.alive_count(), 3);
    }

    #[test]
    fn initialize_resets_everything() {
        let mut board = blinker();
        board.advance();
        board.advance();

        board
            .initialize(BoardOptions::default().rows(4).columns(6))
            .unwrap();
        assert_eq!(board.generation(), 0);
        assert_eq!((board.num_rows(), board.num_columns()), (4, 6));
        assert_eq!(board.alive_count(), 0);
    }

    #[test]
    fn blinker_oscillates() {
        let mut board = blinker();

        board.advance();
        assert!(board.at(1, 2).unwrap());
        assert!(board.at(2, 2).unwrap());
        assert!(board.at(3, 2).unwrap());
        assert!(!board.at(2, 1).unwrap());

        board.advance();
        assert!(board.at(2, 1).unwrap());
        assert!(!board.at(1, 2).unwrap());
        assert_eq!(board.generation(), 2);
    }

    #[test]
    fn advance_with_sees_new_state() {
        let mut board = blinker();
        let mut seen = None;

        board.advance_with(|b| seen = Some((b.generation(), b.at(1, 2).unwrap())));
        assert_eq!(seen, Some((1, true)));
    }

    #[test]
    fn parallel_matches_serial() {
        let mut serial = blinker();
        let mut parallel = blinker();

        for _ in 0..3 {
            serial.advance();
            parallel.advance_parallel();
        }
        assert!(serial.iter().eq(parallel.iter()));
        assert_eq!(parallel.generation(), 3);
    }

    #[test]
    fn at_out_of_range_is_error() {
        let board = blinker();

        assert!(board.at(5, 0).is_err());
        assert!(board.at(0, 5).is_err());
        assert!(board.live_neighbors(9, 9).is_err());
    }

    #[test]
    fn set_alive_when_idle() {
        let mut board = blinker();

        assert_eq!(board.set_alive(0, 0), Ok(true));
        assert!(board.at(0, 0).unwrap());
    }

    #[test]
    fn play_advances_immediately_and_once() {
        let mut board = blinker();
        board.play();
        board.play();

        assert!(board.is_playing());
        assert_eq!(board.generation(), 1);
    }

    #[test]
    fn set_alive_ignored_while_playing() {
        let mut board = blinker();
        board.play();

        assert_eq!(board.set_alive(0, 0), Ok(false));
        assert!(!board.at(0, 0).unwrap());

        board.pause();
        assert_eq!(board.set_alive(0, 0), Ok(true));
    }

    #[test]
    fn run_pending_respects_schedule() {
        let mut board = blinker();
        board.set_interval(Duration::from_secs(60));
        board.play();

        let due = board.next_due().unwrap();
        assert!(!board.run_pending(due - Duration::from_secs(1)));
        assert!(board.run_pending(due));
        assert_eq!(board.generation(), 2);

        // rescheduled from the pump time, not caught up
        assert!(!board.run_pending(due + Duration::from_secs(30)));
        assert_eq!(board.next_due(), Some(due + Duration::from_secs(60)));
    }

    #[test]
    fn pause_cancels_pending_advance() {
        let mut board = blinker();
        board.play();
        board.pause();
        board.pause();

        assert_eq!(board.play_state(), PlayState::Idle);
        assert!(!board.run_pending(Instant::now() + Duration::from_secs(60)));
        assert_eq!(board.generation(), 1);
    }

    #[test]
    fn tick_hook_fires_after_every_automatic_advance() {
        let ticks = Rc::new(Counter::new(0u64));
        let mut board = blinker();
        board.set_interval(Duration::ZERO);

        let seen = Rc::clone(&ticks);
        board.play_with(move |b| seen.set(b.generation()));
        assert_eq!(ticks.get(), 1);

        let now = Instant::now();
        board.run_pending(now);
        board.run_pending(now);
        assert_eq!(ticks.get(), 3);

        board.pause();
        board.run_pending(now);
        assert_eq!(ticks.get(), 3);
    }
}
