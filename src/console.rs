use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue, terminal,
};
use std::{io, time::Duration};
use torus_life::{Board, Cell};

pub enum ConsoleCommand {
    Exit,
    TogglePlay,
    Step,
    Click(Cell),
    Handled,
}

/// Maps board cells onto a `width` x `height` block of terminal characters
///
/// Cells are stretched (or squeezed) to fill the area. A terminal column `x`
/// belongs to board column `x * columns / width`, and likewise for rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    rows: usize,
    columns: usize,
}
impl Viewport {
    pub fn new(width: u16, height: u16, rows: usize, columns: usize) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            rows,
            columns,
        }
    }

    fn span(index: usize, count: usize, extent: u16) -> (u16, u16) {
        let extent = extent as usize;
        // exactly the positions `cell_at` maps back to this index
        let start = (index * extent).div_ceil(count).min(extent - 1);
        // always draw at least one character, even when squeezed
        let end = ((index + 1) * extent).div_ceil(count).max(start + 1);
        (start as u16, end as u16)
    }

    /// Terminal columns `x0..x1` and rows `y0..y1` covered by a cell
    pub fn cell_rect(&self, row: usize, column: usize) -> (u16, u16, u16, u16) {
        let (x0, x1) = Self::span(column, self.columns, self.width);
        let (y0, y1) = Self::span(row, self.rows, self.height);
        (x0, y0, x1, y1)
    }

    /// The cell under the terminal position, if it lies on the board area
    pub fn cell_at(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = y as usize * self.rows / self.height as usize;
        let column = x as usize * self.columns / self.width as usize;
        Some(Cell::new(row, column))
    }
}

pub struct ConsoleRender {
    report: String,
}
impl ConsoleRender {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide, EnableMouseCapture)?;
        Ok(Self {
            report: String::new(),
        })
    }

    /// The board area: the whole terminal except the footer line
    fn viewport(board: &Board) -> io::Result<Viewport> {
        let (cols, rows) = terminal::size()?;
        Ok(Viewport::new(
            cols,
            rows.saturating_sub(1),
            board.num_rows(),
            board.num_columns(),
        ))
    }

    pub fn render(&self, board: &Board) -> io::Result<()> {
        let viewport = Self::viewport(board)?;
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for (row, column, alive) in board.iter() {
            if !alive {
                continue;
            }
            let (x0, y0, x1, y1) = viewport.cell_rect(row, column);
            let line = "\u{2588}".repeat((x1 - x0) as usize);
            for y in y0..y1 {
                queue!(stdout, cursor::MoveTo(x0, y))?;
                io::Write::write_all(&mut stdout, line.as_bytes())?;
            }
        }

        // write footer
        let state = if board.is_playing() { "playing" } else { "paused" };
        queue!(stdout, cursor::MoveTo(0, viewport.height))?;
        let footer = format!(
            "[{state}] gen:{} {}  (space: play/pause, n: step, click: revive, q: quit)",
            board.generation(),
            self.report
        );
        io::Write::write_all(&mut stdout, footer.as_bytes())?;

        io::Write::flush(&mut stdout)
    }

    /// Waits up to `timeout` for a terminal event and translates it
    pub fn poll_events(
        &mut self,
        board: &Board,
        timeout: Duration,
    ) -> io::Result<Option<ConsoleCommand>> {
        // make sure event is preset for us to take
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let command = match event::read()? {
            // CTRL+C
            event::Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }) => ConsoleCommand::Exit,
            event::Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => ConsoleCommand::Exit,
                KeyCode::Char(' ') => ConsoleCommand::TogglePlay,
                KeyCode::Char('n') => ConsoleCommand::Step,
                _ => ConsoleCommand::Handled,
            },
            event::Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => match Self::viewport(board)?.cell_at(column, row) {
                Some(cell) => ConsoleCommand::Click(cell),
                None => ConsoleCommand::Handled,
            },
            _ => ConsoleCommand::Handled,
        };
        Ok(Some(command))
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // if we can enable it, we should be able to disable it
        terminal::disable_raw_mode().expect("disable raw mode");
        execute!(io::stdout(), DisableMouseCapture, cursor::Show).expect("enable cursor");
    }
}
