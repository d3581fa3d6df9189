use std::{str::FromStr, time::Duration};

use thiserror::Error;
use torus_life::{Cell, engine::DEFAULT_INTERVAL, patterns::Pattern};

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error(transparent)]
    Parse(#[from] getopts::Fail),

    #[error("invalid value {value:?} for --{option}")]
    Invalid { option: &'static str, value: String },
}

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    /// Parses command line arguments, returning `None` if help was printed
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>, OptionsError> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "run interactively in the terminal");
        opts.optflag("t", "threads", "compute generations on all cores");
        opts.optopt("r", "rows", "number of board rows (default 50)", "ROWS");
        opts.optopt("w", "columns", "number of board columns (default 50)", "COLUMNS");
        opts.optopt("f", "fill", "random|alternating|all|empty", "TYPE");
        opts.optopt("p", "pattern", "glider|lwss|glider-gun", "NAME");
        opts.optopt("i", "input", "run-length encoded pattern file", "FILE");
        opts.optopt("a", "at", "where to place the pattern", "ROW,COLUMN");
        opts.optopt(
            "s",
            "interval",
            "milliseconds between generations while playing",
            "MILLIS",
        );
        opts.optopt("g", "gens", "max number of generations", "COUNT");

        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: torus-life [options]"));
            return Ok(None);
        }

        let args = Self { matches };
        // surface bad values now rather than halfway through a run
        args.rows()?;
        args.columns()?;
        args.fill_mode()?;
        args.pattern()?;
        args.origin()?;
        args.interval()?;
        args.generations()?;
        Ok(Some(args))
    }

    pub fn from_env() -> Result<Option<Self>, OptionsError> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    fn get<T: FromStr>(&self, option: &'static str) -> Result<Option<T>, OptionsError> {
        match self.matches.opt_str(option) {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| OptionsError::Invalid { option, value }),
            None => Ok(None),
        }
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn multithreading(&self) -> bool {
        self.matches.opt_present("threads")
    }

    pub fn rows(&self) -> Result<usize, OptionsError> {
        Ok(self.get("rows")?.unwrap_or(50))
    }
    pub fn columns(&self) -> Result<usize, OptionsError> {
        Ok(self.get("columns")?.unwrap_or(50))
    }

    pub fn generations(&self) -> Result<u64, OptionsError> {
        Ok(self.get("gens")?.unwrap_or(u64::MAX)) // kinda hacky way of saying "infinity"
    }
    pub fn interval(&self) -> Result<Duration, OptionsError> {
        Ok(self
            .get("interval")?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_INTERVAL))
    }

    pub fn fill_mode(&self) -> Result<FillMode, OptionsError> {
        match self.matches.opt_str("fill") {
            Some(value) => FillMode::new(&value).ok_or(OptionsError::Invalid {
                option: "fill",
                value,
            }),
            None => Ok(FillMode::Empty),
        }
    }
    pub fn pattern(&self) -> Result<Option<Pattern>, OptionsError> {
        match self.matches.opt_str("pattern") {
            Some(value) => match Pattern::from_name(&value) {
                Some(pattern) => Ok(Some(pattern)),
                None => Err(OptionsError::Invalid {
                    option: "pattern",
                    value,
                }),
            },
            None => Ok(None),
        }
    }
    /// Top-left corner for `--pattern` and `--input`, defaults to (1, 1)
    pub fn origin(&self) -> Result<Cell, OptionsError> {
        let Some(value) = self.matches.opt_str("at") else {
            return Ok(Cell::new(1, 1));
        };
        let parsed = value.split_once(',').and_then(|(row, column)| {
            let row = row.trim().parse().ok()?;
            let column = column.trim().parse().ok()?;
            Some(Cell::new(row, column))
        });
        parsed.ok_or(OptionsError::Invalid { option: "at", value })
    }

    pub fn input_file(&self) -> Option<String> {
        self.matches.opt_str("input")
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

    fn reserve_size(&self, rows: usize, columns: usize) -> usize {
        let total = rows * columns;
        match self {
            Self::Random => total.div_ceil(2),
            Self::Alternating => total.div_ceil(2),
            Self::All => total,
            Self::Empty => 0,
        }
    }
    fn fill_cell<R: rand::Rng>(&self, cell: Cell, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (cell.row + cell.column) % 2 == 0,
            Self::All => true,
            Self::Empty => false,
        }
    }
    pub fn create_alive(self, rows: usize, columns: usize) -> Vec<Cell> {
        let mut alive = Vec::new();
        let reserve_size = self.reserve_size(rows, columns);
        if reserve_size == 0 {
            // reserve_size indicates this will produce no alive cells
            return alive;
        }

        let mut rng = rand::rng();
        alive.reserve(reserve_size);
        for row in 0..rows {
            for column in 0..columns {
                let cell = Cell::new(row, column);
                if self.fill_cell(cell, &mut rng) {
                    alive.push(cell);
                }
            }
        }
        alive
    }
}
