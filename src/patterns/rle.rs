use crate::{Cell, PatternError};
use regex::Regex;
use std::sync::LazyLock;

/// Largest row or column a decoded pattern may reach
const MAX_EXTENT: usize = 1 << 16;
/// Most live cells a decoded pattern may hold
const MAX_CELLS: usize = 1 << 22;

/// A run token (`3o`, `b`, `2$`, `!`), or any other non-blank character
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d*)([bo$!])|(\S)").expect("valid token regex"));

/// Decodes a run-length encoded pattern into its live cells
///
/// `#` starts a comment running to the end of the line and the `x = .., y = ..`
/// header line is skipped. Decoding stops at `!`. Cells are relative to the
/// top-left corner of the pattern.
pub fn decode_rle(value: &str) -> Result<Vec<Cell>, PatternError> {
    let mut alive = Vec::new();
    let mut cursor = Cell::default();
    'lines_loop: for mut line in value.lines() {
        if let Some(i) = line.find('#') {
            line = &line[..i];
        }
        if line.trim_start().starts_with('x') {
            continue;
        }

        for caps in TOKEN.captures_iter(line) {
            if let Some(other) = caps.get(3) {
                let c = other.as_str().chars().next().unwrap_or_default();
                return Err(PatternError::UnexpectedToken(c));
            }
            let run_str = &caps[1];
            let run = if run_str.is_empty() {
                1
            } else {
                run_str
                    .parse::<usize>()
                    .map_err(|_| PatternError::InvalidRun(run_str.to_owned()))?
            };
            let extend = |pos: usize| {
                pos.checked_add(run)
                    .filter(|&end| end <= MAX_EXTENT)
                    .ok_or_else(|| PatternError::InvalidRun(run_str.to_owned()))
            };
            match &caps[2] {
                "!" => break 'lines_loop,
                "o" => {
                    let end = extend(cursor.column)?;
                    if alive.len() + run > MAX_CELLS {
                        return Err(PatternError::TooLarge(MAX_CELLS));
                    }
                    let row = cursor.row;
                    alive.extend((cursor.column..end).map(|column| Cell::new(row, column)));
                    cursor.column = end;
                }
                "b" => cursor.column = extend(cursor.column)?,
                "$" => {
                    cursor.column = 0;
                    cursor.row = extend(cursor.row)?;
                }
                _ => unreachable!(),
            }
        }
    }

    Ok(alive)
}
