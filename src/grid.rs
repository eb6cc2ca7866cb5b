// vim: set ai et ts=4 sts=4:
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use thiserror::Error;

use super::error::Error;

pub trait HasGridLocation {
    fn get_row(&self) -> usize;
    fn get_col(&self) -> usize;
    fn fmt_location(&self) -> String {
        format!("(col={:-2}, row={:-2})", self.get_col(), self.get_row())
    }
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum SquareStatus {
    Unknown,
    Black,
    White,
}
impl SquareStatus {
    /// Output symbol used by the solution writer.
    pub fn symbol(self) -> char {
        match self {
            SquareStatus::Unknown => '?',
            SquareStatus::Black   => '*',
            SquareStatus::White   => '.',
        }
    }
    pub fn is_known(self) -> bool {
        self != SquareStatus::Unknown
    }
    fn to_bits(self) -> u8 {
        match self {
            SquareStatus::Unknown => 0,
            SquareStatus::Black   => 1,
            SquareStatus::White   => 2,
        }
    }
    fn from_bits(bits: u8) -> Self {
        match bits {
            1 => SquareStatus::Black,
            2 => SquareStatus::White,
            _ => SquareStatus::Unknown,
        }
    }
}
impl fmt::Display for SquareStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match *self {
            SquareStatus::Black   => "Black",
            SquareStatus::White   => "White",
            SquareStatus::Unknown => "Unknown",
        })
    }
}

// ------------------------------------------------

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct StatusChange {
    pub row: usize,
    pub col: usize,
    pub old: SquareStatus,
    pub new: SquareStatus,
}
impl StatusChange {
    pub fn new(row: usize, col: usize, old: SquareStatus, new: SquareStatus) -> Self {
        Self { row, col, old, new }
    }
}
impl HasGridLocation for StatusChange {
    fn get_row(&self) -> usize { self.row }
    fn get_col(&self) -> usize { self.col }
}
impl fmt::Display for StatusChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Change: in square {}, status was changed from {} to {}",
            self.fmt_location(),
            self.old,
            self.new)
    }
}

#[derive(PartialEq, Eq, Debug, Error)]
pub enum StatusError {
    /// The square already holds the other color.
    #[error("In {}, attempt to change status from {} to {} was rejected: conflicting information",
            .0.fmt_location(), .0.old, .0.new)]
    ChangeRejected(StatusChange),
    /// A known square can never go back to unknown.
    #[error("In {}, attempt to revert status {} to Unknown was rejected", .0.fmt_location(), .0.old)]
    WasAlreadySet(StatusChange),
}

// if it worked: the change, if any; if it didn't, the change that was rejected
pub type StatusResult = Result<Option<StatusChange>, StatusError>;

// ------------------------------------------------

/// A single cell. The status only ever moves from `Unknown` to one of the
/// fixed colors; the move is a compare-and-set so concurrent writers agree.
#[derive(Debug)]
pub struct Square {
    row: usize,
    col: usize,
    status: AtomicU8,
}
impl Square {
    pub fn new(x: usize, y: usize) -> Square {
        Square::with_status(x, y, SquareStatus::Unknown)
    }
    pub fn with_status(x: usize, y: usize, status: SquareStatus) -> Square {
        Square {
            row: y,
            col: x,
            status: AtomicU8::new(status.to_bits()),
        }
    }

    pub fn get_status(&self) -> SquareStatus {
        SquareStatus::from_bits(self.status.load(Ordering::Acquire))
    }

    pub fn set_status(&self, new_status: SquareStatus) -> StatusResult {
        let current = self.get_status();
        if new_status == SquareStatus::Unknown {
            return match current {
                SquareStatus::Unknown => Ok(None),
                _ => Err(StatusError::WasAlreadySet(
                        StatusChange::new(self.row, self.col, current, new_status))),
            };
        }

        match self.status.compare_exchange(SquareStatus::Unknown.to_bits(),
                                           new_status.to_bits(),
                                           Ordering::AcqRel,
                                           Ordering::Acquire)
        {
            Ok(_) => Ok(Some(StatusChange::new(self.row, self.col, SquareStatus::Unknown, new_status))),
            Err(bits) => {
                // lost the race or the square was fixed before; same color is a no-op
                let existing = SquareStatus::from_bits(bits);
                if existing == new_status {
                    Ok(None)
                } else {
                    Err(StatusError::ChangeRejected(
                        StatusChange::new(self.row, self.col, existing, new_status)))
                }
            }
        }
    }
}
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get_status().symbol())
    }
}
impl HasGridLocation for Square {
    fn get_row(&self) -> usize { self.row }
    fn get_col(&self) -> usize { self.col }
}

// ------------------------------------------------

pub struct Grid {
    width: usize,
    height: usize,
    pub squares: Vec<Vec<Square>>,
}
impl Grid {
    pub fn new(width: usize, height: usize)
        -> Self
    {
        Grid {
            width,
            height,
            squares: (0..height).map(|y| (0..width).map(|x| Square::new(x, y))
                                                   .collect::<Vec<_>>())
                                .collect(),
        }
    }

    /// Builds a grid from row-major statuses; every row must have `width` squares.
    pub fn from_rows(width: usize, rows: &[Vec<SquareStatus>]) -> Result<Self, Error> {
        if let Some(bad) = rows.iter().find(|row| row.len() != width) {
            return Err(Error::DimensionMismatch {
                expected: (width, rows.len()),
                found:    (bad.len(), rows.len()),
            });
        }
        Ok(Grid {
            width,
            height: rows.len(),
            squares: rows.iter()
                         .enumerate()
                         .map(|(y, row)| row.iter()
                                            .enumerate()
                                            .map(|(x, &status)| Square::with_status(x, y, status))
                                            .collect())
                         .collect(),
        })
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn get_square(&self, x: usize, y: usize) -> &Square {
        &self.squares[y][x]
    }
    pub fn get_status(&self, x: usize, y: usize) -> SquareStatus {
        self.squares[y][x].get_status()
    }
    pub fn set_status(&self, x: usize, y: usize, status: SquareStatus) -> StatusResult {
        self.squares[y][x].set_status(status)
    }

    pub fn statuses(&self) -> Vec<Vec<SquareStatus>> {
        self.squares.iter()
                    .map(|row| row.iter().map(Square::get_status).collect())
                    .collect()
    }
    pub fn unknown_count(&self) -> usize {
        self.squares.iter()
                    .flatten()
                    .filter(|s| !s.get_status().is_known())
                    .count()
    }
    pub fn is_complete(&self) -> bool {
        self.unknown_count() == 0
    }
}

impl Clone for Grid {
    fn clone(&self) -> Self {
        Grid {
            width: self.width,
            height: self.height,
            squares: self.squares.iter()
                                 .map(|row| row.iter()
                                               .map(|s| Square::with_status(s.col, s.row, s.get_status()))
                                               .collect())
                                 .collect(),
        }
    }
}
impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.statuses() == other.statuses()
    }
}
impl Eq for Grid {}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(w={}, h={})", self.width(), self.height())
    }
}

/// One line of symbols per row, each followed by a newline.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.squares {
            for square in row {
                write!(f, "{}", square)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
