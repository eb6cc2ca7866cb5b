// vim: set ai et ts=4 sw=4 sts=4:
pub mod solver;

use std::fmt;

use super::util::{Direction, Direction::*};
use super::grid::{Grid, Square, SquareStatus};

pub use self::solver::Feasibility;

/// Ordered block lengths for one line, read left-to-right or top-to-bottom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clue {
    runs: Vec<usize>,
}

impl Clue {
    /// Zero-length entries are dropped; `[0]` is the conventional way to write
    /// a line without any black squares.
    pub fn new(run_lengths: Vec<usize>) -> Self {
        Clue {
            runs: run_lengths.into_iter().filter(|&len| len > 0).collect(),
        }
    }
    pub fn runs(&self) -> &[usize] { &self.runs }
    pub fn len(&self) -> usize { self.runs.len() }
    pub fn is_empty(&self) -> bool { self.runs.is_empty() }

    /// Number of black squares this clue places.
    pub fn total(&self) -> usize {
        self.runs.iter().sum()
    }
    /// Shortest line that can hold every run with single separators.
    pub fn min_length(&self) -> usize {
        match self.runs.len() {
            0 => 0,
            n => self.total() + n - 1,
        }
    }
}
impl From<Vec<usize>> for Clue {
    fn from(run_lengths: Vec<usize>) -> Self {
        Clue::new(run_lengths)
    }
}
impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.runs.is_empty() {
            return write!(f, "0");
        }
        let parts = self.runs.iter().map(|len| len.to_string()).collect::<Vec<_>>();
        write!(f, "{}", parts.join(" "))
    }
}

// -------------------------------------------------------------

/// Identifies a row or a column. Used as the key of the pending-work set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId {
    pub direction: Direction,
    pub index: usize,
}

impl LineId {
    pub fn new(direction: Direction, index: usize) -> Self {
        LineId { direction, index }
    }
    pub fn row(index: usize) -> Self { LineId::new(Horizontal, index) }
    pub fn col(index: usize) -> Self { LineId::new(Vertical, index) }

    /// The crossing line through position `at` of this line.
    pub fn orthogonal(&self, at: usize) -> LineId {
        LineId::new(self.direction.orthogonal(), at)
    }
}
impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.direction.line_name(), self.index)
    }
}

// -------------------------------------------------------------

pub trait DirectionalSequence
{
    fn get_row_index(&self) -> usize;
    fn get_direction(&self) -> Direction;
    fn get_grid(&self) -> &Grid;

    /// (x, y) grid coordinates of position `at` along this sequence.
    fn square_index(&self, at: usize) -> (usize, usize) {
        match self.get_direction() {
            Horizontal => (at, self.get_row_index()),
            Vertical   => (self.get_row_index(), at),
        }
    }
    fn get_square(&self, index: usize) -> &Square {
        let (x, y) = self.square_index(index);
        self.get_grid().get_square(x, y)
    }
}

/// A row or column of a grid together with its clue.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub id:     LineId,
    pub length: usize,
    pub clue:   &'a Clue,
    pub grid:   &'a Grid,
}

impl<'a> Row<'a> {
    pub fn new(grid: &'a Grid, id: LineId, clue: &'a Clue) -> Self {
        let length = match id.direction {
            Horizontal => grid.width(),
            Vertical   => grid.height(),
        };
        Row { id, length, clue, grid }
    }

    /// Current statuses of every square along the line. Squares fixed by a
    /// concurrent writer after this read only ever add information.
    pub fn statuses(&self) -> Vec<SquareStatus> {
        (0..self.length).map(|i| self.get_square(i).get_status())
                        .collect()
    }

    pub fn is_completed(&self) -> bool {
        (0..self.length).all(|i| self.get_square(i).get_status().is_known())
    }
}
impl<'a> DirectionalSequence for Row<'a> {
    fn get_row_index(&self) -> usize { self.id.index }
    fn get_direction(&self) -> Direction { self.id.direction }
    fn get_grid(&self)      -> &Grid { self.grid }
}
