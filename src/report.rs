// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::grid::Grid;
use super::puzzle::SolveStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolutionStatus {
    Solved,
    PartiallySolved,
    IncorrectCrossword,
}
impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            SolutionStatus::Solved             => "Solved",
            SolutionStatus::PartiallySolved    => "PartiallySolved",
            SolutionStatus::IncorrectCrossword => "IncorrectCrossword",
        })
    }
}

/// Final grid of a solve and how far propagation got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionReport {
    pub grid: Grid,
    pub status: SolutionStatus,
    pub stats: SolveStats,
}

impl SolutionReport {
    pub fn new(grid: Grid, infeasible: bool, stats: SolveStats) -> Self {
        let status = if infeasible {
            SolutionStatus::IncorrectCrossword
        } else if grid.is_complete() {
            SolutionStatus::Solved
        } else {
            SolutionStatus::PartiallySolved
        };
        SolutionReport { grid, status, stats }
    }

    /// Writes one line of `?`, `*` and `.` symbols per row.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{}", self.grid)?;
        out.flush()
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }
}
impl fmt::Display for SolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
