// vim: set ai et ts=4 sts=4 sw=4:
//! Japanese crossword (nonogram) solver driven purely by line-wise deduction.
//!
//! Rows and columns are re-evaluated until nothing changes: every evaluation
//! computes which squares of the line can still be black or white under the
//! line's clue, fixes the squares all fillings agree on, and wakes up the
//! crossing lines of whatever it fixed. Puzzles that propagation alone cannot
//! settle are reported as partially solved, never guessed.
pub mod error;
pub mod grid;
pub mod puzzle;
pub mod report;
pub mod row;
pub mod run;
pub mod util;

pub use crate::error::Error;
pub use crate::grid::{Grid, SquareStatus};
pub use crate::puzzle::{Board, Format, Puzzle, Solver, SolverConfig, SolveStats};
pub use crate::report::{SolutionReport, SolutionStatus};
pub use crate::row::{Clue, Feasibility, LineId};
pub use crate::run::RunStatus;

/// Solves `puzzle` on rayon's global pool.
pub fn solve(puzzle: &Puzzle) -> SolutionReport {
    Solver::new(puzzle).solve()
}
