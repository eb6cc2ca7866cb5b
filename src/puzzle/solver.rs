// vim: set ai et ts=4 sts=4 sw=4:
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::Puzzle;
use super::super::error::Error;
use super::super::grid::{Grid, StatusError};
use super::super::report::SolutionReport;
use super::super::row::{Row, LineId, Feasibility, DirectionalSequence};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Worker threads for line evaluation; `None` runs on rayon's global pool.
    pub threads: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub rounds: usize,
    pub line_evaluations: usize,
    /// Squares fixed by this solve; squares fixed in a supplied grid are not counted.
    pub cells_fixed: usize,
}

/// Fixpoint propagation over rows and columns.
///
/// Each round drains the pending set and evaluates every drained line in
/// parallel against the shared grid. A line evaluation fixes the squares its
/// feasibility analysis forces and enqueues the crossing line of every square
/// it fixed. The loop ends when a round leaves nothing pending or any line
/// turns out to have no consistent filling.
pub struct Solver<'a> {
    puzzle: &'a Puzzle,
    grid: Grid,
    pending: Mutex<HashSet<LineId>>,
    infeasible: AtomicBool,
    line_evaluations: AtomicUsize,
    cells_fixed: AtomicUsize,
    pool: Option<ThreadPool>,
}

impl<'a> Solver<'a> {
    pub fn new(puzzle: &'a Puzzle) -> Self {
        Solver::from_parts(puzzle, Grid::new(puzzle.width(), puzzle.height()), None)
    }

    pub fn with_config(puzzle: &'a Puzzle, config: SolverConfig) -> Result<Self, Error> {
        Solver::with_grid(puzzle, Grid::new(puzzle.width(), puzzle.height()), config)
    }

    /// Starts from a grid whose known squares are taken as given.
    pub fn with_grid(puzzle: &'a Puzzle, grid: Grid, config: SolverConfig) -> Result<Self, Error> {
        if grid.width() != puzzle.width() || grid.height() != puzzle.height() {
            return Err(Error::DimensionMismatch {
                expected: (puzzle.width(), puzzle.height()),
                found:    (grid.width(), grid.height()),
            });
        }
        let pool = match config.threads {
            Some(threads) => Some(ThreadPoolBuilder::new().num_threads(threads).build()?),
            None          => None,
        };
        Ok(Solver::from_parts(puzzle, grid, pool))
    }

    fn from_parts(puzzle: &'a Puzzle, grid: Grid, pool: Option<ThreadPool>) -> Self {
        Solver {
            puzzle,
            grid,
            // every line is evaluated at least once
            pending: Mutex::new(puzzle.line_ids().collect()),
            infeasible: AtomicBool::new(false),
            line_evaluations: AtomicUsize::new(0),
            cells_fixed: AtomicUsize::new(0),
            pool,
        }
    }

    pub fn grid(&self) -> &Grid { &self.grid }

    pub fn is_infeasible(&self) -> bool {
        self.infeasible.load(Ordering::Acquire)
    }

    pub fn solve(self) -> SolutionReport {
        let rounds = match &self.pool {
            Some(pool) => pool.install(|| self.run_rounds()),
            None       => self.run_rounds(),
        };

        let stats = SolveStats {
            rounds,
            line_evaluations: self.line_evaluations.load(Ordering::Acquire),
            cells_fixed:      self.cells_fixed.load(Ordering::Acquire),
        };
        let report = SolutionReport::new(self.grid, self.infeasible.into_inner(), stats);
        info!("solve finished: {} after {} rounds ({} line evaluations, {} squares fixed)",
              report.status, stats.rounds, stats.line_evaluations, stats.cells_fixed);
        report
    }

    fn run_rounds(&self) -> usize {
        let mut rounds = 0;
        loop {
            let lines = self.take_pending();
            if lines.is_empty() || self.is_infeasible() {
                break;
            }
            rounds += 1;
            debug!("round {}: evaluating {} lines ({} squares fixed so far)",
                   rounds, lines.len(), self.cells_fixed.load(Ordering::Relaxed));

            lines.par_iter().for_each(|&line| self.update_line(line));

            if self.is_infeasible() {
                break;
            }
        }
        rounds
    }

    /// Swaps the pending set for an empty one and returns what was drained.
    fn take_pending(&self) -> Vec<LineId> {
        let drained = {
            let mut pending = self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::take(&mut *pending)
        };
        let mut lines = drained.into_iter().collect::<Vec<_>>();
        lines.sort();
        lines
    }

    fn enqueue<I: IntoIterator<Item = LineId>>(&self, lines: I) {
        let mut pending = self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        pending.extend(lines);
    }

    fn update_line(&self, line: LineId) {
        // another line of this round already proved the puzzle inconsistent
        if self.is_infeasible() {
            return;
        }
        self.line_evaluations.fetch_add(1, Ordering::Relaxed);

        let row = Row::new(&self.grid, line, self.puzzle.clue(line));
        let feasibility = row.feasibility();
        if !feasibility.is_satisfiable() {
            warn!("{} with clue [{}] has no consistent filling (contradiction at {:?})",
                  line, row.clue, feasibility.contradictions().collect::<Vec<_>>());
            self.infeasible.store(true, Ordering::Release);
            return;
        }

        self.commit(&row, &feasibility);
    }

    /// Fixes the squares `feasibility` forces and wakes their crossing lines.
    /// A square fixed to the other color in the meantime proves the puzzle
    /// inconsistent.
    fn commit(&self, row: &Row<'_>, feasibility: &Feasibility) {
        match Self::apply(row, feasibility) {
            Ok(positions) => {
                if positions.is_empty() {
                    return;
                }
                self.cells_fixed.fetch_add(positions.len(), Ordering::Relaxed);
                self.enqueue(positions.iter().map(|&at| row.id.orthogonal(at)));
            }
            Err(err) => {
                warn!("{}: {}", row.id, err);
                self.infeasible.store(true, Ordering::Release);
            }
        }
    }

    /// Positions along the line that this call fixed.
    fn apply(row: &Row<'_>, feasibility: &Feasibility) -> Result<Vec<usize>, StatusError> {
        let mut positions = Vec::new();
        for (i, status) in row.forced_squares(feasibility) {
            if let Some(change) = row.get_square(i).set_status(status)? {
                trace!("{}: {}", row.id, change);
                positions.push(i);
            }
        }
        Ok(positions)
    }
}
