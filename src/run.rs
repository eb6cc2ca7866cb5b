// vim: set ai et ts=4 sts=4 sw=4:
use std::fmt;
use std::path::Path;
use log::{error, info};

use super::error::Error;
use super::puzzle::{Format, Puzzle, Solver, SolverConfig};
use super::report::{SolutionReport, SolutionStatus};

/// Outcome of a file-to-file solve: the solver's status, or which path was unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    Solved,
    PartiallySolved,
    IncorrectCrossword,
    BadInputFilePath,
    BadOutputFilePath,
}
impl RunStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Solved             => 0,
            RunStatus::PartiallySolved    => 1,
            RunStatus::IncorrectCrossword => 2,
            RunStatus::BadInputFilePath   => 3,
            RunStatus::BadOutputFilePath  => 4,
        }
    }
}
impl From<SolutionStatus> for RunStatus {
    fn from(status: SolutionStatus) -> Self {
        match status {
            SolutionStatus::Solved             => RunStatus::Solved,
            SolutionStatus::PartiallySolved    => RunStatus::PartiallySolved,
            SolutionStatus::IncorrectCrossword => RunStatus::IncorrectCrossword,
        }
    }
}
impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            RunStatus::Solved             => "Solved",
            RunStatus::PartiallySolved    => "PartiallySolved",
            RunStatus::IncorrectCrossword => "IncorrectCrossword",
            RunStatus::BadInputFilePath   => "BadInputFilePath",
            RunStatus::BadOutputFilePath  => "BadOutputFilePath",
        })
    }
}

/// The path must end in a non-empty name of word characters, `-`, `.` or spaces.
pub fn is_valid_file_name(path: &Path) -> bool {
    let name = match path.to_str() {
        Some(s) => s.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(""),
        None    => return false,
    };
    !name.is_empty()
        && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.' || c == ' ')
}

pub fn solve_puzzle(puzzle: &Puzzle, config: SolverConfig) -> Result<SolutionReport, Error> {
    Ok(Solver::with_config(puzzle, config)?.solve())
}

fn is_usable_input(input: &Path) -> bool {
    let usable = is_valid_file_name(input) && input.is_file();
    if !usable {
        error!("bad input file path: {}", input.display());
    }
    usable
}

/// Loads the puzzle at `input`, or `None` when the path is unusable: a bad
/// name, not a regular file, or unreadable (including contents that are not
/// UTF-8). Malformed puzzle contents are errors.
pub fn read_puzzle(input: &Path, format: Option<Format>) -> Result<Option<Puzzle>, Error> {
    if !is_usable_input(input) {
        return Ok(None);
    }
    let format = format.unwrap_or_else(|| Format::from_path(input));
    match Puzzle::from_file(input, format) {
        Ok(puzzle) => {
            info!("loaded {}x{} puzzle from {}", puzzle.width(), puzzle.height(), input.display());
            Ok(Some(puzzle))
        }
        Err(Error::Io(err)) => {
            error!("cannot read {}: {}", input.display(), err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Reads a puzzle, solves it and writes the `?`/`*`/`.` grid to `output`.
/// Malformed puzzle contents and thread pool failures are errors; unusable
/// paths are reported through the status.
pub fn solve_files(input: &Path,
                   output: &Path,
                   format: Option<Format>,
                   config: SolverConfig) -> Result<RunStatus, Error>
{
    if !is_usable_input(input) {
        return Ok(RunStatus::BadInputFilePath);
    }
    if !is_valid_file_name(output) {
        error!("bad output file path: {}", output.display());
        return Ok(RunStatus::BadOutputFilePath);
    }
    let puzzle = match read_puzzle(input, format)? {
        Some(puzzle) => puzzle,
        None         => return Ok(RunStatus::BadInputFilePath),
    };

    let report = solve_puzzle(&puzzle, config)?;
    if let Err(err) = report.save(output) {
        error!("cannot write {}: {}", output.display(), err);
        return Ok(RunStatus::BadOutputFilePath);
    }
    Ok(RunStatus::from(report.status))
}
