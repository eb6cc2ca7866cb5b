// vim: set ai et ts=4 sw=4 sts=4:
pub mod board;
pub mod solver;

use std::convert::TryFrom;
use std::fs;
use std::path::Path;
use yaml_rust::{Yaml, YamlLoader};

use super::error::Error;
use super::row::{Clue, LineId};
use super::util::Direction::*;

pub use self::board::Board;
pub use self::solver::{Solver, SolverConfig, SolveStats};

/// Input format of a puzzle definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Header line, row clues, a line starting with `column`, column clues.
    Text,
    /// Mapping with `rows` and `cols` sequences.
    Yaml,
}
impl Format {
    pub fn from_path(path: &Path) -> Format {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Format::Yaml,
            _                          => Format::Text,
        }
    }
}

/// The clue set: one clue per row and one per column, fixed for a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub rows: Vec<Clue>,
    pub cols: Vec<Clue>,
}

impl Puzzle {
    pub fn new(row_run_lengths: Vec<Vec<usize>>,
               col_run_lengths: Vec<Vec<usize>>) -> Self
    {
        Puzzle {
            rows: row_run_lengths.into_iter().map(Clue::new).collect(),
            cols: col_run_lengths.into_iter().map(Clue::new).collect(),
        }
    }
    pub fn width(&self) -> usize { self.cols.len() }
    pub fn height(&self) -> usize { self.rows.len() }

    pub fn clue(&self, line: LineId) -> &Clue {
        match line.direction {
            Horizontal => &self.rows[line.index],
            Vertical   => &self.cols[line.index],
        }
    }

    /// Every row followed by every column.
    pub fn line_ids(&self) -> impl Iterator<Item = LineId> {
        (0..self.height()).map(LineId::row)
                          .chain((0..self.width()).map(LineId::col))
    }

    pub fn from_file(path: &Path, format: Format) -> Result<Puzzle, Error> {
        let contents = fs::read_to_string(path)?;
        match format {
            Format::Text => Puzzle::from_text(&contents),
            Format::Yaml => Puzzle::from_yaml_str(&contents),
        }
    }

    pub fn from_text(s: &str) -> Result<Puzzle, Error> {
        let mut rows = Vec::new();
        let mut cols = Vec::new();
        let mut in_rows = true;

        let mut lines = s.lines().map(str::trim).collect::<Vec<_>>();
        // blank lines at the end are padding, not empty clues
        while lines.last().map_or(false, |line| line.is_empty()) {
            lines.pop();
        }

        // the first line is a header
        for (i, &line) in lines.iter().enumerate().skip(1) {
            if line.starts_with("column") {
                in_rows = false;
                continue;
            }
            let runs = Self::_parse_runs(line).map_err(|msg| Error::parse(i + 1, msg))?;
            if in_rows {
                rows.push(runs);
            } else {
                cols.push(runs);
            }
        }
        if in_rows {
            return Err(Error::MissingSection("columns"));
        }
        Ok(Puzzle::new(rows, cols))
    }

    pub fn from_yaml_str(s: &str) -> Result<Puzzle, Error> {
        let docs = YamlLoader::load_from_str(s)?;
        let doc = docs.first().ok_or(Error::MissingSection("rows"))?;
        Puzzle::from_yaml(doc)
    }

    pub fn from_yaml(doc: &Yaml) -> Result<Puzzle, Error> {
        let rows = Self::_parse_yaml_section(doc, "rows")?;
        let cols = Self::_parse_yaml_section(doc, "cols")?;
        Ok(Puzzle::new(rows, cols))
    }

    fn _parse_yaml_section(doc: &Yaml, section: &'static str) -> Result<Vec<Vec<usize>>, Error> {
        let list = match &doc[section] {
            Yaml::Array(list) => list,
            Yaml::Null | Yaml::BadValue => return Err(Error::MissingSection(section)),
            other => return Err(Error::InvalidEntry {
                section,
                index: 0,
                message: format!("expected a list, found {:?}", other),
            }),
        };
        list.iter()
            .enumerate()
            .map(|(index, yaml_val)| Self::_parse_yaml_runs(yaml_val)
                                          .map_err(|message| Error::InvalidEntry { section, index, message }))
            .collect()
    }

    fn _parse_yaml_runs(input: &Yaml) -> Result<Vec<usize>, String> {
        match input {
            Yaml::String(s)  => Self::_parse_runs(s),
            Yaml::Integer(i) => usize::try_from(*i).map(|len| vec![len])
                                                   .map_err(|_| format!("invalid run length `{}`", i)),
            Yaml::Null       => Ok(vec![]),
            _ => Err(format!("unexpected data type: {:?}", input)),
        }
    }

    fn _parse_runs(s: &str) -> Result<Vec<usize>, String> {
        s.split_whitespace()
         .map(|int| int.parse::<usize>().map_err(|_| format!("invalid run length `{}`", int)))
         .collect()
    }
}
