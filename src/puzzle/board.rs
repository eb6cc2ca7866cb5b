// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use ansi_term::{Colour, Style};

use super::Puzzle;
use super::super::grid::{Grid, SquareStatus};
use super::super::row::{Clue, LineId, Row};
use super::super::util::{ralign, lalign, paint};

/// Boxed rendering of a grid with the column clues stacked above it and the
/// row clues to its left. Clues of completed lines are dimmed when colored.
pub struct Board<'a> {
    pub puzzle: &'a Puzzle,
    pub grid: &'a Grid,
    /// Draw a separator every N rows/columns.
    pub subdivision: Option<usize>,
    pub emit_color: bool,
}

impl<'a> Board<'a> {
    pub fn new(puzzle: &'a Puzzle, grid: &'a Grid) -> Self {
        Board { puzzle, grid, subdivision: Some(5), emit_color: false }
    }

    fn clue_style(&self, line: LineId) -> Style {
        let row = Row::new(self.grid, line, self.puzzle.clue(line));
        match row.is_completed() {
            true  => Style::new().fg(Colour::Fixed(241)),
            false => Style::default(),
        }
    }

    fn square_visual(&self, status: SquareStatus) -> String {
        match status {
            SquareStatus::White   => "   ".to_string(),
            SquareStatus::Black   => paint(" \u{25A0} ", Style::new().fg(Colour::Blue), self.emit_color),
            SquareStatus::Unknown => " ? ".to_string(),
        }
    }

    fn _fmt_line(&self,
                 f: &mut fmt::Formatter<'_>,
                 prefix: &str,
                 left_delim: &str,
                 right_delim: &str,
                 columnwise_separator: &str,
                 content_parts: &[String]) -> fmt::Result
    {
        write!(f, "{} {}", prefix, left_delim)?;
        for (idx, s) in content_parts.iter().enumerate() {
            write!(f, "{}", s)?;
            if let Some(subdiv) = self.subdivision {
                if ((idx+1) % subdiv == 0) && (idx+1 < content_parts.len()) {
                    write!(f, "{}", columnwise_separator)?;
                }
            }
        }
        writeln!(f, "{}", right_delim)
    }

    fn _fmt_rule(&self,
                 f: &mut fmt::Formatter<'_>,
                 prefix_len: usize,
                 delims: [&str; 3],
                 fill: &str) -> fmt::Result
    {
        let parts = (0..self.puzzle.width()).map(|_| fill.repeat(3))
                                            .collect::<Vec<_>>();
        self._fmt_line(f, &ralign("", prefix_len), delims[0], delims[1], delims[2], &parts)
    }

    fn _fmt_header(&self,
                   f: &mut fmt::Formatter<'_>,
                   line_idx: usize,
                   prefix_len: usize) -> fmt::Result
    {
        // line_idx counts upwards from the run closest to the grid
        let content_parts = self.puzzle.cols.iter()
            .enumerate()
            .map(|(x, col)| {
                let runs = Self::header_runs(col);
                match line_idx < runs.len() {
                    true  => format!(" {}", paint(&lalign(&runs[runs.len()-1-line_idx], 2),
                                                  self.clue_style(LineId::col(x)),
                                                  self.emit_color)),
                    false => "   ".to_string(),
                }
            })
            .collect::<Vec<_>>();
        self._fmt_line(f, &ralign("", prefix_len), " ", " ", " ", &content_parts)
    }

    fn header_runs(clue: &Clue) -> Vec<String> {
        match clue.is_empty() {
            true  => vec!["0".to_string()],
            false => clue.runs().iter().map(|len| len.to_string()).collect(),
        }
    }
}

impl<'a> fmt::Display for Board<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row_prefixes = self.puzzle.rows.iter()
                                           .map(|clue| clue.to_string())
                                           .collect::<Vec<_>>();
        let prefix_len = row_prefixes.iter()
                                     .map(|p| p.len())
                                     .max()
                                     .unwrap_or(0);
        let max_col_runs = self.puzzle.cols.iter()
                                           .map(|col| Self::header_runs(col).len())
                                           .max()
                                           .unwrap_or(0);

        for i in (0..max_col_runs).rev() {
            self._fmt_header(f, i, prefix_len)?;
        }

        // top board line
        self._fmt_rule(f, prefix_len, ["\u{2554}", "\u{2557}", "\u{2564}"], "\u{2550}")?;

        let height = self.grid.height();
        for (y, prefix) in row_prefixes.iter().enumerate() {
            // board content line
            let prefix = paint(&ralign(prefix, prefix_len), self.clue_style(LineId::row(y)), self.emit_color);
            let squares = self.grid.squares[y].iter()
                                              .map(|s| self.square_visual(s.get_status()))
                                              .collect::<Vec<_>>();
            self._fmt_line(f, &prefix, "\u{2551}", "\u{2551}", "\u{2502}", &squares)?;

            // horizontal subdivisor line
            if let Some(subdiv) = self.subdivision {
                if ((y+1) % subdiv == 0) && (y+1 != height) {
                    self._fmt_rule(f, prefix_len, ["\u{255F}", "\u{2562}", "\u{253C}"], "\u{2500}")?;
                }
            }
        }
        // bottom board line
        self._fmt_rule(f, prefix_len, ["\u{255A}", "\u{255D}", "\u{2567}"], "\u{2550}")
    }
}
