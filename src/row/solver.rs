// vim: set ai et ts=4 sts=4 sw=4:
//! Line feasibility: which squares of a single line can still be black or
//! white under some filling that matches the clue and every fixed square.
//!
//! The analysis is a dynamic program over (prefix length, runs placed). A
//! forward table records which prefixes can hold the first `m` runs, a
//! backward table which suffixes can hold the remaining ones. A square can be
//! white iff some prefix/suffix split around it is reachable from both sides;
//! it can be black iff some reachable placement of a run covers it.
use super::{Row, DirectionalSequence};
use super::super::grid::SquareStatus::{self, Black, White};

/// Per-position (can be black, can be white) flags for one line evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feasibility {
    can_be_black: Vec<bool>,
    can_be_white: Vec<bool>,
    satisfiable:  bool,
}

impl Feasibility {
    pub fn analyze(runs: &[usize], squares: &[SquareStatus]) -> Self {
        let length = squares.len();
        let counts = StatusCounts::new(squares);

        let fwd = ReachTable::forward(runs, squares, &counts);
        let bwd = ReachTable::backward(runs, squares, &counts);
        let satisfiable = bwd.get(0, 0);

        let mut can_be_white = vec![false; length];
        if satisfiable {
            for (i, flag) in can_be_white.iter_mut().enumerate() {
                if squares[i] == Black { continue; }
                *flag = (0..=runs.len()).any(|m| fwd.get(m, i) && bwd.get(m, i+1));
            }
        }

        // +1 at the start of every feasible run placement, -1 past its end
        let mut coverage = vec![0isize; length + 1];
        if satisfiable {
            for (m, &run_length) in runs.iter().enumerate() {
                if run_length > length { continue; }
                for start in 0..=(length - run_length) {
                    let end = start + run_length;
                    if !counts.no_white(start, end) { continue; }

                    let before = match m {
                        0 => fwd.get(0, start),
                        _ => start >= 1 && squares[start-1] != Black && fwd.get(m, start-1),
                    };
                    if !before { continue; }

                    let after = if m + 1 == runs.len() {
                        bwd.get(m+1, end)
                    } else {
                        end < length && squares[end] != Black && bwd.get(m+1, end+1)
                    };
                    if !after { continue; }

                    coverage[start] += 1;
                    coverage[end] -= 1;
                }
            }
        }
        let mut can_be_black = vec![false; length];
        let mut running = 0isize;
        for (i, flag) in can_be_black.iter_mut().enumerate() {
            running += coverage[i];
            *flag = running > 0;
        }

        Feasibility { can_be_black, can_be_white, satisfiable }
    }

    pub fn len(&self) -> usize { self.can_be_black.len() }
    pub fn is_empty(&self) -> bool { self.can_be_black.is_empty() }

    /// False when no filling of the line agrees with its fixed squares.
    pub fn is_satisfiable(&self) -> bool { self.satisfiable }

    pub fn can_be_black(&self, index: usize) -> bool { self.can_be_black[index] }
    pub fn can_be_white(&self, index: usize) -> bool { self.can_be_white[index] }

    pub fn is_black(&self, index: usize) -> bool {
        self.can_be_black[index] && !self.can_be_white[index]
    }
    pub fn is_white(&self, index: usize) -> bool {
        self.can_be_white[index] && !self.can_be_black[index]
    }
    pub fn is_contradiction(&self, index: usize) -> bool {
        !(self.can_be_black[index] || self.can_be_white[index])
    }

    /// The color every consistent filling agrees on, if any.
    pub fn forced(&self, index: usize) -> Option<SquareStatus> {
        if self.is_black(index) {
            Some(Black)
        } else if self.is_white(index) {
            Some(White)
        } else {
            None
        }
    }
    pub fn contradictions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(move |&i| self.is_contradiction(i))
    }
}

impl<'a> Row<'a> {
    pub fn feasibility(&self) -> Feasibility {
        Feasibility::analyze(self.clue.runs(), &self.statuses())
    }

    /// Squares every consistent filling agrees on that are not yet fixed,
    /// as (position, color) pairs.
    pub fn forced_squares(&self, feasibility: &Feasibility) -> Vec<(usize, SquareStatus)> {
        (0..self.length).filter(|&i| !self.get_square(i).get_status().is_known())
                        .filter_map(|i| feasibility.forced(i).map(|status| (i, status)))
                        .collect()
    }
}

// ------------------------------------------------

struct StatusCounts {
    blacks: Vec<usize>,
    whites: Vec<usize>,
}
impl StatusCounts {
    fn new(squares: &[SquareStatus]) -> Self {
        let mut blacks = Vec::with_capacity(squares.len() + 1);
        let mut whites = Vec::with_capacity(squares.len() + 1);
        blacks.push(0);
        whites.push(0);
        for (i, &status) in squares.iter().enumerate() {
            blacks.push(blacks[i] + (status == Black) as usize);
            whites.push(whites[i] + (status == White) as usize);
        }
        StatusCounts { blacks, whites }
    }
    fn no_black(&self, start: usize, end: usize) -> bool {
        self.blacks[end] == self.blacks[start]
    }
    fn no_white(&self, start: usize, end: usize) -> bool {
        self.whites[end] == self.whites[start]
    }
}

/// Row-major (runs placed) x (position) reachability table.
struct ReachTable {
    width: usize,
    cells: Vec<bool>,
}
impl ReachTable {
    fn new(runs: usize, length: usize) -> Self {
        ReachTable {
            width: length + 1,
            cells: vec![false; (runs + 1) * (length + 1)],
        }
    }
    fn get(&self, m: usize, p: usize) -> bool {
        self.cells[m * self.width + p]
    }
    fn set(&mut self, m: usize, p: usize, value: bool) {
        self.cells[m * self.width + p] = value;
    }

    // (m, p): squares [0, p) can hold exactly runs 0..m
    fn forward(runs: &[usize], squares: &[SquareStatus], counts: &StatusCounts) -> Self {
        let length = squares.len();
        let mut table = ReachTable::new(runs.len(), length);
        for p in 0..=length {
            table.set(0, p, counts.no_black(0, p));
        }
        for m in 1..=runs.len() {
            let run_length = runs[m-1];
            for p in 1..=length {
                let mut reachable = squares[p-1] != Black && table.get(m, p-1);
                if !reachable && p >= run_length {
                    let start = p - run_length;
                    if counts.no_white(start, p) {
                        reachable = match m {
                            1 => table.get(0, start),
                            _ => start >= 1 && squares[start-1] != Black && table.get(m-1, start-1),
                        };
                    }
                }
                table.set(m, p, reachable);
            }
        }
        table
    }

    // (m, p): squares [p, length) can hold exactly runs m..
    fn backward(runs: &[usize], squares: &[SquareStatus], counts: &StatusCounts) -> Self {
        let length = squares.len();
        let k = runs.len();
        let mut table = ReachTable::new(k, length);
        for p in 0..=length {
            table.set(k, p, counts.no_black(p, length));
        }
        for m in (0..k).rev() {
            let run_length = runs[m];
            for p in (0..length).rev() {
                let mut reachable = squares[p] != Black && table.get(m, p+1);
                let end = p + run_length;
                if !reachable && end <= length && counts.no_white(p, end) {
                    reachable = if m + 1 == k {
                        table.get(k, end)
                    } else {
                        end < length && squares[end] != Black && table.get(m+1, end+1)
                    };
                }
                table.set(m, p, reachable);
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::grid::SquareStatus::Unknown;
    use proptest::prelude::*;

    fn parse(line: &str) -> Vec<SquareStatus> {
        line.chars()
            .map(|c| match c {
                '*' => Black,
                '.' => White,
                _   => Unknown,
            })
            .collect()
    }

    fn render(feasibility: &Feasibility) -> String {
        (0..feasibility.len())
            .map(|i| match (feasibility.can_be_black(i), feasibility.can_be_white(i)) {
                (true, false)  => '*',
                (false, true)  => '.',
                (true, true)   => '?',
                (false, false) => '!',
            })
            .collect()
    }

    fn runs_of(filling: &[bool]) -> Vec<usize> {
        let mut runs = Vec::new();
        let mut current = 0;
        for &black in filling {
            if black {
                current += 1;
            } else if current > 0 {
                runs.push(current);
                current = 0;
            }
        }
        if current > 0 {
            runs.push(current);
        }
        runs
    }

    // Exhaustive reference: try every filling of the line.
    fn brute_force(runs: &[usize], squares: &[SquareStatus]) -> (Vec<bool>, Vec<bool>) {
        let length = squares.len();
        let mut can_be_black = vec![false; length];
        let mut can_be_white = vec![false; length];
        for bits in 0u32..(1 << length) {
            let filling = (0..length).map(|i| bits & (1 << i) != 0).collect::<Vec<_>>();
            let agrees = squares.iter().zip(&filling).all(|(&status, &black)| match status {
                Black   => black,
                White   => !black,
                Unknown => true,
            });
            if !agrees || runs_of(&filling) != runs {
                continue;
            }
            for (i, &black) in filling.iter().enumerate() {
                if black { can_be_black[i] = true; } else { can_be_white[i] = true; }
            }
        }
        (can_be_black, can_be_white)
    }

    #[test]
    fn test_fully_constrained_line_resolves_in_one_pass() {
        let f = Feasibility::analyze(&[2, 1], &parse("????"));
        assert_eq!(render(&f), "**.*");
        let f = Feasibility::analyze(&[5], &parse("?????"));
        assert_eq!(render(&f), "*****");
    }

    #[test]
    fn test_overlap_of_single_run() {
        let f = Feasibility::analyze(&[3], &parse("????"));
        assert_eq!(render(&f), "?**?");
    }

    #[test]
    fn test_empty_clue_whitens_line() {
        let f = Feasibility::analyze(&[], &parse("???"));
        assert_eq!(render(&f), "...");
        assert!(f.is_satisfiable());
    }

    #[test]
    fn test_empty_clue_with_black_square_is_contradiction() {
        let f = Feasibility::analyze(&[], &parse("?*?"));
        assert!(!f.is_satisfiable());
        assert_eq!(f.contradictions().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_line_too_short_for_clue() {
        let f = Feasibility::analyze(&[3], &parse("??"));
        assert!(!f.is_satisfiable());
        assert_eq!(render(&f), "!!");
    }

    #[test]
    fn test_fixed_squares_narrow_placements() {
        // the run must cover the fixed black square at 3
        let f = Feasibility::analyze(&[2], &parse("???*??"));
        assert_eq!(render(&f), "..?*?.");
        // a white square splits the line
        let f = Feasibility::analyze(&[3], &parse("??.????"));
        assert_eq!(render(&f), "...?**?");
    }

    #[test]
    fn test_conflicting_fixed_squares_report_no_filling() {
        let f = Feasibility::analyze(&[1], &parse("*.*"));
        assert!(!f.is_satisfiable());
        assert!(f.is_contradiction(1));
    }

    #[test]
    fn test_zero_length_line() {
        assert!(Feasibility::analyze(&[], &[]).is_satisfiable());
        assert!(!Feasibility::analyze(&[1], &[]).is_satisfiable());
    }

    #[test]
    fn test_forced_colors() {
        let f = Feasibility::analyze(&[1, 1], &parse("???"));
        assert_eq!(f.forced(0), Some(Black));
        assert_eq!(f.forced(1), Some(White));
        assert_eq!(f.forced(2), Some(Black));
        let f = Feasibility::analyze(&[1], &parse("??"));
        assert_eq!(f.forced(0), None);
    }

    fn status() -> impl Strategy<Value = SquareStatus> {
        prop_oneof![4 => Just(Unknown), 1 => Just(Black), 1 => Just(White)]
    }

    proptest! {
        #[test]
        fn prop_matches_exhaustive_enumeration(
            squares in prop::collection::vec(status(), 0..10),
            runs in prop::collection::vec(1usize..5, 0..4),
        ) {
            let f = Feasibility::analyze(&runs, &squares);
            let (can_be_black, can_be_white) = brute_force(&runs, &squares);
            prop_assert_eq!(&f.can_be_black, &can_be_black);
            prop_assert_eq!(&f.can_be_white, &can_be_white);
            if !squares.is_empty() {
                prop_assert_eq!(f.is_satisfiable(), can_be_black.iter().zip(&can_be_white).any(|(b, w)| *b || *w));
            }
        }

        #[test]
        fn prop_picture_line_is_always_satisfiable(
            filling in prop::collection::vec(any::<bool>(), 0..12),
        ) {
            let runs = runs_of(&filling);
            let squares = vec![Unknown; filling.len()];
            let f = Feasibility::analyze(&runs, &squares);
            prop_assert!(f.is_satisfiable());
            for (i, &black) in filling.iter().enumerate() {
                match f.forced(i) {
                    Some(Black) => prop_assert!(black),
                    Some(White) => prop_assert!(!black),
                    _ => {}
                }
            }
        }
    }
}
