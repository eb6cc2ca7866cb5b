// vim: set ai et ts=4 sts=4 sw=4:
use japanese_crossword::{solve, Grid, Puzzle, Solver, SolverConfig, SolutionStatus, SquareStatus};
use proptest::prelude::*;

fn clues(lines: &[&str]) -> Vec<Vec<usize>> {
    lines.iter()
         .map(|line| line.split_whitespace().map(|n| n.parse().unwrap()).collect())
         .collect()
}

fn runs_of<I: IntoIterator<Item = bool>>(line: I) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut current = 0;
    for black in line {
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

fn puzzle_of_picture(picture: &[Vec<bool>]) -> Puzzle {
    let width = picture.first().map(Vec::len).unwrap_or(0);
    let rows = picture.iter().map(|row| runs_of(row.iter().copied())).collect();
    let cols = (0..width).map(|x| runs_of(picture.iter().map(|row| row[x]))).collect();
    Puzzle::new(rows, cols)
}

#[test]
fn test_single_black_square() {
    let puzzle = Puzzle::new(vec![vec![1]], vec![vec![1]]);
    let report = solve(&puzzle);
    assert_eq!(report.status, SolutionStatus::Solved);
    assert_eq!(report.grid.get_status(0, 0), SquareStatus::Black);
    assert_eq!(report.to_string(), "*\n");
}

#[test]
fn test_empty_clues_whiten_everything() {
    let puzzle = Puzzle::new(vec![vec![]], vec![vec![0], vec![0], vec![0]]);
    let report = solve(&puzzle);
    assert_eq!(report.status, SolutionStatus::Solved);
    assert_eq!(report.to_string(), "...\n");
}

#[test]
fn test_plus_sign() {
    let lines = ["1", "1", "5", "1", "1"];
    let puzzle = Puzzle::new(clues(&lines), clues(&lines));
    let report = solve(&puzzle);
    assert_eq!(report.status, SolutionStatus::Solved);
    assert_eq!(report.to_string(), "..*..\n..*..\n*****\n..*..\n..*..\n");
}

#[test]
fn test_run_longer_than_line() {
    let puzzle = Puzzle::new(vec![vec![3]], vec![vec![2], vec![1]]);
    let report = solve(&puzzle);
    assert_eq!(report.status, SolutionStatus::IncorrectCrossword);
    assert_eq!(report.stats.rounds, 1);
}

#[test]
fn test_ambiguous_puzzle_is_partially_solved() {
    let puzzle = Puzzle::new(vec![vec![1], vec![1]], vec![vec![1], vec![1], vec![0]]);
    let report = solve(&puzzle);
    assert_eq!(report.status, SolutionStatus::PartiallySolved);
    assert_eq!(report.to_string(), "??.\n??.\n");
}

#[test]
fn test_incompatible_lines() {
    // row 0 wants both squares black, column 0 wants none
    let puzzle = Puzzle::new(vec![vec![2], vec![0]], vec![vec![0], vec![2]]);
    let report = solve(&puzzle);
    assert_eq!(report.status, SolutionStatus::IncorrectCrossword);
}

#[test]
fn test_ten_by_ten() {
    let puzzle = Puzzle::new(
        clues(&["5", "1 4", "1 1 1", "1 1 1 1", "1 1 1 1", "1 1 3 1", "1 1 1", "1 1 1", "3 4 1", "3 3"]),
        clues(&["8", "1 1", "1 1 5", "1 1", "1 2 2", "2 1 1", "5 1", "1 2", "1 1", "8"]),
    );
    let report = solve(&puzzle);
    assert_eq!(report.status, SolutionStatus::Solved);
    assert_eq!(report.stats.cells_fixed, 100);
    assert_eq!(report.to_string(), "\
.*****....
*....****.
*.....*..*
*.*...*..*
*...*.*..*
*.*.***..*
*.*......*
*.*......*
***.****.*
..***..***
");
}

#[test]
fn test_resolving_a_solved_grid_changes_nothing() {
    let lines = ["1", "1", "5", "1", "1"];
    let puzzle = Puzzle::new(clues(&lines), clues(&lines));
    let first = solve(&puzzle);
    assert_eq!(first.status, SolutionStatus::Solved);

    let again = Solver::with_grid(&puzzle, first.grid.clone(), SolverConfig::default())
        .unwrap()
        .solve();
    assert_eq!(again.status, SolutionStatus::Solved);
    assert_eq!(again.stats.cells_fixed, 0);
    assert_eq!(again.grid, first.grid);
}

#[test]
fn test_prefilled_grid_contradicting_clues() {
    let puzzle = Puzzle::new(vec![vec![1]], vec![vec![1]]);
    let grid = Grid::from_rows(1, &[vec![SquareStatus::White]]).unwrap();
    let report = Solver::with_grid(&puzzle, grid, SolverConfig::default()).unwrap().solve();
    assert_eq!(report.status, SolutionStatus::IncorrectCrossword);
    // the given square is never overwritten
    assert_eq!(report.grid.get_status(0, 0), SquareStatus::White);
}

#[test]
fn test_empty_puzzle() {
    let report = solve(&Puzzle::new(vec![], vec![]));
    assert_eq!(report.status, SolutionStatus::Solved);
    assert_eq!(report.to_string(), "");
}

#[test]
fn test_columns_without_rows() {
    assert_eq!(solve(&Puzzle::new(vec![], vec![vec![0], vec![]])).status, SolutionStatus::Solved);
}

fn picture() -> impl Strategy<Value = Vec<Vec<bool>>> {
    (1usize..7, 1usize..7).prop_flat_map(|(width, height)| {
        prop::collection::vec(prop::collection::vec(any::<bool>(), width), height)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_fixed_squares_agree_with_generating_picture(picture in picture()) {
        let puzzle = puzzle_of_picture(&picture);
        let report = solve(&puzzle);
        prop_assert_ne!(report.status, SolutionStatus::IncorrectCrossword);
        for (y, row) in picture.iter().enumerate() {
            for (x, &black) in row.iter().enumerate() {
                match report.grid.get_status(x, y) {
                    SquareStatus::Black   => prop_assert!(black),
                    SquareStatus::White   => prop_assert!(!black),
                    SquareStatus::Unknown => prop_assert_eq!(report.status, SolutionStatus::PartiallySolved),
                }
            }
        }
        prop_assert_eq!(report.stats.cells_fixed, picture.len() * picture[0].len() - report.grid.unknown_count());
    }

    #[test]
    fn prop_result_is_a_fixpoint(picture in picture(), threads in 1usize..4) {
        let puzzle = puzzle_of_picture(&picture);
        let config = SolverConfig { threads: Some(threads) };
        let first = Solver::with_config(&puzzle, config).unwrap().solve();
        let again = Solver::with_grid(&puzzle, first.grid.clone(), config).unwrap().solve();
        prop_assert_eq!(again.status, first.status);
        prop_assert_eq!(again.stats.cells_fixed, 0);
        prop_assert_eq!(&again.grid, &first.grid);
    }
}
