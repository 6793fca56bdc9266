//! Match detection and resolution tests

use fruit_match::core::{
    calculate_pass_score, find_matches, has_match, is_legal_swap, resolve_cascade, Board,
    SimpleRng,
};
use fruit_match::types::{GameEvent, Line, Symbol, EASY_ALPHABET};

use Symbol::{Apple as A, Avocado as V, Banana as B, Cherry as C, Grape as G, Watermelon as W};

/// 6x6 board with no run anywhere
fn quiet() -> Vec<Symbol> {
    let pattern = [A, B, C, G, W, V];
    (0..36).map(|i| pattern[(i % 6 + 2 * (i / 6)) % 6]).collect()
}

fn with_row_run(row: usize, cols: std::ops::Range<usize>, symbol: Symbol) -> Board {
    let mut cells = quiet();
    for col in cols {
        cells[row * 6 + col] = symbol;
    }
    Board::from_symbols(6, &cells).unwrap()
}

#[test]
fn test_run_lengths_score_and_classify() {
    // (run length, expected pass score, line clear, wildcard)
    let cases = [(3, 20, false, false), (4, 40, true, false), (5, 60, false, true)];
    for (len, score, clears, wildcard) in cases {
        let board = with_row_run(3, 0..len, A);
        let result = find_matches(&board);

        assert_eq!(result.run_cells, len, "run of {len}");
        assert_eq!(calculate_pass_score(result.run_cells), score);
        assert_eq!(!result.line_clears.is_empty(), clears);
        assert_eq!(!result.wildcards.is_empty(), wildcard);
    }
}

#[test]
fn test_line_clear_sweeps_whole_row() {
    let board = with_row_run(3, 2..6, G);
    let result = find_matches(&board);

    let removed: Vec<usize> = result.removals().collect();
    assert_eq!(removed, (18..24).collect::<Vec<_>>());
    assert_eq!(
        result.cleared_lines().into_iter().collect::<Vec<_>>(),
        vec![Line::Row(3)]
    );
}

#[test]
fn test_six_run_keeps_one_survivor() {
    let board = with_row_run(1, 0..6, A);
    let result = find_matches(&board);

    assert_eq!(result.wildcards.len(), 1);
    // Middle of 6..12 rounds toward the start
    assert_eq!(result.wildcards[0].index, 8);
    assert_eq!(result.removals().count(), 5);
}

#[test]
fn test_five_run_cascade_leaves_wildcard() {
    let mut board = with_row_run(5, 0..5, B);
    let mut rng = SimpleRng::new(21);
    let mut events = Vec::new();

    let report = resolve_cascade(&mut board, &EASY_ALPHABET, &mut rng, &mut events);

    assert!(report.score_delta >= 60);
    assert!(report.wildcards_created >= 1);
    assert!(events.contains(&GameEvent::TilesWildcarded { indices: vec![32] }));
    assert!(!has_match(&board));
    assert!(board.is_full());
}

#[test]
fn test_cascade_invariant_over_many_seeds() {
    for seed in 1..60 {
        let mut board = with_row_run(seed as usize % 6, 0..4, C);
        let mut rng = SimpleRng::new(seed);
        let mut events = Vec::new();

        let report = resolve_cascade(&mut board, &EASY_ALPHABET, &mut rng, &mut events);

        assert!(report.did_anything());
        assert!(board.is_full(), "seed {seed} left holes");
        assert!(!has_match(&board), "seed {seed} left a run");
    }
}

#[test]
fn test_legal_swap_check_never_mutates() {
    let mut rng = SimpleRng::new(4);
    let mut board = Board::generate(6, &EASY_ALPHABET, &mut rng).unwrap();
    let before = board.clone();

    for a in 0..36 {
        for b in [a + 1, a + 6] {
            if board.adjacent(a, b) {
                is_legal_swap(&mut board, a, b);
                assert_eq!(board, before);
            }
        }
    }
}
