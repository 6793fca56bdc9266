//! End-to-end session tests: swaps, scoring, tools, undo and game end

use fruit_match::core::{
    has_any_move, has_match, Board, GameSession, RandomSource, SessionConfig, SimpleRng,
    SwapError, ToolError,
};
use fruit_match::types::{
    Difficulty, GameEvent, GameStatus, Line, ShuffleReason, Symbol, Tool, EXTRA_MOVES_GRANTED,
};

use Symbol::{Apple as A, Avocado as V, Banana as B, Cherry as C, Grape as G, Watermelon as W};

/// Replays a fixed list of draws, cycling when it runs out
struct ScriptedRng {
    draws: Vec<u32>,
    pos: usize,
}

impl RandomSource for ScriptedRng {
    fn next_range(&mut self, max: u32) -> u32 {
        let v = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        v % max.max(1)
    }
}

/// Refills row 0 with apple, banana, cherry, ... which never completes a run on
/// the boards below
fn scripted() -> ScriptedRng {
    ScriptedRng {
        draws: vec![0, 1, 2],
        pos: 0,
    }
}

fn quiet() -> Vec<Symbol> {
    let pattern = [A, B, C, G, W, V];
    (0..36).map(|i| pattern[(i % 6 + 2 * (i / 6)) % 6]).collect()
}

/// Swapping cells 2 and 3 makes exactly one apple 3-run in row 0
fn three_run_board() -> Board {
    let mut cells = quiet();
    cells[1] = A;
    cells[2] = G;
    cells[3] = A;
    Board::from_symbols(6, &cells).unwrap()
}

/// Swapping cells 2 and 8 lines up `len` apples from the start of row 0
fn vertical_swap_board(len: usize) -> Board {
    let mut cells = quiet();
    for col in 0..len {
        cells[col] = A;
    }
    cells[2] = C;
    cells[8] = A;
    Board::from_symbols(6, &cells).unwrap()
}

fn easy_session(config: SessionConfig, board: Board) -> GameSession<ScriptedRng> {
    GameSession::with_board(config, board, scripted()).unwrap()
}

#[test]
fn test_three_run_scores_twenty_and_costs_a_move() {
    let mut session = easy_session(SessionConfig::default(), three_run_board());
    assert_eq!(session.target(), 500);

    session.attempt_swap(2, 3).unwrap();

    assert_eq!(session.score(), 20);
    assert_eq!(session.moves_left(), 19);
    assert_eq!(session.status(), GameStatus::Playing);
    assert!(!has_match(session.board()));
}

#[test]
fn test_four_run_clears_the_row() {
    let mut session = easy_session(SessionConfig::default(), vertical_swap_board(4));

    session.attempt_swap(2, 8).unwrap();

    assert_eq!(session.score(), 40);
    let events = session.take_events();
    assert!(events.contains(&GameEvent::LineCleared { line: Line::Row(0) }));
    assert!(events.contains(&GameEvent::TilesRemoved {
        indices: (0..6).collect()
    }));
}

#[test]
fn test_five_run_leaves_wildcard_at_center() {
    let mut session = easy_session(SessionConfig::default(), vertical_swap_board(5));

    let outcome = session.attempt_swap(2, 8).unwrap();

    assert_eq!(session.score(), 60);
    assert_eq!(outcome.cascade.wildcards_created, 1);
    let events = session.take_events();
    assert!(events.contains(&GameEvent::TilesRemoved {
        indices: vec![0, 1, 3, 4]
    }));
    let wildcarded = events
        .iter()
        .position(|e| *e == GameEvent::TilesWildcarded { indices: vec![2] });
    assert!(wildcarded.is_some());

    // The refill leaves this board deadlocked, so the wildcard may be moved by
    // the reshuffle that follows while staying on the board
    assert!(outcome.reshuffled);
    let reshuffled = events.iter().position(|e| {
        *e == GameEvent::Reshuffled {
            reason: ShuffleReason::Deadlock,
        }
    });
    assert!(wildcarded < reshuffled);
    let specials = session.board().special_tiles();
    assert_eq!(specials.len(), 1);
    assert!(specials.values().all(|&symbol| symbol == A));
}

#[test]
fn test_rejected_swaps_do_not_cost_moves() {
    let mut session = easy_session(SessionConfig::default(), three_run_board());

    assert_eq!(session.attempt_swap(0, 0), Err(SwapError::SameCell));
    assert_eq!(
        session.attempt_swap(0, 2),
        Err(SwapError::NotAdjacent { from: 0, to: 2 })
    );
    assert_eq!(
        session.attempt_swap(30, 31),
        Err(SwapError::NoMatch { from: 30, to: 31 })
    );
    assert_eq!(session.moves_left(), 20);
    assert_eq!(session.last_swap(), None);
    assert_eq!(
        session.take_events(),
        vec![GameEvent::InvalidSwap { from: 30, to: 31 }]
    );
}

#[test]
fn test_reaching_target_wins() {
    // Plenty of moves so the target is reached before they run out
    let config = SessionConfig {
        moves: Some(1000),
        ..SessionConfig::new(Difficulty::Easy, 2024)
    };
    let mut session = GameSession::new(config).unwrap();

    let mut moves_before_last = 0;
    while !session.is_over() {
        let (a, b) = session.request_hint().unwrap();
        moves_before_last = session.moves_left();
        session.attempt_swap(a, b).unwrap();
    }

    assert_eq!(session.status(), GameStatus::Won);
    assert!(session.score() >= 500);
    assert!(moves_before_last > 1);
    assert_eq!(session.moves_left(), 0);
    assert_eq!(session.request_hint(), None);
    assert_eq!(session.attempt_swap(0, 1), Err(SwapError::GameOver));
    assert!(session.events().contains(&GameEvent::GameEnded {
        won: true,
        final_score: session.score()
    }));
}

#[test]
fn test_running_out_of_moves_loses() {
    let config = SessionConfig {
        moves: Some(1),
        ..SessionConfig::default()
    };
    let mut session = easy_session(config, three_run_board());

    let outcome = session.attempt_swap(2, 3).unwrap();

    assert_eq!(outcome.status, GameStatus::Lost);
    assert_eq!(session.score(), 20);
    assert!(session.events().contains(&GameEvent::GameEnded {
        won: false,
        final_score: 20
    }));
    for tool in Tool::ALL {
        assert!(!session.tool_available(tool));
    }
}

#[test]
fn test_undo_restores_exact_pre_swap_state() {
    let mut session = easy_session(SessionConfig::default(), vertical_swap_board(5));
    let before = session.board().clone();

    session.attempt_swap(2, 8).unwrap();
    assert_ne!(session.board(), &before);

    assert_eq!(session.use_undo_tool(), Ok((2, 8)));
    assert_eq!(session.board(), &before);
    assert_eq!(session.score(), 0);
    assert_eq!(session.moves_left(), 20);
    assert!(session.board().special_tiles().is_empty());
    assert!(!session.undo_available());

    session.attempt_swap(2, 8).unwrap();
    assert_eq!(
        session.use_undo_tool(),
        Err(ToolError::AlreadyUsed(Tool::Undo))
    );
}

#[test]
fn test_extra_move_tool() {
    let config = SessionConfig {
        moves: Some(1000),
        ..SessionConfig::new(Difficulty::Easy, 99)
    };
    let mut session = GameSession::new(config).unwrap();
    while session.score() < 70 {
        let (a, b) = session.request_hint().unwrap();
        session.attempt_swap(a, b).unwrap();
    }
    let (score, moves) = (session.score(), session.moves_left());

    assert_eq!(session.use_extra_move_tool(), Ok(moves + EXTRA_MOVES_GRANTED));
    assert_eq!(session.score(), score - 70);
    assert_eq!(
        session.use_extra_move_tool(),
        Err(ToolError::AlreadyUsed(Tool::ExtraMove))
    );
}

#[test]
fn test_reshuffle_tool() {
    let config = SessionConfig {
        moves: Some(1000),
        ..SessionConfig::new(Difficulty::Medium, 5)
    };
    let mut session = GameSession::new(config).unwrap();
    while session.score() < 50 {
        let (a, b) = session.request_hint().unwrap();
        session.attempt_swap(a, b).unwrap();
    }
    let score = session.score();
    session.take_events();

    let cascade = session.use_reshuffle_tool().unwrap();

    assert_eq!(session.score(), score - 50 + cascade.score_delta);
    assert!(session.tool_used(Tool::Reshuffle));
    assert!(session.events().contains(&GameEvent::Reshuffled {
        reason: ShuffleReason::Tool
    }));
    assert!(!has_match(session.board()));
    assert_eq!(
        session.use_reshuffle_tool(),
        Err(ToolError::AlreadyUsed(Tool::Reshuffle))
    );
}

#[test]
fn test_deadlocked_board_is_reshuffled() {
    let board = Board::from_symbols(
        4,
        &[
            A, B, C, G, //
            C, G, A, B, //
            A, B, C, G, //
            C, G, A, B, //
        ],
    )
    .unwrap();
    let mut probe = board.clone();
    assert!(!has_any_move(&mut probe));

    let mut session =
        GameSession::with_board(SessionConfig::default(), board, SimpleRng::new(31)).unwrap();

    assert!(session.request_hint().is_some());
    assert!(!session.shuffle_pending());
    assert!(session.take_events().contains(&GameEvent::Reshuffled {
        reason: ShuffleReason::Deadlock
    }));
}

#[test]
fn test_events_serialize_for_presentation() {
    let mut session = easy_session(SessionConfig::default(), three_run_board());
    session.attempt_swap(2, 3).unwrap();

    let json = serde_json::to_string(&session.take_events()).unwrap();
    assert!(json.contains(r#""type":"tiles_removed""#));
    assert!(json.contains(r#""type":"score_changed","score":20"#));

    let snapshot = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(snapshot["score"], 20);
    assert_eq!(snapshot["status"], "playing");
    assert_eq!(snapshot["tools"][2]["tool"], "undo");
}
