//! Integration tests for whole games played through the hint

use fruit_match::core::{has_match, GameSession, SessionConfig};
use fruit_match::types::{Difficulty, GameEvent, GameStatus};

/// Play until the game ends, always taking the hint. Returns the score trace.
fn autoplay(session: &mut GameSession) -> Vec<u32> {
    let mut scores = Vec::new();
    while !session.is_over() {
        let (a, b) = session.request_hint().expect("playing session always has a move");
        session.attempt_swap(a, b).expect("hinted swap is legal");

        assert!(session.board().is_full());
        assert!(!has_match(session.board()));
        scores.push(session.score());
    }
    scores
}

#[test]
fn test_game_lifecycle() {
    let mut session = GameSession::new(SessionConfig::new(Difficulty::Easy, 12345)).unwrap();
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.moves_left(), 20);

    let scores = autoplay(&mut session);

    assert!(session.is_over());
    assert!(!scores.is_empty() && scores.len() <= 20);
    // Scores only grow when no tools are used
    assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    let ended: Vec<&GameEvent> = session
        .events()
        .iter()
        .filter(|e| matches!(e, GameEvent::GameEnded { .. }))
        .collect();
    assert_eq!(ended.len(), 1);
}

#[test]
fn test_same_seed_same_game() {
    for difficulty in Difficulty::ALL {
        let config = SessionConfig::new(difficulty, 4242);
        let mut first = GameSession::new(config.clone()).unwrap();
        let mut second = GameSession::new(config).unwrap();

        assert_eq!(autoplay(&mut first), autoplay(&mut second));
        assert_eq!(first.board(), second.board());
        assert_eq!(first.take_events(), second.take_events());
    }
}

#[test]
fn test_every_difficulty_finishes() {
    for difficulty in Difficulty::ALL {
        for seed in 1..6 {
            let mut session = GameSession::new(SessionConfig::new(difficulty, seed)).unwrap();
            let rules = difficulty.rules();
            assert_eq!(session.board().size(), rules.board_size);

            autoplay(&mut session);

            match session.status() {
                GameStatus::Won => assert!(session.score() >= rules.target),
                GameStatus::Lost => {
                    assert!(session.score() < rules.target);
                    assert_eq!(session.moves_left(), 0);
                }
                GameStatus::Playing => panic!("autoplay stopped mid-game"),
            }
            assert_eq!(session.progress_percent() == 100, session.status() == GameStatus::Won);
        }
    }
}

#[test]
fn test_restart_continues_rng_stream() {
    let mut session = GameSession::new(SessionConfig::new(Difficulty::Hard, 8)).unwrap();
    let first_board = session.board().clone();
    autoplay(&mut session);

    session.restart().unwrap();

    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.moves_left(), 20);
    assert_eq!(session.score(), 0);
    assert_ne!(session.board(), &first_board);
    assert!(session.events().iter().all(|e| !matches!(e, GameEvent::GameEnded { .. })));
}
