//! Game session module - owns the board and drives a game from start to finish
//!
//! The session ties together the board, the resolution engine, the deadlock
//! shuffler and the scoring rules. Every command runs to completion before it
//! returns: swaps are fully cascaded, deadlocks are reshuffled and the end of the
//! game is evaluated, so the state seen between commands is always settled.
//!
//! Changes are reported as [`GameEvent`]s buffered inside the session; a
//! presentation layer drains them with [`GameSession::take_events`] and animates
//! them at its own pace.

use tracing::{error, info, trace};

use crate::board::{check_alphabet, Board};
use crate::config::SessionConfig;
use crate::error::{BoardError, SwapError, ToolError};
use crate::matcher::has_match;
use crate::moves::{find_move, is_legal_swap};
use crate::resolver::{push_changes, resolve_cascade, CascadeReport};
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{deduct_cost, progress_percent};
use crate::shuffle::{shuffle_tiles, shuffle_until_playable};
use crate::snapshot::{SessionSnapshot, ToolSnapshot};
use crate::types::{
    Cell, DifficultyRules, GameEvent, GameStatus, ShuffleReason, Tool, EXTRA_MOVES_GRANTED,
};

/// What an accepted swap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    pub cascade: CascadeReport,
    /// The board deadlocked after the cascade and was reshuffled
    pub reshuffled: bool,
    pub status: GameStatus,
}

/// Single-slot undo buffer, overwritten by every accepted swap
#[derive(Debug, Clone)]
struct UndoSnapshot {
    board: Board,
    score: u32,
    moves_left: u32,
    last_swap: (usize, usize),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession<R: RandomSource = SimpleRng> {
    config: SessionConfig,
    rules: DifficultyRules,
    board: Board,
    rng: R,
    score: u32,
    moves_left: u32,
    status: GameStatus,
    /// Indexed by [`tool_slot`]
    tools_used: [bool; 3],
    undo: Option<UndoSnapshot>,
    /// Set while a deadlocked board is waiting for its reshuffle
    shuffle_pending: bool,
    /// Buffered notifications (drained by the presentation layer)
    events: Vec<GameEvent>,
    /// Monotonic game id (increments on restart)
    game_id: u32,
}

impl GameSession<SimpleRng> {
    /// Start a game seeded from `config.seed`
    pub fn new(config: SessionConfig) -> Result<Self, BoardError> {
        let rng = SimpleRng::new(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Start a game on a freshly generated board drawn from `rng`
    pub fn with_rng(config: SessionConfig, mut rng: R) -> Result<Self, BoardError> {
        let rules = config.rules();
        let board = Board::generate(rules.board_size, rules.alphabet, &mut rng)?;
        Self::with_board(config, board, rng)
    }

    /// Start a game on a prepared board.
    ///
    /// The board may be any supported size; refills still draw from the
    /// difficulty's alphabet. A deadlocked board is reshuffled before play starts.
    pub fn with_board(config: SessionConfig, board: Board, rng: R) -> Result<Self, BoardError> {
        let rules = config.rules();
        check_alphabet(rules.alphabet)?;

        let mut session = Self {
            config,
            rules,
            board,
            rng,
            score: 0,
            moves_left: rules.moves,
            status: GameStatus::Playing,
            tools_used: [false; 3],
            undo: None,
            shuffle_pending: false,
            events: Vec::new(),
            game_id: 0,
        };
        session.check_deadlock();
        info!(
            difficulty = session.config.difficulty.as_str(),
            size = session.board.size(),
            moves = session.moves_left,
            target = session.rules.target,
            "session started"
        );
        Ok(session)
    }

    /// Start a fresh game with the same configuration, continuing the RNG stream
    pub fn restart(&mut self) -> Result<(), BoardError> {
        let board = Board::generate(self.rules.board_size, self.rules.alphabet, &mut self.rng)?;
        self.board = board;
        self.score = 0;
        self.moves_left = self.rules.moves;
        self.status = GameStatus::Playing;
        self.tools_used = [false; 3];
        self.undo = None;
        self.shuffle_pending = false;
        self.events.clear();
        self.game_id += 1;
        self.check_deadlock();
        info!(game_id = self.game_id, "session restarted");
        Ok(())
    }

    // ---- queries ----

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cells(&self) -> &[Cell] {
        self.board.cells()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn target(&self) -> u32 {
        self.rules.target
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn shuffle_pending(&self) -> bool {
        self.shuffle_pending
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn progress_percent(&self) -> u8 {
        progress_percent(self.score, self.rules.target)
    }

    pub fn tool_used(&self, tool: Tool) -> bool {
        self.tools_used[tool_slot(tool)]
    }

    /// Whether the tool's button would be enabled right now
    pub fn tool_available(&self, tool: Tool) -> bool {
        self.check_tool(tool).is_ok()
    }

    pub fn undo_available(&self) -> bool {
        self.tool_available(Tool::Undo)
    }

    /// Pair swapped by the move the undo slot would revert
    pub fn last_swap(&self) -> Option<(usize, usize)> {
        self.undo.as_ref().map(|u| u.last_swap)
    }

    /// Drain the buffered events, oldest first
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// An adjacent pair whose swap would match, or `None` when the game is over
    pub fn request_hint(&self) -> Option<(usize, usize)> {
        if self.status.is_over() || self.shuffle_pending {
            return None;
        }
        let mut probe = self.board.clone();
        find_move(&mut probe)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let tools = Tool::ALL.map(|tool| ToolSnapshot {
            tool,
            used: self.tool_used(tool),
            available: self.tool_available(tool),
        });
        let rows = self
            .board
            .to_string()
            .lines()
            .map(str::to_owned)
            .collect();

        SessionSnapshot {
            difficulty: self.config.difficulty,
            size: self.board.size(),
            cells: self.board.cells().to_vec(),
            rows,
            score: self.score,
            moves_left: self.moves_left,
            target: self.rules.target,
            progress: self.progress_percent(),
            status: self.status,
            tools,
            undo_available: self.undo_available(),
            shuffle_pending: self.shuffle_pending,
            wildcards: self.board.special_tiles().into_keys().collect(),
        }
    }

    // ---- commands ----

    /// Swap two cells and resolve the result.
    ///
    /// Rejections leave every piece of state untouched; only a swap between
    /// adjacent cells that makes no match emits `InvalidSwap`.
    pub fn attempt_swap(&mut self, a: usize, b: usize) -> Result<SwapOutcome, SwapError> {
        if let Err(err) = self.check_swap(a, b) {
            trace!(a, b, %err, "swap rejected");
            if let SwapError::NoMatch { from, to } = err {
                self.events.push(GameEvent::InvalidSwap { from, to });
            }
            return Err(err);
        }

        self.undo = Some(UndoSnapshot {
            board: self.board.clone(),
            score: self.score,
            moves_left: self.moves_left,
            last_swap: (a, b),
        });

        self.board.swap(a, b);
        for index in [a, b] {
            if let Some(tile) = self.board.get(index) {
                self.events.push(GameEvent::TileChanged { index, tile });
            }
        }
        self.moves_left = self.moves_left.saturating_sub(1);

        let cascade = self.resolve();
        let reshuffled = self.check_deadlock();
        self.evaluate_end();

        Ok(SwapOutcome {
            cascade,
            reshuffled,
            status: self.status,
        })
    }

    /// Permute the board for 50 points. Any runs the permutation creates are
    /// cascaded and scored.
    pub fn use_reshuffle_tool(&mut self) -> Result<CascadeReport, ToolError> {
        self.check_tool(Tool::Reshuffle)?;
        self.spend(Tool::Reshuffle);

        let before: Vec<Cell> = self.board.cells().to_vec();
        shuffle_tiles(&mut self.board, &mut self.rng);
        push_changes(&before, &self.board, &mut self.events);
        self.events.push(GameEvent::Reshuffled {
            reason: ShuffleReason::Tool,
        });

        let cascade = self.resolve();
        self.check_deadlock();
        self.evaluate_end();
        Ok(cascade)
    }

    /// Trade 70 points for three more moves
    pub fn use_extra_move_tool(&mut self) -> Result<u32, ToolError> {
        self.check_tool(Tool::ExtraMove)?;
        self.spend(Tool::ExtraMove);
        self.moves_left = self.moves_left.saturating_add(EXTRA_MOVES_GRANTED);
        Ok(self.moves_left)
    }

    /// Restore the board, score and moves from before the last accepted swap.
    /// Tool flags are not restored.
    pub fn use_undo_tool(&mut self) -> Result<(usize, usize), ToolError> {
        self.check_tool(Tool::Undo)?;
        let Some(snapshot) = self.undo.take() else {
            return Err(ToolError::NoSnapshot);
        };
        self.tools_used[tool_slot(Tool::Undo)] = true;

        let before: Vec<Cell> = self.board.cells().to_vec();
        self.board = snapshot.board;
        self.moves_left = snapshot.moves_left;
        push_changes(&before, &self.board, &mut self.events);
        self.set_score(snapshot.score);

        info!(
            score = self.score,
            moves_left = self.moves_left,
            "undo restored previous move"
        );
        Ok(snapshot.last_swap)
    }

    /// Run the pending deadlock reshuffle.
    ///
    /// Returns whether a shuffle happened. Normally called internally right after
    /// the deadlock is found; exposed so a caller can retry after a failure.
    pub fn resolve_deadlock(&mut self) -> Result<bool, BoardError> {
        if !self.shuffle_pending {
            return Ok(false);
        }
        let before: Vec<Cell> = self.board.cells().to_vec();
        let report = shuffle_until_playable(
            &mut self.board,
            self.rules.alphabet,
            &mut self.rng,
            self.config.max_shuffle_attempts,
        )?;
        self.shuffle_pending = false;

        push_changes(&before, &self.board, &mut self.events);
        self.events.push(GameEvent::Reshuffled {
            reason: ShuffleReason::Deadlock,
        });
        info!(
            attempts = report.attempts,
            regenerated = report.regenerated,
            "deadlock reshuffled"
        );
        Ok(true)
    }

    // ---- internals ----

    fn check_swap(&mut self, a: usize, b: usize) -> Result<(), SwapError> {
        if self.status.is_over() {
            return Err(SwapError::GameOver);
        }
        if self.shuffle_pending {
            return Err(SwapError::ShufflePending);
        }
        if a == b {
            return Err(SwapError::SameCell);
        }
        for index in [a, b] {
            if index >= self.board.len() {
                return Err(SwapError::OutOfBounds { index });
            }
        }
        if !self.board.adjacent(a, b) {
            return Err(SwapError::NotAdjacent { from: a, to: b });
        }
        if !is_legal_swap(&mut self.board, a, b) {
            return Err(SwapError::NoMatch { from: a, to: b });
        }
        Ok(())
    }

    fn check_tool(&self, tool: Tool) -> Result<(), ToolError> {
        if self.status.is_over() {
            return Err(ToolError::GameOver);
        }
        if self.shuffle_pending {
            return Err(ToolError::ShufflePending);
        }
        if self.tool_used(tool) {
            return Err(ToolError::AlreadyUsed(tool));
        }
        if self.score < tool.cost() {
            return Err(ToolError::InsufficientScore {
                tool,
                required: tool.cost(),
                score: self.score,
            });
        }
        if tool == Tool::Undo && self.undo.is_none() {
            return Err(ToolError::NoSnapshot);
        }
        Ok(())
    }

    fn spend(&mut self, tool: Tool) {
        self.tools_used[tool_slot(tool)] = true;
        self.set_score(deduct_cost(self.score, tool.cost()));
        info!(
            tool = tool.as_str(),
            cost = tool.cost(),
            score = self.score,
            "tool used"
        );
    }

    fn set_score(&mut self, score: u32) {
        if score != self.score {
            self.score = score;
            self.events.push(GameEvent::ScoreChanged { score });
        }
    }

    fn resolve(&mut self) -> CascadeReport {
        let report = resolve_cascade(
            &mut self.board,
            self.rules.alphabet,
            &mut self.rng,
            &mut self.events,
        );
        if report.score_delta > 0 {
            self.set_score(self.score.saturating_add(report.score_delta));
        }
        report
    }

    /// Flag and reshuffle a board with no legal move. Returns whether it shuffled.
    fn check_deadlock(&mut self) -> bool {
        if has_match(&self.board) || find_move(&mut self.board).is_some() {
            return false;
        }
        self.shuffle_pending = true;
        match self.resolve_deadlock() {
            Ok(shuffled) => shuffled,
            Err(err) => {
                error!(%err, "deadlock reshuffle failed");
                false
            }
        }
    }

    fn evaluate_end(&mut self) {
        if self.status.is_over() {
            return;
        }
        if self.score >= self.rules.target {
            self.status = GameStatus::Won;
            self.moves_left = 0;
        } else if self.moves_left == 0 {
            self.status = GameStatus::Lost;
        } else {
            return;
        }

        self.events.push(GameEvent::GameEnded {
            won: self.status == GameStatus::Won,
            final_score: self.score,
        });
        info!(
            status = self.status.as_str(),
            score = self.score,
            target = self.rules.target,
            "game ended"
        );
    }
}

fn tool_slot(tool: Tool) -> usize {
    match tool {
        Tool::Reshuffle => 0,
        Tool::ExtraMove => 1,
        Tool::Undo => 2,
    }
}
