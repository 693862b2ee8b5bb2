//! A game between the engine (Black) and an outside player (White).

use fastrand::Rng;
use log::debug;
use thiserror::Error;

use crate::board::{Board, Color, Coord, PlacementError, SizeError, coord_to_label};
use crate::constants::DEFAULT_SIZE;
use crate::engine::{self, BoardExhausted};
use crate::patterns::Pattern;
use crate::win::{Winner, compute_win};

/// Runtime settings for a [`Session`].
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub size: usize,
    pub seed: u64,
    /// Fallback cells; `None` uses the main diagonal, centre first.
    pub priority: Option<Vec<Coord>>,
}

impl EngineConfig {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            seed: fastrand::u64(..),
            priority: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_priority(mut self, cells: Vec<Coord>) -> Self {
        self.priority = Some(cells);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Size(#[from] SizeError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Exhausted(#[from] BoardExhausted),
    #[error("the game is over: {0}")]
    GameOver(Winner),
}

pub struct Session {
    board: Board,
    config: EngineConfig,
    rng: Rng,
}

impl Session {
    pub fn new(config: EngineConfig) -> Result<Self, SessionError> {
        let rng = Rng::with_seed(config.seed);
        let board = Self::fresh_board(&config)?;
        Ok(Self { board, config, rng })
    }

    fn fresh_board(config: &EngineConfig) -> Result<Board, SizeError> {
        let mut board = Board::new(config.size)?;
        let priority = config
            .priority
            .clone()
            .unwrap_or_else(|| engine::default_priority(config.size));
        board.set_priority(priority);
        engine::refresh(&mut board);
        Ok(board)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn live(&self) -> &[Pattern] {
        self.board.live()
    }

    pub fn winner(&self) -> Winner {
        compute_win(&self.board)
    }

    /// Start over on an empty board of the same size.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.board = Self::fresh_board(&self.config)?;
        debug!("board cleared, {}x{}", self.config.size, self.config.size);
        Ok(())
    }

    /// Start over on an empty board of a new size. A rejected size leaves
    /// the current game untouched.
    pub fn resize(&mut self, size: usize) -> Result<(), SessionError> {
        let config = EngineConfig {
            size,
            priority: None,
            ..self.config.clone()
        };
        self.board = Self::fresh_board(&config)?;
        self.config = config;
        Ok(())
    }

    fn ensure_running(&self) -> Result<(), SessionError> {
        match self.winner() {
            Winner::NoWinner => Ok(()),
            w => Err(SessionError::GameOver(w)),
        }
    }

    fn play_black(&mut self, c: Coord) -> Result<Coord, SessionError> {
        self.board.place(c.0, c.1, Color::Black)?;
        engine::prune(&mut self.board);
        Ok(c)
    }

    /// Play a Black move with nothing to answer.
    pub fn genmove(&mut self) -> Result<Coord, SessionError> {
        self.ensure_running()?;
        let c = engine::compute_move(&mut self.board, &mut self.rng)?;
        debug!("Black opens at {}", coord_to_label(c));
        self.play_black(c)
    }

    /// Play White's move and Black's answer.
    ///
    /// Returns `None` when White's move ends the game.
    pub fn respond(&mut self, white: Coord) -> Result<Option<Coord>, SessionError> {
        self.ensure_running()?;
        self.board.place(white.0, white.1, Color::White)?;
        if self.winner() != Winner::NoWinner {
            return Ok(None);
        }
        let reply = engine::compute_reply(&mut self.board, white, &mut self.rng)?;
        self.play_black(reply).map(Some)
    }
}
