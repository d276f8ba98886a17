//! Score, lives, wave and the Playing/GameOver machine

use serde::{Deserialize, Serialize};

use super::state::GamePhase;

/// Session bookkeeping. Fields are private so the score can only grow and
/// the phase can only move to GameOver through [`Session::lose_life`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    score: u64,
    lives: u32,
    wave: u32,
    phase: GamePhase,
}

impl Session {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            wave: 1,
            phase: GamePhase::Playing,
        }
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[inline]
    pub fn wave(&self) -> u32 {
        self.wave
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Take one life. Returns true when this loss ends the game.
    pub fn lose_life(&mut self) -> bool {
        debug_assert!(self.lives > 0, "life lost with none remaining");
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 && self.phase == GamePhase::Playing {
            self.phase = GamePhase::GameOver;
            log::info!("Game over: score={} wave={}", self.score, self.wave);
            return true;
        }
        false
    }

    /// Move to the next wave, returning its number
    pub fn next_wave(&mut self) -> u32 {
        self.wave += 1;
        self.wave
    }

    /// Back to a fresh Playing session
    pub fn reset(&mut self, lives: u32) {
        *self = Self::new(lives);
    }
}
