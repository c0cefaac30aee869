//! Search configuration and difficulty presets.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{
    ITERS_EASY, ITERS_HARD, ITERS_MEDIUM, PROB_HEURISTIC_ROLLOUT, ROLLOUT_DEPTH, UCT_C,
};

/// Configuration for one Monte Carlo Tree Search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Number of select/expand/rollout/backpropagate iterations.
    pub iterations: usize,

    /// UCT exploration constant.
    pub exploration: f64,

    /// Maximum plies per rollout.
    pub rollout_depth: usize,

    /// Chance that a rollout ply uses the move heuristic.
    pub heuristic_prob: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: ITERS_EASY,
            exploration: UCT_C,
            rollout_depth: ROLLOUT_DEPTH,
            heuristic_prob: PROB_HEURISTIC_ROLLOUT,
        }
    }
}

impl SearchConfig {
    /// Default settings with the given iteration budget.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }
}

/// Named iteration budgets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn iterations(self) -> usize {
        match self {
            Difficulty::Easy => ITERS_EASY,
            Difficulty::Medium => ITERS_MEDIUM,
            Difficulty::Hard => ITERS_HARD,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid difficulty '{0}': expected easy, medium, hard or a positive iteration count")]
pub struct ParseBudgetError(String);

/// An iteration budget given either by preset name or as a plain count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Budget(pub usize);

impl FromStr for Budget {
    type Err = ParseBudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "easy" => return Ok(Budget(Difficulty::Easy.iterations())),
            "medium" => return Ok(Budget(Difficulty::Medium.iterations())),
            "hard" => return Ok(Budget(Difficulty::Hard.iterations())),
            _ => {}
        }
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Budget(n)),
            _ => Err(ParseBudgetError(s.to_string())),
        }
    }
}
