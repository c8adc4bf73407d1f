use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::border::{Board, Position};
use crate::error::{ConfigurationError, LoadError};

/// What the decision function gets to see each tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// Every cell of the board followed by the heading one-hot.
    #[default]
    Board,
    /// Eight hand-picked features around the head.
    Features,
}

/// Construction parameters of one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub width: i32,
    pub height: i32,
    pub seed: u64,
    pub initial_snake_length: usize,
    /// `Some(n)` selects discrete multi-snack mode with `n` snacks; `None`
    /// selects single-snack shaped mode.
    pub snack_count: Option<usize>,
    pub snack_eaten_points: f64,
    pub moving_toward_snack_points: f64,
    pub moving_away_snack_points: f64,
    pub max_score_threshold: Option<f64>,
    pub min_score_threshold: Option<f64>,
    pub representation: Representation,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 18,
            height: 18,
            seed: 777,
            initial_snake_length: 5,
            snack_count: None,
            snack_eaten_points: 4.0,
            moving_toward_snack_points: 0.1,
            moving_away_snack_points: -0.2,
            max_score_threshold: Some(10.0),
            min_score_threshold: Some(-10.0),
            representation: Representation::Board,
        }
    }
}

/// How score moves on each tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RewardPolicy {
    /// Only eating pays.
    Discrete { snack_eaten: f64 },
    /// Eating pays, and every other move is rewarded or penalised by whether
    /// it brought the head closer to the snack.
    Shaped { snack_eaten: f64, toward: f64, away: f64 },
}

impl RewardPolicy {
    pub fn snack_eaten(&self) -> f64 {
        match *self {
            RewardPolicy::Discrete { snack_eaten } => snack_eaten,
            RewardPolicy::Shaped { snack_eaten, .. } => snack_eaten,
        }
    }

    /// Score delta for a move that did not eat.
    pub fn shaping(&self, before: f64, after: f64) -> f64 {
        match *self {
            RewardPolicy::Discrete { .. } => 0.0,
            RewardPolicy::Shaped { toward, away, .. } => {
                if after < before { toward } else { away }
            }
        }
    }
}

/// Optional early-termination bounds on the score.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct ScoreBounds {
    pub max: Option<f64>,
    pub min: Option<f64>,
}

impl SimulationConfig {
    pub fn new(width: i32, height: i32, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            ..Default::default()
        }
    }

    /// Multi-snack survival mode with `count` snacks: +1 per snack, no
    /// distance shaping, no score thresholds.
    pub fn discrete(mut self, count: usize) -> Self {
        self.snack_count = Some(count);
        self.snack_eaten_points = 1.0;
        self.unbounded()
    }

    /// Drops both score thresholds.
    pub fn unbounded(mut self) -> Self {
        self.max_score_threshold = None;
        self.min_score_threshold = None;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn board(&self) -> Board {
        Board::new(self.width, self.height)
    }

    /// Number of snacks kept on the board.
    pub fn snacks(&self) -> usize {
        self.snack_count.unwrap_or(1)
    }

    pub fn reward_policy(&self) -> RewardPolicy {
        match self.snack_count {
            Some(_) => RewardPolicy::Discrete { snack_eaten: self.snack_eaten_points },
            None => RewardPolicy::Shaped {
                snack_eaten: self.snack_eaten_points,
                toward: self.moving_toward_snack_points,
                away: self.moving_away_snack_points,
            },
        }
    }

    pub fn score_bounds(&self) -> ScoreBounds {
        ScoreBounds {
            max: self.max_score_threshold,
            min: self.min_score_threshold,
        }
    }

    /// Head cell of the initial snake: the rounded-up centre of the board.
    pub fn initial_head(&self) -> Position {
        Position::new(div_ceil(self.width, 2), div_ceil(self.height, 2))
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigurationError::NonPositiveDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigurationError::EmptySnake);
        }

        let board = self.board();
        let head = self.initial_head();
        // cells from the head to the right edge, head included
        let room = if board.contains(head) { (self.width - head.x) as usize } else { 0 };
        if self.initial_snake_length > room {
            return Err(ConfigurationError::SnakeDoesNotFit {
                length: self.initial_snake_length,
                width: self.width,
                height: self.height,
            });
        }

        let snacks = self.snacks();
        if snacks == 0 {
            return Err(ConfigurationError::NoSnacks);
        }
        let free = board.cell_count().saturating_sub(self.initial_snake_length);
        if snacks > free {
            return Err(ConfigurationError::TooManySnacks { requested: snacks, free });
        }

        for (name, value) in [
            ("snack_eaten_points", self.snack_eaten_points),
            ("moving_toward_snack_points", self.moving_toward_snack_points),
            ("moving_away_snack_points", self.moving_away_snack_points),
        ] {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinitePoints(name));
            }
        }
        if let (Some(min), Some(max)) = (self.min_score_threshold, self.max_score_threshold) {
            if min > max {
                return Err(ConfigurationError::InvertedScoreBounds { min, max });
            }
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

fn div_ceil(value: i32, by: i32) -> i32 {
    value / by + (value % by != 0) as i32
}
