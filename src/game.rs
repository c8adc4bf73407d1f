use serde::Serialize;
use tracing::debug;

use crate::border::{Board, Position};
use crate::brain::Brain;
use crate::config::{Representation, RewardPolicy, ScoreBounds, SimulationConfig};
use crate::error::ConfigurationError;
use crate::food::Snacks;
use crate::game_input::GameInput;
use crate::snake::{Decision, Heading, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Initialized,
    Running,
    Ended,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    ScoreCeiling,
    ScoreFloor,
    /// A snack was eaten and no free cell was left for any replacement.
    BoardFilled,
}

/// What a single tick did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Moved { ate_snack: bool, reward: f64 },
    Ended(EndReason),
    /// The run had already ended; nothing changed.
    Idle,
}

/// Read-only view for renderers and optimizers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub status: Status,
    pub end_reason: Option<EndReason>,
    pub score: f64,
    pub ticks: u64,
    pub heading: Heading,
    pub snake: Vec<Position>,
    pub snacks: Vec<Position>,
}

/// One self-contained run: board, snake, snacks with their own generator,
/// score and status. Nothing is shared between instances, so many can run
/// on separate threads.
#[derive(Clone, Debug)]
pub struct Simulation {
    board: Board,
    snake: Snake,
    snacks: Snacks,
    snack_target: usize,
    policy: RewardPolicy,
    bounds: ScoreBounds,
    representation: Representation,
    seed: u64,
    score: f64,
    status: Status,
    end_reason: Option<EndReason>,
    ticks: u64,
}

impl Simulation {
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let board = config.board();
        let snake = Snake::horizontal(config.initial_head(), config.initial_snake_length);
        let snack_target = config.snacks();
        let mut snacks = Snacks::new(config.seed);
        let placed = snacks.fill(&board, snake.body(), snack_target);
        if placed < snack_target {
            return Err(ConfigurationError::TooManySnacks {
                requested: snack_target,
                free: placed,
            });
        }

        Ok(Self {
            board,
            snake,
            snacks,
            snack_target,
            policy: config.reward_policy(),
            bounds: config.score_bounds(),
            representation: config.representation,
            seed: config.seed,
            score: 0.0,
            status: Status::Initialized,
            end_reason: None,
            ticks: 0,
        })
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snacks(&self) -> &[Position] {
        self.snacks.positions()
    }

    pub fn heading(&self) -> Heading {
        self.snake.heading()
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_ended(&self) -> bool {
        self.status == Status::Ended
    }

    pub fn feature_len(&self) -> usize {
        GameInput::len(self.representation, &self.board)
    }

    /// Feature vector for the current state.
    pub fn encode(&self) -> Vec<f32> {
        GameInput::encode(self.representation, &self.board, &self.snake, &self.snacks)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            end_reason: self.end_reason,
            score: self.score,
            ticks: self.ticks,
            heading: self.snake.heading(),
            snake: self.snake.body().to_vec(),
            snacks: self.snacks.positions().to_vec(),
        }
    }

    /// Advances one tick, asking `brain` which way to turn. A tick on an
    /// ended run is a no-op returning [`TickOutcome::Idle`].
    pub fn tick<B: Brain + ?Sized>(&mut self, brain: &mut B) -> TickOutcome {
        if let Some(outcome) = self.begin_tick() {
            return outcome;
        }
        let input = self.encode();
        let prediction = brain.decide(&input);
        let heading = self.snake.heading().resolve(Decision::from_prediction(&prediction));
        self.apply_move(heading)
    }

    /// Advances one tick toward an explicit heading instead of consulting a
    /// brain. Asking for a reversal keeps the current heading.
    pub fn steer(&mut self, requested: Heading) -> TickOutcome {
        if let Some(outcome) = self.begin_tick() {
            return outcome;
        }
        let heading = self.snake.heading().steer(requested);
        self.apply_move(heading)
    }

    /// Ticks until the run ends and returns the final score. Only the
    /// engine's own end conditions stop the loop.
    pub fn run<B: Brain + ?Sized>(&mut self, brain: &mut B) -> f64 {
        while !self.is_ended() {
            self.tick(brain);
        }
        self.score
    }

    /// Like [`Simulation::run`] but stops after `max_ticks` ticks even if
    /// the run is still going. Returns whether the run ended on its own.
    pub fn run_for<B: Brain + ?Sized>(&mut self, brain: &mut B, max_ticks: u64) -> bool {
        let mut remaining = max_ticks;
        while !self.is_ended() && remaining > 0 {
            self.tick(brain);
            remaining -= 1;
        }
        self.is_ended()
    }

    /// Moves snacks to the given cells. Cells on the snake or off the board
    /// are dropped. Meant for staging scenarios.
    pub fn place_snacks(&mut self, positions: Vec<Position>) {
        let keep = positions
            .into_iter()
            .filter(|&p| self.board.contains(p) && !self.snake.occupies(p))
            .collect();
        self.snacks.place(keep);
    }

    /// Overrides the score. Meant for staging scenarios.
    pub fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    // status bookkeeping and score bounds, shared by tick and steer
    fn begin_tick(&mut self) -> Option<TickOutcome> {
        match self.status {
            Status::Ended => return Some(TickOutcome::Idle),
            Status::Initialized => self.status = Status::Running,
            Status::Running => {}
        }
        self.ticks += 1;

        if let Some(max) = self.bounds.max {
            if self.score >= max {
                return Some(self.finish(EndReason::ScoreCeiling));
            }
        }
        if let Some(min) = self.bounds.min {
            if self.score <= min {
                return Some(self.finish(EndReason::ScoreFloor));
            }
        }
        None
    }

    fn apply_move(&mut self, heading: Heading) -> TickOutcome {
        let head = self.snake.head();
        let next = self.snake.next_head(heading);

        if !self.board.contains(next) {
            return self.finish(EndReason::WallCollision);
        }
        if self.snake.collides_with_body(next) {
            return self.finish(EndReason::SelfCollision);
        }

        let target = self.snacks.nearest(head);
        let ate_snack = self.snacks.contains(next);
        self.snake.advance(heading, ate_snack);

        let reward = if ate_snack {
            self.policy.snack_eaten()
        } else {
            match target {
                Some(snack) => self.policy.shaping(head.distance(snack), next.distance(snack)),
                None => 0.0,
            }
        };
        self.score += reward;

        if ate_snack {
            self.snacks.consume(next);
            self.snacks.fill(&self.board, self.snake.body(), self.snack_target);
            if self.snacks.is_empty() {
                return self.finish(EndReason::BoardFilled);
            }
        }

        TickOutcome::Moved { ate_snack, reward }
    }

    fn finish(&mut self, reason: EndReason) -> TickOutcome {
        self.status = Status::Ended;
        self.end_reason = Some(reason);
        debug!(
            seed = self.seed,
            ticks = self.ticks,
            score = self.score,
            length = self.snake.len(),
            ?reason,
            "simulation ended"
        );
        TickOutcome::Ended(reason)
    }
}
