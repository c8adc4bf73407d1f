//! Grid snake simulation driven by an external decision function, scored
//! for use as a fitness signal by an outer optimizer.

pub mod border;
pub mod brain;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod food;
pub mod game;
pub mod game_input;
pub mod log;
pub mod snake;
pub mod utils;

pub use border::{Board, Position};
pub use brain::{Brain, OUTPUTS, RandomBrain, ScriptedBrain};
pub use config::{Representation, RewardPolicy, SimulationConfig};
pub use error::{ConfigurationError, LoadError};
pub use evaluation::{EvaluationPlan, RunReport, derive_seeds, evaluate_population, summarize};
pub use game::{EndReason, Simulation, Snapshot, Status, TickOutcome};
pub use game_input::GameInput;
pub use snake::{Decision, Heading, Snake};
