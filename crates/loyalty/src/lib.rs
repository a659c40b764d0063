#![warn(clippy::unwrap_used)]

pub mod engine;
pub mod session;

pub use engine::{round_to_cents, PointsEngine};
pub use session::{CalculatorSession, MinimumSpendOutcome, SessionError};
