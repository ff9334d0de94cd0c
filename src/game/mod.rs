//! Console game
//!
//! `round` holds the rules of a single round; `session` drives the prompts,
//! the replay loop and the leaderboard updates.

pub mod round;
pub mod session;

pub use round::{GuessOutcome, Round, RoundPhase};
pub use session::GameSession;
