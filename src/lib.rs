//! Guess Rank - a console number-guessing game
//!
//! Core modules:
//! - `leaderboard`: file-backed, descending-score leaderboards (one per tier)
//! - `game`: round rules and the interactive console session
//! - `settings`: JSON-backed preferences
//! - `tier`: difficulty levels

pub mod game;
pub mod leaderboard;
pub mod settings;
pub mod tier;

pub use leaderboard::{Entry, Leaderboard, Leaderboards};
pub use settings::Settings;
pub use tier::Tier;

/// Game configuration constants
pub mod consts {
    /// Guesses allowed per round unless the settings say otherwise
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
    /// Settings file looked up in the working directory by default
    pub const SETTINGS_FILE: &str = "guess-rank.json";
}
