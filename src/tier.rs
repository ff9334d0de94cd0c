//! Difficulty tiers
//!
//! Each tier has its own number range and its own leaderboard file.

/// Difficulty level of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    /// All tiers, in menu order
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
        }
    }

    /// Case-insensitive parse of a tier name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Tier::Easy),
            "medium" => Some(Tier::Medium),
            "hard" => Some(Tier::Hard),
            _ => None,
        }
    }

    /// Largest number the target can take (the range is `1..=upper_bound`)
    pub fn upper_bound(&self) -> i64 {
        match self {
            Tier::Easy => 25,
            Tier::Medium => 50,
            Tier::Hard => 100,
        }
    }

    /// Leaderboard file name inside the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Tier::Easy => "easyLeaderBoard.txt",
            Tier::Medium => "mediumLeaderBoard.txt",
            Tier::Hard => "hardLeaderBoard.txt",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Tier::Easy => 0,
            Tier::Medium => 1,
            Tier::Hard => 2,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
