//! A single round: one hidden number, a fixed budget of guesses

use rand::Rng;
use rand_pcg::Pcg32;

use crate::tier::Tier;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Waiting for guesses
    Guessing,
    /// Target found
    Won,
    /// Attempt budget exhausted
    Lost,
}

/// Result of a single guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Outside `1..=upper_bound`; no attempt used
    OutOfRange,
    TooHigh,
    TooLow,
    /// Target found; `score` is the number of attempts used
    Correct { score: i64 },
    /// The round is already over
    Finished,
}

#[derive(Debug, Clone)]
pub struct Round {
    tier: Tier,
    target: i64,
    max_attempts: u32,
    attempts_used: u32,
    phase: RoundPhase,
}

impl Round {
    /// Start a round with a target drawn from `rng`
    pub fn new(tier: Tier, rng: &mut Pcg32, max_attempts: u32) -> Self {
        let target = rng.random_range(1..=tier.upper_bound());
        Self::with_target(tier, target, max_attempts)
    }

    pub fn with_target(tier: Tier, target: i64, max_attempts: u32) -> Self {
        Self {
            tier,
            target,
            max_attempts,
            attempts_used: 0,
            phase: RoundPhase::Guessing,
        }
    }

    pub fn guess(&mut self, guess: i64) -> GuessOutcome {
        if self.phase != RoundPhase::Guessing {
            return GuessOutcome::Finished;
        }
        if !(1..=self.tier.upper_bound()).contains(&guess) {
            return GuessOutcome::OutOfRange;
        }

        self.attempts_used += 1;
        let outcome = match guess.cmp(&self.target) {
            std::cmp::Ordering::Equal => {
                self.phase = RoundPhase::Won;
                return GuessOutcome::Correct {
                    score: i64::from(self.attempts_used),
                };
            }
            std::cmp::Ordering::Greater => GuessOutcome::TooHigh,
            std::cmp::Ordering::Less => GuessOutcome::TooLow,
        };

        if self.attempts_used >= self.max_attempts {
            self.phase = RoundPhase::Lost;
        }
        outcome
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    pub fn attempts_left(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts_used)
    }
}
