//! Console game loop
//!
//! Reads whitespace-separated tokens from any `BufRead` and writes prompts to
//! any `Write`, so the whole session can be driven from memory in tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use rand_pcg::Pcg32;

use super::round::{GuessOutcome, Round, RoundPhase};
use crate::leaderboard::Leaderboards;
use crate::settings::Settings;
use crate::tier::Tier;

pub struct GameSession<R, W> {
    input: R,
    output: W,
    /// Tokens read but not yet consumed
    pending: VecDeque<String>,
    boards: Leaderboards,
    rng: Pcg32,
    settings: Settings,
}

impl<R: BufRead, W: Write> GameSession<R, W> {
    pub fn new(input: R, output: W, boards: Leaderboards, rng: Pcg32, settings: Settings) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
            boards,
            rng,
            settings,
        }
    }

    /// Play rounds until the player declines a replay or input runs out
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to the guessing game! Enter your name")?;
        let Some(name) = self.next_token()? else {
            return self.farewell();
        };
        writeln!(self.output, "Good luck")?;
        log::info!("Session started for {name}");

        loop {
            let Some(tier) = self.choose_tier()? else {
                break;
            };
            if !self.play_round(&name, tier)? {
                break;
            }

            writeln!(self.output, "Would you like to play again? 'yes' or 'no'")?;
            match self.next_token()? {
                Some(answer) if answer.eq_ignore_ascii_case("yes") => {}
                _ => break,
            }
        }

        self.farewell()
    }

    pub fn leaderboards(&self) -> &Leaderboards {
        &self.boards
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn choose_tier(&mut self) -> io::Result<Option<Tier>> {
        loop {
            writeln!(self.output, "Do you want to play 'easy' 'medium' or 'hard'")?;
            let Some(token) = self.next_token()? else {
                return Ok(None);
            };
            match Tier::from_str(&token) {
                Some(tier) => return Ok(Some(tier)),
                None => writeln!(self.output, "Invalid Input")?,
            }
        }
    }

    /// Returns `false` if input ended mid-round
    fn play_round(&mut self, name: &str, tier: Tier) -> io::Result<bool> {
        let mut round = Round::new(tier, &mut self.rng, self.settings.max_attempts);
        log::debug!("New {} round, target {}", tier, round.target());
        if self.settings.reveal_target {
            writeln!(self.output, "{}", round.target())?;
        }

        let upper = tier.upper_bound();
        while round.phase() == RoundPhase::Guessing {
            writeln!(
                self.output,
                "Guess the number between 1 and {} you have {} more chances!",
                upper,
                round.attempts_left()
            )?;
            let Some(token) = self.next_token()? else {
                return Ok(false);
            };

            // Non-numeric input is treated like an out-of-range guess
            let outcome = token
                .parse::<i64>()
                .map_or(GuessOutcome::OutOfRange, |guess| round.guess(guess));
            match outcome {
                GuessOutcome::OutOfRange => writeln!(
                    self.output,
                    "Invalid input. Guess the number between 1 and {upper}"
                )?,
                GuessOutcome::TooHigh => {
                    writeln!(self.output, "Your guess is greater than the hidden number.")?
                }
                GuessOutcome::TooLow => {
                    writeln!(self.output, "Your guess is less than the hidden number.")?
                }
                GuessOutcome::Correct { score } => {
                    writeln!(self.output, "You win!")?;
                    self.record_win(name, tier, score)?;
                }
                GuessOutcome::Finished => break,
            }
        }

        if round.phase() == RoundPhase::Lost {
            writeln!(self.output, "You lose! The number was {}.", round.target())?;
        }
        Ok(true)
    }

    fn record_win(&mut self, name: &str, tier: Tier, score: i64) -> io::Result<()> {
        let board = self.boards.get_mut(tier);
        board.update(name, score);
        let rank = board.rank(score);
        log::info!("{name} scored {score} on {tier}, rank #{rank}");

        writeln!(
            self.output,
            "Your score is ranked #{rank} on the all-time leaderboard!"
        )?;
        board.write_table(&mut self.output)
    }

    fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.output, "Thank you for playing !")?;
        self.output.flush()
    }

    /// Next whitespace-separated token, or `None` at end of input
    fn next_token(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::tempdir;

    const SEED: u64 = 12345;

    /// Targets the session will draw, in order, for the given tiers
    fn targets(tiers: &[Tier]) -> Vec<i64> {
        let mut rng = Pcg32::seed_from_u64(SEED);
        tiers
            .iter()
            .map(|tier| Round::new(*tier, &mut rng, 10).target())
            .collect()
    }

    fn wrong_guess(target: i64) -> i64 {
        if target == 1 { 2 } else { 1 }
    }

    fn play(dir: &Path, settings: Settings, input: &str) -> (String, Leaderboards) {
        let boards = Leaderboards::open_in(dir);
        let mut session = GameSession::new(
            Cursor::new(input.to_string()),
            Vec::new(),
            boards,
            Pcg32::seed_from_u64(SEED),
            settings,
        );
        session.run().unwrap();
        let boards = session.leaderboards().clone();
        (String::from_utf8(session.into_output()).unwrap(), boards)
    }

    #[test]
    fn test_win_records_and_ranks() {
        let dir = tempdir().unwrap();
        let target = targets(&[Tier::Easy])[0];
        let input = format!("Alice\neasy\n{}\n{}\nno\n", wrong_guess(target), target);

        let (out, boards) = play(dir.path(), Settings::default(), &input);

        assert!(out.starts_with("Welcome to the guessing game! Enter your name\nGood luck\n"));
        assert!(out.contains("Guess the number between 1 and 25 you have 10 more chances!"));
        assert!(out.contains("Guess the number between 1 and 25 you have 9 more chances!"));
        assert!(out.contains("You win!"));
        assert!(out.contains("Your score is ranked #1 on the all-time leaderboard!"));
        assert!(out.contains("\nLeaderboard:\nAlice - 2\n"));
        assert!(out.ends_with("Thank you for playing !\n"));

        assert_eq!(boards.get(Tier::Easy).len(), 1);
        let saved = fs::read_to_string(dir.path().join("easyLeaderBoard.txt")).unwrap();
        assert_eq!(saved, "Alice,2\n");
    }

    #[test]
    fn test_hint_direction() {
        let dir = tempdir().unwrap();
        let target = targets(&[Tier::Hard])[0];
        let mut input = String::from("Dee\nhard\n");
        if target > 1 {
            input.push_str("1\n");
        }
        if target < 100 {
            input.push_str("100\n");
        }
        input.push_str(&format!("{target}\nno\n"));

        let (out, _) = play(dir.path(), Settings::default(), &input);

        assert_eq!(
            out.contains("Your guess is less than the hidden number."),
            target > 1
        );
        assert_eq!(
            out.contains("Your guess is greater than the hidden number."),
            target < 100
        );
        assert!(out.contains("You win!"));
    }

    #[test]
    fn test_invalid_input_reprompts_without_using_attempts() {
        let dir = tempdir().unwrap();
        let target = targets(&[Tier::Easy])[0];
        let input = format!("Bob\nexpert\nEASY\nabc\n0\n26\n{target}\nno\n");

        let (out, boards) = play(dir.path(), Settings::default(), &input);

        assert_eq!(out.matches("Invalid Input\n").count(), 1);
        assert_eq!(
            out.matches("Invalid input. Guess the number between 1 and 25").count(),
            3
        );
        assert_eq!(out.matches("you have 10 more chances!").count(), 4);
        assert_eq!(boards.get(Tier::Easy).list_descending()[0].score(), 1);
    }

    #[test]
    fn test_loss_leaves_board_untouched() {
        let dir = tempdir().unwrap();
        let target = targets(&[Tier::Hard])[0];
        let wrong = wrong_guess(target);
        let settings = Settings {
            max_attempts: 2,
            ..Settings::default()
        };
        let input = format!("Cy\nhard\n{wrong}\n{wrong}\nno\n");

        let (out, boards) = play(dir.path(), settings, &input);

        assert!(out.contains(&format!("You lose! The number was {target}.")));
        assert!(!out.contains("You win!"));
        assert!(boards.get(Tier::Hard).is_empty());
        assert!(!dir.path().join("hardLeaderBoard.txt").exists());
    }

    #[test]
    fn test_replay_plays_another_round() {
        let dir = tempdir().unwrap();
        let t = targets(&[Tier::Easy, Tier::Medium]);
        let input = format!("Ann\neasy\n{}\nYes\nmedium\n{}\nno\n", t[0], t[1]);

        let (out, boards) = play(dir.path(), Settings::default(), &input);

        assert_eq!(out.matches("You win!").count(), 2);
        assert_eq!(out.matches("Would you like to play again?").count(), 2);
        assert_eq!(boards.get(Tier::Easy).len(), 1);
        assert_eq!(boards.get(Tier::Medium).len(), 1);
    }

    #[test]
    fn test_rank_counts_existing_entries() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("easyLeaderBoard.txt"), "Zed,5\nYan,1\n").unwrap();
        let target = targets(&[Tier::Easy])[0];
        let input = format!("Eve\neasy\n{target}\nno\n");

        let (out, boards) = play(dir.path(), Settings::default(), &input);

        assert!(out.contains("Your score is ranked #2 on the all-time leaderboard!"));
        assert!(out.contains("\nLeaderboard:\nZed - 5\nYan - 1\nEve - 1\n"));
        assert_eq!(boards.get(Tier::Easy).len(), 3);
    }

    #[test]
    fn test_reveal_target_prints_number() {
        let dir = tempdir().unwrap();
        let target = targets(&[Tier::Medium])[0];
        let settings = Settings {
            reveal_target: true,
            ..Settings::default()
        };
        let input = format!("Al\nmedium\n{target}\nno\n");

        let (out, _) = play(dir.path(), settings, &input);

        assert!(out.contains(&format!(
            "'hard'\n{target}\nGuess the number between 1 and 50"
        )));
    }

    #[test]
    fn test_end_of_input_says_goodbye() {
        let dir = tempdir().unwrap();

        let (out, _) = play(dir.path(), Settings::default(), "");
        assert_eq!(
            out,
            "Welcome to the guessing game! Enter your name\nThank you for playing !\n"
        );

        let (out, _) = play(dir.path(), Settings::default(), "Al easy");
        assert!(out.contains("you have 10 more chances!"));
        assert!(out.ends_with("Thank you for playing !\n"));
    }
}
