//! Per-tier leaderboard
//!
//! Each leaderboard is a flat text file with one `name,score` line per
//! entry, kept in descending score order. The whole file is rewritten after
//! every update.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use crate::tier::Tier;

/// Field delimiter in the leaderboard file. Names are not escaped.
const DELIMITER: char = ',';

/// A single recorded result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    name: String,
    score: i64,
}

impl Entry {
    pub fn new(name: impl Into<String>, score: i64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> i64 {
        self.score
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.score)
    }
}

/// File-backed leaderboard for one tier
#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
    /// Sorted descending by score; ties keep insertion order
    entries: Vec<Entry>,
}

impl Leaderboard {
    /// Open the leaderboard stored at `path`.
    ///
    /// A missing or unreadable file yields an empty leaderboard; the file is
    /// created on the first update. Malformed lines are skipped.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let mut entries = match fs::read(&path) {
            Ok(bytes) => parse_entries(&String::from_utf8_lossy(&bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!(
                    "Leaderboard file {} not found, a new one will be created",
                    path.display()
                );
                Vec::new()
            }
            Err(e) => {
                log::warn!(
                    "Could not read leaderboard {}: {}, starting empty",
                    path.display(),
                    e
                );
                Vec::new()
            }
        };

        // Stable, so tied entries keep their file order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        log::info!("Loaded {} entries from {}", entries.len(), path.display());

        Self { path, entries }
    }

    /// Record a new result and rewrite the backing file.
    ///
    /// A failed write is logged; the entry stays in memory either way.
    pub fn update(&mut self, name: impl Into<String>, score: i64) {
        let pos = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(pos, Entry::new(name, score));

        match self.save() {
            Ok(()) => log::info!(
                "Leaderboard saved ({} entries) to {}",
                self.entries.len(),
                self.path.display()
            ),
            Err(e) => log::warn!("Failed to save the leaderboard: {e:#}"),
        }
    }

    /// Rank `score` would take if inserted now (1-indexed).
    ///
    /// Only entries with a strictly greater score push it down.
    pub fn rank(&self, score: i64) -> usize {
        self.entries.partition_point(|e| e.score > score) + 1
    }

    /// All entries, highest score first
    pub fn list_descending(&self) -> &[Entry] {
        &self.entries
    }

    /// Overwrite the backing file with the current entries
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let file = File::create(&self.path)
            .with_context(|| format!("failed to create {}", self.path.display()))?;
        let mut out = BufWriter::new(file);
        for entry in &self.entries {
            writeln!(out, "{}{}{}", entry.name, DELIMITER, entry.score)?;
        }
        out.flush()
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Print the `Leaderboard:` table, one `name - score` line per entry
    pub fn write_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Leaderboard:")?;
        for entry in &self.entries {
            writeln!(out, "{entry}")?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest score on the board (if any)
    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Parse every well-formed `name,score` line, skipping the rest
fn parse_entries(content: &str) -> Vec<Entry> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(i, line)| {
            let entry = parse_line(line);
            if entry.is_none() {
                log::debug!("Skipping malformed leaderboard line {}: {:?}", i + 1, line);
            }
            entry
        })
        .collect()
}

fn parse_line(line: &str) -> Option<Entry> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = line.split(DELIMITER);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(name), Some(score), None) => {
            let score = score.parse::<i64>().ok()?;
            Some(Entry::new(name, score))
        }
        _ => None,
    }
}

/// One leaderboard per tier, all kept in the same directory
#[derive(Debug, Clone)]
pub struct Leaderboards {
    boards: [Leaderboard; 3],
}

impl Leaderboards {
    /// Open the three tier leaderboards inside `dir`
    pub fn open_in(dir: &Path) -> Self {
        Self {
            boards: Tier::ALL.map(|tier| Leaderboard::open(dir.join(tier.file_name()))),
        }
    }

    pub fn get(&self, tier: Tier) -> &Leaderboard {
        &self.boards[tier.index()]
    }

    pub fn get_mut(&mut self, tier: Tier) -> &mut Leaderboard {
        &mut self.boards[tier.index()]
    }
}
