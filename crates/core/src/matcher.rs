//! Fuzzy matching of catalog game names against earned badge names.
//!
//! The catalog and the badge feed name the same activity differently
//! ("The Arcade Base Camp" vs "Base Camp Badge"), so exact comparison alone
//! misses most completions. This is a heuristic; some false positives and
//! negatives are expected.

use crate::models::{Badge, CatalogEntry, GameStatus};

/// Filler words dropped before comparing. Level/week/tier words are kept.
pub const STOP_WORDS: [&str; 7] = ["the", "arcade", "game", "badge", "zone", "camp", "active"];

/// Share of game-name tokens that must appear in the badge name.
pub const MIN_OVERLAP: f64 = 0.8;

fn has_digit(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
}

/// Lowercased tokens split on whitespace, `:`, `,` and `-`, minus stop words
/// and single characters that are not numbers.
pub fn tokenize(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split(|c: char| c.is_whitespace() || matches!(c, ':' | ',' | '-'))
        .filter(|t| !t.is_empty())
        .filter(|t| !STOP_WORDS.contains(t))
        .filter(|t| t.chars().count() >= 2 || has_digit(t))
        .map(str::to_string)
        .collect()
}

/// Whether one badge name counts as completing `game_name`.
pub fn names_match(game_name: &str, badge_name: &str) -> bool {
    let game = game_name.trim().to_lowercase();
    let badge = badge_name.trim().to_lowercase();
    if game == badge {
        return true;
    }

    let game_tokens = tokenize(&game);
    let badge_tokens = tokenize(&badge);
    if game_tokens.is_empty() || badge_tokens.is_empty() {
        return false;
    }

    // "Level 1" must never match "Level 2".
    let numbers_present = game_tokens
        .iter()
        .filter(|t| has_digit(t))
        .all(|n| badge_tokens.iter().any(|b| has_digit(b) && b == n));
    if !numbers_present {
        return false;
    }

    let shared = game_tokens
        .iter()
        .filter(|t| badge_tokens.contains(t))
        .count();
    shared as f64 / game_tokens.len() as f64 >= MIN_OVERLAP
}

pub fn is_completed<S: AsRef<str>>(game_name: &str, badge_names: &[S]) -> bool {
    badge_names
        .iter()
        .any(|b| names_match(game_name, b.as_ref()))
}

/// Annotate each catalog entry with its completion flag against `badges`.
pub fn annotate(games: Vec<CatalogEntry>, badges: &[Badge]) -> Vec<GameStatus> {
    let names: Vec<&str> = badges.iter().map(|b| b.name.as_str()).collect();
    games
        .into_iter()
        .map(|entry| {
            let completed = is_completed(&entry.name, &names);
            GameStatus { entry, completed }
        })
        .collect()
}
