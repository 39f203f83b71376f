//! Active game listing extraction.
//!
//! The arcade landing page stores its real content as an HTML fragment inside
//! a `data-code` attribute. The fragment is parsed as its own document and
//! scanned twice: once over `.card` nodes, once over the narrower `.col-lg-3`
//! columns where weekly trivia lives. Results are keyed by access code; a later
//! duplicate overwrites the earlier one in place, keeping the earlier position.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, error};

use crate::document::{Document, Node};
use crate::models::{CatalogEntry, GameKind};

pub const DATA_ATTRIBUTE: &str = "data-code";
pub const CARD_SELECTOR: &str = ".card";
pub const CARD_TITLE: &str = "h3.card-title";
pub const CARD_TITLE_FALLBACK: &str = "h3";
pub const TRIVIA_COLUMN_SELECTOR: &str = ".col-lg-3";
pub const TRIVIA_TITLE: &str = "h5.card-title";

/// Points assumed when a card does not state any.
pub const DEFAULT_POINTS: u32 = 1;

/// A named pattern whose first capture group yields one field of a card.
pub struct TextRule {
    pub field: &'static str,
    regex: Option<Regex>,
}

impl TextRule {
    fn new(field: &'static str, pattern: &str) -> Self {
        let regex = match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                error!(field, error = %e, "Invalid extraction pattern");
                None
            }
        };
        Self { field, regex }
    }

    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .as_ref()?
            .captures(text)?
            .get(1)
            .map(|m| m.as_str())
    }
}

pub static ACCESS_CODE_RULE: LazyLock<TextRule> =
    LazyLock::new(|| TextRule::new("access_code", r"(?i)Access code:\s*(\S+)"));

pub static POINTS_RULE: LazyLock<TextRule> =
    LazyLock::new(|| TextRule::new("points", r"(?i)Arcade points:\s*(\d+)"));

/// Points stated on a card; absent, zero or unparsable falls back to [`DEFAULT_POINTS`].
pub fn parse_points(text: &str) -> u32 {
    POINTS_RULE
        .capture(text)
        .and_then(|p| p.parse::<u32>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(DEFAULT_POINTS)
}

pub fn game_kind(name: &str) -> GameKind {
    let lower = name.to_lowercase();
    if lower.contains("trivia") {
        GameKind::Trivia
    } else if lower.contains("certification") {
        GameKind::SkillBadge
    } else {
        GameKind::Game
    }
}

/// Absolute URL for a card link; relative hrefs are joined onto `base_url`.
pub fn resolve_url(href: &str, base_url: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{base}{href}")
    } else {
        format!("{base}/{href}")
    }
}

fn card_url(card: &Node<'_>, base_url: &str) -> Option<String> {
    card.attr("href")
        .or_else(|| card.find_attr("a", "href"))
        .filter(|h| !h.is_empty())
        .map(|h| resolve_url(h, base_url))
}

/// Order-preserving map keyed by access code with last-write-wins values.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An overwritten entry keeps its original position.
    pub fn insert(&mut self, entry: CatalogEntry) {
        match self.index.get(&entry.access_code) {
            Some(&pos) => {
                debug!(access_code = %entry.access_code, "Duplicate access code overwritten");
                self.entries[pos] = entry;
            }
            None => {
                self.index
                    .insert(entry.access_code.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }
}

fn scan_cards(inner: &Document, base_url: &str, out: &mut CatalogBuilder) {
    for card in inner.select(CARD_SELECTOR) {
        let text = card.text();
        let mut name = card.find_text(CARD_TITLE);
        if name.is_empty() {
            name = card.find_first_text(CARD_TITLE_FALLBACK);
        }
        let Some(code) = ACCESS_CODE_RULE.capture(&text) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let kind = game_kind(&name);
        out.insert(CatalogEntry {
            name,
            points: parse_points(&text),
            label: kind.label_tag().to_string(),
            access_code: code.to_string(),
            kind,
            url: card_url(&card, base_url),
        });
    }
}

fn scan_trivia_columns(inner: &Document, base_url: &str, out: &mut CatalogBuilder) {
    for column in inner.select(TRIVIA_COLUMN_SELECTOR) {
        let mut name = column.find_text(TRIVIA_TITLE);
        if name.is_empty() {
            continue;
        }
        let text = column.text();
        if !text.contains("Access code") {
            continue;
        }
        if !name.to_lowercase().contains("trivia") {
            name = format!("Trivia: {name}");
        }
        let Some(code) = ACCESS_CODE_RULE.capture(&text) else {
            continue;
        };
        out.insert(CatalogEntry {
            name,
            points: parse_points(&text),
            label: GameKind::Trivia.label_tag().to_string(),
            access_code: code.to_string(),
            kind: GameKind::Trivia,
            url: card_url(&column, base_url),
        });
    }
}

/// Extract active games from the arcade landing page markup.
///
/// A page without the embedded fragment yields an empty list, never an error.
pub fn extract_catalog(markup: &str, base_url: &str) -> Vec<CatalogEntry> {
    let outer = Document::parse(markup);
    let Some(fragment) = outer
        .attr(&format!("[{DATA_ATTRIBUTE}]"), DATA_ATTRIBUTE)
        .filter(|f| !f.trim().is_empty())
    else {
        error!(html_len = markup.len(), "No data-code attribute found on arcade page");
        return Vec::new();
    };

    let inner = Document::parse(&fragment);
    let mut builder = CatalogBuilder::new();
    scan_cards(&inner, base_url, &mut builder);
    scan_trivia_columns(&inner, base_url, &mut builder);

    debug!(count = builder.len(), "Extracted catalog entries");
    builder.into_entries()
}
