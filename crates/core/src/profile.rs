use tracing::{debug, warn};

use crate::document::Document;
use crate::models::ProfileSummary;

pub const NAME_SELECTOR: &str = "h1.ql-display-small";
/// Current layout first, legacy layout second.
pub const AVATAR_SELECTORS: [&str; 2] = ["ql-avatar", "div.avatar img"];
pub const RANK_SELECTOR: &str = "div.profile-league h2";
pub const RANK_FALLBACK_SELECTOR: &str = "p.ql-body-medium";

/// Characters of raw markup logged when the display name is missing.
pub const DIAGNOSTIC_PREFIX_CHARS: usize = 500;

/// Pull the profile header fields. Absent fields are empty strings.
pub fn extract_profile(doc: &Document, raw: &str) -> ProfileSummary {
    let name = doc.text(NAME_SELECTOR);

    let avatar = AVATAR_SELECTORS
        .iter()
        .filter_map(|sel| doc.attr(sel, "src"))
        .find(|src| !src.is_empty())
        .unwrap_or_default();

    let mut rank = doc.text(RANK_SELECTOR);
    if rank.is_empty() {
        rank = doc.first_text(RANK_FALLBACK_SELECTOR);
    }

    debug!(name = %name, avatar = %avatar, rank = %rank, "Parsed profile header");

    if name.is_empty() {
        let prefix: String = raw.chars().take(DIAGNOSTIC_PREFIX_CHARS).collect();
        warn!(
            html_len = raw.len(),
            html_prefix = %prefix,
            "Failed to parse profile name; page may be private or blocked"
        );
    }

    ProfileSummary { name, avatar, rank }
}
