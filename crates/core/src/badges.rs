use tracing::debug;

use crate::document::Document;
use crate::models::RawBadge;

pub const BADGE_CARD: &str = ".profile-badge";
pub const BADGE_TITLE: &str = ".ql-title-medium";
pub const BADGE_IMAGE: &str = "img";
pub const BADGE_EARNED: &str = ".ql-body-medium";

/// Collect every badge card on a profile page in display order.
///
/// Missing sub-nodes become empty strings. Duplicate names are kept.
pub fn extract_badges(doc: &Document) -> Vec<RawBadge> {
    doc.select(BADGE_CARD)
        .into_iter()
        .map(|card| {
            let badge = RawBadge {
                name: card.find_text(BADGE_TITLE),
                image: card
                    .find_attr(BADGE_IMAGE, "src")
                    .unwrap_or_default()
                    .to_string(),
                earned_at: card.find_text(BADGE_EARNED),
            };
            if badge.name.is_empty() || badge.earned_at.is_empty() {
                debug!(
                    name = %badge.name,
                    earned_at = %badge.earned_at,
                    "Badge card with missing fields"
                );
            }
            badge
        })
        .collect()
}
