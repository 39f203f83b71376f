use crate::models::{Badge, BadgeCategory, RawBadge};

/// Keyword rules in priority order; the first substring hit wins.
///
/// Trivia must precede Game so "Weekly Trivia Game" is never counted as a game.
pub const CATEGORY_RULES: [(&str, BadgeCategory); 5] = [
    ("trivia", BadgeCategory::Trivia),
    ("game", BadgeCategory::Game),
    ("assessment", BadgeCategory::SkillBadge),
    ("skill badge", BadgeCategory::SkillBadge),
    ("course", BadgeCategory::Course),
];

pub fn classify(name: &str) -> BadgeCategory {
    let lower = name.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(BadgeCategory::Other)
}

impl From<RawBadge> for Badge {
    fn from(raw: RawBadge) -> Self {
        let category = classify(&raw.name);
        Badge::new(raw, category)
    }
}

pub fn classify_all(raw: Vec<RawBadge>) -> Vec<Badge> {
    raw.into_iter().map(Badge::from).collect()
}
