use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of badge categories. Produced only by [`crate::classify::classify`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BadgeCategory {
    Game,
    Trivia,
    #[serde(rename = "Skill Badge")]
    SkillBadge,
    Course,
    Other,
}

impl BadgeCategory {
    pub const ALL: [BadgeCategory; 5] = [
        BadgeCategory::Game,
        BadgeCategory::Trivia,
        BadgeCategory::SkillBadge,
        BadgeCategory::Course,
        BadgeCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BadgeCategory::Game => "Game",
            BadgeCategory::Trivia => "Trivia",
            BadgeCategory::SkillBadge => "Skill Badge",
            BadgeCategory::Course => "Course",
            BadgeCategory::Other => "Other",
        }
    }
}

impl fmt::Display for BadgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One badge card as scraped, before classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBadge {
    pub name: String,
    pub image: String,
    /// Locale-formatted label such as "Earned Jan 3, 2026". Never parsed.
    pub earned_at: String,
}

/// A scraped badge with its category fixed at classification time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub name: String,
    pub image: String,
    pub earned_at: String,
    #[serde(rename = "type")]
    category: BadgeCategory,
}

impl Badge {
    pub(crate) fn new(raw: RawBadge, category: BadgeCategory) -> Self {
        Self {
            name: raw.name,
            image: raw.image,
            earned_at: raw.earned_at,
            category,
        }
    }

    pub fn category(&self) -> BadgeCategory {
        self.category
    }

    /// Pre-assessment badges count as skill badges but carry no bonus.
    pub fn is_pre_assessment(&self) -> bool {
        self.category == BadgeCategory::SkillBadge
            && self.name.to_lowercase().contains("assessment")
    }
}

/// Best-effort profile header fields; empty strings when not found.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileSummary {
    pub name: String,
    pub avatar: String,
    pub rank: String,
}

/// Per-category badge counts over the season-filtered set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCounts {
    #[serde(rename = "gameBadges")]
    pub game: u32,
    #[serde(rename = "triviaBadges")]
    pub trivia: u32,
    #[serde(rename = "skillBadges")]
    pub skill_badge: u32,
    #[serde(rename = "courseBadges")]
    pub course: u32,
    #[serde(rename = "otherBadges")]
    pub other: u32,
}

impl CategoryCounts {
    pub fn get(&self, category: BadgeCategory) -> u32 {
        match category {
            BadgeCategory::Game => self.game,
            BadgeCategory::Trivia => self.trivia,
            BadgeCategory::SkillBadge => self.skill_badge,
            BadgeCategory::Course => self.course,
            BadgeCategory::Other => self.other,
        }
    }

    pub fn increment(&mut self, category: BadgeCategory) {
        let slot = match category {
            BadgeCategory::Game => &mut self.game,
            BadgeCategory::Trivia => &mut self.trivia,
            BadgeCategory::SkillBadge => &mut self.skill_badge,
            BadgeCategory::Course => &mut self.course,
            BadgeCategory::Other => &mut self.other,
        };
        *slot += 1;
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacilitatorMilestones {
    pub m1: bool,
    pub m2: bool,
    pub m3: bool,
    pub ultimate: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwagTiers {
    pub novice: bool,
    pub trooper: bool,
    pub ranger: bool,
    pub champion: bool,
    pub legend: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Milestones {
    pub facilitator: FacilitatorMilestones,
    pub swag: SwagTiers,
}

/// Points, counts and eligibility flags. Recomputed from scratch on every request.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub total_points: u32,
    #[serde(flatten)]
    pub counts: CategoryCounts,
    pub milestones: Milestones,
}

/// Response of a profile calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultData {
    pub stats: ScoreSummary,
    /// Every scraped badge, unfiltered, in page order.
    pub badges: Vec<Badge>,
    pub user: ProfileSummary,
}

/// Type of an active catalog listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GameKind {
    Game,
    Trivia,
    #[serde(rename = "Skill Badge")]
    SkillBadge,
}

impl GameKind {
    /// Coarse label tag shown next to the access code.
    pub fn label_tag(self) -> &'static str {
        match self {
            GameKind::Game => "GAME",
            GameKind::Trivia => "TRIVIA",
            GameKind::SkillBadge => "SKILL BADGE",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameKind::Game => "Game",
            GameKind::Trivia => "Trivia",
            GameKind::SkillBadge => "Skill Badge",
        })
    }
}

/// An active game listing keyed by its access code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    pub points: u32,
    #[serde(rename = "labNumber")]
    pub label: String,
    pub access_code: String,
    #[serde(rename = "type")]
    pub kind: GameKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
}

/// A catalog entry annotated with whether the user already holds a matching badge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStatus {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    pub completed: bool,
}
