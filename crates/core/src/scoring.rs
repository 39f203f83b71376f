//! Season filtering, point totals and milestone eligibility.
//!
//! The point rules mirror the public arcade guide only approximately:
//! games and trivia are one point each, skill badges are one point per two.
//! The guide's "90+ skill badges = 45 points" bonus is not applied.

use crate::models::{
    Badge, BadgeCategory, CategoryCounts, FacilitatorMilestones, Milestones, ScoreSummary,
    SwagTiers,
};

/// Season membership is a plain substring test on the earned label.
pub fn in_season(badge: &Badge, season: &str) -> bool {
    badge.earned_at.contains(season)
}

pub fn filter_season<'a>(badges: &'a [Badge], season: &str) -> Vec<&'a Badge> {
    badges.iter().filter(|b| in_season(b, season)).collect()
}

pub fn tally<'a>(badges: impl IntoIterator<Item = &'a Badge>) -> CategoryCounts {
    let mut counts = CategoryCounts::default();
    for badge in badges {
        counts.increment(badge.category());
    }
    counts
}

pub fn total_points(counts: &CategoryCounts) -> u32 {
    counts.game + counts.trivia + counts.skill_badge / 2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    M1,
    M2,
    M3,
    Ultimate,
}

/// Minimum counts per category; every column must be met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneThreshold {
    pub milestone: Milestone,
    pub game: u32,
    pub trivia: u32,
    pub skill_badge: u32,
    pub course: u32,
}

impl MilestoneThreshold {
    pub fn is_met(&self, counts: &CategoryCounts) -> bool {
        counts.game >= self.game
            && counts.trivia >= self.trivia
            && counts.skill_badge >= self.skill_badge
            && counts.course >= self.course
    }
}

pub const FACILITATOR_THRESHOLDS: [MilestoneThreshold; 4] = [
    MilestoneThreshold { milestone: Milestone::M1, game: 6, trivia: 5, skill_badge: 14, course: 6 },
    MilestoneThreshold { milestone: Milestone::M2, game: 8, trivia: 6, skill_badge: 28, course: 12 },
    MilestoneThreshold { milestone: Milestone::M3, game: 10, trivia: 7, skill_badge: 38, course: 18 },
    MilestoneThreshold { milestone: Milestone::Ultimate, game: 12, trivia: 8, skill_badge: 52, course: 24 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwagTier {
    Novice,
    Trooper,
    Ranger,
    Champion,
    Legend,
}

pub const SWAG_THRESHOLDS: [(SwagTier, u32); 5] = [
    (SwagTier::Novice, 25),
    (SwagTier::Trooper, 45),
    (SwagTier::Ranger, 65),
    (SwagTier::Champion, 75),
    (SwagTier::Legend, 95),
];

pub fn milestone_met(milestone: Milestone, counts: &CategoryCounts) -> bool {
    FACILITATOR_THRESHOLDS
        .iter()
        .find(|t| t.milestone == milestone)
        .is_some_and(|t| t.is_met(counts))
}

pub fn swag_met(tier: SwagTier, total_points: u32) -> bool {
    SWAG_THRESHOLDS
        .iter()
        .find(|(t, _)| *t == tier)
        .is_some_and(|(_, min)| total_points >= *min)
}

impl FacilitatorMilestones {
    pub fn evaluate(counts: &CategoryCounts) -> Self {
        Self {
            m1: milestone_met(Milestone::M1, counts),
            m2: milestone_met(Milestone::M2, counts),
            m3: milestone_met(Milestone::M3, counts),
            ultimate: milestone_met(Milestone::Ultimate, counts),
        }
    }
}

impl SwagTiers {
    pub fn evaluate(total_points: u32) -> Self {
        Self {
            novice: swag_met(SwagTier::Novice, total_points),
            trooper: swag_met(SwagTier::Trooper, total_points),
            ranger: swag_met(SwagTier::Ranger, total_points),
            champion: swag_met(SwagTier::Champion, total_points),
            legend: swag_met(SwagTier::Legend, total_points),
        }
    }
}

/// Points and flags derived from already-filtered counts.
pub fn summarize(counts: CategoryCounts) -> ScoreSummary {
    let total_points = total_points(&counts);
    ScoreSummary {
        total_points,
        counts,
        milestones: Milestones {
            facilitator: FacilitatorMilestones::evaluate(&counts),
            swag: SwagTiers::evaluate(total_points),
        },
    }
}

/// Filter to `season`, then count and score. Unfiltered badges never contribute.
pub fn score(badges: &[Badge], season: &str) -> ScoreSummary {
    summarize(tally(filter_season(badges, season)))
}

/// The in-season badges of one category, in page order.
pub fn season_badges<'a>(
    badges: &'a [Badge],
    season: &str,
    category: BadgeCategory,
) -> Vec<&'a Badge> {
    badges
        .iter()
        .filter(|b| b.category() == category && in_season(b, season))
        .collect()
}
