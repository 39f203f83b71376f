use colored_json::ToColoredJson;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};
use terminal_size::{Width as TWidth, terminal_size};
use textwrap::fill as tw_fill;

use crate::history::SavedProfile;
use crate::models::{Badge, BadgeCategory, GameStatus, ResultData};
use crate::scoring::season_badges;

fn name_wrap_columns() -> usize {
    let term_cols = match terminal_size().map(|(w, _)| w) {
        Some(TWidth(n)) if n > 20 => n as usize,
        _ => 100usize,
    };
    term_cols.saturating_sub(50).max(20)
}

fn plain_output() -> bool {
    std::env::var("NO_TABLE").ok().as_deref() == Some("1")
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn print_pretty_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => match s.to_colored_json_auto() {
            Ok(cs) => println!("{cs}"),
            Err(_) => println!("{s}"),
        },
        Err(e) => eprintln!("failed to serialize output: {e}"),
    }
}

#[derive(Clone, Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn stat(metric: &str, value: impl ToString) -> StatRow {
    StatRow {
        metric: metric.to_string(),
        value: value.to_string(),
    }
}

/// Score summary lines for one profile report.
fn summary_rows(result: &ResultData) -> Vec<StatRow> {
    let s = &result.stats;
    let f = &s.milestones.facilitator;
    let w = &s.milestones.swag;
    vec![
        stat("Total points", s.total_points),
        stat("Game badges", s.counts.game),
        stat("Trivia badges", s.counts.trivia),
        stat("Skill badges", s.counts.skill_badge),
        stat("Course badges", s.counts.course),
        stat("Milestone 1", yes_no(f.m1)),
        stat("Milestone 2", yes_no(f.m2)),
        stat("Milestone 3", yes_no(f.m3)),
        stat("Ultimate milestone", yes_no(f.ultimate)),
        stat("Swag: Novice", yes_no(w.novice)),
        stat("Swag: Trooper", yes_no(w.trooper)),
        stat("Swag: Ranger", yes_no(w.ranger)),
        stat("Swag: Champion", yes_no(w.champion)),
        stat("Swag: Legend", yes_no(w.legend)),
    ]
}

fn gallery_line(badge: &Badge, wrap: usize) -> String {
    let name = tw_fill(&badge.name, wrap).replace('\n', "\n    ");
    if badge.is_pre_assessment() {
        format!("{name} (no bonus)")
    } else {
        name
    }
}

pub fn print_report_table(result: &ResultData, season: &str) {
    let user = &result.user;
    let display_name = if user.name.is_empty() { "(unknown)" } else { user.name.as_str() };
    if user.rank.is_empty() {
        println!("{display_name} - {season} season");
    } else {
        println!("{display_name} ({}) - {season} season", user.rank);
    }

    let rows = summary_rows(result);
    if plain_output() {
        for r in &rows {
            println!("  {}: {}", r.metric, r.value);
        }
    } else {
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
    }

    let wrap = name_wrap_columns();
    for category in BadgeCategory::ALL {
        let badges = season_badges(&result.badges, season, category);
        if badges.is_empty() {
            continue;
        }
        println!("\n{category} ({}):", badges.len());
        for b in badges {
            println!("  - {}", gallery_line(b, wrap));
        }
    }
}

#[derive(Clone, Tabled)]
struct GameRow {
    #[tabled(rename = "Done")]
    done: &'static str,
    #[tabled(rename = "Game")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Pts")]
    points: u32,
    #[tabled(rename = "Lab #")]
    label: String,
    #[tabled(rename = "Access code")]
    access_code: String,
}

pub fn print_games_table(games: &[GameStatus]) {
    if games.is_empty() {
        println!("No active games found. Check back later!");
        return;
    }
    if plain_output() {
        for g in games {
            let mark = if g.completed { "[x]" } else { "[ ]" };
            println!(
                "{mark} {} ({}, {} pts) code: {}",
                g.entry.name, g.entry.kind, g.entry.points, g.entry.access_code
            );
        }
        return;
    }
    let wrap = name_wrap_columns();
    let rows: Vec<GameRow> = games
        .iter()
        .map(|g| GameRow {
            done: if g.completed { "✓" } else { "" },
            name: tw_fill(&g.entry.name, wrap),
            kind: g.entry.kind.to_string(),
            points: g.entry.points,
            label: g.entry.label.clone(),
            access_code: g.entry.access_code.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

pub fn print_history(profiles: &[SavedProfile]) {
    if profiles.is_empty() {
        println!("No saved profiles.");
        return;
    }
    for p in profiles {
        let name = if p.name.is_empty() { "(unknown)" } else { p.name.as_str() };
        println!("- {name} ({})", p.url);
    }
}
