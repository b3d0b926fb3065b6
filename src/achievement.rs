// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Achievement rank engine.
//!
//! Twelve fixed categories are derived from [`UserStats`]. Most compare a
//! metric against six ascending thresholds; a few are yes/no achievements
//! that map a condition straight to a rank.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{error::Outcome, model::UserStats};

/// Rank assigned to an achievement category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize,)]
pub enum Rank
{
    #[serde(rename = "SSS")]
    Sss,
    #[serde(rename = "SS")]
    Ss,
    S,
    A,
    B,
    C,
    /// The metric exists but is below the first threshold.
    NotAchieved,
    /// No qualifying data was available.
    Unknown,
}

impl Rank
{
    /// Ranks for threshold tiers `0..=5`, lowest first.
    pub const TIERS: [Rank; 6] = [Rank::C, Rank::B, Rank::A, Rank::S, Rank::Ss, Rank::Sss,];

    /// Short label rendered on trophy cards.
    pub fn label(self,) -> &'static str
    {
        match self {
            Self::Sss => "SSS",
            Self::Ss => "SS",
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::NotAchieved => "?",
            Self::Unknown => "-",
        }
    }

    /// Returns `true` for every tier from C to SSS.
    pub fn is_achieved(self,) -> bool
    {
        !matches!(self, Self::NotAchieved | Self::Unknown)
    }
}

impl fmt::Display for Rank
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(self.label(),)
    }
}

/// How a category turns its input into a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum RankRule
{
    /// Six ascending thresholds mapped to C, B, A, S, SS, SSS.
    Standard([u64; 6],),
    /// Yes/no achievement: `rank` when the condition holds, otherwise
    /// [`Rank::NotAchieved`]. Thresholds are never consulted.
    Forced
    {
        condition: bool, rank: Rank,
    },
}

/// Resolves a rank for an optional metric value.
///
/// `None` means the category has no qualifying data and yields
/// [`Rank::Unknown`] for standard rules.
pub fn resolve_rank(rule: &RankRule, value: Option<u64,>,) -> Rank
{
    match rule {
        RankRule::Forced {
            condition,
            rank,
        } => {
            if *condition {
                *rank
            } else {
                Rank::NotAchieved
            }
        }
        RankRule::Standard(thresholds,) => match value {
            None => Rank::Unknown,
            Some(value,) => thresholds
                .iter()
                .rposition(|threshold| value >= *threshold,)
                .map_or(Rank::NotAchieved, |tier| Rank::TIERS[tier],),
        },
    }
}

/// A resolved achievement category.
#[derive(Debug, Clone, PartialEq, Serialize,)]
pub struct Achievement
{
    pub name:        &'static str,
    pub subtitle:    &'static str,
    /// Description with `{value}` substituted.
    pub description: String,
    pub value:       Option<u64,>,
    pub rank:        Rank,
    /// Fraction of the way from the achieved tier to the next one, `1.0` at
    /// the top tier. `None` for ranks that are not achieved.
    pub progress:    Option<f64,>,
}

struct CategoryDefinition
{
    name:        &'static str,
    subtitle:    &'static str,
    description: &'static str,
    value:       Option<u64,>,
    rule:        RankRule,
}

/// Derives the twelve achievement categories in display order.
///
/// `today` anchors the account-age categories. A creation timestamp after
/// `today` degrades the age to zero.
pub fn evaluate_achievements(stats: &UserStats, today: NaiveDate,) -> Outcome<Vec<Achievement,>,>
{
    let created = stats.created_at.date_naive();
    let (age_years, degraded,) = match account_age_years(created, today,) {
        Some(years,) => (years, None,),
        None => (0, Some(format!("account creation date {created} is after {today}"),),),
    };

    let specs = [
        CategoryDefinition {
            name:        "Star Rank",
            subtitle:    "Stargazer",
            description: "{value} stars",
            value:       Some(stats.total_stars,),
            rule:        RankRule::Standard([100, 500, 1_000, 5_000, 10_000, 50_000,],),
        },
        // Approximated by the number of public repositories.
        CategoryDefinition {
            name:        "Languages",
            subtitle:    "Polyglot",
            description: "{value} repos",
            value:       Some(stats.public_repos,),
            rule:        RankRule::Standard([1, 3, 5, 8, 10, 15,],),
        },
        CategoryDefinition {
            name:        "Experience",
            subtitle:    "Veteran",
            description: "{value} years on GitHub",
            value:       Some(age_years,),
            rule:        RankRule::Standard([1, 2, 3, 5, 7, 10,],),
        },
        CategoryDefinition {
            name:        "New User",
            subtitle:    "Fresh Start",
            description: "Joined 2020 or later",
            value:       None,
            rule:        RankRule::Forced {
                condition: created.year() >= 2020, rank: Rank::S,
            },
        },
        CategoryDefinition {
            name:        "Repositories",
            subtitle:    "Builder",
            description: "{value} public repos",
            value:       Some(stats.public_repos,),
            rule:        RankRule::Standard([1, 10, 20, 30, 50, 100,],),
        },
        CategoryDefinition {
            name:        "Commits",
            subtitle:    "Committer",
            description: "{value} commits",
            value:       stats.total_commits,
            rule:        RankRule::Standard([1, 100, 500, 1_000, 2_000, 4_000,],),
        },
        CategoryDefinition {
            name:        "Stars",
            subtitle:    "Star Collector",
            description: "{value} stars earned",
            value:       Some(stats.total_stars,),
            rule:        RankRule::Standard([1, 10, 30, 50, 100, 200,],),
        },
        CategoryDefinition {
            name:        "Followers",
            subtitle:    "Influencer",
            description: "{value} followers",
            value:       Some(stats.followers,),
            rule:        RankRule::Standard([1, 10, 20, 50, 100, 200,],),
        },
        CategoryDefinition {
            name:        "Issues",
            subtitle:    "Bug Hunter",
            description: "{value} issues opened",
            value:       Some(stats.total_issues,),
            rule:        RankRule::Standard([1, 10, 20, 50, 100, 200,],),
        },
        CategoryDefinition {
            name:        "Pull Requests",
            subtitle:    "Contributor",
            description: "{value} PRs opened",
            value:       Some(stats.total_prs,),
            rule:        RankRule::Standard([1, 10, 20, 50, 100, 200,],),
        },
        CategoryDefinition {
            name:        "Ancient User",
            subtitle:    "Pioneer",
            description: "Joined before 2010",
            value:       None,
            rule:        RankRule::Forced {
                condition: created.year() < 2010, rank: Rank::Sss,
            },
        },
        CategoryDefinition {
            name:        "Organizations",
            subtitle:    "Team Player",
            description: "{value} organizations",
            value:       (stats.organizations > 0).then_some(stats.organizations,),
            rule:        RankRule::Standard([1, 2, 3, 4, 5, 10,],),
        },
    ];

    let achievements = specs.into_iter().map(resolve_category,).collect();

    match degraded {
        Some(reason,) => Outcome::degraded(achievements, reason,),
        None => Outcome::Complete(achievements,),
    }
}

fn resolve_category(spec: CategoryDefinition,) -> Achievement
{
    let rank = resolve_rank(&spec.rule, spec.value,);
    let progress = rank.is_achieved().then(|| tier_progress(&spec.rule, spec.value,),);
    let description = match spec.value {
        Some(value,) => spec.description.replace("{value}", &value.to_string(),),
        None => spec.description.replace("{value}", "?",),
    };

    Achievement {
        name: spec.name,
        subtitle: spec.subtitle,
        description,
        value: spec.value,
        rank,
        progress,
    }
}

fn tier_progress(rule: &RankRule, value: Option<u64,>,) -> f64
{
    let (RankRule::Standard(thresholds,), Some(value,),) = (rule, value,) else {
        return 1.0;
    };

    match thresholds.iter().rposition(|threshold| value >= *threshold,) {
        Some(tier,) if tier + 1 < thresholds.len() => {
            let floor = thresholds[tier];
            let ceiling = thresholds[tier + 1];
            (value - floor) as f64 / (ceiling - floor) as f64
        }
        _ => 1.0,
    }
}

/// Whole years between `created` and `today`, `None` when `created` is in
/// the future.
fn account_age_years(created: NaiveDate, today: NaiveDate,) -> Option<u64,>
{
    if created > today {
        return None;
    }
    today.years_since(created,).map(u64::from,)
}
