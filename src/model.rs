// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Normalized statistics model shared by the analyzers and renderers.
//!
//! Every value here is built fresh per request from upstream data and never
//! mutated afterwards. Counts are unsigned; numbers the upstream could not
//! provide are `None` rather than a sentinel.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Profile-level statistics derived from the upstream profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct UserStats
{
    /// Login of the account.
    pub username:      String,
    /// Display name chosen by the user, if any.
    pub name:          Option<String,>,
    pub followers:     u64,
    pub following:     u64,
    /// Number of public repositories owned by the user.
    pub public_repos:  u64,
    /// Stars summed over the fetched repository set.
    pub total_stars:   u64,
    /// Forks summed over the fetched repository set.
    pub total_forks:   u64,
    /// Commit contributions, `None` when the upstream could not report them.
    pub total_commits: Option<u64,>,
    pub total_issues:  u64,
    pub total_prs:     u64,
    pub created_at:    DateTime<Utc,>,
    pub organizations: u64,
}

impl UserStats
{
    /// Name shown in badge headers, falling back to the login.
    pub fn display_name(&self,) -> &str
    {
        self.name
            .as_deref()
            .map(str::trim,)
            .filter(|name| !name.is_empty(),)
            .unwrap_or(self.username.as_str(),)
    }
}

/// Repository count for a single primary language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct LanguageEntry
{
    pub name:  String,
    pub count: u64,
}

/// Languages ranked by the number of repositories using them as primary
/// language.
///
/// Entries are ordered by descending count; equal counts keep the order in
/// which the languages were first seen in the upstream listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize,)]
#[serde(transparent)]
pub struct LanguageUsage
{
    entries: Vec<LanguageEntry,>,
}

impl LanguageUsage
{
    /// Builds a ranked usage table from language names in upstream order.
    ///
    /// Each occurrence counts as one repository.
    pub fn from_occurrences<'a, I,>(languages: I,) -> Self
    where
        I: IntoIterator<Item = &'a str,>,
    {
        let mut entries: Vec<LanguageEntry,> = Vec::new();
        for language in languages {
            match entries.iter_mut().find(|entry| entry.name == language,) {
                Some(entry,) => entry.count += 1,
                None => entries.push(LanguageEntry {
                    name: language.to_owned(), count: 1,
                },),
            }
        }

        // `sort_by` is stable, so first-seen order breaks ties.
        entries.sort_by(|left, right| right.count.cmp(&left.count,),);

        Self {
            entries,
        }
    }

    pub fn entries(&self,) -> &[LanguageEntry]
    {
        &self.entries
    }

    pub fn is_empty(&self,) -> bool
    {
        self.entries.is_empty()
    }

    /// Sum of repository counts over all languages.
    pub fn total(&self,) -> u64
    {
        self.entries.iter().map(|entry| entry.count,).sum()
    }

    /// Top `limit` languages paired with their share of [`Self::total`] in
    /// percent.
    pub fn shares(&self, limit: usize,) -> Vec<(&str, f64,),>
    {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }

        self.entries
            .iter()
            .take(limit,)
            .map(|entry| (entry.name.as_str(), entry.count as f64 * 100.0 / total as f64,),)
            .collect()
    }
}

/// Statistics plus language usage, the payload of the JSON stats operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct ProfileSummary
{
    pub stats:     UserStats,
    pub languages: LanguageUsage,
}

/// Contributions recorded on a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,)]
pub struct ContributionDay
{
    pub date:  NaiveDate,
    pub count: u64,
}

/// Summary of a contribution calendar.
///
/// `longest_streak >= current_streak` always holds. Both dates are `None`
/// when the calendar holds no days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize,)]
pub struct StreakStats
{
    pub total_contributions: u64,
    pub current_streak:      u64,
    pub longest_streak:      u64,
    pub start_date:          Option<NaiveDate,>,
    pub end_date:            Option<NaiveDate,>,
}

#[cfg(test)]
mod tests
{
    use chrono::TimeZone;

    use super::*;

    fn sample_stats(name: Option<&str,>,) -> UserStats
    {
        UserStats {
            username:      "octocat".to_owned(),
            name:          name.map(str::to_owned,),
            followers:     1,
            following:     2,
            public_repos:  3,
            total_stars:   4,
            total_forks:   5,
            total_commits: None,
            total_issues:  6,
            total_prs:     7,
            created_at:    Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0,).unwrap(),
            organizations: 0,
        }
    }

    #[test]
    fn display_name_falls_back_to_username()
    {
        assert_eq!(sample_stats(Some("The Octocat",),).display_name(), "The Octocat");
        assert_eq!(sample_stats(None,).display_name(), "octocat");
        assert_eq!(sample_stats(Some("   ",),).display_name(), "octocat");
    }

    #[test]
    fn language_usage_ranks_by_count_with_stable_ties()
    {
        let usage = LanguageUsage::from_occurrences([
            "Go", "Rust", "Python", "Rust", "Python", "Shell",
        ],);

        let names: Vec<&str,> = usage.entries().iter().map(|entry| entry.name.as_str(),).collect();
        assert_eq!(names, ["Rust", "Python", "Go", "Shell"]);
        assert_eq!(usage.total(), 6);
    }

    #[test]
    fn language_usage_serializes_as_ordered_array()
    {
        let usage = LanguageUsage::from_occurrences(["Zig", "C", "C",],);
        let json = serde_json::to_string(&usage,).expect("serialization failed",);
        assert_eq!(json, r#"[{"name":"C","count":2},{"name":"Zig","count":1}]"#);
    }

    #[test]
    fn shares_are_empty_without_languages()
    {
        assert!(LanguageUsage::default().shares(6,).is_empty());
    }

    #[test]
    fn unknown_commits_serialize_as_null()
    {
        let json = serde_json::to_value(sample_stats(None,),).expect("serialization failed",);
        assert!(json["total_commits"].is_null());
    }
}
