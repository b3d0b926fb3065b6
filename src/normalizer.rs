// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Transformation logic that converts raw upstream profiles into the
//! normalized statistics model.
//!
//! Normalization is a pure function of its inputs: it holds no counters and
//! may be invoked any number of times on the same record.

use crate::{
    model::{LanguageUsage, ProfileSummary, UserStats},
    upstream::RawProfile,
};

/// Largest repository page the upstream API serves in one request.
pub const MAX_REPOSITORY_LIMIT: u8 = 100;

/// Options controlling how a raw profile is summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct NormalizeOptions
{
    /// Keep contributions to private repositories in the commit total.
    pub include_private:  bool,
    /// Number of top repositories (by stars) that feed the sums and the
    /// language table.
    pub repository_limit: u8,
}

impl Default for NormalizeOptions
{
    fn default() -> Self
    {
        Self {
            include_private: false, repository_limit: MAX_REPOSITORY_LIMIT,
        }
    }
}

/// Converts a raw profile into [`UserStats`] and [`LanguageUsage`].
///
/// Repositories are expected in upstream order (stars descending); only the
/// first `repository_limit` of them are counted. Each repository with a
/// primary language contributes one to that language.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use readme_stats::{NormalizeOptions, RawProfile, RawRepository, normalize_profile};
///
/// let raw = RawProfile {
///     login:                    "octocat".to_owned(),
///     name:                     None,
///     followers:                1,
///     following:                0,
///     public_repos:             1,
///     repositories:             vec![RawRepository {
///         name:             "hello".to_owned(),
///         stars:            7,
///         forks:            2,
///         primary_language: Some("Rust".to_owned(),),
///     }],
///     total_commits:            Some(10,),
///     restricted_contributions: 4,
///     total_issues:             0,
///     total_pull_requests:      0,
///     organizations:            0,
///     created_at:               Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0,).unwrap(),
/// };
///
/// let summary = normalize_profile(&raw, NormalizeOptions::default(),);
/// assert_eq!(summary.stats.total_stars, 7);
/// assert_eq!(summary.stats.total_commits, Some(6));
/// assert_eq!(summary.languages.entries()[0].name, "Rust");
/// ```
pub fn normalize_profile(raw: &RawProfile, options: NormalizeOptions,) -> ProfileSummary
{
    let counted = &raw.repositories[..raw.repositories.len().min(usize::from(options.repository_limit,),)];

    let total_stars = counted.iter().map(|repository| repository.stars,).sum();
    let total_forks = counted.iter().map(|repository| repository.forks,).sum();
    let languages = LanguageUsage::from_occurrences(
        counted.iter().filter_map(|repository| repository.primary_language.as_deref(),),
    );

    let total_commits = raw.total_commits.map(|commits| {
        visible_commits(commits, raw.restricted_contributions, options.include_private,)
    },);

    ProfileSummary {
        stats: UserStats {
            username: raw.login.clone(),
            name: raw.name.clone(),
            followers: raw.followers,
            following: raw.following,
            public_repos: raw.public_repos,
            total_stars,
            total_forks,
            total_commits,
            total_issues: raw.total_issues,
            total_prs: raw.total_pull_requests,
            created_at: raw.created_at,
            organizations: raw.organizations,
        },
        languages,
    }
}

/// Commit total visible to the requested audience.
///
/// When private contributions are excluded the restricted count is removed,
/// flooring at zero.
pub fn visible_commits(total: u64, restricted: u64, include_private: bool,) -> u64
{
    if include_private { total } else { total.saturating_sub(restricted,) }
}
