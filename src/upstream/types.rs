// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Raw upstream records, before normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile record as reported by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct RawProfile
{
    pub login:                    String,
    pub name:                     Option<String,>,
    pub followers:                u64,
    pub following:                u64,
    /// Total number of public repositories, not bounded by the page size.
    pub public_repos:             u64,
    /// Top repositories ordered by stars, descending.
    pub repositories:             Vec<RawRepository,>,
    /// Commit contributions for the reporting window, when available.
    pub total_commits:            Option<u64,>,
    /// Contributions to private repositories that are included in
    /// `total_commits` but hidden from public view.
    pub restricted_contributions: u64,
    pub total_issues:             u64,
    pub total_pull_requests:      u64,
    pub organizations:            u64,
    pub created_at:               DateTime<Utc,>,
}

/// Repository entry inside a [`RawProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct RawRepository
{
    pub name:             String,
    pub stars:            u64,
    pub forks:            u64,
    pub primary_language: Option<String,>,
}

/// Contribution calendar as reported by the upstream API.
///
/// Fields are optional so that a partially broken payload still reaches the
/// analyzer, which degrades instead of failing the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize,)]
pub struct RawCalendar
{
    #[serde(default)]
    pub weeks: Option<Vec<RawWeek,>,>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize,)]
#[serde(rename_all = "camelCase")]
pub struct RawWeek
{
    #[serde(default)]
    pub contribution_days: Vec<RawDay,>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
#[serde(rename_all = "camelCase")]
pub struct RawDay
{
    #[serde(default)]
    pub date:               Option<String,>,
    #[serde(default)]
    pub contribution_count: Option<i64,>,
}

impl RawDay
{
    pub fn new(date: &str, contribution_count: i64,) -> Self
    {
        Self {
            date: Some(date.to_owned(),), contribution_count: Some(contribution_count,),
        }
    }
}

impl RawCalendar
{
    /// Builds a single-week calendar from `(date, count)` pairs.
    pub fn from_days<'a, I,>(days: I,) -> Self
    where
        I: IntoIterator<Item = (&'a str, i64,),>,
    {
        let contribution_days = days.into_iter().map(|(date, count,)| RawDay::new(date, count,),).collect();
        Self {
            weeks: Some(vec![RawWeek {
                contribution_days
            }],),
        }
    }
}
