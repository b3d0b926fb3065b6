// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Access to the GitHub data source.
//!
//! The rest of the crate depends only on the [`UpstreamClient`] contract and
//! the raw record types; [`GithubClient`] is the production implementation.

mod client;
mod types;

use std::future::Future;

pub use client::{GithubClient, validate_username};
pub use types::{RawCalendar, RawDay, RawProfile, RawRepository, RawWeek};

use crate::error::Error;

/// Source of raw profile and contribution records.
///
/// Each call either returns a complete payload or fails; implementations
/// keep no per-request state, so calls for different users are independent.
pub trait UpstreamClient
{
    /// Fetches the profile together with the top repositories by stars.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UserNotFound`] for unknown logins and
    /// [`Error::Upstream`] for every other failure.
    fn fetch_profile(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<RawProfile, Error,>,> + Send;

    /// Fetches the daily contribution calendar.
    ///
    /// A calendar that is present but malformed is returned as-is; the
    /// analyzer decides how to degrade.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UserNotFound`] for unknown logins and
    /// [`Error::Upstream`] for transport failures.
    fn fetch_contribution_calendar(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<RawCalendar, Error,>,> + Send;
}
