// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Badge service facade.
//!
//! [`BadgeService`] wires an [`UpstreamClient`] to the normalizer, the
//! analyzers and the renderers. Every operation issues exactly one upstream
//! call and holds no state between calls.

use std::fmt;

use chrono::Utc;
use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    achievement::evaluate_achievements,
    error::Error,
    model::{ProfileSummary, StreakStats},
    normalizer::{NormalizeOptions, normalize_profile},
    render, streak,
    theme::{self, ThemeDescriptor},
    upstream::{UpstreamClient, validate_username},
};

/// Badge variants the service can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum,)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind
{
    /// Summary card with stars, commits, repositories and followers.
    Stats,
    /// Top languages chart.
    Languages,
    /// Contribution streak panel.
    Streak,
    /// Achievement grid.
    Trophies,
}

impl fmt::Display for BadgeKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(match self {
            Self::Stats => "stats",
            Self::Languages => "languages",
            Self::Streak => "streak",
            Self::Trophies => "trophies",
        },)
    }
}

/// Rendered badge paired with the HTTP-equivalent status of the request.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct BadgeResponse
{
    /// `200` on success, otherwise [`Error::status_code`].
    pub status: u16,
    /// SVG document; an error card when `status` is not `200`.
    pub body:   String,
}

impl BadgeResponse
{
    pub fn is_success(&self,) -> bool
    {
        self.status == 200
    }
}

/// Service-wide settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq,)]
pub struct ServiceOptions
{
    pub normalize: NormalizeOptions,
}

/// Facade producing statistics and badges for GitHub users.
///
/// Methods take `&self`, so one service can be shared between concurrent
/// tasks when the client is `Sync`.
#[derive(Debug,)]
pub struct BadgeService<C,>
{
    client:  C,
    options: ServiceOptions,
}

impl<C,> BadgeService<C,>
where
    C: UpstreamClient,
{
    pub fn new(client: C, options: ServiceOptions,) -> Self
    {
        Self {
            client, options,
        }
    }

    pub fn options(&self,) -> ServiceOptions
    {
        self.options
    }

    /// Fetches and normalizes the profile of `username`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for malformed logins and propagates
    /// upstream failures.
    pub async fn user_stats(&self, username: &str,) -> Result<ProfileSummary, Error,>
    {
        validate_username(username,)?;
        let raw = self.client.fetch_profile(username,).await?;
        Ok(normalize_profile(&raw, self.options.normalize,),)
    }

    /// Fetches the contribution calendar and summarizes it.
    ///
    /// A malformed calendar degrades to zeroed statistics instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for malformed logins and propagates
    /// upstream failures.
    pub async fn contribution_years(&self, username: &str,) -> Result<StreakStats, Error,>
    {
        validate_username(username,)?;
        let calendar = self.client.fetch_contribution_calendar(username,).await?;
        Ok(streak::analyze_calendar(&calendar,).into_logged("streak analysis",),)
    }

    pub async fn stats_badge(&self, username: &str, theme: &str,) -> Result<String, Error,>
    {
        let summary = self.user_stats(username,).await?;
        Ok(render::render_stats_card(&summary.stats, theme::lookup(theme,),),)
    }

    pub async fn languages_badge(&self, username: &str, theme: &str,) -> Result<String, Error,>
    {
        let summary = self.user_stats(username,).await?;
        Ok(render::render_languages_card(&summary.languages, theme::lookup(theme,),),)
    }

    pub async fn streak_badge(&self, username: &str, theme: &str,) -> Result<String, Error,>
    {
        let stats = self.contribution_years(username,).await?;
        Ok(render::render_streak_card(&stats, theme::lookup(theme,),),)
    }

    /// Renders the achievement grid ranked as of today (UTC).
    pub async fn trophies_badge(&self, username: &str, theme: &str,) -> Result<String, Error,>
    {
        let summary = self.user_stats(username,).await?;
        let today = Utc::now().date_naive();
        let achievements =
            evaluate_achievements(&summary.stats, today,).into_logged("achievement evaluation",);
        Ok(render::render_trophies_card(&achievements, theme::lookup(theme,),),)
    }

    /// Renders `kind` for `username`, converting failures into an error card.
    ///
    /// The body is always a valid SVG document.
    pub async fn badge(&self, kind: BadgeKind, username: &str, theme: &str,) -> BadgeResponse
    {
        debug!(%kind, username, theme, "Rendering badge");
        let rendered = match kind {
            BadgeKind::Stats => self.stats_badge(username, theme,).await,
            BadgeKind::Languages => self.languages_badge(username, theme,).await,
            BadgeKind::Streak => self.streak_badge(username, theme,).await,
            BadgeKind::Trophies => self.trophies_badge(username, theme,).await,
        };

        match rendered {
            Ok(body,) => BadgeResponse {
                status: 200, body,
            },
            Err(error,) => {
                warn!(%kind, username, error = %error, "Badge rendering failed");
                error_response(&error, theme::lookup(theme,),)
            }
        }
    }
}

/// Converts an error into a themed error card with the matching status.
pub fn error_response(error: &Error, theme: &ThemeDescriptor,) -> BadgeResponse
{
    BadgeResponse {
        status: error.status_code(),
        body:   render::render_error_card(&error.badge_message(), theme,),
    }
}
