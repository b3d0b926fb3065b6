//! Statistics derivation and badge rendering for GitHub profiles.
//!
//! The library fetches a user's profile, repositories and contribution
//! calendar through an [`UpstreamClient`], normalizes them into a stable
//! statistics model, derives streaks, language shares and achievement ranks,
//! and renders themed SVG badges. Every derivation step is a pure function;
//! [`BadgeService`] ties the steps together behind one upstream call per
//! artifact.

mod achievement;
mod artifact;
mod config;
mod error;
mod model;
mod normalizer;
pub mod render;
mod retry;
mod service;
mod streak;
pub mod theme;
mod upstream;

pub use achievement::{Achievement, Rank, RankRule, evaluate_achievements, resolve_rank};
pub use artifact::write_badge;
pub use config::{RepositoryOptions, ServiceConfig, load_config, parse_config};
pub use error::{Error, Outcome, badge_io_error, io_error};
pub use model::{
    ContributionDay, LanguageEntry, LanguageUsage, ProfileSummary, StreakStats, UserStats,
};
pub use normalizer::{MAX_REPOSITORY_LIMIT, NormalizeOptions, normalize_profile, visible_commits};
pub use retry::{RetryConfig, retry_with_backoff};
pub use service::{BadgeKind, BadgeResponse, BadgeService, ServiceOptions, error_response};
pub use streak::{analyze_calendar, analyze_days};
pub use theme::{ThemeDescriptor, ThemeStyle};
pub use upstream::{
    GithubClient, RawCalendar, RawDay, RawProfile, RawRepository, RawWeek, UpstreamClient,
    validate_username,
};
