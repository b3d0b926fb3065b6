// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! GraphQL client for profile and contribution data.
//!
//! Both operations issue exactly one GraphQL query (retried on transient
//! failures) and translate the response into the raw record types.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::{RawCalendar, RawProfile, RawRepository, UpstreamClient};
use crate::{
    error::Error,
    retry::{RetryConfig, retry_with_backoff},
};

const LOGIN_PATTERN: &str = r"^[A-Za-z0-9](?:[A-Za-z0-9]|-[A-Za-z0-9])*$";
const MAX_LOGIN_LENGTH: usize = 39;

static LOGIN_REGEX: LazyLock<Result<Regex, regex::Error,>,> =
    LazyLock::new(|| Regex::new(LOGIN_PATTERN,),);

const PROFILE_QUERY: &str = r"
query($login: String!, $first: Int!) {
  user(login: $login) {
    login
    name
    createdAt
    followers { totalCount }
    following { totalCount }
    organizations { totalCount }
    issues { totalCount }
    pullRequests { totalCount }
    contributionsCollection {
      totalCommitContributions
      restrictedContributionsCount
    }
    repositories(
      first: $first,
      ownerAffiliations: OWNER,
      privacy: PUBLIC,
      orderBy: { field: STARGAZERS, direction: DESC }
    ) {
      totalCount
      nodes {
        name
        stargazerCount
        forkCount
        primaryLanguage { name }
      }
    }
  }
}
";

const CALENDAR_QUERY: &str = r"
query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}
";

/// Rejects logins that GitHub itself would never issue.
///
/// # Errors
///
/// Returns [`Error::Validation`] when the login is empty, too long, or
/// contains characters outside `[A-Za-z0-9-]`, leading/trailing or doubled
/// hyphens.
pub fn validate_username(username: &str,) -> Result<(), Error,>
{
    if username.is_empty() || username.len() > MAX_LOGIN_LENGTH {
        return Err(Error::validation(format!(
            "username must be between 1 and {MAX_LOGIN_LENGTH} characters"
        ),),);
    }

    let pattern = LOGIN_REGEX
        .as_ref()
        .map_err(|e| Error::validation(format!("invalid login pattern: {e}"),),)?;
    if !pattern.is_match(username,) {
        return Err(Error::validation(format!("'{username}' is not a valid GitHub login"),),);
    }

    Ok((),)
}

/// Production [`UpstreamClient`] backed by the GitHub GraphQL API.
#[derive(Debug, Clone,)]
pub struct GithubClient
{
    octocrab:  Octocrab,
    retry:     RetryConfig,
    page_size: u8,
}

impl GithubClient
{
    /// Builds an authenticated client.
    ///
    /// # Arguments
    ///
    /// * `token` - GitHub personal access token; GraphQL rejects anonymous
    ///   requests
    /// * `retry` - Backoff policy applied to every query
    /// * `page_size` - Number of top repositories fetched per profile
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty token and
    /// [`Error::Upstream`] when the HTTP client cannot be initialized.
    pub fn new(token: &str, retry: RetryConfig, page_size: u8,) -> Result<Self, Error,>
    {
        if token.trim().is_empty() {
            return Err(Error::validation("a GitHub token is required (set GITHUB_TOKEN)",),);
        }

        let octocrab = Octocrab::builder().personal_token(token,).build().map_err(|e| {
            Error::upstream(None, format!("failed to initialize GitHub client: {e}"),)
        },)?;

        Ok(Self {
            octocrab,
            retry,
            page_size,
        },)
    }

    async fn query<T,>(
        &self,
        operation: &str,
        payload: &Value,
        username: &str,
        parse: fn(Value, &str,) -> Result<T, Error,>,
    ) -> Result<T, Error,>
    {
        let octocrab = &self.octocrab;
        retry_graphql(&self.retry, operation, username, parse, move || async move {
            octocrab.graphql::<Value,>(payload,).await.map_err(Error::from,)
        },)
        .await
    }
}

/// Sends a GraphQL request and decodes it inside one retry loop.
///
/// GitHub answers rate limiting and internal failures with HTTP 200 and an
/// `errors` array, so the body is classified before the attempt counts as
/// successful.
async fn retry_graphql<T, F, Fut,>(
    retry: &RetryConfig,
    operation: &str,
    username: &str,
    parse: fn(Value, &str,) -> Result<T, Error,>,
    mut send: F,
) -> Result<T, Error,>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Value, Error,>,>,
{
    retry_with_backoff(retry, operation, || {
        let response = send();
        async move { parse(response.await?, username,) }
    },)
    .await
}

impl UpstreamClient for GithubClient
{
    async fn fetch_profile(&self, username: &str,) -> Result<RawProfile, Error,>
    {
        validate_username(username,)?;
        debug!("Fetching profile for {}", username);

        let payload = json!({
            "query": PROFILE_QUERY,
            "variables": { "login": username, "first": self.page_size },
        });
        let profile =
            self.query(&format!("profile for {username}"), &payload, username, parse_profile,).await?;

        info!(
            "Fetched profile for {} with {} repositories",
            profile.login,
            profile.repositories.len()
        );
        Ok(profile,)
    }

    async fn fetch_contribution_calendar(&self, username: &str,) -> Result<RawCalendar, Error,>
    {
        validate_username(username,)?;
        debug!("Fetching contribution calendar for {}", username);

        let payload = json!({
            "query": CALENDAR_QUERY,
            "variables": { "login": username },
        });
        self.query(&format!("calendar for {username}"), &payload, username, parse_calendar,).await
    }
}

#[derive(Debug, Deserialize,)]
struct GraphQlResponse<T,>
{
    data:   Option<UserData<T,>,>,
    #[serde(default)]
    errors: Vec<GraphQlError,>,
}

#[derive(Debug, Deserialize,)]
struct UserData<T,>
{
    user: Option<T,>,
}

#[derive(Debug, Deserialize,)]
struct GraphQlError
{
    #[serde(rename = "type")]
    kind:    Option<String,>,
    message: String,
}

#[derive(Debug, Deserialize,)]
struct CountObj
{
    #[serde(rename = "totalCount")]
    total_count: u64,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct ProfileNode
{
    login:                    String,
    name:                     Option<String,>,
    created_at:               DateTime<Utc,>,
    followers:                CountObj,
    following:                CountObj,
    organizations:            CountObj,
    issues:                   CountObj,
    pull_requests:            CountObj,
    contributions_collection: Option<CommitCounts,>,
    repositories:             RepositoryPage,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct CommitCounts
{
    total_commit_contributions:     Option<u64,>,
    #[serde(default)]
    restricted_contributions_count: u64,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct RepositoryPage
{
    total_count: u64,
    #[serde(default)]
    nodes:       Vec<Option<RepositoryNode,>,>,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode
{
    name:             String,
    stargazer_count:  u64,
    fork_count:       u64,
    primary_language: Option<LanguageNode,>,
}

#[derive(Debug, Deserialize,)]
struct LanguageNode
{
    name: String,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct CalendarNode
{
    #[serde(default)]
    contributions_collection: Option<Value,>,
}

fn extract_user<T,>(response: GraphQlResponse<T,>, username: &str,) -> Result<T, Error,>
{
    if response.errors.iter().any(|error| error.kind.as_deref() == Some("NOT_FOUND",),) {
        return Err(Error::user_not_found(username,),);
    }

    if !response.errors.is_empty() {
        let messages: Vec<&str,> =
            response.errors.iter().map(|error| error.message.as_str(),).collect();
        return Err(Error::upstream(None, messages.join("; ",),),);
    }

    response
        .data
        .and_then(|data| data.user,)
        .ok_or_else(|| Error::user_not_found(username,),)
}

fn parse_profile(response: Value, username: &str,) -> Result<RawProfile, Error,>
{
    let parsed: GraphQlResponse<ProfileNode,> = serde_json::from_value(response,)
        .map_err(|e| Error::upstream(None, format!("malformed profile payload: {e}"),),)?;
    let node = extract_user(parsed, username,)?;

    let (total_commits, restricted_contributions,) = match node.contributions_collection {
        Some(counts,) => (counts.total_commit_contributions, counts.restricted_contributions_count,),
        None => (None, 0,),
    };

    let repositories = node
        .repositories
        .nodes
        .into_iter()
        .flatten()
        .map(|repository| RawRepository {
            name:             repository.name,
            stars:            repository.stargazer_count,
            forks:            repository.fork_count,
            primary_language: repository.primary_language.map(|language| language.name,),
        },)
        .collect();

    Ok(RawProfile {
        login: node.login,
        name: node.name,
        followers: node.followers.total_count,
        following: node.following.total_count,
        public_repos: node.repositories.total_count,
        repositories,
        total_commits,
        restricted_contributions,
        total_issues: node.issues.total_count,
        total_pull_requests: node.pull_requests.total_count,
        organizations: node.organizations.total_count,
        created_at: node.created_at,
    },)
}

fn parse_calendar(response: Value, username: &str,) -> Result<RawCalendar, Error,>
{
    let parsed: GraphQlResponse<CalendarNode,> = serde_json::from_value(response,)
        .map_err(|e| Error::upstream(None, format!("malformed calendar payload: {e}"),),)?;
    let node = extract_user(parsed, username,)?;

    let calendar = node
        .contributions_collection
        .and_then(|mut collection| collection.get_mut("contributionCalendar",).map(Value::take,),)
        .and_then(|calendar| match serde_json::from_value::<RawCalendar,>(calendar,) {
            Ok(calendar,) => Some(calendar,),
            Err(error,) => {
                debug!("Ignoring unreadable calendar for {}: {}", username, error);
                None
            }
        },)
        .unwrap_or_default();

    Ok(calendar,)
}

#[cfg(test)]
mod tests
{
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn fast_retry(max_attempts: u32,) -> RetryConfig
    {
        RetryConfig {
            max_attempts, initial_delay_ms: 1, backoff_factor: 1.0,
        }
    }

    fn profile_response() -> Value
    {
        json!({
            "data": {
                "user": {
                    "login": "octocat",
                    "name": "The Octocat",
                    "createdAt": "2011-01-25T18:44:36Z",
                    "followers": { "totalCount": 120 },
                    "following": { "totalCount": 9 },
                    "organizations": { "totalCount": 2 },
                    "issues": { "totalCount": 14 },
                    "pullRequests": { "totalCount": 31 },
                    "contributionsCollection": {
                        "totalCommitContributions": 120,
                        "restrictedContributionsCount": 20
                    },
                    "repositories": {
                        "totalCount": 8,
                        "nodes": [
                            { "name": "hello", "stargazerCount": 50, "forkCount": 4,
                              "primaryLanguage": { "name": "Rust" } },
                            { "name": "docs", "stargazerCount": 3, "forkCount": 0,
                              "primaryLanguage": null },
                            null
                        ]
                    }
                }
            }
        })
    }

    #[test]
    fn validate_username_accepts_github_logins()
    {
        for login in ["octocat", "a", "some-user-42", "X9"] {
            assert!(validate_username(login,).is_ok(), "{login} should be valid");
        }
    }

    #[test]
    fn validate_username_rejects_invalid_logins()
    {
        let too_long = "a".repeat(40,);
        for login in ["", "-lead", "trail-", "dou--ble", "sp ace", "x/y", too_long.as_str()] {
            let error = validate_username(login,).expect_err("login should be rejected",);
            assert!(matches!(error, Error::Validation { .. }), "{login} should be rejected");
        }
    }

    #[test]
    fn parse_profile_flattens_graphql_nodes()
    {
        let profile = parse_profile(profile_response(), "octocat",).expect("valid profile",);

        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.public_repos, 8);
        assert_eq!(profile.repositories.len(), 2);
        assert_eq!(profile.repositories[0].primary_language.as_deref(), Some("Rust"));
        assert_eq!(profile.repositories[1].primary_language, None);
        assert_eq!(profile.total_commits, Some(120));
        assert_eq!(profile.restricted_contributions, 20);
        assert_eq!(profile.total_pull_requests, 31);
    }

    #[test]
    fn parse_profile_maps_not_found_errors()
    {
        let response = json!({
            "data": { "user": null },
            "errors": [{ "type": "NOT_FOUND", "message": "Could not resolve to a User" }]
        });

        let error = parse_profile(response, "ghost",).expect_err("user should be missing",);
        assert!(matches!(error, Error::UserNotFound { ref username } if username == "ghost"));
    }

    #[test]
    fn parse_profile_reports_other_graphql_errors_as_upstream()
    {
        let response = json!({
            "data": null,
            "errors": [{ "type": "RATE_LIMITED", "message": "API rate limit exceeded" }]
        });

        let error = parse_profile(response, "octocat",).expect_err("rate limit should fail",);
        match error {
            Error::Upstream {
                message, ..
            } => assert!(message.contains("rate limit")),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn parse_profile_rejects_malformed_payload()
    {
        let response = json!({ "data": { "user": { "login": 42 } } });
        let error = parse_profile(response, "octocat",).expect_err("payload is malformed",);
        assert_eq!(error.status_code(), 502);
    }

    #[test]
    fn parse_calendar_reads_weeks()
    {
        let response = json!({
            "data": { "user": { "contributionsCollection": { "contributionCalendar": {
                "totalContributions": 3,
                "weeks": [{ "contributionDays": [
                    { "date": "2024-01-01", "contributionCount": 3 }
                ] }]
            } } } }
        });

        let calendar = parse_calendar(response, "octocat",).expect("valid calendar",);
        let weeks = calendar.weeks.expect("weeks should be present",);
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].contribution_days[0].contribution_count, Some(3));
    }

    #[test]
    fn parse_calendar_tolerates_missing_calendar()
    {
        let response = json!({ "data": { "user": { "contributionsCollection": null } } });
        let calendar = parse_calendar(response, "octocat",).expect("user exists",);
        assert!(calendar.weeks.is_none());
    }

    #[test]
    fn parse_calendar_reports_missing_user()
    {
        let response = json!({ "data": { "user": null } });
        let error = parse_calendar(response, "ghost",).expect_err("user should be missing",);
        assert_eq!(error.status_code(), 404);
    }

    #[test]
    fn client_requires_token()
    {
        let error = GithubClient::new("  ", RetryConfig::default(), 100,)
            .expect_err("empty token must be rejected",);
        assert!(matches!(error, Error::Validation { .. }));
    }

    #[test]
    fn login_pattern_compiles_once()
    {
        assert!(LOGIN_REGEX.is_ok());
        assert!(std::ptr::eq(
            LOGIN_REGEX.as_ref().expect("pattern compiles",),
            LOGIN_REGEX.as_ref().expect("pattern compiles",),
        ));
    }

    #[tokio::test]
    async fn graphql_errors_in_successful_responses_are_retried()
    {
        let attempts = AtomicU32::new(0,);
        let profile = retry_graphql(&fast_retry(3,), "profile", "octocat", parse_profile, || {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst,);
            async move {
                if attempt == 0 {
                    Ok(json!({
                        "data": null,
                        "errors": [{ "type": "RATE_LIMITED", "message": "API rate limit exceeded" }]
                    }),)
                } else {
                    Ok(profile_response(),)
                }
            }
        },)
        .await
        .expect("second attempt succeeds",);

        assert_eq!(profile.login, "octocat");
        assert_eq!(attempts.load(Ordering::SeqCst,), 2);
    }

    #[tokio::test]
    async fn missing_user_in_response_is_not_retried()
    {
        let attempts = AtomicU32::new(0,);
        let error = retry_graphql(&fast_retry(3,), "calendar", "ghost", parse_calendar, || {
            attempts.fetch_add(1, Ordering::SeqCst,);
            async { Ok(json!({ "data": { "user": null } }),) }
        },)
        .await
        .expect_err("user is missing",);

        assert_eq!(error.status_code(), 404);
        assert_eq!(attempts.load(Ordering::SeqCst,), 1);
    }

    #[tokio::test]
    async fn persistent_graphql_errors_exhaust_attempts()
    {
        let attempts = AtomicU32::new(0,);
        let error = retry_graphql(&fast_retry(2,), "profile", "octocat", parse_profile, || {
            attempts.fetch_add(1, Ordering::SeqCst,);
            async {
                Ok(json!({
                    "errors": [{ "message": "Something went wrong while executing your query" }]
                }),)
            }
        },)
        .await
        .expect_err("every attempt fails",);

        assert_eq!(error.status_code(), 502);
        assert_eq!(attempts.load(Ordering::SeqCst,), 2);
    }
}
