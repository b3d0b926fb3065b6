#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the badge pipeline."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.
//!
//! Two kinds of failure exist in the pipeline. Fatal failures are [`Error`]
//! values and travel to the caller, which maps them to a status through
//! [`Error::status_code`]. Sub-computations that can fall back to a safe
//! default report an [`Outcome`] instead so a single malformed field never
//! blanks a whole badge.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Unified error type returned by the upstream client, the service facade and
/// the CLI.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// The upstream data source reports that the requested account does not
    /// exist.
    #[error("user '{username}' was not found")]
    UserNotFound {
        /// Login that was requested.
        username: String
    },
    /// Rate limiting, transport failures or malformed upstream payloads.
    #[error("upstream request failed (status {status:?}): {message}")]
    Upstream {
        /// HTTP status reported by the upstream API, when one was received.
        status:  Option<u16>,
        /// Human readable description of the failure.
        message: String
    },
    /// Returned when caller input violates invariants.
    #[error("invalid input: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Wraps I/O errors that occur while reading configuration files.
    #[error("failed to read configuration from {path:?}: {source}")]
    Io {
        /// Location of the configuration file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Wraps serialization errors when writing JSON output.
    #[error("failed to serialize output: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    },
    /// Wraps I/O errors that occur while writing badge artifacts.
    #[error("failed to write badge artifact at {path:?}: {source}")]
    BadgeIo {
        /// Location of the artifact being produced.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs an upstream error with an optional HTTP status.
    ///
    /// # Parameters
    ///
    /// * `status` - Status code reported by the upstream API, if any.
    /// * `message` - Human-readable description of the failure.
    pub fn upstream<M>(status: Option<u16>, message: M) -> Self
    where
        M: Into<String>
    {
        Self::Upstream {
            status,
            message: message.into()
        }
    }

    /// Constructs a not-found error for the given login.
    pub fn user_not_found<U>(username: U) -> Self
    where
        U: Into<String>
    {
        Self::UserNotFound {
            username: username.into()
        }
    }

    /// Maps the error onto the HTTP-equivalent status a caller should report.
    ///
    /// Missing users map to `404`, upstream failures to `502`, invalid input
    /// to `400` and local failures to `500`.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UserNotFound {
                ..
            } => 404,
            Self::Upstream {
                ..
            } => 502,
            Self::Validation {
                ..
            } => 400,
            Self::Io {
                ..
            }
            | Self::Parse {
                ..
            }
            | Self::Serialize {
                ..
            }
            | Self::BadgeIo {
                ..
            } => 500
        }
    }

    /// Short message suitable for display inside an error badge.
    ///
    /// Upstream details may contain tokens echoed back by proxies, so only
    /// the category is shown for that variant.
    pub fn badge_message(&self) -> String {
        match self {
            Self::UserNotFound {
                username
            } => format!("User '{username}' not found"),
            Self::Upstream {
                ..
            } => "GitHub is temporarily unavailable".to_owned(),
            Self::Validation {
                message
            } => format!("Invalid request: {message}"),
            _ => "Internal error while rendering badge".to_owned()
        }
    }

    /// Returns `true` when retrying the operation cannot change the result.
    pub fn is_permanent(&self) -> bool {
        match self {
            Self::UserNotFound {
                ..
            }
            | Self::Validation {
                ..
            } => true,
            Self::Upstream {
                status, ..
            } => matches!(status, Some(400 | 401 | 403 | 404 | 422)),
            _ => true
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(error: octocrab::Error) -> Self {
        let status = match &error {
            octocrab::Error::GitHub {
                source, ..
            } => Some(source.status_code.as_u16()),
            _ => None
        };
        Self::Upstream {
            status,
            message: error.to_string()
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the configuration file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::BadgeIo`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the badge artifact that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn badge_io_error(path: &Path, source: std::io::Error) -> Error {
    Error::BadgeIo {
        path: path.to_path_buf(),
        source
    }
}

/// Result of a best-effort sub-computation.
///
/// `Degraded` carries the safe default that replaces the real value together
/// with the reason the computation could not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The computation finished with real data.
    Complete(T),
    /// The computation fell back to a default value.
    Degraded {
        /// Placeholder value used in place of the real result.
        value:  T,
        /// Description of what went wrong.
        reason: String
    }
}

impl<T> Outcome<T> {
    /// Constructs a degraded outcome.
    pub fn degraded<R>(value: T, reason: R) -> Self
    where
        R: Into<String>
    {
        Self::Degraded {
            value,
            reason: reason.into()
        }
    }

    /// Returns `true` when the value is a fallback.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Borrows the carried value regardless of completeness.
    pub fn value(&self) -> &T {
        match self {
            Self::Complete(value)
            | Self::Degraded {
                value, ..
            } => value
        }
    }

    /// Unwraps the carried value, logging the reason when degraded.
    ///
    /// # Parameters
    ///
    /// * `context` - Name of the computation, used in the log record.
    pub fn into_logged(self, context: &str) -> T {
        match self {
            Self::Complete(value) => value,
            Self::Degraded {
                value,
                reason
            } => {
                warn!(%reason, "{context} degraded to default values");
                value
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Outcome};

    #[test]
    fn validation_constructor_populates_message() {
        let error = Error::validation("something went wrong");
        match error {
            Error::Validation {
                ref message
            } => {
                assert_eq!(message, "something went wrong");
            }
            other => panic!("expected validation error, got {other:?}")
        }
    }

    #[test]
    fn to_display_string_matches_display() {
        let error = Error::user_not_found("ghost");
        assert_eq!(error.to_string(), error.to_display_string());
        assert_eq!(error.to_string(), "user 'ghost' was not found");
    }

    #[test]
    fn status_codes_follow_error_category() {
        assert_eq!(Error::user_not_found("ghost").status_code(), 404);
        assert_eq!(Error::upstream(Some(429), "rate limited").status_code(), 502);
        assert_eq!(Error::validation("bad").status_code(), 400);

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let error = super::badge_io_error(std::path::Path::new("/tmp/a.svg"), io);
        assert_eq!(error.status_code(), 500);
    }

    #[test]
    fn upstream_display_includes_status() {
        assert_eq!(
            Error::upstream(Some(503), "unavailable").to_string(),
            "upstream request failed (status Some(503)): unavailable"
        );
        assert_eq!(
            Error::upstream(None, "reset").to_string(),
            "upstream request failed (status None): reset"
        );
    }

    #[test]
    fn permanent_errors_are_not_retried() {
        assert!(Error::user_not_found("ghost").is_permanent());
        assert!(Error::upstream(Some(401), "bad credentials").is_permanent());
        assert!(!Error::upstream(Some(502), "bad gateway").is_permanent());
        assert!(!Error::upstream(None, "connection reset").is_permanent());
    }

    #[test]
    fn badge_message_hides_upstream_details() {
        let error = Error::upstream(Some(500), "token=abc leaked");
        assert!(!error.badge_message().contains("abc"));
        assert!(Error::user_not_found("ghost").badge_message().contains("not found"));
    }

    #[test]
    fn io_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/config.yaml");
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = super::io_error(path, io_error);

        match error {
            Error::Io {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected io error, got {other:?}")
        }
    }

    #[test]
    fn serde_yaml_conversion_maps_to_parse_variant() {
        let error = serde_yaml::from_str::<usize>("not-a-number").unwrap_err();
        let mapped: Error = error.into();
        assert!(matches!(mapped, Error::Parse { .. }));
    }

    #[test]
    fn outcome_exposes_value_in_both_states() {
        let complete = Outcome::Complete(3);
        let degraded = Outcome::degraded(0, "payload missing");

        assert!(!complete.is_degraded());
        assert!(degraded.is_degraded());
        assert_eq!(*complete.value(), 3);
        assert_eq!(degraded.into_logged("test"), 0);
    }
}
