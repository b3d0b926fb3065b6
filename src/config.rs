// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Optional YAML configuration for the badge service.
//!
//! Every field has a default, so an empty or missing document is valid.
//! Command-line flags override values loaded from the document.

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::warn;

use crate::{
    error::{self, Error},
    normalizer::{MAX_REPOSITORY_LIMIT, NormalizeOptions},
    retry::RetryConfig,
    service::ServiceOptions,
    theme,
};

/// Root configuration document.
///
/// # Examples
///
/// ```
/// use readme_stats::ServiceConfig;
///
/// let yaml = r#"
/// theme: nord
/// include_private: true
/// repositories:
///   page_size: 50
/// "#;
/// let config: ServiceConfig = serde_yaml::from_str(yaml,).expect("valid configuration",);
/// assert_eq!(config.theme_name(), "nord");
/// assert_eq!(config.repositories.page_size, 50);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize,)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig
{
    /// Theme used when a request does not name one.
    pub theme:           Option<String,>,
    /// Count contributions to private repositories in the commit total.
    pub include_private: bool,
    /// Repository listing options.
    pub repositories:    RepositoryOptions,
    /// Backoff applied to upstream calls.
    pub retry:           RetryConfig,
}

impl ServiceConfig
{
    /// Name of the default theme, `"default"` when unset.
    pub fn theme_name(&self,) -> &str
    {
        self.theme.as_deref().unwrap_or(theme::default_theme().name,)
    }

    /// Options handed to [`crate::BadgeService`].
    pub fn service_options(&self,) -> ServiceOptions
    {
        ServiceOptions {
            normalize: NormalizeOptions {
                include_private:  self.include_private,
                repository_limit: self.repositories.page_size,
            },
        }
    }
}

/// Repository listing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize,)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryOptions
{
    /// Number of top repositories by stars to fetch, `1..=100`.
    #[serde(deserialize_with = "deserialize_page_size")]
    pub page_size: u8,
}

impl Default for RepositoryOptions
{
    fn default() -> Self
    {
        Self {
            page_size: MAX_REPOSITORY_LIMIT,
        }
    }
}

fn deserialize_page_size<'de, D,>(deserializer: D,) -> Result<u8, D::Error,>
where
    D: serde::Deserializer<'de,>,
{
    let value = u8::deserialize(deserializer,)?;
    if value == 0 || value > MAX_REPOSITORY_LIMIT {
        return Err(serde::de::Error::custom(format!(
            "repositories.page_size must be between 1 and {MAX_REPOSITORY_LIMIT}"
        ),),);
    }
    Ok(value,)
}

/// Loads the configuration document from disk.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read and
/// [`Error::Parse`] when the YAML is malformed or violates a field range.
pub fn load_config(path: &Path,) -> Result<ServiceConfig, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_config(&contents,)
}

/// Parses a configuration document.
///
/// Blank input yields [`ServiceConfig::default`]. A theme name that is not
/// registered is kept but logged, since lookups fall back to `default`.
///
/// # Errors
///
/// Propagates [`Error::Parse`] when the YAML cannot be decoded.
pub fn parse_config(contents: &str,) -> Result<ServiceConfig, Error,>
{
    if contents.trim().is_empty() {
        return Ok(ServiceConfig::default(),);
    }

    let config: ServiceConfig = serde_yaml::from_str(contents,)?;
    if let Some(name,) = config.theme.as_deref()
        && !theme::names().any(|registered| registered.eq_ignore_ascii_case(name.trim(),),)
    {
        warn!(theme = name, "Configured theme is not registered, falling back to default");
    }
    Ok(config,)
}
