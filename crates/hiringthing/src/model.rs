//! Typed records returned by the HiringThing remote API.
//!
//! The remote service is loose about JSON types (identifiers arrive as numbers or
//! strings, flags as booleans or `0`/`1`), so decoding is tolerant about the
//! representation while still rejecting values that carry no meaning.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};

use crate::client::ClientError;

/// Identifier wrapper for remote jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct JobId(pub String);

/// Identifier wrapper for remote applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ApplicationId(pub String);

macro_rules! identifier_impls {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(IdentifierVisitor).map(Self)
            }
        }
    };
}

identifier_impls!(JobId);
identifier_impls!(ApplicationId);

struct IdentifierVisitor;

impl<'de> Visitor<'de> for IdentifierVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-empty string or integer identifier")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(E::invalid_value(Unexpected::Str(value), &self));
        }
        Ok(trimmed.to_string())
    }
}

/// A job posting as seen by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub r#abstract: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub archived: bool,
}

/// A candidate's application to a single job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job: JobId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub rating: Option<Rating>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub archived: bool,
}

impl Application {
    pub fn full_name(&self) -> String {
        match (self.first_name.trim(), self.last_name.trim()) {
            ("", last) => last.to_string(),
            (first, "") => first.to_string(),
            (first, last) => format!("{first} {last}"),
        }
    }

    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }
}

/// Rating attached by a reviewer; tenants use either numeric scores or labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rating {
    Score(f64),
    Label(String),
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Score(score) => write!(f, "{score}"),
            Rating::Label(label) => f.write_str(label),
        }
    }
}

fn deserialize_rating<'de, D>(deserializer: D) -> Result<Option<Rating>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RatingVisitor;

    impl<'de> Visitor<'de> for RatingVisitor {
        type Value = Option<Rating>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("null, a numeric score, or a rating label")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, inner: D2) -> Result<Self::Value, D2::Error> {
            inner.deserialize_any(self)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(Rating::Score(value as f64)))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(Rating::Score(value as f64)))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(Some(Rating::Score(value)))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(Rating::Label(trimmed.to_string())))
            }
        }
    }

    deserializer.deserialize_option(RatingVisitor)
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean, 0/1, or \"true\"/\"false\"")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(Unexpected::Unsigned(other), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(Unexpected::Signed(other), &self)),
            }
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" => Ok(true),
                "0" | "false" => Ok(false),
                _ => Err(E::invalid_value(Unexpected::Str(value), &self)),
            }
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Status filter accepted by job listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobFilter {
    Active,
    Archived,
    #[default]
    All,
}

impl JobFilter {
    pub const fn label(self) -> &'static str {
        match self {
            JobFilter::Active => "active",
            JobFilter::Archived => "archived",
            JobFilter::All => "all",
        }
    }

    /// Path segment appended to the listing endpoint, if any.
    pub(crate) const fn path_segment(self) -> Option<&'static str> {
        match self {
            JobFilter::Active => Some("active"),
            JobFilter::Archived => Some("archived"),
            JobFilter::All => None,
        }
    }

    pub fn matches(self, job: &Job) -> bool {
        match self {
            JobFilter::Active => !job.archived,
            JobFilter::Archived => job.archived,
            JobFilter::All => true,
        }
    }
}

/// Rating filter accepted by application listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationFilter {
    Rated,
    Unrated,
    #[default]
    All,
}

impl ApplicationFilter {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationFilter::Rated => "rated",
            ApplicationFilter::Unrated => "unrated",
            ApplicationFilter::All => "all",
        }
    }

    pub(crate) const fn path_segment(self) -> Option<&'static str> {
        match self {
            ApplicationFilter::Rated => Some("rated"),
            ApplicationFilter::Unrated => Some("unrated"),
            ApplicationFilter::All => None,
        }
    }

    pub fn matches(self, application: &Application) -> bool {
        match self {
            ApplicationFilter::Rated => application.is_rated(),
            ApplicationFilter::Unrated => !application.is_rated(),
            ApplicationFilter::All => true,
        }
    }
}

impl FromStr for JobFilter {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            "all" => Ok(Self::All),
            _ => Err(ClientError::InvalidFilter {
                kind: "job",
                value: value.to_string(),
            }),
        }
    }
}

impl FromStr for ApplicationFilter {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rated" => Ok(Self::Rated),
            "unrated" => Ok(Self::Unrated),
            "all" => Ok(Self::All),
            _ => Err(ClientError::InvalidFilter {
                kind: "application",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for JobFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ApplicationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
