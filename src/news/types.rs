//! Type definitions for the news module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::date::parse_date;
use super::publisher::publisher_from_url;

/// A single news record as produced by the collectors.
///
/// `title` and `description` drive similarity; `link` is carried for display
/// only and is never used as a deduplication key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(default, deserialize_with = "deserialize_pub_date")]
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub is_global: bool,
    /// Industry the collector searched under.
    #[serde(default, alias = "originalIndustry", skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Query the collector used to find this article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_keyword: Option<String>,

    // Annotations attached by the relevance filters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_industries: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub companies: Vec<String>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_pub_date(mut self, pub_date: DateTime<Utc>) -> Self {
        self.pub_date = Some(pub_date);
        self
    }

    pub fn with_global(mut self, is_global: bool) -> Self {
        self.is_global = is_global;
        self
    }

    /// The explicit publisher, or the one implied by the link's domain.
    pub fn publisher_or_lookup(&self) -> Option<String> {
        match self.publisher.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => Some(p.to_string()),
            _ => publisher_from_url(&self.link).map(str::to_string),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Collectors emit dates in whatever format the feed used; anything we can't
/// read becomes `None` rather than failing the whole batch.
fn deserialize_pub_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}
