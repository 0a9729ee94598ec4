use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::EventItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sort order '{0}', expected 'asc' or 'desc'")]
pub struct ParseSortOrderError(pub String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(ParseSortOrderError(s.to_string()))
        }
    }
}

/// Filters accepted by `GET /v1/events`. Unset fields never reach the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEventsParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub region: Option<String>,
    pub county: Option<String>,
    pub area: Option<String>,
    pub place_like: Option<String>,
    pub q: Option<String>,
    pub sort: Option<SortOrder>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl ListEventsParams {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "from", self.from.as_ref());
        push_pair(&mut pairs, "to", self.to.as_ref());
        push_pair(&mut pairs, "region", self.region.as_ref());
        push_pair(&mut pairs, "county", self.county.as_ref());
        push_pair(&mut pairs, "area", self.area.as_ref());
        push_pair(&mut pairs, "place_like", self.place_like.as_ref());
        push_pair(&mut pairs, "q", self.q.as_ref());
        push_pair(&mut pairs, "sort", self.sort.as_ref());
        push_pair(&mut pairs, "limit", self.limit.as_ref());
        push_pair(&mut pairs, "cursor", self.cursor.as_ref());
        pairs
    }
}

/// Filters accepted by `GET /v1/events/now`. The server decides what "now" is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsNowParams {
    pub region: Option<String>,
    pub county: Option<String>,
    pub area: Option<String>,
    pub place_like: Option<String>,
    pub limit: Option<u32>,
}

impl EventsNowParams {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "region", self.region.as_ref());
        push_pair(&mut pairs, "county", self.county.as_ref());
        push_pair(&mut pairs, "area", self.area.as_ref());
        push_pair(&mut pairs, "place_like", self.place_like.as_ref());
        push_pair(&mut pairs, "limit", self.limit.as_ref());
        pairs
    }
}

fn push_pair<T: ToString>(
    pairs: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<&T>,
) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventListResponse {
    pub items: Vec<EventItem>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
