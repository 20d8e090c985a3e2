//! Date ordering for content collections.

use crate::content::{Log, Post, Project};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Anything with a publish (or start) date.
pub trait Dated {
    fn date(&self) -> DateTime<Utc>;
}

impl Dated for Post {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

impl Dated for Project {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

impl Dated for Log {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date(&self) -> DateTime<Utc> {
        (**self).date()
    }
}

/// Date sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recent first.
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            other => Err(format!("unknown order `{other}`, expected newest or oldest")),
        }
    }
}

/// Return a copy of `items` ordered by date.
///
/// The sort is stable: records with equal dates keep their input order.
/// Pass a slice of references to sort without cloning records.
pub fn sort_by_date<T: Dated + Clone>(items: &[T], order: SortOrder) -> Vec<T> {
    let mut sorted = items.to_vec();
    match order {
        SortOrder::Newest => sorted.sort_by_key(|item| std::cmp::Reverse(item.date())),
        SortOrder::Oldest => sorted.sort_by_key(|item| item.date()),
    }
    sorted
}
