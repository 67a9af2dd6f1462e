//! Stats Aggregator: per-category counts and recency of change.

use crate::types::{Category, GlossaryTerm, Language};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Number of terms per category.
///
/// Only categories with at least one member are present; `get` reports
/// absent categories as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts(BTreeMap<Category, usize>);

impl CategoryCounts {
    /// Count for a category, zero if absent
    pub fn get(&self, category: Category) -> usize {
        self.0.get(&category).copied().unwrap_or(0)
    }

    /// Categories that have at least one term, in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n))
    }

    /// Every category including empty ones, in category order
    pub fn iter_all(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Sum over all categories
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

/// Count terms per category.
pub fn counts_by_category(terms: &[GlossaryTerm]) -> CategoryCounts {
    let mut counts = BTreeMap::new();
    for term in terms {
        *counts.entry(term.category).or_insert(0) += 1;
    }
    CategoryCounts(counts)
}

/// Share of the store visible in a filtered view, in percent.
///
/// An empty store gives 0.
pub fn view_share(visible: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        visible as f64 / total as f64 * 100.0
    }
}

/// Human bucket for elapsed time since the last change.
///
/// Anything of a day or more reports `Today`; days are never counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSince {
    /// Under a minute (or a timestamp in the future)
    JustNow,
    /// Whole minutes, 1..=59
    Minutes(i64),
    /// Whole hours, 1..=23
    Hours(i64),
    Today,
}

impl TimeSince {
    /// Localized label, e.g. "5m ago" or "5分前".
    pub fn label(&self, language: Language) -> String {
        match (self, language) {
            (TimeSince::JustNow, Language::Jp) => "たった今".to_string(),
            (TimeSince::JustNow, _) => "Just now".to_string(),
            (TimeSince::Minutes(n), Language::Jp) => format!("{}分前", n),
            (TimeSince::Minutes(n), _) => format!("{}m ago", n),
            (TimeSince::Hours(n), Language::Jp) => format!("{}時間前", n),
            (TimeSince::Hours(n), _) => format!("{}h ago", n),
            (TimeSince::Today, Language::Jp) => "今日".to_string(),
            (TimeSince::Today, _) => "Today".to_string(),
        }
    }
}

impl fmt::Display for TimeSince {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label(Language::En))
    }
}

/// Classify the time elapsed between `then` and `now`.
pub fn time_since(then: DateTime<Utc>, now: DateTime<Utc>) -> TimeSince {
    let minutes = (now - then).num_seconds().div_euclid(60);
    let hours = minutes / 60;

    if minutes < 1 {
        TimeSince::JustNow
    } else if minutes < 60 {
        TimeSince::Minutes(minutes)
    } else if hours < 24 {
        TimeSince::Hours(hours)
    } else {
        TimeSince::Today
    }
}

/// Dashboard figures for the whole store.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSummary {
    pub total: usize,
    pub by_category: CategoryCounts,
    pub last_modified: DateTime<Utc>,
}

impl StoreSummary {
    pub fn new(terms: &[GlossaryTerm], last_modified: DateTime<Utc>) -> Self {
        StoreSummary {
            total: terms.len(),
            by_category: counts_by_category(terms),
            last_modified,
        }
    }

    /// Recency bucket relative to `now`
    pub fn last_activity(&self, now: DateTime<Utc>) -> TimeSince {
        time_since(self.last_modified, now)
    }
}
