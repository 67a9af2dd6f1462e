//! Query Engine: derives a filtered view of the glossary.
//!
//! A query is a case-insensitive substring pattern ANDed with a category
//! filter. The pattern is tested against every text field of a term:
//! word, reading, English gloss, alias and all three definitions.
//!
//! Results keep the input order. There is no relevance ranking.

use crate::error::{GlossError, Result};
use crate::types::{Category, GlossaryTerm};
use std::fmt;

/// Category restriction for a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// The "All" sentinel: every category matches
    #[default]
    All,
    /// Exactly one category
    Only(Category),
}

impl CategoryFilter {
    /// Check if a category passes this filter.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(c) => write!(f, "{}", c),
        }
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(category: Option<Category>) -> Self {
        category.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// A compiled search query ready for matching.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Lowercased pattern, empty matches everything
    pattern_lower: String,

    category: CategoryFilter,
}

impl SearchQuery {
    /// Create a substring query (case-insensitive) over all categories.
    ///
    /// # Example
    /// ```
    /// use techgloss_core::SearchQuery;
    /// let query = SearchQuery::substring("mold");
    /// ```
    pub fn substring(pattern: &str) -> Self {
        SearchQuery {
            pattern_lower: pattern.to_lowercase(),
            category: CategoryFilter::All,
        }
    }

    /// Restrict the query to a category.
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// The category restriction
    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    /// Check if a term matches this query.
    pub fn matches(&self, term: &GlossaryTerm) -> bool {
        self.category.matches(term.category) && self.matches_text(term)
    }

    fn matches_text(&self, term: &GlossaryTerm) -> bool {
        if self.pattern_lower.is_empty() {
            return true;
        }

        let contains = |text: &str| text.to_lowercase().contains(&self.pattern_lower);

        contains(term.word.as_str())
            || contains(term.reading.as_str())
            || contains(term.english.as_str())
            || term.meanings.values().into_iter().any(contains)
            || term.alias.as_deref().map_or(false, contains)
    }

    /// Check if this query would match everything (identity filter)
    pub fn matches_all(&self) -> bool {
        self.pattern_lower.is_empty() && self.category == CategoryFilter::All
    }

    /// Apply the query to a list of terms, preserving order.
    pub fn apply<'a>(&self, terms: &'a [GlossaryTerm]) -> Vec<&'a GlossaryTerm> {
        terms.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Filter `terms` by free text and category, preserving order.
pub fn filter<'a>(
    terms: &'a [GlossaryTerm],
    query: &str,
    category: CategoryFilter,
) -> Vec<&'a GlossaryTerm> {
    SearchQuery::substring(query)
        .with_category(category)
        .apply(terms)
}

// === Query Parsing ===

/// Parse a query string into a SearchQuery.
///
/// # Query Syntax
///
/// - `pattern` - Terms containing "pattern" in any text field
/// - `cat:樹脂成型` / `category:resin-molding` - Restrict to one category
/// - `cat:all` - Explicitly all categories
///
/// Remaining words are joined with single spaces to form the pattern.
pub fn parse_query(input: &str) -> Result<SearchQuery> {
    let input = input.trim();

    if input.is_empty() {
        return Ok(SearchQuery::substring(""));
    }

    let mut category = CategoryFilter::All;
    let mut pattern_parts = Vec::new();

    for part in input.split_whitespace() {
        let value = part
            .strip_prefix("cat:")
            .or_else(|| part.strip_prefix("category:"));

        match value {
            Some(value) => {
                category = value.parse().map_err(|reason| GlossError::InvalidQuery {
                    query: input.to_string(),
                    reason,
                })?;
            }
            None => pattern_parts.push(part),
        }
    }

    Ok(SearchQuery::substring(&pattern_parts.join(" ")).with_category(category))
}
