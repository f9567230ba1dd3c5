//! # Filter Engine
//!
//! A pure function from `(collection, query)` to the projection shown on screen.
//!
//! - Category stage: exact, case-insensitive match on [`CollectionEntity::category`].
//!   When no entity carries the selected category the engine falls back according to
//!   [`CategoryFallback`] (showing everything by default).
//! - Text stage: case-insensitive match on [`CollectionEntity::search_fields`], optionally
//!   extended with [`CollectionEntity::extended_search_fields`]. The whole query matching as
//!   a substring is a hit; otherwise every query word has to match a field word, either as a
//!   substring or by sharing all but its last character ("pizza" finds "Pizzeria").
//!
//! A blank query returns the collection unchanged. Results keep the collection's order.

use crate::framework::entity::CollectionEntity;

/// Transient search input owned by a view-model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub category: Option<String>,
}

impl Query {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: None,
        }
    }

    pub fn category(label: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            category: Some(label.into()),
        }
    }

    /// Lower-cased, trimmed search text, or `None` when blank.
    fn needle(&self) -> Option<String> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }

    /// Lower-cased, trimmed category label, or `None` when blank.
    fn category_label(&self) -> Option<String> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_lowercase)
    }

    pub fn is_blank(&self) -> bool {
        self.needle().is_none() && self.category_label().is_none()
    }
}

/// What a category filter shows when nothing matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFallback {
    /// Show the unfiltered collection (the behaviour the app shipped with).
    #[default]
    ShowAll,
    /// Show an empty result.
    ShowNone,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterPolicy {
    pub category_fallback: CategoryFallback,
    /// Also match [`CollectionEntity::extended_search_fields`] (menu items on the map).
    pub match_extended_fields: bool,
}

/// Reduce `collection` to the entities matching `query`.
pub fn filter<T: CollectionEntity>(
    collection: &[T],
    query: &Query,
    policy: &FilterPolicy,
) -> Vec<T> {
    let by_category: Vec<&T> = match query.category_label() {
        Some(label) => {
            let matches: Vec<&T> = collection
                .iter()
                .filter(|item| {
                    item.category()
                        .is_some_and(|c| c.trim().to_lowercase() == label)
                })
                .collect();
            if matches.is_empty() {
                match policy.category_fallback {
                    CategoryFallback::ShowAll => collection.iter().collect(),
                    CategoryFallback::ShowNone => Vec::new(),
                }
            } else {
                matches
            }
        }
        None => collection.iter().collect(),
    };

    match query.needle() {
        Some(needle) => by_category
            .into_iter()
            .filter(|item| matches_text(*item, &needle, policy))
            .cloned()
            .collect(),
        None => by_category.into_iter().cloned().collect(),
    }
}

fn matches_text<T: CollectionEntity>(item: &T, needle: &str, policy: &FilterPolicy) -> bool {
    let mut fields = item.search_fields();
    if policy.match_extended_fields {
        fields.extend(item.extended_search_fields());
    }
    let fields: Vec<String> = fields.into_iter().map(str::to_lowercase).collect();
    if fields.iter().any(|field| field.contains(needle)) {
        return true;
    }

    let query_words: Vec<&str> = words(needle).collect();
    if query_words.is_empty() {
        return false;
    }
    let field_words: Vec<&str> = fields.iter().flat_map(|field| words(field)).collect();
    query_words
        .iter()
        .all(|query| field_words.iter().any(|word| word_matches(query, word)))
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

/// Shortest query word that may match by stem instead of by substring.
const MIN_STEM_QUERY: usize = 4;

/// A query word matches a field word it is contained in, or one sharing its stem: every
/// character but the last (so "pizza" finds "pizzeria").
fn word_matches(query: &str, word: &str) -> bool {
    if word.contains(query) {
        return true;
    }
    let query_len = query.chars().count();
    if query_len < MIN_STEM_QUERY {
        return false;
    }
    let shared = query
        .chars()
        .zip(word.chars())
        .take_while(|(a, b)| a == b)
        .count();
    shared >= query_len - 1
}
