use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Sentinel accepted from callers to mean "no constraint" on an enum filter.
pub const ALL_SENTINEL: &str = "all";

/// Per-entity hooks the filter engine needs: the fields free text is matched against
/// and the enum/owner values the structured filters compare.
pub trait Searchable {
    type Status: Copy + Eq + Ord;
    type Category: Clone + PartialEq;

    fn search_fields(&self) -> Vec<&str>;
    fn status(&self) -> Self::Status;
    fn category(&self) -> Self::Category;

    fn owner_id(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldFilter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> FieldFilter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            FieldFilter::All => true,
            FieldFilter::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FieldFilter::All)
    }
}

impl<T: DeserializeOwned> FieldFilter<T> {
    /// Parse a wire label (e.g. `"in_review"`). Missing, blank, or `"all"` yield `All`.
    pub fn parse_label(raw: Option<&str>) -> Result<Self, InvalidFilter> {
        let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(FieldFilter::All);
        };
        if raw.eq_ignore_ascii_case(ALL_SENTINEL) {
            return Ok(FieldFilter::All);
        }

        serde_json::from_value(serde_json::Value::String(raw.to_string()))
            .map(FieldFilter::Only)
            .map_err(|_| InvalidFilter {
                value: raw.to_string(),
            })
    }
}

impl FieldFilter<String> {
    pub fn owner(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) if !value.eq_ignore_ascii_case(ALL_SENTINEL) => {
                FieldFilter::Only(value.to_string())
            }
            _ => FieldFilter::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized filter value '{value}'")]
pub struct InvalidFilter {
    pub value: String,
}

/// Predicates applied to a collection. All active predicates combine with AND.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery<S, C> {
    pub search_term: String,
    pub status: FieldFilter<S>,
    pub category: FieldFilter<C>,
    pub owner_id: FieldFilter<String>,
}

impl<S, C> Default for RecordQuery<S, C> {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            status: FieldFilter::All,
            category: FieldFilter::All,
            owner_id: FieldFilter::All,
        }
    }
}

impl<S: PartialEq, C: PartialEq> RecordQuery<S, C> {
    pub fn is_neutral(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.status.is_all()
            && self.category.is_all()
            && self.owner_id.is_all()
    }
}

/// Stable filter: output keeps input order.
pub fn filter<'a, T>(records: &'a [T], query: &RecordQuery<T::Status, T::Category>) -> Vec<&'a T>
where
    T: Searchable,
{
    let needle = query.search_term.trim().to_lowercase();

    records
        .iter()
        .filter(|record| {
            query.status.matches(&record.status())
                && query.category.matches(&record.category())
                && owner_matches(&query.owner_id, record.owner_id())
                && text_matches(&needle, record.search_fields())
        })
        .collect()
}

fn owner_matches(filter: &FieldFilter<String>, owner: Option<&str>) -> bool {
    match filter {
        FieldFilter::All => true,
        FieldFilter::Only(expected) => owner == Some(expected.as_str()),
    }
}

fn text_matches(needle: &str, fields: Vec<&str>) -> bool {
    needle.is_empty()
        || fields
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
}

/// Slice out a 1-based page. Callers clamp `page_number` with [`clamp_page`]; an
/// out-of-range page yields no items, and an empty input yields zero pages.
pub fn paginate<T: Clone>(records: &[T], page_size: NonZeroUsize, page_number: usize) -> Page<T> {
    let size = page_size.get();
    let total_pages = records.len().div_ceil(size);
    let offset = page_number.saturating_sub(1).saturating_mul(size);

    let items = records.iter().skip(offset).take(size).cloned().collect();

    Page { items, total_pages }
}

/// Clamp a requested page into `[1, total_pages]`, treating an empty result as page 1.
pub fn clamp_page(page_number: usize, total_pages: usize) -> usize {
    page_number.clamp(1, total_pages.max(1))
}

/// Single-pass tally used for summary tiles.
pub fn count_by_status<'a, T, I>(records: I) -> BTreeMap<T::Status, usize>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.status()).or_insert(0) += 1;
    }
    counts
}
