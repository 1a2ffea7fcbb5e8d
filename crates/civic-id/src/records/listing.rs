use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::num::NonZeroUsize;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::entities::{RecordId, Tracked};
use super::query::{clamp_page, count_by_status, filter, paginate, RecordQuery, Searchable};
use super::workflow::{transition, StatusWorkflow, TransitionError};
use crate::config::ListingConfig;
use crate::repository::{Keyed, Repository, RepositoryError};

const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => unreachable!(),
};
const DEFAULT_MAX_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(size) => size,
    None => unreachable!(),
};

/// Page size bounds applied to caller requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSettings {
    default_page_size: NonZeroUsize,
    max_page_size: NonZeroUsize,
}

impl ListingSettings {
    /// Zero values fall back to defaults; the default never exceeds the maximum.
    pub fn new(default_page_size: usize, max_page_size: usize) -> Self {
        let max_page_size = NonZeroUsize::new(max_page_size).unwrap_or(DEFAULT_MAX_PAGE_SIZE);
        let default_page_size = NonZeroUsize::new(default_page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(max_page_size);

        Self {
            default_page_size,
            max_page_size,
        }
    }

    pub fn resolve_page_size(&self, requested: Option<usize>) -> NonZeroUsize {
        requested
            .and_then(NonZeroUsize::new)
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size)
    }
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl From<&ListingConfig> for ListingSettings {
    fn from(config: &ListingConfig) -> Self {
        Self::new(config.default_page_size, config.max_page_size)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// One page of a filtered listing plus whole-collection status tiles.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<T, S: Ord> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub status_counts: BTreeMap<S, usize>,
}

/// Filter, clamp the requested page, then paginate.
pub fn assemble<T>(
    records: &[T],
    query: &RecordQuery<T::Status, T::Category>,
    request: PageRequest,
    settings: &ListingSettings,
) -> Listing<T, T::Status>
where
    T: Searchable + Clone,
{
    let status_counts = count_by_status(records);
    let matched: Vec<T> = filter(records, query).into_iter().cloned().collect();

    let page_size = settings.resolve_page_size(request.page_size);
    let total_pages = matched.len().div_ceil(page_size.get());
    let page = clamp_page(request.page.unwrap_or(1), total_pages);
    let slice = paginate(&matched, page_size, page);

    Listing {
        items: slice.items,
        page,
        page_size: page_size.get(),
        total_items: matched.len(),
        total_pages: slice.total_pages,
        status_counts,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Listing and status management over one admin collection.
pub struct ListingService<T, R> {
    repository: Arc<R>,
    settings: ListingSettings,
    _records: PhantomData<fn() -> T>,
}

impl<T, R> ListingService<T, R>
where
    T: Searchable + Keyed + Clone + Send + Sync + 'static,
    R: Repository<T> + 'static,
{
    pub fn new(repository: Arc<R>, settings: ListingSettings) -> Self {
        Self {
            repository,
            settings,
            _records: PhantomData,
        }
    }

    pub fn settings(&self) -> &ListingSettings {
        &self.settings
    }

    pub fn list(
        &self,
        query: &RecordQuery<T::Status, T::Category>,
        request: PageRequest,
    ) -> Result<Listing<T, T::Status>, ListingError> {
        let records = self.repository.all()?;
        Ok(assemble(&records, query, request, &self.settings))
    }

    pub fn get(&self, key: &T::Key) -> Result<T, ListingError> {
        let record = self
            .repository
            .fetch(key)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn status_counts(&self) -> Result<BTreeMap<T::Status, usize>, ListingError> {
        let records = self.repository.all()?;
        Ok(count_by_status(&records))
    }
}

impl<T, R> ListingService<T, R>
where
    T: Tracked + Clone + Send + Sync + 'static,
    T::Status: StatusWorkflow,
    R: Repository<T> + 'static,
{
    /// Move a record to `next` if the workflow allows it. The guard and the write run
    /// under one repository lock.
    pub fn transition_status(&self, id: &RecordId, next: T::Status) -> Result<T, ListingError> {
        let mut previous = None;
        let record = self.repository.modify::<ListingError, _>(id, |record| {
            let current = record.status();
            record.set_status(transition(current, next)?);
            previous = Some(current);
            Ok(())
        })?;

        if let Some(current) = previous.filter(|current| *current != next) {
            info!(
                record_id = %id.0,
                from = current.label(),
                to = next.label(),
                "record status updated"
            );
        }

        Ok(record)
    }
}
