use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

/// Records that carry a stable identifier inside their own payload.
pub trait Keyed {
    type Key: Clone + Eq + Hash + Debug + Send + Sync;

    fn key(&self) -> &Self::Key;
}

/// Storage abstraction so the engines and services can be exercised without a backend.
///
/// Implementations must return `all()` in insertion order; listing pages rely on it
/// for stable, unsorted output.
pub trait Repository<T: Keyed>: Send + Sync {
    fn insert(&self, record: T) -> Result<T, RepositoryError>;
    fn update(&self, record: T) -> Result<(), RepositoryError>;
    fn fetch(&self, key: &T::Key) -> Result<Option<T>, RepositoryError>;
    fn remove(&self, key: &T::Key) -> Result<T, RepositoryError>;
    fn all(&self) -> Result<Vec<T>, RepositoryError>;

    /// Read, check and write one record atomically. The record is written back only
    /// when `apply` succeeds.
    fn modify<E, F>(&self, key: &T::Key, apply: F) -> Result<T, E>
    where
        F: FnOnce(&mut T) -> Result<(), E>,
        E: From<RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Order-preserving in-memory store standing in for a real backend.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    records: Arc<Mutex<Vec<T>>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> InMemoryRepository<T>
where
    T: Keyed,
{
    /// Seed a repository from fixture data. Later duplicates of a key are dropped.
    pub fn seeded<I>(records: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut seeded: Vec<T> = Vec::new();
        for record in records {
            if seeded.iter().any(|existing| existing.key() == record.key()) {
                tracing::warn!(key = ?record.key(), "skipping duplicate seed record");
                continue;
            }
            seeded.push(record);
        }

        Self {
            records: Arc::new(Mutex::new(seeded)),
        }
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<T>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Keyed + Clone + Send + Sync,
{
    fn insert(&self, record: T) -> Result<T, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.key() == record.key()) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: T) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        let slot = guard
            .iter_mut()
            .find(|existing| existing.key() == record.key())
            .ok_or(RepositoryError::NotFound)?;
        *slot = record;
        Ok(())
    }

    fn fetch(&self, key: &T::Key) -> Result<Option<T>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|record| record.key() == key).cloned())
    }

    fn remove(&self, key: &T::Key) -> Result<T, RepositoryError> {
        let mut guard = self.lock()?;
        let index = guard
            .iter()
            .position(|record| record.key() == key)
            .ok_or(RepositoryError::NotFound)?;
        Ok(guard.remove(index))
    }

    fn all(&self) -> Result<Vec<T>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.clone())
    }

    fn modify<E, F>(&self, key: &T::Key, apply: F) -> Result<T, E>
    where
        F: FnOnce(&mut T) -> Result<(), E>,
        E: From<RepositoryError>,
    {
        let mut guard = self.lock()?;
        let slot = guard
            .iter_mut()
            .find(|record| record.key() == key)
            .ok_or(RepositoryError::NotFound)?;

        let mut draft = slot.clone();
        apply(&mut draft)?;
        *slot = draft.clone();
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: u32,
        body: &'static str,
    }

    impl Keyed for Note {
        type Key = u32;

        fn key(&self) -> &u32 {
            &self.id
        }
    }

    fn note(id: u32, body: &'static str) -> Note {
        Note { id, body }
    }

    #[test]
    fn insert_rejects_duplicate_keys() {
        let repository = InMemoryRepository::default();
        repository.insert(note(1, "first")).expect("insert succeeds");

        match repository.insert(note(1, "again")) {
            Err(RepositoryError::Conflict) => {}
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn all_preserves_insertion_order_across_updates() {
        let repository = InMemoryRepository::seeded(vec![note(3, "c"), note(1, "a"), note(2, "b")]);
        repository
            .update(note(1, "a2"))
            .expect("update existing record");

        let ids: Vec<u32> = repository.all().unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(repository.fetch(&1).unwrap().unwrap().body, "a2");
    }

    #[test]
    fn update_and_remove_report_missing_records() {
        let repository: InMemoryRepository<Note> = InMemoryRepository::default();
        assert!(matches!(
            repository.update(note(9, "x")),
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(repository.remove(&9), Err(RepositoryError::NotFound)));
    }

    #[test]
    fn seeded_drops_duplicate_keys() {
        let repository = InMemoryRepository::seeded(vec![note(1, "a"), note(1, "b")]);
        assert_eq!(repository.len().unwrap(), 1);
        assert_eq!(repository.remove(&1).unwrap().body, "a");
        assert!(repository.is_empty().unwrap());
    }

    #[test]
    fn modify_writes_back_only_on_success() {
        let repository = InMemoryRepository::seeded(vec![note(1, "draft")]);

        let updated = repository
            .modify(&1, |record: &mut Note| -> Result<(), RepositoryError> {
                record.body = "final";
                Ok(())
            })
            .expect("modify succeeds");
        assert_eq!(updated.body, "final");

        let rejected = repository.modify(&1, |record: &mut Note| {
            record.body = "discarded";
            Err(RepositoryError::Conflict)
        });
        assert!(matches!(rejected, Err(RepositoryError::Conflict)));
        assert_eq!(repository.fetch(&1).unwrap().unwrap().body, "final");

        let missing = repository.modify(&9, |_: &mut Note| Ok::<(), RepositoryError>(()));
        assert!(matches!(missing, Err(RepositoryError::NotFound)));
    }

    #[test]
    fn poisoned_store_reports_unavailable_length() {
        let repository = InMemoryRepository::seeded(vec![note(1, "a")]);
        let shared = repository.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.records.lock().unwrap();
            panic!("poison the store");
        })
        .join();

        assert!(matches!(
            repository.len(),
            Err(RepositoryError::Unavailable(_))
        ));
        assert!(matches!(
            repository.is_empty(),
            Err(RepositoryError::Unavailable(_))
        ));
    }
}
