//! In-process reactive document collection.

use std::{
    fmt,
    sync::{
        mpsc::{self, Receiver, RecvTimeoutError, Sender},
        Arc, Mutex, MutexGuard, Weak,
    },
    time::Duration,
};

use tracing::{debug, info, warn};

use super::{query::SnapshotQuery, StoreError};

/// A document that can live in a [`Collection`].
pub trait Record: Clone + Send + 'static {
    type Key: PartialEq + fmt::Display;

    fn key(&self) -> Self::Key;
}

type StoreResult<T> = Result<T, StoreError>;

struct Subscriber<T> {
    id: u64,
    query: Box<dyn SnapshotQuery<T>>,
    sender: Sender<Vec<T>>,
}

struct CollectionState<T> {
    records: Vec<T>,
    subscribers: Vec<Subscriber<T>>,
    next_subscriber: u64,
}

impl<T: Record> CollectionState<T> {
    /// Pushes the current snapshot to every subscriber, forgetting the ones
    /// whose receiving end is gone.
    fn publish(&mut self, collection: &'static str) {
        let records = &self.records;
        let before = self.subscribers.len();
        self.subscribers
            .retain(|subscriber| subscriber.sender.send(subscriber.query.select(records)).is_ok());
        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            warn!(collection, dropped, "discarded disconnected subscribers");
        }
        debug!(
            collection,
            records = records.len(),
            subscribers = self.subscribers.len(),
            "published snapshot"
        );
    }
}

/// A named collection of records that notifies subscribers with the full
/// matching snapshot after every write. Cloning yields another handle to the
/// same collection.
pub struct Collection<T: Record> {
    name: &'static str,
    state: Arc<Mutex<CollectionState<T>>>,
}

impl<T: Record> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Arc::new(Mutex::new(CollectionState {
                records: Vec::new(),
                subscribers: Vec::new(),
                next_subscriber: 0,
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn snapshot(&self) -> StoreResult<Vec<T>> {
        Ok(self.lock()?.records.clone())
    }

    /// One-off read through a query, without subscribing.
    pub fn query(&self, query: &dyn SnapshotQuery<T>) -> StoreResult<Vec<T>> {
        Ok(query.select(&self.lock()?.records))
    }

    pub fn get(&self, key: &T::Key) -> StoreResult<Option<T>> {
        Ok(self
            .lock()?
            .records
            .iter()
            .find(|record| record.key() == *key)
            .cloned())
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.records.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn subscriber_count(&self) -> StoreResult<usize> {
        Ok(self.lock()?.subscribers.len())
    }

    /// Appends a record without checking for an existing key.
    pub fn insert(&self, record: T) -> StoreResult<T::Key> {
        let key = record.key();
        let mut state = self.lock()?;
        state.records.push(record);
        info!(collection = self.name, key = %key, "inserted record");
        state.publish(self.name);
        Ok(key)
    }

    /// Replaces the record sharing the key, or appends it. Returns `true` when
    /// an existing record was overwritten.
    pub fn upsert(&self, record: T) -> StoreResult<bool> {
        let key = record.key();
        let mut state = self.lock()?;
        let replaced = match state.records.iter().position(|existing| existing.key() == key) {
            Some(index) => {
                state.records[index] = record;
                true
            }
            None => {
                state.records.push(record);
                false
            }
        };
        info!(collection = self.name, key = %key, replaced, "upserted record");
        state.publish(self.name);
        Ok(replaced)
    }

    pub fn update<F>(&self, key: &T::Key, apply: F) -> StoreResult<T>
    where
        F: FnOnce(&mut T),
    {
        let mut state = self.lock()?;
        let record = state
            .records
            .iter_mut()
            .find(|record| record.key() == *key)
            .ok_or_else(|| self.not_found(key))?;
        apply(record);
        let updated = record.clone();
        info!(collection = self.name, key = %key, "updated record");
        state.publish(self.name);
        Ok(updated)
    }

    pub fn remove(&self, key: &T::Key) -> StoreResult<T> {
        let mut state = self.lock()?;
        let index = state
            .records
            .iter()
            .position(|record| record.key() == *key)
            .ok_or_else(|| self.not_found(key))?;
        let removed = state.records.remove(index);
        info!(collection = self.name, key = %key, "removed record");
        state.publish(self.name);
        Ok(removed)
    }

    /// Swaps the whole content, e.g. when seeding from an exported snapshot.
    /// Records sharing a key collapse into the last one, as repeated upserts
    /// would.
    pub fn replace_all(&self, records: Vec<T>) -> StoreResult<()> {
        let incoming = records.len();
        let mut unique: Vec<T> = Vec::with_capacity(incoming);
        for record in records {
            let key = record.key();
            match unique.iter().position(|existing| existing.key() == key) {
                Some(index) => unique[index] = record,
                None => unique.push(record),
            }
        }
        if unique.len() < incoming {
            warn!(
                collection = self.name,
                collapsed = incoming - unique.len(),
                "merged records with duplicate keys"
            );
        }
        let mut state = self.lock()?;
        state.records = unique;
        state.publish(self.name);
        Ok(())
    }

    /// Registers a subscriber. The current matching snapshot is delivered
    /// immediately, then a fresh one after every write.
    pub fn subscribe<Q>(&self, query: Q) -> StoreResult<Subscription<T>>
    where
        Q: SnapshotQuery<T> + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let mut state = self.lock()?;
        let id = state.next_subscriber;
        state.next_subscriber += 1;
        // the receiver is alive, so the initial send cannot fail
        let _ = sender.send(query.select(&state.records));
        state.subscribers.push(Subscriber {
            id,
            query: Box::new(query),
            sender,
        });
        debug!(collection = self.name, subscriber = id, "subscribed");
        Ok(Subscription {
            id,
            collection: self.name,
            receiver,
            state: Arc::downgrade(&self.state),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, CollectionState<T>>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Poisoned(self.name))
    }

    fn not_found(&self, key: &T::Key) -> StoreError {
        StoreError::NotFound {
            collection: self.name,
            key: key.to_string(),
        }
    }
}

/// Live feed of snapshots for one query. Dropping the handle unregisters it
/// from the collection.
pub struct Subscription<T: Record> {
    id: u64,
    collection: &'static str,
    receiver: Receiver<Vec<T>>,
    state: Weak<Mutex<CollectionState<T>>>,
}

impl<T: Record> Subscription<T> {
    /// Next pending snapshot, without blocking.
    pub fn try_next(&self) -> Option<Vec<T>> {
        self.receiver.try_recv().ok()
    }

    /// Drains everything pending and returns only the most recent snapshot.
    pub fn latest(&self) -> Option<Vec<T>> {
        self.receiver.try_iter().last()
    }

    pub fn next_timeout(&self, timeout: Duration) -> Option<Vec<T>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(snapshot) => Some(snapshot),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Explicit release; equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl<T: Record> Iterator for Subscription<T> {
    type Item = Vec<T>;

    /// Blocks until the next snapshot. Ends only when the collection is gone.
    fn next(&mut self) -> Option<Self::Item> {
        self.receiver.recv().ok()
    }
}

impl<T: Record> Drop for Subscription<T> {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        if let Ok(mut guard) = state.lock() {
            guard.subscribers.retain(|subscriber| subscriber.id != self.id);
            debug!(collection = self.collection, subscriber = self.id, "unsubscribed");
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::query::AllRecords;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: u32,
        text: &'static str,
    }

    impl Record for Note {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }
    }

    fn note(id: u32, text: &'static str) -> Note {
        Note { id, text }
    }

    #[test]
    fn subscribe_delivers_initial_snapshot() {
        let notes = Collection::new("notes");
        notes.insert(note(1, "a")).unwrap();
        let subscription = notes.subscribe(AllRecords).unwrap();
        assert_eq!(subscription.try_next(), Some(vec![note(1, "a")]));
        assert_eq!(subscription.try_next(), None);
    }

    #[test]
    fn every_write_pushes_a_snapshot() {
        let notes = Collection::new("notes");
        let subscription = notes.subscribe(AllRecords).unwrap();
        notes.insert(note(1, "a")).unwrap();
        notes.update(&1, |n| n.text = "b").unwrap();
        notes.remove(&1).unwrap();
        let snapshots: Vec<Vec<Note>> = std::iter::from_fn(|| subscription.try_next()).collect();
        assert_eq!(
            snapshots,
            vec![vec![], vec![note(1, "a")], vec![note(1, "b")], vec![]]
        );
    }

    #[test]
    fn upsert_replaces_matching_key() {
        let notes = Collection::new("notes");
        assert!(!notes.upsert(note(7, "first")).unwrap());
        assert!(notes.upsert(note(7, "second")).unwrap());
        assert_eq!(notes.snapshot().unwrap(), vec![note(7, "second")]);
    }

    #[test]
    fn replace_all_keeps_last_record_per_key() {
        let notes = Collection::new("notes");
        notes
            .replace_all(vec![note(1, "old"), note(2, "b"), note(1, "new")])
            .unwrap();
        assert_eq!(notes.snapshot().unwrap(), vec![note(1, "new"), note(2, "b")]);
        assert_eq!(notes.get(&1).unwrap(), Some(note(1, "new")));
    }

    #[test]
    fn missing_keys_are_reported() {
        let notes: Collection<Note> = Collection::new("notes");
        let err = notes.remove(&3).unwrap_err();
        assert_eq!(err.to_string(), "notes record `3` not found");
        assert!(notes.update(&3, |_| {}).is_err());
    }

    #[test]
    fn dropping_subscription_unregisters_it() {
        let notes: Collection<Note> = Collection::new("notes");
        let first = notes.subscribe(AllRecords).unwrap();
        let second = notes.subscribe(AllRecords).unwrap();
        assert_eq!(notes.subscriber_count().unwrap(), 2);
        drop(first);
        second.unsubscribe();
        assert_eq!(notes.subscriber_count().unwrap(), 0);
    }

    #[test]
    fn resubscribing_restarts_with_fresh_snapshot() {
        let notes = Collection::new("notes");
        notes.insert(note(1, "a")).unwrap();
        drop(notes.subscribe(AllRecords).unwrap());
        notes.insert(note(2, "b")).unwrap();
        let again = notes.subscribe(AllRecords).unwrap();
        assert_eq!(again.latest(), Some(vec![note(1, "a"), note(2, "b")]));
    }

    #[test]
    fn iterator_ends_when_collection_is_gone() {
        let notes: Collection<Note> = Collection::new("notes");
        let mut subscription = notes.subscribe(AllRecords).unwrap();
        drop(notes);
        assert_eq!(subscription.next(), Some(vec![]));
        assert_eq!(subscription.next(), None);
    }
}
