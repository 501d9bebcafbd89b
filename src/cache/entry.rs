use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::types::Generation;

/// Where a cached read currently stands.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FetchStatus {
    /// Never fetched.
    Idle,
    /// A fetch is in flight; the last-known value stays readable.
    Fetching,
    /// The last fetch installed a fresh value.
    Ready,
    /// The last fetch was rejected; `error` carries the envelope message.
    Failed
}

/// What a consumer observes when reading a cache entry.
#[derive(Debug, Clone)]
pub struct QuerySnapshot<T> {
    pub status: FetchStatus,
    /// Last successfully fetched value, retained across invalidations.
    pub value: Option<T>,
    pub error: Option<String>,
    /// Generation of the fetch that last wrote this snapshot.
    pub generation: Generation
}

impl<T> QuerySnapshot<T> {
    fn idle() -> Self {
        Self {
            status: FetchStatus::Idle,
            value: None,
            error: None,
            generation: 0
        }
    }
}

/// One keyed slot of the query cache.
///
/// The generation counter arbitrates between overlapping fetches: only a
/// completion carrying the entry's current generation may install its
/// outcome, so a consumer never observes a value older than the one present
/// at invalidation time.
pub struct CacheEntry<T> {
    snapshot: watch::Sender<QuerySnapshot<T>>,
    generation: AtomicU64
}

impl<T: Clone> CacheEntry<T> {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(QuerySnapshot::idle());

        Self {
            snapshot,
            generation: AtomicU64::new(0)
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<QuerySnapshot<T>> {
        self.snapshot.subscribe()
    }

    /// Starts the first fetch for this entry.
    ///
    /// Returns the generation the fetch must carry, or `None` when the entry
    /// has already fetched (or is fetching) — concurrent reads are
    /// deduplicated here, and a failed entry is not retried until an
    /// explicit invalidation.
    pub fn begin_initial_fetch(&self) -> Option<Generation> {
        let mut started = None;

        self.snapshot.send_modify(|snapshot| {
            if snapshot.status == FetchStatus::Idle {
                snapshot.status = FetchStatus::Fetching;
                started = Some(self.generation.load(Ordering::SeqCst));
            }
        });

        started
    }

    /// Marks the entry stale and returns the generation its refetch must
    /// carry. Any fetch still in flight under an older generation will be
    /// discarded on completion.
    pub fn invalidate(&self) -> Generation {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.snapshot.send_modify(|snapshot| {
            snapshot.status = FetchStatus::Fetching;
        });

        generation
    }

    /// Installs the outcome of a fetch, unless a newer invalidation has
    /// superseded it. Returns whether the outcome was installed.
    pub fn complete(&self, generation: Generation, outcome: Result<T, String>) -> bool {
        let mut installed = false;

        self.snapshot.send_modify(|snapshot| {
            if generation != self.generation.load(Ordering::SeqCst) {
                return;
            }

            match outcome {
                Ok(value) => {
                    snapshot.value = Some(value);
                    snapshot.error = None;
                    snapshot.status = FetchStatus::Ready;
                }
                Err(message) => {
                    snapshot.error = Some(message);
                    snapshot.status = FetchStatus::Failed;
                }
            }

            snapshot.generation = generation;
            installed = true;
        });

        installed
    }
}
