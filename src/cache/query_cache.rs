use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::spawn;
use tokio::sync::watch;
use tracing::debug;

use crate::api::TransactionApi;
use crate::cache::entry::CacheEntry;
use crate::cache::QuerySnapshot;
use crate::models::Transaction;
use crate::types::{Generation, QueryKey};

/// Keyed cache of asynchronous read results.
///
/// One typed entry per [`QueryKey`]; constructed once in `main` and handed
/// to consumers by `Arc` — nothing is ambient. Invalidation is the only
/// refetch trigger: there is no focus- or interval-based refetching, and a
/// failed read stays failed until something invalidates it.
pub struct QueryCache<A> {
    api: Arc<A>,
    balance: Arc<CacheEntry<Decimal>>,
    unsuccessful_transactions: Arc<CacheEntry<Vec<Transaction>>>
}

impl<A: TransactionApi> QueryCache<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            balance: Arc::new(CacheEntry::new()),
            unsuccessful_transactions: Arc::new(CacheEntry::new())
        }
    }

    pub fn subscribe_balance(&self) -> watch::Receiver<QuerySnapshot<Decimal>> {
        self.balance.subscribe()
    }

    pub fn subscribe_unsuccessful_transactions(&self) -> watch::Receiver<QuerySnapshot<Vec<Transaction>>> {
        self.unsuccessful_transactions.subscribe()
    }

    /// Starts a fetch for every entry that has never been fetched.
    /// Called when the dashboard mounts; a fetch already in flight is never
    /// duplicated.
    pub fn prime(&self) {
        if let Some(generation) = self.balance.begin_initial_fetch() {
            self.spawn_balance_fetch(generation);
        }

        if let Some(generation) = self.unsuccessful_transactions.begin_initial_fetch() {
            self.spawn_unsuccessful_transactions_fetch(generation);
        }
    }

    /// Marks the entry stale and refetches it in the background. The
    /// last-known value stays readable until the refetch lands.
    pub fn invalidate(&self, key: QueryKey) {
        debug!("Invalidating query [{key}]");

        match key {
            QueryKey::Balance => {
                let generation = self.balance.invalidate();
                self.spawn_balance_fetch(generation);
            }
            QueryKey::UnsuccessfulTransactions => {
                let generation = self.unsuccessful_transactions.invalidate();
                self.spawn_unsuccessful_transactions_fetch(generation);
            }
        }
    }

    fn spawn_balance_fetch(&self, generation: Generation) {
        let api = self.api.clone();
        let entry = self.balance.clone();

        spawn(async move {
            let outcome = api.fetch_balance().await
                .into_result()
                .map_err(|error| error.to_string());

            if !entry.complete(generation, outcome) {
                debug!("Discarded stale fetch [{}] at generation {generation}", QueryKey::Balance);
            }
        });
    }

    fn spawn_unsuccessful_transactions_fetch(&self, generation: Generation) {
        let api = self.api.clone();
        let entry = self.unsuccessful_transactions.clone();

        spawn(async move {
            let outcome = api.fetch_failed_transactions().await
                .into_result()
                .map_err(|error| error.to_string());

            if !entry.complete(generation, outcome) {
                debug!("Discarded stale fetch [{}] at generation {generation}", QueryKey::UnsuccessfulTransactions);
            }
        });
    }
}
