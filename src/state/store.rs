//! Observable state container
//!
//! A [`Store`] holds one value plus a loading flag. Mutations are synchronous
//! and last-write-wins; every change wakes subscribers. Remote-backed stores
//! go through [`Store::refresh`], which clears the loading flag even when the
//! fetch fails or the refresh future is dropped mid-flight.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Value held by a store plus the number of refreshes in flight
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState<T> {
    pub value: T,
    in_flight: usize,
}

impl<T> StoreState<T> {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

/// Shared, observable state container
#[derive(Debug)]
pub struct Store<T> {
    tx: Arc<watch::Sender<StoreState<T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Clone> Store<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(StoreState {
            value: initial,
            in_flight: 0,
        });
        Self { tx: Arc::new(tx) }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.tx.borrow().value.clone()
    }

    pub fn snapshot(&self) -> StoreState<T> {
        self.tx.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().is_loading()
    }

    /// Replace the value
    pub fn set(&self, value: T) {
        self.tx.send_modify(|state| state.value = value);
    }

    /// Mutate the value in place
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(|state| f(&mut state.value));
    }

    /// Receiver woken on every change
    pub fn subscribe(&self) -> watch::Receiver<StoreState<T>> {
        self.tx.subscribe()
    }

    /// Run one fetch with the loading flag raised and replace the value on
    /// success. On failure the previous value is kept and the error returned.
    pub async fn refresh<E, F>(&self, fetch: F) -> Result<(), E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let _loading = LoadingGuard::start(&self.tx);
        let value = fetch.await?;
        self.set(value);
        Ok(())
    }
}

struct LoadingGuard<'a, T> {
    tx: &'a watch::Sender<StoreState<T>>,
}

impl<'a, T> LoadingGuard<'a, T> {
    fn start(tx: &'a watch::Sender<StoreState<T>>) -> Self {
        tx.send_modify(|state| state.in_flight += 1);
        Self { tx }
    }
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        self.tx.send_modify(|state| state.in_flight = state.in_flight.saturating_sub(1));
    }
}
