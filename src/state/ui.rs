//! UI toggle stores (sidebar, mobile navigation)

use tokio::sync::watch;
use super::store::{Store, StoreState};

/// Open/closed flag for one piece of chrome
#[derive(Debug, Clone)]
pub struct ToggleStore {
    store: Store<bool>,
}

impl ToggleStore {
    pub fn new(open: bool) -> Self {
        Self {
            store: Store::new(open),
        }
    }

    pub fn is_open(&self) -> bool {
        self.store.get()
    }

    pub fn set_open(&self, open: bool) {
        self.store.set(open);
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    pub fn toggle(&self) {
        self.store.update(|open| *open = !*open);
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState<bool>> {
        self.store.subscribe()
    }
}
