use std::collections::BTreeSet;

/// Single remote call applying one status to a set of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkStatusRequest<K, S> {
    pub ids: Vec<K>,
    pub status: S,
}

/// Selection over the currently loaded page of a remote list.
///
/// The selected set is always a subset of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection<K: Ord + Clone> {
    page: Vec<K>,
    selected: BTreeSet<K>,
}

impl<K: Ord + Clone> Default for PageSelection<K> {
    fn default() -> Self {
        Self {
            page: Vec::new(),
            selected: BTreeSet::new(),
        }
    }
}

impl<K: Ord + Clone> PageSelection<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the loaded page, dropping selections that left it.
    pub fn load_page(&mut self, keys: impl IntoIterator<Item = K>) {
        self.page = keys.into_iter().collect();
        let page: BTreeSet<&K> = self.page.iter().collect();
        self.selected.retain(|key| page.contains(key));
    }

    pub fn page(&self) -> &[K] {
        &self.page
    }

    /// Toggles a key on the page. Returns the new selection state, or
    /// `None` when the key is not on the page.
    pub fn toggle(&mut self, key: &K) -> Option<bool> {
        if !self.page.contains(key) {
            return None;
        }
        if self.selected.remove(key) {
            Some(false)
        } else {
            self.selected.insert(key.clone());
            Some(true)
        }
    }

    /// Selects a key on the page; selecting it again keeps it selected.
    /// Returns `false` when the key is not on the page.
    pub fn select(&mut self, key: &K) -> bool {
        if !self.page.contains(key) {
            return false;
        }
        self.selected.insert(key.clone());
        true
    }

    pub fn select_all(&mut self) {
        self.selected = self.page.iter().cloned().collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    pub fn selected(&self) -> impl Iterator<Item = &K> {
        self.selected.iter()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Builds the bulk mutation for the current selection; `None` when empty.
    pub fn bulk_status_request<S>(&self, status: S) -> Option<BulkStatusRequest<K, S>> {
        if self.selected.is_empty() {
            return None;
        }
        Some(BulkStatusRequest {
            ids: self.selected.iter().cloned().collect(),
            status,
        })
    }
}
