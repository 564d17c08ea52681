use std::collections::HashSet;

use crate::models::PageMeta;
use crate::types::Entity;

/// Checked rows, keyed by id. Checking a row twice keeps one copy.
#[derive(Debug, Clone)]
pub struct Selection<E> {
    records: Vec<E>,
}

impl<E> Default for Selection<E> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<E: Entity> Selection<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    pub fn toggle(&mut self, checked: bool, record: E) {
        if checked {
            if !self.contains(record.id()) {
                self.records.push(record);
            }
        } else {
            self.records.retain(|r| r.id() != record.id());
        }
    }

    /// Replace everything; duplicate ids in `records` collapse to the first
    pub fn replace(&mut self, records: Vec<E>) {
        let mut seen = HashSet::new();
        self.records = records
            .into_iter()
            .filter(|r| seen.insert(r.id().to_string()))
            .collect();
    }

    pub fn retain_ids(&mut self, ids: &HashSet<&str>) {
        self.records.retain(|r| ids.contains(r.id()));
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// `total` is whatever the server last reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_index: 1,
            page_size,
            total: 0,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }

    pub fn update(&mut self, meta: &PageMeta) {
        if meta.page > 0 {
            self.page_index = meta.page;
        }
        if meta.limit > 0 {
            self.page_size = meta.limit;
        }
        self.total = meta.total;
    }
}

/// In-memory mirror of one list page. Owned by whoever shows the list;
/// every mutation is synchronous and cannot fail.
#[derive(Debug, Clone)]
pub struct ListState<E, F> {
    records: Vec<E>,
    initial_loading: bool,
    filter: F,
    selected: Selection<E>,
    pagination: Pagination,
}

impl<E: Entity, F: Clone + Default> ListState<E, F> {
    pub fn new(page_size: u32) -> Self {
        Self {
            records: Vec::new(),
            initial_loading: true,
            filter: F::default(),
            selected: Selection::new(),
            pagination: Pagination::new(page_size),
        }
    }

    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn is_initial_loading(&self) -> bool {
        self.initial_loading
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn selected(&self) -> &Selection<E> {
        &self.selected
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Replace the page. Selected rows that are not on the new page are
    /// dropped.
    pub fn set_records(&mut self, records: Vec<E>) {
        let ids: HashSet<&str> = records.iter().map(|r| r.id()).collect();
        self.selected.retain_ids(&ids);
        self.records = records;
    }

    pub fn set_initial_loading(&mut self, loading: bool) {
        self.initial_loading = loading;
    }

    /// Last write wins. Does not fetch; the selection is cleared.
    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
        self.selected.clear();
    }

    pub fn toggle_selection(&mut self, checked: bool, record: E) {
        self.selected.toggle(checked, record);
    }

    pub fn set_all_selected(&mut self, records: Vec<E>) {
        self.selected.replace(records);
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn set_pagination(&mut self, meta: &PageMeta) {
        self.pagination.update(meta);
    }
}
