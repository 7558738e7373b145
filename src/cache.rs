use indexmap::IndexMap;
use std::collections::HashMap;

use crate::model::{CompletionDetail, QuickInfo};

/// Quick-info results keyed by file and node span. Bounded: the least
/// recently used entry is evicted once capacity is reached, so a long
/// editing session cannot grow the cache without limit.
pub struct QuickInfoCache {
    entries: IndexMap<(String, usize, usize), QuickInfo>,
    capacity: usize,
}

impl QuickInfoCache {
    pub fn new(capacity: usize) -> Self {
        QuickInfoCache {
            entries: IndexMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&mut self, file: &str, start: usize, end: usize) -> Option<QuickInfo> {
        let key = (file.to_string(), start, end);
        let value = self.entries.shift_remove(&key)?;
        self.entries.insert(key, value.clone());
        Some(value)
    }

    pub fn insert(&mut self, file: &str, start: usize, end: usize, value: QuickInfo) {
        let key = (file.to_string(), start, end);
        self.entries.shift_remove(&key);
        while self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Completion-detail results scoped to one `(file, position)` pair. Any new
/// pair clears the previous scope before the first insertion.
#[derive(Default)]
pub struct DetailCache {
    scope: Option<(String, usize)>,
    entries: HashMap<String, CompletionDetail>,
}

impl DetailCache {
    pub fn new() -> Self {
        DetailCache::default()
    }

    pub fn get(&self, file: &str, position: usize, name: &str) -> Option<&CompletionDetail> {
        if !self.in_scope(file, position) {
            return None;
        }
        self.entries.get(name)
    }

    pub fn insert(&mut self, file: &str, position: usize, name: &str, value: CompletionDetail) {
        if !self.in_scope(file, position) {
            self.entries.clear();
            self.scope = Some((file.to_string(), position));
        }
        self.entries.insert(name.to_string(), value);
    }

    fn in_scope(&self, file: &str, position: usize) -> bool {
        match &self.scope {
            Some((scoped_file, scoped_position)) => {
                scoped_file == file && *scoped_position == position
            }
            None => false,
        }
    }
}
