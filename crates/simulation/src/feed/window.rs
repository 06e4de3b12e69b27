use std::collections::VecDeque;

/// Bounded, most-recent-first list of feed records
///
/// `push` prepends and drops whatever falls past the capacity, so
/// `len() <= capacity()` holds after every operation.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedWindow<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> FeedWindow<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Window holding the first `capacity` items of an already
    /// newest-first sequence
    pub fn with_items(capacity: usize, items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().take(capacity).collect(),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push_front(item);
        self.items.truncate(self.capacity);
    }

    /// Replace the contents, keeping the first `capacity` items
    pub fn replace(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.clear();
        self.items.extend(items.into_iter().take(self.capacity));
    }

    pub fn latest(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> FeedWindow<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}
