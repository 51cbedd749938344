/*
Binary min-heap ordered by a caller-supplied comparator.

Stored as a dense zero-indexed Vec where for every non-root position i,
compare(heap[(i - 1) / 2], heap[i]) != Greater. There is no decrease-key:
callers that need to lower a priority push a fresh entry and skip the stale
one when it surfaces.
*/

use std::cmp::Ordering;
use std::fmt;

/// Returned by [`PriorityQueue::extract_min`] when the queue holds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("extract_min called on an empty priority queue")]
pub struct EmptyQueueError;

pub struct PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    elems: Vec<T>,
    compare: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn new(compare: F) -> Self {
        Self::with_capacity(0, compare)
    }

    pub fn with_capacity(capacity: usize, compare: F) -> Self {
        Self {
            elems: Vec::with_capacity(capacity),
            compare,
        }
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// The current minimum, if any. Ties are resolved arbitrarily.
    pub fn peek(&self) -> Option<&T> {
        self.elems.first()
    }

    pub fn insert(&mut self, item: T) {
        self.elems.push(item);
        self.sift_up(self.elems.len() - 1);
    }

    /// Removes and returns an element no other element compares smaller than.
    pub fn extract_min(&mut self) -> Result<T, EmptyQueueError> {
        if self.elems.is_empty() {
            return Err(EmptyQueueError);
        }
        let last = self.elems.len() - 1;
        self.elems.swap(0, last);
        let min = self.elems.pop().ok_or(EmptyQueueError)?;
        if !self.elems.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    fn less(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.elems[a], &self.elems[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.less(idx, parent) {
                self.elems.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.elems.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            if left >= len {
                break;
            }
            // Left child wins ties.
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if self.less(child, idx) {
                self.elems.swap(idx, child);
                idx = child;
            } else {
                break;
            }
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("elems", &self.elems)
            .finish()
    }
}
