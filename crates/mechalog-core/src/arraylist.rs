//! Ordered collection
//!
//! Array-backed, insertion-ordered, growable container used as the event
//! store. Storage grows by a fixed increment of [`GROWTH_INCREMENT`] slots
//! over an initial [`INITIAL_CAPACITY`] (not by doubling); growth that
//! cannot obtain memory is reported as [`ListError::AllocationFailed`] and
//! leaves the list untouched.

use std::cmp::Ordering;

use thiserror::Error;

/// Number of slots allocated for a freshly created list
pub const INITIAL_CAPACITY: usize = 10;

/// Number of slots added whenever the list runs out of room
pub const GROWTH_INCREMENT: usize = 10;

/// Errors reported by [`ArrayList`] operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("index {index} out of bounds for list of length {len}")]
    OutOfBounds { index: usize, len: usize },

    #[error("invalid range {from}..{to} for list of length {len}")]
    InvalidRange { from: usize, to: usize, len: usize },

    #[error("failed to allocate {additional} additional slots")]
    AllocationFailed { additional: usize },
}

/// Sort direction for [`ArrayList::sort_by`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest element first
    Ascending,
    /// Largest element first
    Descending,
}

/// A mutable, insertion-ordered sequence with an explicit capacity policy.
///
/// Elements keep their insertion/positional order under every operation
/// except [`sort_by`](ArrayList::sort_by). Indexing is `0..len()` for
/// reads, writes and removal, `0..=len()` for insertion.
#[derive(Debug, PartialEq)]
pub struct ArrayList<T> {
    items: Vec<T>,
}

impl<T> ArrayList<T> {
    /// Create an empty list with [`INITIAL_CAPACITY`] slots.
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Create an empty list, reporting allocation failure instead of
    /// aborting.
    pub fn try_new() -> Result<Self, ListError> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(INITIAL_CAPACITY)
            .map_err(|_| ListError::AllocationFailed {
                additional: INITIAL_CAPACITY,
            })?;
        Ok(Self { items })
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` if the list holds no elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of allocated slots (always `>= len()`)
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Reserve one more increment of slots when the list is full.
    ///
    /// On failure the list is exactly as it was before the call.
    fn grow_if_full(&mut self) -> Result<(), ListError> {
        if self.items.len() == self.items.capacity() {
            self.items
                .try_reserve_exact(GROWTH_INCREMENT)
                .map_err(|_| ListError::AllocationFailed {
                    additional: GROWTH_INCREMENT,
                })?;
        }
        Ok(())
    }

    /// Append an element to the end of the list, growing storage first if
    /// every slot is in use.
    pub fn push(&mut self, item: T) -> Result<(), ListError> {
        self.grow_if_full()?;
        self.items.push(item);
        Ok(())
    }

    /// Element at `index`, or `None` when `index >= len()`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable element at `index`, or `None` when `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Replace the element at `index`, returning the previous occupant.
    /// The list is unchanged when `index` is out of range.
    pub fn set(&mut self, index: usize, item: T) -> Result<T, ListError> {
        match self.items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, item)),
            None => Err(ListError::OutOfBounds {
                index,
                len: self.items.len(),
            }),
        }
    }

    /// Insert an element at `index`, shifting everything at and after it
    /// one slot to the right. `index == len()` appends.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), ListError> {
        if index > self.items.len() {
            return Err(ListError::OutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        self.grow_if_full()?;
        self.items.insert(index, item);
        Ok(())
    }

    /// Remove and return the element at `index`, shifting later elements
    /// left to close the gap. Dropping the returned value makes this a
    /// plain positional delete.
    pub fn remove(&mut self, index: usize) -> Result<T, ListError> {
        if index >= self.items.len() {
            return Err(ListError::OutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Remove all elements. Allocated slots are kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Release spare slots, keeping only what the live elements need.
    pub fn shrink_to_fit(&mut self) {
        self.items.shrink_to_fit();
    }

    /// Iterator over the elements in positional order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The elements as a contiguous slice
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// In-place O(n²) exchange sort using a caller-supplied comparator.
    ///
    /// Equal elements do not keep their relative order. A pair is swapped
    /// exactly when it disagrees with the requested direction.
    pub fn sort_by<F>(&mut self, mut cmp: F, order: SortOrder)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let n = self.items.len();
        for i in 0..n.saturating_sub(1) {
            for j in (i + 1)..n {
                let out_of_order = match order {
                    SortOrder::Ascending => {
                        cmp(&self.items[i], &self.items[j]) == Ordering::Greater
                    }
                    SortOrder::Descending => {
                        cmp(&self.items[i], &self.items[j]) == Ordering::Less
                    }
                };
                if out_of_order {
                    self.items.swap(i, j);
                }
            }
        }
    }
}

impl<T: PartialEq> ArrayList<T> {
    /// Position of the first element equal to `target`, or `None`.
    pub fn index_of(&self, target: &T) -> Option<usize> {
        self.items.iter().position(|item| item == target)
    }

    /// `true` if at least one element equals `target`
    pub fn contains(&self, target: &T) -> bool {
        self.index_of(target).is_some()
    }

    /// `true` if every element of `other` appears somewhere in this list
    pub fn contains_all(&self, other: &ArrayList<T>) -> bool {
        other.iter().all(|item| self.contains(item))
    }
}

impl<T: Clone> ArrayList<T> {
    /// New list holding copies of the elements at positions `from..to`
    /// (`to` exclusive). Requires `from <= to <= len()`; `from == to`
    /// yields an empty list.
    pub fn sub_list(&self, from: usize, to: usize) -> Result<ArrayList<T>, ListError> {
        if from > to || to > self.items.len() {
            return Err(ListError::InvalidRange {
                from,
                to,
                len: self.items.len(),
            });
        }
        let mut out = ArrayList::new();
        for item in &self.items[from..to] {
            out.push(item.clone())?;
        }
        Ok(out)
    }
}

impl<T> Default for ArrayList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ArrayList<T> {
    /// Independent storage, same elements in the same order.
    fn clone(&self) -> Self {
        let mut items = Vec::with_capacity(self.items.capacity());
        items.extend(self.items.iter().cloned());
        Self { items }
    }
}

impl<T> FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            // Same fixed-increment policy; infallible like `collect` elsewhere.
            if list.items.len() == list.items.capacity() {
                list.items.reserve_exact(GROWTH_INCREMENT);
            }
            list.items.push(item);
        }
        list
    }
}

impl<T> IntoIterator for ArrayList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
