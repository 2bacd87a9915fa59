use core::{
    hash::{BuildHasher, BuildHasherDefault, Hash, Hasher},
    mem,
    ops::{Index, IndexMut},
};
use std::hash::DefaultHasher;

pub use iter::IntoIter;
use tracing::{debug, trace};

use super::identity::{Identity, value_matches};
use crate::errors::{Error, Result};

mod iter;

/// A resizable array that gives up element order for O(1) removal.
///
/// Removing an element moves the last element into its slot, and
/// [`insert`](Self::insert) moves the displaced element to the end. Storage
/// order therefore says nothing about insertion order once either has
/// happened. Use it as a bag, never as a list.
///
/// The backing store has an explicit [`capacity`](Self::capacity): it starts
/// at the requested size and grows by [`GROWTH_FACTOR`](Self::GROWTH_FACTOR)
/// when full. Slots past the logical length hold nothing.
#[derive(Debug)]
pub struct UnorderedArray<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Default for UnorderedArray<T> {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl<T> UnorderedArray<T> {
    pub const DEFAULT_CAPACITY: usize = 16;

    /// Backing store growth ratio, applied to the current length.
    pub const GROWTH_FACTOR: f64 = 1.8;

    // GROWTH_FACTOR as an exact ratio, so growth never depends on float rounding.
    const GROWTH_NUMERATOR: usize = 9;
    const GROWTH_DENOMINATOR: usize = 5;

    /// Creates an empty array with [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY) slots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty array with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails, like [`Vec::with_capacity`]. Use
    /// [`try_with_capacity`](Self::try_with_capacity) to handle that case.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Creates an empty array with exactly `capacity` slots, reporting an
    /// allocation failure instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if `capacity` slots of `T` cannot be
    /// allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| Error::CapacityOverflow {
                requested: capacity,
            })?;
        Ok(Self { items, capacity })
    }

    /// Creates a copy of `other` holding its elements in the same slot order.
    ///
    /// The copy's capacity is `other.len()`; spare capacity is not carried over.
    #[must_use]
    pub fn copy_of(other: &Self) -> Self
    where
        T: Clone,
    {
        Self::from_slice(other.as_slice())
    }

    /// Creates an array holding a copy of every element of `source`, with
    /// capacity `source.len()`.
    #[must_use]
    pub fn from_slice(source: &[T]) -> Self
    where
        T: Clone,
    {
        let mut array = Self::with_capacity(source.len());
        array.items.extend_from_slice(source);
        array
    }

    /// Creates an array holding a copy of `source[start..start + count]`, with
    /// capacity `count`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceOutOfBounds`] if the range reaches past the end
    /// of `source`.
    pub fn from_slice_range(source: &[T], start: usize, count: usize) -> Result<Self>
    where
        T: Clone,
    {
        let range = source_range(source.len(), start, count)?;
        let mut array = Self::with_capacity(count);
        array.items.extend_from_slice(&source[range]);
        Ok(array)
    }

    /// The number of elements in the array.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// The number of slots in the backing store.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn is_not_empty(&self) -> bool {
        !self.items.is_empty()
    }

    /// Reallocates the backing store to exactly `new_capacity` slots.
    ///
    /// This is destructive when shrinking: if `new_capacity < len()`, the
    /// elements in slots `new_capacity..len()` are dropped and the length
    /// becomes `new_capacity`.
    pub fn resize(&mut self, new_capacity: usize) {
        let len = self.items.len();
        if new_capacity < len {
            debug!(
                dropped = len - new_capacity,
                new_capacity, "resize truncates live elements"
            );
            self.items.truncate(new_capacity);
        }

        if new_capacity > self.items.capacity() {
            self.items.reserve_exact(new_capacity - self.items.len());
        } else {
            self.items.shrink_to(new_capacity);
        }

        trace!(from = self.capacity, to = new_capacity, "resized backing store");
        self.capacity = new_capacity;
    }

    /// Grows the backing store to `max(DEFAULT_CAPACITY / 2, len * GROWTH_FACTOR)` slots.
    ///
    /// On an array that is far from full this can shrink the capacity, but
    /// never below the current length.
    pub(crate) fn expand(&mut self) {
        self.resize(self.grown_capacity());
    }

    fn grown_capacity(&self) -> usize {
        let scaled =
            self.items.len().saturating_mul(Self::GROWTH_NUMERATOR) / Self::GROWTH_DENOMINATOR;
        scaled.max(Self::DEFAULT_CAPACITY / 2)
    }

    /// Makes room for `additional` more elements with a single growth decision.
    ///
    /// An overflowing request saturates, and `Vec` reports it when reserving.
    fn reserve_for(&mut self, additional: usize) {
        let required = self.items.len().saturating_add(additional);

        if required > self.capacity {
            let grown = self.grown_capacity();
            if grown >= required {
                self.expand();
            } else {
                self.resize(required);
            }
        }
    }

    /// Inserts `value` at `index`, moving the element already there to the end.
    ///
    /// This does not shift the following elements: it is an O(1) operation
    /// that changes storage order. Inserting at `len()` appends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsertOutOfBounds`] if `index > len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use unordered::unordered;
    ///
    /// let mut array = unordered![0, 1, 2, 3];
    /// array.insert(1, 10).unwrap();
    /// assert_eq!(array.as_slice(), &[0, 10, 2, 3, 1]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let size = self.items.len();
        if index > size {
            return Err(Error::InsertOutOfBounds { index, size });
        }

        self.reserve_for(1);
        if index == size {
            self.items.push(value);
        } else {
            let displaced = mem::replace(&mut self.items[index], value);
            self.items.push(displaced);
        }
        Ok(())
    }

    /// Adds a new element at the end of the array.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `isize::MAX` bytes, like [`Vec::push`].
    pub fn add(&mut self, value: T) {
        self.reserve_for(1);
        self.items.push(value);
    }

    /// Adds all `values` at the end, in order, growing at most once.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `isize::MAX` bytes, like [`Vec::reserve`].
    ///
    /// # Examples
    ///
    /// ```
    /// use unordered::UnorderedArray;
    ///
    /// let mut array = UnorderedArray::new();
    /// array.add_many([1, 1, 3, 3]);
    /// assert_eq!(array.as_slice(), &[1, 1, 3, 3]);
    /// ```
    pub fn add_many<const N: usize>(&mut self, values: [T; N]) {
        self.reserve_for(N);
        self.items.extend(values);
    }

    /// Adds a copy of every element of `source` at the end.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `isize::MAX` bytes, like [`Vec::reserve`].
    pub fn add_all(&mut self, source: &[T])
    where
        T: Clone,
    {
        self.reserve_for(source.len());
        self.items.extend_from_slice(source);
    }

    /// Adds a copy of `source[start..start + count]` at the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceOutOfBounds`] if the range reaches past the end
    /// of `source`. Nothing is added in that case.
    pub fn add_all_range(&mut self, source: &[T], start: usize, count: usize) -> Result<()>
    where
        T: Clone,
    {
        let range = source_range(source.len(), start, count)?;
        self.add_all(&source[range]);
        Ok(())
    }

    /// Adds a copy of every element of `source` at the end, in its storage order.
    pub fn add_all_from(&mut self, source: &Self)
    where
        T: Clone,
    {
        self.add_all(source.as_slice());
    }

    /// Adds a copy of the elements in slots `start..start + count` of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `start + count > source.len()`.
    /// Nothing is added in that case.
    pub fn add_all_from_range(&mut self, source: &Self, start: usize, count: usize) -> Result<()>
    where
        T: Clone,
    {
        let size = source.len();
        let range = source_range(size, start, count).map_err(|_| Error::InvalidRange {
            start,
            count,
            size,
        })?;
        self.add_all(&source.items[range]);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        let size = self.items.len();
        self.items
            .get(index)
            .ok_or(Error::IndexOutOfBounds { index, size })
    }

    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let size = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, size })
    }

    /// Returns the element in the first slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the array is empty.
    pub fn first(&self) -> Result<&T> {
        self.items.first().ok_or(Error::Empty)
    }

    /// Returns the element in the last slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the array is empty.
    pub fn last(&self) -> Result<&T> {
        self.items.last().ok_or(Error::Empty)
    }

    /// Searches for the first slot holding the same instance as `value`.
    ///
    /// This is the search to use for the absent-value marker.
    pub fn index_of_identity(&self, value: &T) -> Option<usize>
    where
        T: Identity,
    {
        self.items.iter().position(|item| value.is_same(item))
    }

    /// Searches for the first slot whose element equals `value`.
    ///
    /// If `value` is the absent-value marker this is
    /// [`index_of_identity`](Self::index_of_identity).
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq + Identity,
    {
        if value.is_absent() {
            return self.index_of_identity(value);
        }
        self.items.iter().position(|item| value == item)
    }

    pub fn contains_identity(&self, value: &T) -> bool
    where
        T: Identity,
    {
        self.index_of_identity(value).is_some()
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq + Identity,
    {
        self.index_of(value).is_some()
    }

    /// Returns `true` if every one of `values` is the same instance as some element.
    ///
    /// Each value is looked up on its own, so repeating a value only
    /// requires one matching element.
    pub fn contains_all_identity<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: Identity + 'a,
    {
        values.into_iter().all(|value| self.contains_identity(value))
    }

    /// Returns `true` if every one of `values` equals some element.
    ///
    /// Each value is looked up on its own, so repeating a value only
    /// requires one matching element.
    ///
    /// # Examples
    ///
    /// ```
    /// use unordered::unordered;
    ///
    /// let array = unordered![1, 2, 3];
    /// assert!(array.contains_all([&3, &1, &1]));
    /// assert!(!array.contains_all([&1, &4]));
    /// ```
    pub fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: PartialEq + Identity + 'a,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    /// The number of elements that are the same instance as `value`.
    pub fn count_identity(&self, value: &T) -> usize
    where
        T: Identity,
    {
        self.items.iter().filter(|item| value.is_same(item)).count()
    }

    /// The number of elements equal to `value`; the absent-value marker is
    /// counted by identity.
    pub fn count(&self, value: &T) -> usize
    where
        T: PartialEq + Identity,
    {
        if value.is_absent() {
            return self.count_identity(value);
        }
        self.items.iter().filter(|item| value == *item).count()
    }

    /// Removes and returns the element at `index`, moving the last element
    /// into its slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use unordered::unordered;
    ///
    /// let mut array = unordered![10, 20, 30, 40];
    /// assert_eq!(array.remove_index(1), Ok(20));
    /// assert_eq!(array.as_slice(), &[10, 40, 30]);
    /// ```
    pub fn remove_index(&mut self, index: usize) -> Result<T> {
        let size = self.items.len();
        if index >= size {
            return Err(Error::IndexOutOfBounds { index, size });
        }
        Ok(self.items.swap_remove(index))
    }

    /// Removes the first element equal to `value`.
    ///
    /// Which of several equal elements goes is unspecified. Returns whether
    /// an element was removed.
    pub fn remove_value(&mut self, value: &T) -> bool
    where
        T: PartialEq + Identity,
    {
        self.index_of(value)
            .map(|index| self.items.swap_remove(index))
            .is_some()
    }

    /// Removes the first element that is the same instance as `value`.
    /// Returns whether an element was removed.
    pub fn remove_value_identity(&mut self, value: &T) -> bool
    where
        T: Identity,
    {
        self.index_of_identity(value)
            .map(|index| self.items.swap_remove(index))
            .is_some()
    }

    /// Drops every element. The capacity is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns `true` if both arrays hold the same instances, in any order.
    ///
    /// Every element of `other` is matched to a distinct slot of `self`.
    pub fn equals_identities(&self, other: &Self) -> bool
    where
        T: Identity,
    {
        self.matches_multiset(other, |theirs, ours| theirs.is_same(ours))
    }

    /// Greedily pairs every element of `other` with the first unused slot of
    /// `self` that `matches` it.
    ///
    /// Greedy pairing is exact for equivalence relations. A non-transitive
    /// `matches` may report a mismatch where some other pairing exists.
    fn matches_multiset<F>(&self, other: &Self, matches: F) -> bool
    where
        F: Fn(&T, &T) -> bool,
    {
        if self.len() != other.len() {
            return false;
        }

        let mut used = vec![false; self.len()];
        other.items.iter().all(|theirs| {
            let free = (0..self.len()).find(|&i| !used[i] && matches(theirs, &self.items[i]));
            match free {
                Some(i) => {
                    used[i] = true;
                    true
                }
                None => false,
            }
        })
    }

    /// Sum of the element hashes.
    ///
    /// Addition commutes, so arrays that are equal as multisets hash the same
    /// whatever their storage order.
    #[must_use]
    pub fn hash_code(&self) -> u64
    where
        T: Hash,
    {
        let hasher = BuildHasherDefault::<DefaultHasher>::default();
        self.items
            .iter()
            .fold(0u64, |sum, item| sum.wrapping_add(hasher.hash_one(item)))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Iterates over the elements in storage order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

/// Validates `start..start + count` against a source of length `len`.
fn source_range(len: usize, start: usize, count: usize) -> Result<core::ops::Range<usize>> {
    match start.checked_add(count) {
        Some(end) if end <= len => Ok(start..end),
        _ => Err(Error::SourceOutOfBounds { start, count, len }),
    }
}

impl<T: Clone> Clone for UnorderedArray<T> {
    fn clone(&self) -> Self {
        Self::copy_of(self)
    }
}

impl<T> PartialEq for UnorderedArray<T>
where
    T: PartialEq + Identity,
{
    /// Multiset equality: same length and the same elements in any order.
    fn eq(&self, other: &Self) -> bool {
        if core::ptr::eq(self, other) {
            return true;
        }
        self.matches_multiset(other, value_matches)
    }
}

impl<T> Eq for UnorderedArray<T> where T: Eq + Identity {}

impl<T: Hash> Hash for UnorderedArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl<T> Index<usize> for UnorderedArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for UnorderedArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.get_mut(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> From<Vec<T>> for UnorderedArray<T> {
    fn from(items: Vec<T>) -> Self {
        let capacity = items.len();
        Self { items, capacity }
    }
}

impl<T> FromIterator<T> for UnorderedArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Vec::from_iter(iter).into()
    }
}

impl<T> Extend<T> for UnorderedArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T> IntoIterator for UnorderedArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.items)
    }
}

impl<'a, T> IntoIterator for &'a UnorderedArray<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut UnorderedArray<T> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

static_assertions::assert_impl_all!(UnorderedArray<u8>: Send, Sync);
static_assertions::assert_not_impl_any!(UnorderedArray<std::rc::Rc<u8>>: Send, Sync);

#[macro_export]
macro_rules! unordered {
    ($($elem:expr),* $(,)?) => {{
        let mut arr = $crate::collections::unordered_array::UnorderedArray::default();
        $(arr.add($elem);)*
        arr
    }};
}
