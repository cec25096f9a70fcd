//! Ordered transaction collection with value equality
//!
//! `TransactionList` wraps a `Vec` and compares element by element, in
//! order. It is used wherever an expected sequence of transactions is checked
//! against an actual one (CSV import previews, per-account registers, tests).
//!
//! Only the sequence operations below are exposed; the inner `Vec` is not.

use std::borrow::Borrow;
use std::collections::VecDeque;
use std::ops::{Index, IndexMut};
use std::slice::SliceIndex;

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::transaction::Transaction;

/// An ordered, structurally comparable list of transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionList<T = Transaction> {
    items: Vec<T>,
}

impl<T> TransactionList<T> {
    /// An empty list
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Build from an optional sequence; `None` yields an empty list
    pub fn from_option(items: Option<Vec<T>>) -> Self {
        Self {
            items: items.unwrap_or_default(),
        }
    }

    /// Structural equality against any ordered sequence of known length
    ///
    /// Lengths are compared first. Elements are then compared pairwise in
    /// order, stopping at the first mismatch.
    ///
    /// ```
    /// use std::collections::VecDeque;
    /// use banker::models::TransactionList;
    ///
    /// let list = TransactionList::from_vec(vec![1, 2, 3]);
    /// assert!(list.equals(&vec![1, 2, 3]));
    /// assert!(list.equals(VecDeque::from(vec![1, 2, 3])));
    /// assert!(!list.equals([1, 2]));
    /// ```
    pub fn equals<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
        I::Item: Borrow<T>,
        T: PartialEq,
    {
        let other = other.into_iter();
        if self.items.len() != other.len() {
            return false;
        }
        self.items
            .iter()
            .zip(other)
            .all(|(mine, theirs)| mine == theirs.borrow())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Insert at `index`, shifting later items right
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, like `Vec::insert`.
    pub fn insert(&mut self, index: usize, item: T) {
        self.items.insert(index, item);
    }

    /// Remove and return the item at `index`, or `None` if out of range
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl TransactionList<Transaction> {
    /// Stable sort by date; same-day transactions keep their relative order
    pub fn sort_by_date(&mut self) {
        self.items.sort_by_key(|txn| txn.date);
    }

    /// Sum of all amounts
    pub fn total(&self) -> Money {
        self.items.iter().map(|txn| txn.amount).sum()
    }

    /// Whether a structurally equal transaction is already in the list
    pub fn contains(&self, txn: &Transaction) -> bool {
        self.items.iter().any(|existing| existing == txn)
    }
}

impl<T> Default for TransactionList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for TransactionList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T> From<VecDeque<T>> for TransactionList<T> {
    fn from(items: VecDeque<T>) -> Self {
        Self::from_vec(items.into())
    }
}

impl<T> FromIterator<T> for TransactionList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> Extend<T> for TransactionList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for TransactionList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a TransactionList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for TransactionList<T> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        &self.items[index]
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for TransactionList<T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.items[index]
    }
}

impl<T: PartialEq> PartialEq for TransactionList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T: Eq> Eq for TransactionList<T> {}

impl<T: PartialEq> PartialEq<Vec<T>> for TransactionList<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.equals(other)
    }
}

impl<T: PartialEq> PartialEq<[T]> for TransactionList<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.equals(other)
    }
}

impl<T: PartialEq> PartialEq<TransactionList<T>> for Vec<T> {
    fn eq(&self, other: &TransactionList<T>) -> bool {
        other.equals(self)
    }
}
