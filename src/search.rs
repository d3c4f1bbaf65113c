use std::cmp::Ordering;

use collections::HashTable;

use crate::storage::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMethod {
    Linear,
    Jump,
    Binary,
    Hash,
}

/// A search method bound to the data it needs.
///
/// `Jump` and `Binary` expect records ordered ascending by name,
/// `Hash` expects a table built from the current records.
#[derive(Debug, Clone, Copy)]
pub enum Searcher<'a> {
    Linear(&'a [Record]),
    Jump(&'a [Record]),
    Binary(&'a [Record]),
    Hash(&'a HashTable<Record>),
}

impl Searcher<'_> {
    pub fn method(&self) -> SearchMethod {
        match self {
            Searcher::Linear(_) => SearchMethod::Linear,
            Searcher::Jump(_) => SearchMethod::Jump,
            Searcher::Binary(_) => SearchMethod::Binary,
            Searcher::Hash(_) => SearchMethod::Hash,
        }
    }

    pub fn is_present(&self, name: &str) -> bool {
        match *self {
            Searcher::Linear(records) => linear(records, name),
            Searcher::Jump(records) => jump(records, name),
            Searcher::Binary(records) => binary(records, name),
            Searcher::Hash(table) => hash(table, name),
        }
    }
}

pub fn linear<T: AsRef<str>>(items: &[T], name: &str) -> bool {
    items.iter().any(|item| item.as_ref() == name)
}

/// Length of one jump over `n` items
#[inline]
pub fn block_size(n: usize) -> usize {
    n.isqrt()
}

/// Jump search over items sorted ascending by name.
///
/// Jumps block boundaries forward until one is not smaller than `name`,
/// then scans that block backwards.
pub fn jump<T: AsRef<str>>(items: &[T], name: &str) -> bool {
    let Some(first) = items.first() else {
        return false;
    };
    if first.as_ref() == name {
        return true;
    }

    let last = items.len() - 1;
    let step = block_size(items.len());
    let mut prev = 0;
    let mut curr = 0;

    while curr < last {
        curr = (curr + step).min(last);
        if items[curr].as_ref() >= name {
            break;
        }
        prev = curr;
    }

    // past the largest name
    if curr == last && name > items[curr].as_ref() {
        return false;
    }

    (prev + 1..=curr).rev().any(|i| items[i].as_ref() == name)
}

/// Recursive binary search over items sorted ascending by name
pub fn binary<T: AsRef<str>>(items: &[T], name: &str) -> bool {
    match items.len() {
        0 => false,
        n => binary_range(items, name, 0, n - 1),
    }
}

fn binary_range<T: AsRef<str>>(items: &[T], name: &str, left: usize, right: usize) -> bool {
    if left > right {
        return false;
    }

    let mid = left + (right - left) / 2;
    match items[mid].as_ref().cmp(name) {
        Ordering::Equal => true,
        Ordering::Less => binary_range(items, name, mid + 1, right),
        Ordering::Greater => match mid.checked_sub(1) {
            Some(r) => binary_range(items, name, left, r),
            None => false,
        },
    }
}

pub fn hash<V>(table: &HashTable<V>, name: &str) -> bool {
    table.get(name).is_some()
}
