use std::collections::HashMap;
use std::cmp::Eq;
use std::hash::Hash;
use std::fmt::{Debug, Formatter, Result};
use std::borrow::Borrow;

/// A datastructure that stores items by name and index, preserving insertion order.
#[derive(Clone)]
pub(crate) struct Repository<V, I = usize, K = String> {
    map: HashMap<K, I>,
    data: Vec<V>,
}

impl<V, I, K> Repository<V, I, K> where K: Eq + Hash, I: Copy + Into<usize> + From<usize> {
    /// Creates a new repository.
    pub fn new() -> Self {
        Repository {
            map: HashMap::new(),
            data: Vec::new(),
        }
    }
    /// Inserts an item into the repository and returns its index. An item already stored under the same name is
    /// replaced in place and returned alongside the index.
    pub fn insert(self: &mut Self, name: K, element: V) -> (I, Option<V>) {
        if let Some(&index) = self.map.get(&name) {
            let previous = std::mem::replace(&mut self.data[index.into()], element);
            (index, Some(previous))
        } else {
            let index = I::from(self.data.len());
            self.data.push(element);
            self.map.insert(name, index);
            (index, None)
        }
    }
    /// Fetches an item by name.
    pub fn name<Q: ?Sized>(self: &Self, name: &Q) -> Option<&V> where K: Borrow<Q>, Q: Hash + Eq {
        self.map.get(name).map(|&index| &self.data[index.into()])
    }
    /// Returns the index of the named item.
    pub fn index_of<Q: ?Sized>(self: &Self, name: &Q) -> Option<I> where K: Borrow<Q>, Q: Hash + Eq {
        self.map.get(name).copied()
    }
    /// Returns an iterator over the items in insertion order.
    pub fn values(self: &Self) -> std::slice::Iter<'_, V> {
        self.data.iter()
    }
    /// Number of stored items.
    pub fn len(self: &Self) -> usize {
        self.data.len()
    }
}

impl<V, I, K> Debug for Repository<V, I, K> where V: Debug {
    fn fmt(&self, f: &mut Formatter) -> Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}
