//! A fixed-capacity hash map keyed by text.
//!
//! Keys are hashed with a base-31 polynomial over their UTF-16 code units and entries that land
//! in the same bucket are chained in insertion order. The bucket count is fixed when the map is
//! created: the map never resizes, so lookups degrade linearly once chains grow. Crossing the
//! configured load factor only logs a warning.

use log::warn;
use std::fmt::{self, Debug};
use std::iter;
use std::mem;
use std::slice;

/// The number of buckets of a map created with [`HashMap::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// The load factor above which a map warns that its chains are growing.
pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 0.75;

type Chain<V> = Option<Box<Entry<V>>>;

struct Entry<V> {
    key: String,
    value: V,
    next: Chain<V>,
}

/// A separate-chaining hash map with a fixed number of buckets.
///
/// # Examples
///
/// ```
/// use midtree::HashMap;
///
/// let mut colors = HashMap::new();
/// colors.set("apple", "red");
/// colors.set("banana", "yellow");
///
/// assert_eq!(colors.get("apple"), Some(&"red"));
/// assert!(colors.has("banana"));
/// assert!(colors.remove("apple"));
/// assert!(!colors.has("apple"));
/// assert_eq!(colors.len(), 1);
/// ```
pub struct HashMap<V> {
    buckets: Vec<Chain<V>>,
    len: usize,
    max_load_factor: f32,
}

/// Reduces the key's polynomial hash modulo `capacity`.
///
/// Reducing after every step gives the same bucket as reducing the exact hash once.
fn bucket_index(key: &str, capacity: usize) -> usize {
    let capacity = capacity as u64;
    key.encode_utf16().fold(0, |hash, unit| (hash * 31 + u64::from(unit)) % capacity) as usize
}

impl<V> HashMap<V> {
    /// Creates an empty map with [`DEFAULT_CAPACITY`] buckets.
    pub fn new() -> Self { HashMap::with_capacity(DEFAULT_CAPACITY) }

    /// Creates an empty map with the given number of buckets.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        HashMap::with_capacity_and_load_factor(capacity, DEFAULT_MAX_LOAD_FACTOR)
    }

    /// Creates an empty map with the given number of buckets and load factor warning threshold.
    pub fn with_capacity_and_load_factor(capacity: usize, max_load_factor: f32) -> Self {
        HashMap {
            buckets: iter::repeat_with(|| None).take(capacity.max(1)).collect(),
            len: 0,
            max_load_factor: max_load_factor,
        }
    }

    /// Returns the bucket the given key belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// let map = midtree::HashMap::<()>::new();
    /// assert_eq!(map.hash("apple"), 10);
    /// assert_eq!(map.hash("a"), map.hash("q"));
    /// ```
    pub fn hash(&self, key: &str) -> usize { bucket_index(key, self.buckets.len()) }

    /// Returns the number of buckets, which never changes.
    pub fn capacity(&self) -> usize { self.buckets.len() }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize { self.len }

    /// Checks if the map is empty.
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns the average number of entries per bucket.
    pub fn load_factor(&self) -> f32 { self.len as f32 / self.buckets.len() as f32 }

    /// Returns the load factor above which the map logs a warning.
    pub fn max_load_factor(&self) -> f32 { self.max_load_factor }

    /// Associates a value with a key, returning the value it replaced, if any.
    ///
    /// A key already in the map keeps its position in its chain; a new key is appended to the
    /// end of its chain.
    pub fn set<K>(&mut self, key: K, value: V) -> Option<V> where K: Into<String> {
        let key = key.into();

        if let Some(slot) = self.get_mut(&key) { return Some(mem::replace(slot, value)); }

        let was_over = self.load_factor() > self.max_load_factor;
        let index = self.hash(&key);
        self.append(index, key, value);

        if !was_over && self.load_factor() > self.max_load_factor {
            warn!("hash map holds {} entries in {} buckets (load factor {:.2} over {:.2}); \
                   it will not resize", self.len, self.buckets.len(), self.load_factor(),
                  self.max_load_factor);
        }

        None
    }

    fn append(&mut self, index: usize, key: String, value: V) {
        let mut link = &mut self.buckets[index];
        while let Some(entry) = link { link = &mut entry.next; }
        *link = Some(Box::new(Entry { key: key, value: value, next: None }));
        self.len += 1;
    }

    /// Returns a reference to the value associated with the key, or `None` if there is none.
    pub fn get(&self, key: &str) -> Option<&V> {
        let mut link = self.buckets[self.hash(key)].as_deref();

        while let Some(entry) = link {
            if entry.key == key { return Some(&entry.value); }
            link = entry.next.as_deref();
        }

        None
    }

    /// Returns a mutable reference to the value associated with the key, or `None` if there is
    /// none.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.hash(key);
        let mut link = self.buckets[index].as_deref_mut();

        while let Some(entry) = link {
            if entry.key == key { return Some(&mut entry.value); }
            link = entry.next.as_deref_mut();
        }

        None
    }

    /// Checks if the map contains the key.
    pub fn has(&self, key: &str) -> bool { self.get(key).is_some() }

    /// Removes the key from the map, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool { self.remove_entry(key).is_some() }

    /// Removes the key from the map and returns it with its value, or returns `None` if it was
    /// not present.
    pub fn remove_entry(&mut self, key: &str) -> Option<(String, V)> {
        let index = self.hash(key);
        let mut link = &mut self.buckets[index];

        while link.as_ref().map_or(false, |entry| entry.key != key) {
            link = &mut link.as_mut()?.next;
        }

        let mut entry = link.take()?;
        *link = entry.next.take();
        self.len -= 1;

        let Entry { key, value, .. } = *entry;
        Some((key, value))
    }

    /// Removes all entries, keeping the buckets.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            let mut link = bucket.take();
            while let Some(mut entry) = link { link = entry.next.take(); }
        }
        self.len = 0;
    }

    /// Returns an iterator over the entries, bucket by bucket and then in chain order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter(), chain: None, remaining: self.len }
    }

    /// Returns an iterator over the keys, in the order of [`iter`](#method.iter).
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ { self.iter().map(|(key, _)| key) }

    /// Returns an iterator over the values, in the order of [`iter`](#method.iter).
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ { self.iter().map(|(_, value)| value) }

    /// Returns an iterator over the key-value pairs, in the order of [`iter`](#method.iter).
    pub fn entries(&self) -> Iter<'_, V> { self.iter() }
}

impl<V> Drop for HashMap<V> {
    fn drop(&mut self) { self.clear(); }
}

impl<V> Clone for HashMap<V> where V: Clone {
    fn clone(&self) -> Self {
        let mut map = HashMap::with_capacity_and_load_factor(self.capacity(), self.max_load_factor);
        for (index, bucket) in self.buckets.iter().enumerate() {
            let mut link = bucket.as_deref();
            while let Some(entry) = link {
                map.append(index, entry.key.clone(), entry.value.clone());
                link = entry.next.as_deref();
            }
        }
        map
    }
}

impl<V> Debug for HashMap<V> where V: Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.debug_map().entries(self.iter()).finish() }
}

impl<V> Default for HashMap<V> {
    fn default() -> Self { HashMap::new() }
}

impl<K, V> Extend<(K, V)> for HashMap<V> where K: Into<String> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, it: I) {
        for (key, value) in it { self.set(key, value); }
    }
}

impl<K, V> FromIterator<(K, V)> for HashMap<V> where K: Into<String> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(it: I) -> Self {
        let mut map = HashMap::new();
        map.extend(it);
        map
    }
}

impl<'a, V> IntoIterator for &'a HashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Iter<'a, V> { self.iter() }
}

/// An iterator over a map's entries.
pub struct Iter<'a, V: 'a> {
    buckets: slice::Iter<'a, Chain<V>>,
    chain: Option<&'a Entry<V>>,
    remaining: usize,
}

impl<'a, V> Clone for Iter<'a, V> {
    fn clone(&self) -> Self {
        Iter { buckets: self.buckets.clone(), chain: self.chain, remaining: self.remaining }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<(&'a str, &'a V)> {
        loop {
            if let Some(entry) = self.chain {
                self.chain = entry.next.as_deref();
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }

            self.chain = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<'a, V> ExactSizeIterator for Iter<'a, V> {}

#[cfg(test)]
mod test {
    use super::{bucket_index, HashMap};

    #[test]
    fn hash_matches_exact_polynomial() {
        fn exact(key: &str) -> u128 {
            key.encode_utf16().fold(0, |hash, unit| hash * 31 + u128::from(unit))
        }

        for key in ["apple", "banana", "ice cream", "héllo", "🦀"] {
            for capacity in [1, 7, 16, 1000] {
                assert_eq!(bucket_index(key, capacity) as u128, exact(key) % capacity as u128);
            }
        }
    }

    #[test]
    fn chains_keep_insertion_order() {
        let mut map = HashMap::with_capacity(1);
        map.set("c", 3);
        map.set("a", 1);
        map.set("b", 2);
        map.set("a", 10);

        assert_eq!(map.entries().collect::<Vec<_>>(), [("c", &3), ("a", &10), ("b", &2)]);
    }

    #[test]
    fn removing_from_the_middle_of_a_chain() {
        let mut map = HashMap::with_capacity(1);
        map.extend(vec![("x", 1), ("y", 2), ("z", 3)]);

        assert_eq!(map.remove_entry("y"), Some(("y".to_string(), 2)));
        assert_eq!(map.keys().collect::<Vec<_>>(), ["x", "z"]);
        assert!(!map.remove("y"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn zero_capacity_is_one_bucket() {
        let mut map = HashMap::with_capacity(0);
        map.set("key", ());
        assert_eq!(map.capacity(), 1);
        assert!(map.has("key"));
    }

    #[test]
    fn long_chains_drop() {
        let mut map = HashMap::with_capacity(1);
        for i in 0..5_000 { map.set(i.to_string(), i); }
        assert_eq!(map.len(), 5_000);
    }
}
