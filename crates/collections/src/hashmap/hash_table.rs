use crate::hashmap::InsertError;

/// Computes the raw key of `name`: the sum of its character codes
/// plus the product of its first and last character.
///
/// The empty name has a raw key of `0`.
pub fn raw_key(name: &str) -> u64 {
    let sum = name
        .chars()
        .fold(0u64, |acc, c| acc.wrapping_add(c as u64));

    let edges = match (name.chars().next(), name.chars().next_back()) {
        (Some(first), Some(last)) => (first as u64).wrapping_mul(last as u64),
        _ => 0,
    };

    sum.wrapping_add(edges)
}

/// An occupied slot. Its raw key is always computed from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot<V> {
    name: String,
    key: u64,
    value: V,
}

impl<V> Slot<V> {
    pub fn new<S: Into<String>>(name: S, value: V) -> Self {
        let name = name.into();
        Self {
            key: raw_key(&name),
            name,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }
}

/// Decides when an occupied slot belongs to the key being probed for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Slots match on raw key alone, so two names with an equal
    /// raw key share one slot
    #[default]
    RawKey,
    /// Slots match on raw key and exact name
    Name,
}

impl MatchPolicy {
    #[inline]
    fn matches<V>(self, slot: &Slot<V>, key: u64, name: &str) -> bool {
        match self {
            MatchPolicy::RawKey => slot.key == key,
            MatchPolicy::Name => slot.key == key && slot.name == name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Occupied(usize),
    Vacant(usize),
    Exhausted,
}

/// Fixed capacity, open addressing hash table using linear probing.
///
/// The table never grows: once every slot is taken, inserting a new key fails.
#[derive(Debug)]
pub struct HashTable<V> {
    slots: Vec<Option<Slot<V>>>,
    items: usize,
    policy: MatchPolicy,
}

#[derive(Debug)]
pub struct Iter<'a, V> {
    inner: std::slice::Iter<'a, Option<Slot<V>>>,
}

impl<V> HashTable<V> {
    /// Creates a table with exactly `cap` slots
    pub fn with_capacity(cap: usize) -> Self {
        Self::with_policy(cap, MatchPolicy::default())
    }

    pub fn with_policy(cap: usize, policy: MatchPolicy) -> Self {
        Self {
            slots: (0..cap).map(|_| None).collect(),
            items: 0,
            policy,
        }
    }

    /// Builds a table sized to the number of `entries`, inserting them in order.
    ///
    /// Entries that cannot be placed are dropped, and their errors are
    /// returned next to the table.
    pub fn build<I, S>(entries: I, policy: MatchPolicy) -> (Self, Vec<InsertError>)
    where
        I: IntoIterator<Item = (S, V)>,
        I::IntoIter: ExactSizeIterator,
        S: Into<String>,
    {
        let entries = entries.into_iter();
        let mut table = Self::with_policy(entries.len(), policy);
        let mut dropped = Vec::new();

        for (name, value) in entries {
            if let Err(e) = table.insert(name, value) {
                dropped.push(e);
            }
        }

        (table, dropped)
    }

    /// Returns the number of occupied slots
    pub fn len(&self) -> usize {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn load_factor_f32(&self) -> f32 {
        if self.capacity() == 0 {
            0f32
        } else {
            (self.items as f32) / self.capacity() as f32
        }
    }

    /// Shorthand for `self.put(slot!(name, value))`
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        value: V,
    ) -> Result<Option<V>, InsertError> {
        self.put(Slot::new(name, value))
    }

    /// Places `slot` at the first vacant or matching slot of its probe sequence,
    /// returning the value it replaced (if there was any)
    pub fn put(&mut self, slot: Slot<V>) -> Result<Option<V>, InsertError> {
        match self.probe(slot.key, &slot.name).0 {
            Probe::Vacant(i) => {
                self.slots[i] = Some(slot);
                self.items += 1;
                Ok(None)
            }
            Probe::Occupied(i) => {
                let old = std::mem::replace(&mut self.slots[i], Some(slot));
                Ok(old.map(Slot::into_value))
            }
            Probe::Exhausted => Err(InsertError::TableFull {
                home: self.home(slot.key),
                capacity: self.capacity(),
                name: slot.name,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.get_slot(name).map(|s| &s.value)
    }

    /// Returns the slot matching `name`.
    ///
    /// Under [`MatchPolicy::RawKey`] the slot may hold a different name
    /// with the same raw key.
    pub fn get_slot(&self, name: &str) -> Option<&Slot<V>> {
        match self.probe(raw_key(name), name).0 {
            Probe::Occupied(i) => self.slots[i].as_ref(),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get_slot(name).is_some()
    }

    /// Number of slots a lookup of `name` visits before it terminates
    pub fn probe_len(&self, name: &str) -> usize {
        self.probe(raw_key(name), name).1
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.slots.iter(),
        }
    }

    // [private]

    #[inline]
    fn home(&self, key: u64) -> usize {
        match self.capacity() {
            0 => 0,
            cap => (key % cap as u64) as usize,
        }
    }

    /// Walks the probe sequence from the home slot of `key`, stepping by one.
    /// Stops at the first empty or matching slot, or once it wraps back home.
    fn probe(&self, key: u64, name: &str) -> (Probe, usize) {
        let cap = self.capacity();
        if cap == 0 {
            return (Probe::Exhausted, 0);
        }

        let home = self.home(key);
        let mut i = home;
        let mut visited = 0;
        loop {
            visited += 1;
            match &self.slots[i] {
                None => return (Probe::Vacant(i), visited),
                Some(s) if self.policy.matches(s, key, name) => {
                    return (Probe::Occupied(i), visited);
                }
                Some(_) => {}
            }

            i = (i + 1) % cap;
            if i == home {
                return (Probe::Exhausted, visited);
            }
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Slot<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().flatten().next()
    }
}
