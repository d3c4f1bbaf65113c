use thiserror::Error;

mod hash_table;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InsertError {
    /// Probing wrapped back to the home slot without finding
    /// an empty slot or a slot holding the same key
    #[error("No free slot for {name:?}, probed all {capacity} slots from home slot {home}")]
    TableFull {
        name: String,
        capacity: usize,
        home: usize,
    },
}

pub use hash_table::{HashTable, Iter, MatchPolicy, Slot, raw_key};
