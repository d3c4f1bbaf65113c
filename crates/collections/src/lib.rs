pub mod hashmap;
mod macros;

pub use hashmap::{HashTable, InsertError, MatchPolicy, Slot, raw_key};
