//! A handful of classic data structures, each standing on its own: a singly
//! linked list with node handles, a fixed-size slot hash table, a stack and a
//! queue.

mod error;
mod hash_table;
mod linked_list;
mod queue;
mod slot_hasher;
mod stack;

#[cfg(test)]
mod test_support;

pub use error::{CollectionError, Result};
pub use hash_table::HashTable;
pub use linked_list::{Iter, LinkedList, NodeHandle};
pub use queue::Queue;
pub use slot_hasher::{AdditiveHasher, SlotHasher};
pub use stack::Stack;
