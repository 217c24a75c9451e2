use thiserror::Error;

/// Everything that can go wrong when poking at one of the collections. None of
/// these are fatal; the structure is left exactly as it was before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// The operation needs at least one element and there are none.
    #[error("operation requires a non-empty structure")]
    EmptyStructure,

    /// A node handle was given to a linked list that doesn't hold that node,
    /// either because it never did or because the node was already removed.
    #[error("node is not present in this list")]
    NotFound,

    /// Nothing has been stored in the slot the key hashes to.
    #[error("hash table slot {slot} is empty")]
    SlotAbsent { slot: usize },

    /// A hash table can't reduce anything modulo zero.
    #[error("hash table capacity must be greater than zero")]
    ZeroCapacity,

    /// The operation touches more elements than are present.
    #[error("operation requires {required} elements but only {len} are present")]
    InsufficientElements { required: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, CollectionError>;

#[cfg(test)]
mod tests {
    use super::CollectionError;

    #[test]
    fn test_display() {
        assert_eq!(
            "hash table slot 4 is empty",
            CollectionError::SlotAbsent { slot: 4 }.to_string()
        );
        assert_eq!(
            "operation requires 2 elements but only 1 are present",
            CollectionError::InsufficientElements { required: 2, len: 1 }.to_string()
        );
    }
}
