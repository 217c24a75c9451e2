use log::{debug, trace};

use crate::error::{CollectionError, Result};
use crate::slot_hasher::{AdditiveHasher, SlotHasher};

/// A fixed-size table of slots addressed by hashing string keys. It never
/// resizes and it never chains.
///
/// The key is hashed to a slot index, so we don't actually store it anywhere.
/// Two keys that land on the same slot are the same key as far as the table is
/// concerned: inserting the second overwrites whatever the first put there, and
/// either key retrieves or removes it afterwards.
pub struct HashTable<V, H = AdditiveHasher>
where
    H: SlotHasher,
{
    storage: Vec<Option<V>>,
    len: usize,
    hasher: H,
}

impl<V> HashTable<V, AdditiveHasher> {
    /// Makes a new HashTable with `capacity` slots using the additive hash.
    pub fn new(capacity: usize) -> Result<Self> {
        HashTable::with_slot_hasher(capacity, AdditiveHasher::default())
    }
}

impl<V, H> HashTable<V, H>
where
    H: SlotHasher,
{
    /// Makes a new HashTable with `capacity` slots and a specific hasher.
    pub fn with_slot_hasher(capacity: usize, hasher: H) -> Result<Self> {
        if capacity == 0 {
            return Err(CollectionError::ZeroCapacity);
        }

        let mut storage = Vec::with_capacity(capacity);
        storage.resize_with(capacity, || None);

        Ok(Self {
            storage,
            len: 0,
            hasher,
        })
    }

    /// The slot `key` hashes to, always in `[0, capacity)`.
    pub fn slot_of(&self, key: &str) -> usize {
        let capacity = self.storage.len();
        self.hasher.slot(key, capacity) % capacity
    }

    /// Stores `value` in the slot `key` hashes to, returning whatever was in
    /// that slot before, no matter which key put it there.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let slot = self.slot_of(key);
        let previous = self.storage[slot].replace(value);

        if previous.is_some() {
            debug!("key {:?} overwrote occupied slot {}", key, slot);
        } else {
            self.len += 1;
            trace!("key {:?} stored in slot {}", key, slot);
        }

        previous
    }

    /// The value in the slot `key` hashes to.
    pub fn retrieve(&self, key: &str) -> Result<&V> {
        let slot = self.slot_of(key);
        self.storage[slot]
            .as_ref()
            .ok_or(CollectionError::SlotAbsent { slot })
    }

    /// A mutable reference to the value in the slot `key` hashes to.
    pub fn retrieve_mut(&mut self, key: &str) -> Result<&mut V> {
        let slot = self.slot_of(key);
        self.storage[slot]
            .as_mut()
            .ok_or(CollectionError::SlotAbsent { slot })
    }

    /// Empties the slot `key` hashes to, returning whatever was there.
    pub fn remove(&mut self, key: &str) -> Result<V> {
        let slot = self.slot_of(key);

        match self.storage[slot].take() {
            Some(value) => {
                self.len -= 1;
                trace!("key {:?} cleared slot {}", key, slot);
                Ok(value)
            }
            None => {
                debug!("key {:?} hashes to empty slot {}", key, slot);
                Err(CollectionError::SlotAbsent { slot })
            }
        }
    }

    /// Whether the slot `key` hashes to is occupied, by this key or any other.
    pub fn contains_key(&self, key: &str) -> bool {
        self.storage[self.slot_of(key)].is_some()
    }

    /// The number of slots, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// The number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Empties every slot. The capacity stays where it was.
    pub fn clear(&mut self) {
        self.storage.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }

    /// Occupied slots and their values, in slot order.
    pub fn occupied_slots(&self) -> impl Iterator<Item = (usize, &V)> + '_ {
        self.storage
            .iter()
            .enumerate()
            .filter_map(|(slot, value)| value.as_ref().map(|v| (slot, v)))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::HashTable;
    use crate::error::CollectionError;
    use crate::slot_hasher::{AdditiveHasher, SlotHasher};
    use crate::test_support::init_test_logger;

    /// Puts every key in slot zero, which makes collisions easy to arrange.
    struct ZeroHasher;

    impl SlotHasher for ZeroHasher {
        fn slot(&self, _key: &str, _capacity: usize) -> usize {
            0
        }
    }

    /// Ignores the capacity and hands back the key length.
    struct LengthHasher;

    impl SlotHasher for LengthHasher {
        fn slot(&self, key: &str, _capacity: usize) -> usize {
            key.len()
        }
    }

    #[test]
    fn test_out_of_range_hasher_is_reduced() {
        let mut table = HashTable::with_slot_hasher(4, LengthHasher).unwrap();

        // 16 bytes lands in slot 16 % 4 = 0
        assert_eq!(0, table.slot_of("longer-than-four"));
        assert_eq!(None, table.insert("longer-than-four", 1));
        assert_eq!(Ok(&1), table.retrieve("longer-than-four"));

        // 5 bytes is 1 modulo 4, same as "x"
        table.insert("fives", 2);
        assert_eq!(Ok(&2), table.retrieve("x"));
        assert!(table.contains_key("abcde"));
        assert_eq!(Ok(2), table.remove("x"));
        assert_eq!(vec![(0, &1)], table.occupied_slots().collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_capacity() {
        assert!(matches!(
            HashTable::<u32>::new(0),
            Err(CollectionError::ZeroCapacity)
        ));
    }

    /// Capacity ten puts "a" in slot 1 and "b" in slot 4.
    #[test]
    fn test_insert_retrieve_remove() {
        init_test_logger();
        let mut table = HashTable::new(10).unwrap();

        assert_eq!(1, table.slot_of("a"));
        assert_eq!(4, table.slot_of("b"));

        assert_eq!(None, table.insert("a", "apple"));
        assert_eq!(None, table.insert("b", "banana"));
        assert_eq!(2, table.len());

        assert_eq!(Ok(&"apple"), table.retrieve("a"));
        assert_eq!(Ok("apple"), table.remove("a"));
        assert_eq!(
            Err(CollectionError::SlotAbsent { slot: 1 }),
            table.retrieve("a")
        );

        // "b" is untouched
        assert_eq!(Ok(&"banana"), table.retrieve("b"));
        assert_eq!(1, table.len());
    }

    #[test]
    fn test_retrieve_never_inserted() {
        let table: HashTable<i32> = HashTable::new(10).unwrap();
        assert_eq!(
            Err(CollectionError::SlotAbsent { slot: 4 }),
            table.retrieve("b")
        );
    }

    #[test]
    fn test_falsy_values_are_present() {
        let mut table = HashTable::new(10).unwrap();
        table.insert("zero", 0);
        table.insert("blank", 0);

        assert_eq!(Ok(&0), table.retrieve("zero"));
    }

    #[test]
    fn test_remove_twice() {
        let mut table = HashTable::new(5).unwrap();
        table.insert("k", 1);

        assert_eq!(Ok(1), table.remove("k"));
        assert!(matches!(
            table.remove("k"),
            Err(CollectionError::SlotAbsent { .. })
        ));
        assert!(table.is_empty());
    }

    #[rstest]
    #[case("listen", "silent", 17)]
    #[case("a", "k", 10)]
    #[case("ab", "ba", 3)]
    fn test_collision_collapse(#[case] first: &str, #[case] second: &str, #[case] capacity: usize) {
        init_test_logger();
        let mut table = HashTable::new(capacity).unwrap();
        assert_eq!(table.slot_of(first), table.slot_of(second));

        table.insert(first, 1);
        assert_eq!(Some(1), table.insert(second, 2));

        // both keys see the later value
        assert_eq!(Ok(&2), table.retrieve(first));
        assert_eq!(Ok(&2), table.retrieve(second));
        assert_eq!(1, table.len());

        // and removing through either key empties the shared slot
        assert_eq!(Ok(2), table.remove(first));
        assert!(!table.contains_key(second));
    }

    #[test]
    fn test_custom_hasher() {
        let mut table = HashTable::with_slot_hasher(4, ZeroHasher).unwrap();
        table.insert("north", 'n');
        table.insert("south", 's');

        assert_eq!(vec![(0, &'s')], table.occupied_slots().collect::<Vec<_>>());
    }

    #[test]
    fn test_slots_stay_in_range() {
        let table: HashTable<()> = HashTable::new(7).unwrap();
        let hasher = AdditiveHasher::default();

        for key in &["", "a", "zebra", "a much longer key than the others", "\u{1f600}"] {
            assert!(table.slot_of(key) < table.capacity());
            assert_eq!(hasher.slot(key, 7), table.slot_of(key));
        }
    }

    #[test]
    fn test_retrieve_mut_and_clear() {
        let mut table = HashTable::new(3).unwrap();
        table.insert("x", vec![1]);

        if let Ok(v) = table.retrieve_mut("x") {
            v.push(2);
        }
        assert_eq!(Ok(&vec![1, 2]), table.retrieve("x"));

        table.clear();
        assert!(table.is_empty());
        assert_eq!(3, table.capacity());
        assert!(!table.contains_key("x"));
    }
}
