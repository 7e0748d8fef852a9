use crate::object::{Heap, ObjHandle};
use crate::value::Value;

const LOAD_FACTOR_MAX: f64 = 0.75;
const MIN_CAPACITY: usize = 8;

/// A single cell in the table's backing array. Three states rather than the
/// reference implementation's `Value`-sentinel reuse: an enum says directly
/// what a memory-layout trick only implies.
#[derive(Clone)]
enum Slot {
  Empty,
  Tombstone,
  Occupied { key: ObjHandle, value: Value },
}

/// An open-addressed, linearly-probed hash table keyed by interned string
/// handles. Used both as a map (globals, in a fuller implementation) and as a
/// set (the VM's string-intern table, where the value slot goes unused).
pub struct Table {
  entries: Vec<Slot>,
  count: usize,
}

impl Default for Table {
  fn default() -> Self {
    Table { entries: Vec::new(), count: 0 }
  }
}

impl Table {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn count(&self) -> usize {
    self.count
  }

  pub fn capacity(&self) -> usize {
    self.entries.len()
  }

  /// Looks up `key`, returning its value if the table holds a live entry for it.
  pub fn get(&self, heap: &Heap, key: ObjHandle) -> Option<Value> {
    if self.entries.is_empty() {
      return None;
    }
    let idx = self.find_slot(heap, key);
    match &self.entries[idx] {
      Slot::Occupied { value, .. } => Some(*value),
      _ => None,
    }
  }

  /// Inserts or overwrites `key`'s value. Returns `true` if this created a new
  /// entry (the key was not already present).
  pub fn set(&mut self, heap: &Heap, key: ObjHandle, value: Value) -> bool {
    if self.count + 1 > (self.capacity() as f64 * LOAD_FACTOR_MAX) as usize {
      let new_capacity = std::cmp::max(MIN_CAPACITY, self.capacity() * 2);
      self.grow(heap, new_capacity);
    }

    let idx = self.find_slot(heap, key);
    let is_new = !matches!(self.entries[idx], Slot::Occupied { .. });
    if is_new && matches!(self.entries[idx], Slot::Empty) {
      self.count += 1;
    }
    self.entries[idx] = Slot::Occupied { key, value };
    is_new
  }

  /// Marks `key`'s entry as a tombstone. Returns `true` if an entry was present.
  pub fn delete(&mut self, heap: &Heap, key: ObjHandle) -> bool {
    if self.entries.is_empty() {
      return false;
    }
    let idx = self.find_slot(heap, key);
    if matches!(self.entries[idx], Slot::Occupied { .. }) {
      self.entries[idx] = Slot::Tombstone;
      true
    } else {
      false
    }
  }

  /// Probes for a stored key whose hash, length and bytes all match `bytes`,
  /// without needing a pre-existing handle for it. This is what lets the
  /// interner ask "do I already have this string" before allocating one.
  pub fn find_string(&self, heap: &Heap, bytes: &[u8], hash: u32) -> Option<ObjHandle> {
    if self.entries.is_empty() {
      return None;
    }
    let capacity = self.capacity();
    let mut idx = (hash as usize) % capacity;
    loop {
      match &self.entries[idx] {
        Slot::Empty => return None,
        Slot::Tombstone => {}
        Slot::Occupied { key, .. } => {
          if heap.string_hash(*key) == hash && heap.string_bytes(*key) == bytes {
            return Some(*key);
          }
        }
      }
      idx = (idx + 1) % capacity;
    }
  }

  /// Finds the slot that `key` either already occupies, or should be inserted
  /// into: the first tombstone seen, or the terminating empty cell.
  fn find_slot(&self, heap: &Heap, key: ObjHandle) -> usize {
    let capacity = self.capacity();
    let hash = heap.string_hash(key);
    let mut idx = (hash as usize) % capacity;
    let mut tombstone: Option<usize> = None;
    loop {
      match &self.entries[idx] {
        Slot::Empty => return tombstone.unwrap_or(idx),
        Slot::Tombstone => {
          if tombstone.is_none() {
            tombstone = Some(idx);
          }
        }
        Slot::Occupied { key: k, .. } => {
          if *k == key {
            return idx;
          }
        }
      }
      idx = (idx + 1) % capacity;
    }
  }

  fn grow(&mut self, heap: &Heap, new_capacity: usize) {
    let old_entries = std::mem::replace(&mut self.entries, vec![Slot::Empty; new_capacity]);
    self.count = 0;
    for slot in old_entries {
      if let Slot::Occupied { key, value } = slot {
        let idx = self.find_slot(heap, key);
        self.entries[idx] = Slot::Occupied { key, value };
        self.count += 1;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn set_then_get_then_delete() {
    let mut heap = Heap::default();
    let mut table = Table::new();
    let key = heap.alloc_string(b"hello".to_vec());

    assert!(table.set(&heap, key, Value::Number(1.0)));
    assert_eq!(table.get(&heap, key), Some(Value::Number(1.0)));

    assert!(table.delete(&heap, key));
    assert_eq!(table.get(&heap, key), None);
  }

  #[test]
  fn overwriting_an_existing_key_is_not_a_new_entry() {
    let mut heap = Heap::default();
    let mut table = Table::new();
    let key = heap.alloc_string(b"x".to_vec());

    assert!(table.set(&heap, key, Value::Number(1.0)));
    assert!(!table.set(&heap, key, Value::Number(2.0)));
    assert_eq!(table.get(&heap, key), Some(Value::Number(2.0)));
  }

  #[test]
  fn grows_and_preserves_entries_under_load() {
    let mut heap = Heap::default();
    let mut table = Table::new();
    let mut keys = Vec::new();
    for i in 0..100 {
      let key = heap.alloc_string(format!("key{i}").into_bytes());
      table.set(&heap, key, Value::Number(i as f64));
      keys.push(key);
    }

    assert!(table.capacity() >= MIN_CAPACITY);
    assert!((table.count() as f64) / (table.capacity() as f64) <= LOAD_FACTOR_MAX);
    for (i, key) in keys.iter().enumerate() {
      assert_eq!(table.get(&heap, *key), Some(Value::Number(i as f64)));
    }
  }

  #[test]
  fn find_string_locates_a_matching_live_entry() {
    let mut heap = Heap::default();
    let mut table = Table::new();
    let key = heap.alloc_string(b"needle".to_vec());
    table.set(&heap, key, Value::Nil);

    let hash = heap.string_hash(key);
    assert_eq!(table.find_string(&heap, b"needle", hash), Some(key));
    assert_eq!(table.find_string(&heap, b"hay", hash), None);
  }

  #[test]
  fn find_string_skips_tombstones_left_by_delete() {
    let mut heap = Heap::default();
    let mut table = Table::new();
    let a = heap.alloc_string(b"a".to_vec());
    let b = heap.alloc_string(b"b".to_vec());
    table.set(&heap, a, Value::Nil);
    table.set(&heap, b, Value::Nil);
    table.delete(&heap, a);

    let hash = heap.string_hash(b);
    assert_eq!(table.find_string(&heap, b"b", hash), Some(b));
  }
}
