use crate::value::Value;

/// An opaque handle into a `Heap`'s object arena. Two handles are equal iff they
/// name the same heap object — this is what makes `Value::Obj` equality by
/// identity rather than by content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjHandle(usize);

/// The kind of object a `Heap` entry holds. Only strings exist today; the tag
/// leaves room for the arena to grow more heap kinds later.
enum HeapObject {
  Str(StringObject),
}

struct StringObject {
  bytes: Vec<u8>,
  hash: u32,
}

/// The VM's object arena: every heap-allocated value a `Value::Obj` can name
/// lives here, addressed by `ObjHandle`. Dropping the `Heap` (which happens
/// when the owning VM is dropped) releases every object it holds in one step —
/// the arena plays the role of the reference design's intrusive object list.
#[derive(Default)]
pub struct Heap {
  objects: Vec<HeapObject>,
}

impl Heap {
  /// Allocates a new string object from `bytes`, without interning. Callers
  /// that want canonicalized strings should go through `StringInterner` instead.
  pub fn alloc_string(&mut self, bytes: Vec<u8>) -> ObjHandle {
    let hash = fnv1a_hash(&bytes);
    self.objects.push(HeapObject::Str(StringObject { bytes, hash }));
    ObjHandle(self.objects.len() - 1)
  }

  pub fn is_string(&self, handle: ObjHandle) -> bool {
    matches!(self.objects[handle.0], HeapObject::Str(_))
  }

  pub fn string_bytes(&self, handle: ObjHandle) -> &[u8] {
    let HeapObject::Str(s) = &self.objects[handle.0];
    &s.bytes
  }

  pub fn string_hash(&self, handle: ObjHandle) -> u32 {
    let HeapObject::Str(s) = &self.objects[handle.0];
    s.hash
  }

  /// The number of objects currently tracked by the arena.
  pub fn len(&self) -> usize {
    self.objects.len()
  }

  pub fn is_empty(&self) -> bool {
    self.objects.is_empty()
  }
}

/// FNV-1a, 32-bit, over raw bytes. Used both to hash new string objects and to
/// probe the intern table before allocating.
pub fn fnv1a_hash(bytes: &[u8]) -> u32 {
  const FNV_OFFSET_BASIS: u32 = 2166136261;
  const FNV_PRIME: u32 = 16777619;

  let mut hash = FNV_OFFSET_BASIS;
  for &b in bytes {
    hash ^= b as u32;
    hash = hash.wrapping_mul(FNV_PRIME);
  }
  hash
}

/// Owns the VM's object arena and its string-intern set together, since every
/// string allocation must go through interning. Mirrors `copyString`/
/// `takeString` from the reference design as `intern_copy`/`intern_owned`.
#[derive(Default)]
pub struct StringInterner {
  pub heap: Heap,
  strings: crate::table::Table,
}

impl StringInterner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Interns a copy of `bytes`. Returns the existing handle on a hit, or
  /// allocates, interns and returns a new one on a miss.
  pub fn intern_copy(&mut self, bytes: &[u8]) -> ObjHandle {
    let hash = fnv1a_hash(bytes);
    if let Some(existing) = self.strings.find_string(&self.heap, bytes, hash) {
      return existing;
    }
    let handle = self.heap.alloc_string(bytes.to_vec());
    self.strings.set(&self.heap, handle, Value::Nil);
    handle
  }

  /// Interns `bytes` by adopting the buffer directly on a miss, rather than
  /// copying it. Used by concatenation, which already owns a fresh buffer.
  pub fn intern_owned(&mut self, bytes: Vec<u8>) -> ObjHandle {
    let hash = fnv1a_hash(&bytes);
    if let Some(existing) = self.strings.find_string(&self.heap, &bytes, hash) {
      return existing;
    }
    let handle = self.heap.alloc_string(bytes);
    self.strings.set(&self.heap, handle, Value::Nil);
    handle
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn distinct_allocations_get_distinct_handles() {
    let mut heap = Heap::default();
    let a = heap.alloc_string(b"foo".to_vec());
    let b = heap.alloc_string(b"foo".to_vec());
    assert_ne!(a, b, "alloc_string never deduplicates; interning is the caller's job");
  }

  #[test]
  fn hash_is_stable_for_equal_bytes() {
    assert_eq!(fnv1a_hash(b"str"), fnv1a_hash(b"str"));
    assert_ne!(fnv1a_hash(b"str"), fnv1a_hash(b"other"));
  }

  #[test]
  fn interning_the_same_bytes_twice_yields_one_handle() {
    let mut interner = StringInterner::new();
    let a = interner.intern_copy(b"shared");
    let b = interner.intern_copy(b"shared");
    assert_eq!(a, b);
    assert_eq!(interner.heap.len(), 1);
  }

  #[test]
  fn intern_owned_adopts_the_buffer_on_a_miss() {
    let mut interner = StringInterner::new();
    let handle = interner.intern_owned(b"owned".to_vec());
    assert_eq!(interner.heap.string_bytes(handle), b"owned");
  }

  #[test]
  fn distinct_bytes_intern_to_distinct_handles() {
    let mut interner = StringInterner::new();
    let a = interner.intern_copy(b"one");
    let b = interner.intern_copy(b"two");
    assert_ne!(a, b);
  }
}
