use super::header::HEADER_SIZE;
use crate::def::*;
use std::ops::Deref;
use std::ptr::NonNull;

/// Kind of one payload slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Slot {
  Scalar,
  Reference,
}

impl Slot {
  #[inline]
  pub const fn width(self) -> usize {
    return match self {
      Slot::Scalar => SCALAR_SIZE,
      Slot::Reference => REFERENCE_SIZE,
    };
  }
}

///
/// Per-class layout of an object's payload (the class map).
/// One symbol per slot, in declaration order. Drives both the object size
/// and reference discovery while scanning.
///
#[derive(Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
  slots: Box<[Slot]>,
  payload_size: usize,
}

impl TypeDescriptor {
  pub fn new(slots: Vec<Slot>) -> TypeDescriptor {
    let payload_size = slots.iter().map(|slot| slot.width()).sum();
    return TypeDescriptor {
      slots: slots.into_boxed_slice(),
      payload_size,
    };
  }

  pub fn empty() -> TypeDescriptor {
    return TypeDescriptor::new(Vec::new());
  }

  ///
  /// Decodes a compiler gc map. `b'0'` marks a scalar slot and every other
  /// byte a reference slot. Decoding stops at the first NUL byte.
  ///
  pub fn from_gc_map(map: &[u8]) -> TypeDescriptor {
    let slots = map
      .iter()
      .take_while(|c| **c != 0)
      .map(|c| if *c == b'0' { Slot::Scalar } else { Slot::Reference })
      .collect();
    return TypeDescriptor::new(slots);
  }

  pub fn to_gc_map(&self) -> String {
    return self
      .slots
      .iter()
      .map(|slot| match slot {
        Slot::Scalar => '0',
        Slot::Reference => '1',
      })
      .collect();
  }

  pub fn slots(&self) -> &[Slot] {
    return &self.slots;
  }

  pub fn len(&self) -> usize {
    return self.slots.len();
  }

  pub fn is_empty(&self) -> bool {
    return self.slots.is_empty();
  }

  pub fn payload_size(&self) -> usize {
    return self.payload_size;
  }

  /// Header plus payload.
  pub fn object_size(&self) -> usize {
    return HEADER_SIZE + self.payload_size;
  }

  /// Byte offset of slot `index` from the payload base.
  pub fn offset_of(&self, index: usize) -> usize {
    return self.slots[..index].iter().map(|slot| slot.width()).sum();
  }

  pub fn slot(&self, index: usize) -> Slot {
    return self.slots[index];
  }

  /// Payload offsets of every reference slot. Scalar slots are skipped by width.
  pub fn reference_offsets(&self) -> impl Iterator<Item = usize> + '_ {
    let mut offset = 0;
    return self.slots.iter().filter_map(move |slot| {
      let current = offset;
      offset += slot.width();
      if *slot == Slot::Reference {
        return Some(current);
      }
      return None;
    });
  }
}

impl std::fmt::Debug for TypeDescriptor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "TypeDescriptor({:?}, {} bytes)", self.to_gc_map(), self.payload_size);
  }
}

/// Handle to a descriptor owned by a `DescriptorTable`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Descriptor(NonNull<TypeDescriptor>);

impl Descriptor {
  ///
  /// # Safety
  /// `ptr` must be non-null and point at a descriptor that outlives every object
  /// and frame referring to it.
  ///
  pub unsafe fn from_raw(ptr: *const TypeDescriptor) -> Option<Descriptor> {
    return NonNull::new(ptr as *mut TypeDescriptor).map(Descriptor);
  }

  pub fn as_ptr(&self) -> *const TypeDescriptor {
    return self.0.as_ptr();
  }
}

impl Deref for Descriptor {
  type Target = TypeDescriptor;
  fn deref(&self) -> &TypeDescriptor {
    return unsafe { self.0.as_ref() };
  }
}

impl std::fmt::Debug for Descriptor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{:?} @ {:p}", **self, self.0.as_ptr());
  }
}

/// Owns descriptors at stable addresses for the lifetime of a runtime.
#[derive(Default)]
pub struct DescriptorTable {
  descriptors: Vec<Box<TypeDescriptor>>,
}

impl DescriptorTable {
  pub fn new() -> DescriptorTable {
    return DescriptorTable { descriptors: Vec::new() };
  }

  pub fn define(&mut self, descriptor: TypeDescriptor) -> Descriptor {
    let boxed = Box::new(descriptor);
    let handle = Descriptor(NonNull::from(boxed.as_ref()));
    self.descriptors.push(boxed);
    return handle;
  }

  pub fn len(&self) -> usize {
    return self.descriptors.len();
  }

  pub fn is_empty(&self) -> bool {
    return self.descriptors.is_empty();
  }
}
