use super::descriptor::{Descriptor, TypeDescriptor};
use super::object::size_of_array;
use crate::def::*;
use std::mem::size_of;
use std::ptr;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ObjectKind {
  Object,
  Array,
}

const OBJECT_TAG: i32 = 0;
const ARRAY_TAG: i32 = 1;

///
/// Fixed prefix of every allocated value.
///
/// |--descriptor--|--kind--|--length--|--forwarding--|--payload...
/// |----ptr-------|--i32---|---u32----|-----ptr------|
///
/// References handed out to callers point at the payload, right after the header.
/// Objects are packed without padding, so headers are always accessed unaligned.
///
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct ObjectHeader {
  descriptor: *const TypeDescriptor,
  kind: i32,
  length: u32,
  forwarding: Addr,
}

pub const HEADER_SIZE: usize = size_of::<ObjectHeader>();
const_assert_eq!(HEADER_SIZE, 2 * PTR_SIZE + 2 * size_of::<u32>());

impl ObjectHeader {
  pub fn object(descriptor: Descriptor) -> ObjectHeader {
    return ObjectHeader {
      descriptor: descriptor.as_ptr(),
      kind: OBJECT_TAG,
      length: 0,
      forwarding: ptr::null_mut(),
    };
  }

  pub fn array(length: u32) -> ObjectHeader {
    return ObjectHeader {
      descriptor: ptr::null(),
      kind: ARRAY_TAG,
      length,
      forwarding: ptr::null_mut(),
    };
  }

  #[inline]
  pub unsafe fn load(header: Addr) -> ObjectHeader {
    return ptr::read_unaligned(header as *const ObjectHeader);
  }

  #[inline]
  pub unsafe fn store(&self, header: Addr) {
    ptr::write_unaligned(header as *mut ObjectHeader, *self);
  }

  pub fn descriptor(&self) -> Option<Descriptor> {
    return unsafe { Descriptor::from_raw(self.descriptor) };
  }

  pub fn kind(&self) -> ObjectKind {
    if self.kind == ARRAY_TAG {
      return ObjectKind::Array;
    }
    debug_assert_eq!(self.kind, OBJECT_TAG, "Corrupted object header");
    return ObjectKind::Object;
  }

  pub fn is_array(&self) -> bool {
    return self.kind() == ObjectKind::Array;
  }

  pub fn length(&self) -> u32 {
    return self.length;
  }

  /// Header address of this record's copy in the current round, or null.
  pub fn forwarding(&self) -> Addr {
    return self.forwarding;
  }

  pub fn set_forwarding(&mut self, addr: Addr) {
    self.forwarding = addr;
  }

  /// Size of the whole record, header included.
  pub fn record_size(&self) -> usize {
    return match self.kind() {
      ObjectKind::Array => size_of_array(self.length as usize),
      ObjectKind::Object => match self.descriptor() {
        Some(descriptor) => descriptor.object_size(),
        None => HEADER_SIZE,
      },
    };
  }
}

impl std::fmt::Debug for ObjectHeader {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(
      f,
      "ObjectHeader {{
  descriptor: {:p},
  kind: {:?},
  length: {},
  forwarding: {:p}
}}",
      self.descriptor,
      self.kind(),
      self.length,
      self.forwarding,
    );
  }
}
